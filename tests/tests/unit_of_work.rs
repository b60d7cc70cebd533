use petrel::{stmt::Value, Db, Record};
use petrel_core::record;
use tests::{models, setup, Setup};

use std::time::Duration;

#[test]
fn rollback_discards_uncommitted_writes() {
    let Setup { mut db, .. } = setup(models::USER_SQL);
    let user = models::user();

    let mut ann = Record::new(&user);
    ann.set(&mut db, record! { "email" => "ann@b.com" }).unwrap();
    db.commit().unwrap();

    let mut bob = Record::new(&user);
    bob.set(&mut db, record! { "email" => "bob@b.com" }).unwrap();
    assert_eq!(bob.id(), Some(&Value::I64(2)));
    db.rollback().unwrap();

    assert!(db.exists(&user, &Value::I64(1)).unwrap());
    assert!(!db.exists(&user, &Value::I64(2)).unwrap());
}

#[test]
fn storage_errors_name_the_statement() {
    let Setup { mut db, .. } = setup(models::USER_SQL);

    let err = db.execute("SELECT * FROM missing", &[]).unwrap_err();

    assert!(err.is_driver());
    assert!(err.to_string().starts_with("executing `SELECT * FROM missing`"));
}

#[test]
fn connect_by_url() {
    let mut db = Db::connect("sqlite::memory:").unwrap();
    db.execute(models::USER_SQL.trim(), &[]).unwrap();

    let user = models::user();
    let mut record = Record::new(&user);
    record.set(&mut db, record! { "email" => "a@b.com" }).unwrap();
    assert!(db.exists(&user, &Value::I64(1)).unwrap());

    let err = Db::connect("postgresql://localhost/app").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

#[test]
fn slow_query_threshold_is_configurable() {
    let mut db = Db::builder()
        .slow_query_threshold(Duration::ZERO)
        .connect("sqlite::memory:")
        .unwrap();

    // Every statement is reported as slow; execution is unaffected
    let rows = db.execute("SELECT 1 AS one", &[]).unwrap();
    assert_eq!(rows[0]["one"], Value::I64(1));
}
