use petrel::{stmt::Value, Criteria, Record};
use petrel_core::record;
use tests::{models, setup, Setup};

use pretty_assertions::assert_eq;

fn ann() -> petrel_core::stmt::ValueRecord {
    record! {
        "name" => "ann",
        "address" => record! { "street" => "1 Main", "city" => "Springfield" },
    }
}

#[test]
fn pointer_child_is_saved_first_and_linked() {
    let Setup { mut db, log } = setup(models::PERSON_SQL);
    let person = models::person();

    let mut record = Record::new(&person);
    record.set(&mut db, ann()).unwrap();

    log.with_ops(|ops| {
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[0].sql,
            r#"INSERT INTO "address" ("street", "city") VALUES (?1, ?2);"#
        );
        assert_eq!(
            ops[1].sql,
            r#"INSERT INTO "person" ("name", "address") VALUES (?1, ?2);"#
        );
        assert_eq!(ops[1].params, vec![Value::from("ann"), Value::I64(1)]);
    });

    assert_eq!(record.get("address").unwrap(), Value::I64(1));
    assert!(record.get_child("address").unwrap().is_stored());
    assert!(!record.is_dirty());
}

#[test]
fn pointer_child_loads_lazily() {
    let Setup { mut db, mut log } = setup(models::PERSON_SQL);
    let person = models::person();

    Record::new(&person).set(&mut db, ann()).unwrap();
    log.clear();

    let mut loaded = Record::new(&person);
    loaded.query(&mut db, Some(Criteria::id(1))).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(loaded.get("address").unwrap(), Value::I64(1));
    assert!(loaded.get_child("address").is_none());

    let address = loaded.child(&mut db, "address").unwrap();
    assert_eq!(address.get("city").unwrap(), Value::from("Springfield"));
    assert_eq!(log.len(), 2);

    // Editing the loaded child updates only its row
    address.assign(record! { "city" => "Shelbyville" }).unwrap();
    log.clear();
    loaded.save(&mut db).unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(
        log.pop().unwrap().sql,
        r#"UPDATE "address" SET "city" = ?1 WHERE "id" = ?2;"#
    );
}

#[test]
fn setting_a_key_points_at_an_existing_row() {
    let Setup { mut db, .. } = setup(models::PERSON_SQL);
    let person = models::person();

    Record::new(&person).set(&mut db, ann()).unwrap();

    let mut bob = Record::new(&person);
    bob.set(&mut db, record! { "name" => "bob", "address" => 1 })
        .unwrap();

    let address = bob.child(&mut db, "address").unwrap();
    assert_eq!(address.get("street").unwrap(), Value::from("1 Main"));
}

#[test]
fn deleting_pointer_child_unlinks_it() {
    let Setup { mut db, mut log } = setup(models::PERSON_SQL);
    let person = models::person();
    let address = models::address();

    let mut record = Record::new(&person);
    record.set(&mut db, ann()).unwrap();
    log.clear();

    record.delete_child(&mut db, "address").unwrap();

    assert!(!log.has_delete());
    assert_eq!(log.len(), 1);
    let op = log.pop().unwrap();
    assert_eq!(op.sql, r#"UPDATE "person" SET "address" = ?1 WHERE "id" = ?2;"#);
    assert_eq!(op.params, vec![Value::Null, Value::I64(1)]);

    assert_eq!(record.get("address").unwrap(), Value::Null);
    assert!(record.get_child("address").is_none());

    // The row itself is kept
    assert!(db.exists(&address, &Value::I64(1)).unwrap());
}

#[test]
fn owned_child_stores_parent_key() {
    let Setup { mut db, mut log } = setup(models::PERSON_SQL);
    let person = models::person();

    let mut record = Record::new(&person);
    record
        .set(
            &mut db,
            record! { "name" => "ann", "passport" => record! { "number" => "X1" } },
        )
        .unwrap();

    log.with_ops(|ops| {
        assert_eq!(ops.len(), 2);
        assert!(ops[0].sql.starts_with(r#"INSERT INTO "person""#));
        assert!(ops[1].sql.starts_with(
            r#"INSERT INTO "passport" ("id", "person_id", "number") VALUES (?1, ?2, ?3)"#
        ));
        assert_eq!(ops[1].params[1], Value::I64(1));
    });

    let passport = record.get_child("passport").unwrap();
    let id = passport.id().unwrap().as_str().unwrap().to_string();
    assert_eq!(id.len(), 36);
    log.clear();

    let mut loaded = Record::new(&person);
    loaded.query(&mut db, Some(Criteria::id(1))).unwrap();

    let passport = loaded.child(&mut db, "passport").unwrap();
    assert_eq!(passport.get("number").unwrap(), Value::from("X1"));
    assert_eq!(passport.id(), Some(&Value::from(id)));

    // person, key lookup, passport
    assert_eq!(log.count(|op| op.is_select()), 3);

    loaded.delete_child(&mut db, "passport").unwrap();
    assert!(log.has_delete());
    assert!(loaded.get_child("passport").is_none());
}

#[test]
fn missing_owned_child_loads_empty() {
    let Setup { mut db, .. } = setup(models::PERSON_SQL);
    let person = models::person();

    let mut record = Record::new(&person);
    record.set(&mut db, record! { "name" => "ann" }).unwrap();

    let passport = record.child(&mut db, "passport").unwrap();
    assert!(!passport.is_stored());
    assert_eq!(passport.get("number").unwrap(), Value::Null);
}
