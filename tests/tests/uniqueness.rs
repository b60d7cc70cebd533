use petrel::{schema::Model, stmt::Value, Criteria, Field, Record};
use tests::{setup, Setup};

use std::sync::Arc;

const TAG_SQL: &str = r#"
    CREATE TABLE tag (id INTEGER, name TEXT);
    INSERT INTO tag (id, name) VALUES (1, 'a'), (1, 'b'), (2, 'c');
"#;

fn tag() -> Arc<Model> {
    Model::builder("Tag")
        .table("tag")
        .field("name", Field::text())
        .build()
        .unwrap()
}

#[test]
fn id_lookup_matching_many_rows() {
    let Setup { mut db, .. } = setup(TAG_SQL);
    let tag = tag();

    let err = Record::new(&tag)
        .query(&mut db, Some(Criteria::id(1)))
        .unwrap_err();

    assert!(err.is_too_many_records());
    assert!(err.is_validation());

    let err = db.select_by_id(&tag, &Value::I64(1)).unwrap_err();
    assert!(err.is_too_many_records());
}

#[test]
fn id_lookup_matching_no_rows() {
    let Setup { mut db, .. } = setup(TAG_SQL);
    let tag = tag();

    let err = Record::new(&tag)
        .query(&mut db, Some(Criteria::id(9)))
        .unwrap_err();

    assert!(err.is_record_not_found());
    assert!(err.is_validation());
}

#[test]
fn unique_lookups() {
    let Setup { mut db, .. } = setup(TAG_SQL);
    let tag = tag();

    let mut record = Record::new(&tag);
    record.query(&mut db, Some(Criteria::id(2))).unwrap();
    assert_eq!(record.get("name").unwrap(), Value::from("c"));

    record
        .query(&mut db, Some(Criteria::column("name", "b")))
        .unwrap();
    assert_eq!(record.id(), Some(&Value::I64(1)));

    let row = db
        .select_one(
            &tag,
            &Criteria::sql("SELECT id, name FROM tag WHERE name = ?1", vec![Value::from("a")]),
        )
        .unwrap();
    assert_eq!(row["name"], Value::from("a"));
}

#[test]
fn foreign_key_lookup() {
    let Setup { mut db, .. } = setup(TAG_SQL);
    let tag = tag();

    assert_eq!(db.foreign_key(&tag, "name", &Value::from("c")).unwrap(), Value::I64(2));

    let err = db.foreign_key(&tag, "name", &Value::from("z")).unwrap_err();
    assert!(err.is_record_not_found());

    let err = db.foreign_key(&tag, "id", &Value::I64(1)).unwrap_err();
    assert!(err.is_too_many_records());
    assert!(err.is_validation());
}

#[test]
fn query_without_key() {
    let Setup { mut db, .. } = setup(TAG_SQL);

    let err = Record::new(&tag()).query(&mut db, None).unwrap_err();
    assert!(err.is_record_not_found());
}
