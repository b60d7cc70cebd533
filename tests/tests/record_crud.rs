use petrel::{stmt::Value, Criteria, Record};
use petrel_core::record;
use tests::{models, setup, Setup};

use pretty_assertions::assert_eq;

#[test]
fn insert_queues_only_set_columns() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "email" => "a@b.com", "age" => 30 })
        .unwrap();

    assert_eq!(log.len(), 1);
    let op = log.pop().unwrap();
    assert_eq!(
        op.sql,
        r#"INSERT INTO "user" ("email", "age") VALUES (?1, ?2);"#
    );
    assert_eq!(op.params, vec![Value::from("a@b.com"), Value::I64(30)]);

    assert_eq!(record.id(), Some(&Value::I64(1)));
    assert!(record.is_stored());
    assert!(!record.is_dirty());
}

#[test]
fn out_of_range_value_is_rejected_before_any_write() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "email" => "a@b.com", "age" => 30 })
        .unwrap();
    log.clear();

    let err = record.set(&mut db, record! { "age" => 200 }).unwrap_err();

    let field = err.as_field().unwrap();
    assert_eq!(field.field(), "age");
    assert_eq!(field.description(), "exceeded maximum value");
    assert_eq!(field.value(), &Value::I64(150));
    assert!(err.is_validation());

    assert!(log.is_empty());
    assert_eq!(record.get("age").unwrap(), Value::I64(30));
}

#[test]
fn failed_assign_leaves_record_untouched() {
    let user = models::user();

    let mut record = Record::from_value(&user, record! { "email" => "a@b.com" }).unwrap();

    let err = record
        .assign(record! { "email" => "c@d.com", "age" => -1 })
        .unwrap_err();

    assert_eq!(err.as_field().unwrap().description(), "less than minimum value");
    assert_eq!(record.get("email").unwrap(), Value::from("a@b.com"));
    assert_eq!(record.changed().collect::<Vec<_>>(), ["email"]);
}

#[test]
fn setting_identical_values_writes_nothing() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    let input = record! { "email" => "a@b.com", "age" => 30, "active" => true };
    record.set(&mut db, input.clone()).unwrap();
    log.clear();

    record.set(&mut db, input).unwrap();

    assert!(log.is_empty());
    assert!(!record.is_dirty());
}

#[test]
fn insert_then_update_changed_column() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "email" => "a@b.com", "age" => 30 })
        .unwrap();
    record.set(&mut db, record! { "age" => 31 }).unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log.count(|op| op.is_insert()), 1);
    assert_eq!(log.count(|op| op.is_update()), 1);

    log.pop();
    let op = log.pop().unwrap();
    assert_eq!(op.sql, r#"UPDATE "user" SET "age" = ?1 WHERE "id" = ?2;"#);
    assert_eq!(op.params, vec![Value::I64(31), Value::I64(1)]);
}

#[test]
fn booleans_are_stored_as_integers_and_read_back() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "email" => "a@b.com", "active" => true })
        .unwrap();

    let op = log.pop().unwrap();
    assert_eq!(op.params, vec![Value::from("a@b.com"), Value::I64(1)]);

    let mut loaded = Record::new(&user);
    loaded.query(&mut db, Some(Criteria::id(1))).unwrap();
    assert_eq!(loaded.get("active").unwrap(), Value::Bool(true));
    assert!(loaded.is_stored());
    assert!(!loaded.is_dirty());
}

#[test]
fn unset_boolean_reads_false() {
    let Setup { mut db, .. } = setup(models::USER_SQL);
    let user = models::user();

    let record = Record::new(&user);
    assert_eq!(record.get("active").unwrap(), Value::Bool(false));
    assert_eq!(record.get("age").unwrap(), Value::Null);

    let mut stored = Record::new(&user);
    stored.set(&mut db, record! { "email" => "a@b.com" }).unwrap();

    let mut loaded = Record::new(&user);
    loaded.query(&mut db, Some(Criteria::id(1))).unwrap();
    assert_eq!(loaded.get("active").unwrap(), Value::Bool(false));
}

#[test]
fn unknown_names() {
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .assign(record! { "email" => "a@b.com", "nickname" => "ann" })
        .unwrap();

    assert_eq!(record.changed().collect::<Vec<_>>(), ["email"]);
    assert!(record.get("nickname").unwrap_err().is_field_not_found());
}

#[test]
fn primary_key_cannot_change() {
    let Setup { mut db, .. } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record.set(&mut db, record! { "email" => "a@b.com" }).unwrap();

    let err = record.assign(record! { "id" => 2 }).unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_field());
    assert_eq!(err.to_string(), "User.id: cannot set primary key");

    // Same key is a no-op
    record.assign(record! { "id" => 1 }).unwrap();
    assert!(!record.is_dirty());
}

#[test]
fn readonly_fields_are_assigned_without_validation() {
    let line_item = models::line_item();

    let record = Record::from_value(
        &line_item,
        record! { "order_id" => 5, "sku" => "A-1", "quantity" => 1 },
    )
    .unwrap();

    assert_eq!(record.get("order_id").unwrap(), Value::I64(5));
    assert_eq!(
        record.changed().collect::<Vec<_>>(),
        ["order_id", "sku", "quantity"]
    );

    let counter = petrel::Model::builder("Counter")
        .table("counter")
        .field("hits", petrel::Field::integer().minimum(1).readonly())
        .build()
        .unwrap();

    let mut record = Record::new(&counter);
    record.assign(record! { "hits" => 0 }).unwrap();
    assert_eq!(record.get("hits").unwrap(), Value::I64(0));
}

#[test]
fn known_primary_key_inserts_then_updates() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "id" => 42, "email" => "a@b.com" })
        .unwrap();

    let op = log.pop().unwrap();
    assert!(op.is_insert());
    assert_eq!(op.params, vec![Value::I64(42), Value::from("a@b.com")]);
    assert_eq!(record.id(), Some(&Value::I64(42)));
    assert!(db.exists(&user, &Value::I64(42)).unwrap());
    log.clear();

    record.set(&mut db, record! { "age" => 7 }).unwrap();
    assert!(log.pop().unwrap().is_update());
}

#[test]
fn delete_removes_row() {
    let Setup { mut db, log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record.set(&mut db, record! { "email" => "a@b.com" }).unwrap();

    let link = record.delete(&mut db).unwrap();

    assert_eq!(link, None);
    assert!(log.has_delete());
    assert!(!record.is_stored());
    assert!(!db.exists(&user, &Value::I64(1)).unwrap());
}

#[test]
fn update_of_a_missing_row_inserts_it() {
    let Setup { mut db, mut log } = setup(models::USER_SQL);
    let user = models::user();

    let mut record = Record::new(&user);
    record
        .set(&mut db, record! { "email" => "a@b.com", "age" => 30 })
        .unwrap();

    db.execute(r#"DELETE FROM "user" WHERE "id" = ?1"#, &[Value::I64(1)])
        .unwrap();
    log.clear();

    record.set(&mut db, record! { "age" => 9 }).unwrap();

    log.with_ops(|ops| {
        assert_eq!(ops.len(), 2);
        assert!(ops[0].is_update());
        assert!(ops[1].is_insert());
        assert_eq!(
            ops[1].params,
            vec![Value::I64(1), Value::from("a@b.com"), Value::I64(9)]
        );
    });

    let row = db.select_by_id(&user, &Value::I64(1)).unwrap();
    assert_eq!(row["email"], Value::from("a@b.com"));
    assert_eq!(row["age"], Value::I64(9));
    assert!(!record.is_dirty());
}

#[test]
fn fields_lists_scalars_in_declaration_order() {
    let user = models::user();
    let record = Record::from_value(&user, record! { "age" => 3, "email" => "a@b.com" }).unwrap();

    let fields: Vec<_> = record
        .fields()
        .map(|(field, value)| (field.name(), value.cloned()))
        .collect();

    assert_eq!(
        fields,
        vec![
            ("id", None),
            ("email", Some(Value::from("a@b.com"))),
            ("age", Some(Value::I64(3))),
            ("active", None),
            ("password", None),
        ]
    );
}
