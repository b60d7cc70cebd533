use petrel::{stmt::Value, Collection, Criteria, Field, Record};
use petrel_core::record;
use tests::{models, setup, Setup};

use pretty_assertions::assert_eq;
use serde_json::json;

fn ann() -> Record {
    let person = models::person();

    Record::from_value(
        &person,
        record! {
            "name" => "ann",
            "settings" => Value::from(json!({ "theme": "dark", "size": 3 })),
            "address" => record! { "street" => "1 Main", "city" => "Springfield" },
        },
    )
    .unwrap()
}

#[test]
fn dump_follows_declaration_order() {
    let record = ann();

    assert_eq!(
        record.dump_json().unwrap(),
        r#"{"name":"ann","settings":{"theme":"dark","size":3},"address":{"street":"1 Main","city":"Springfield"}}"#
    );
}

#[test]
fn dump_then_load_round_trips() {
    let record = ann();

    let mut copy = Record::new(record.model());
    copy.load_json(&record.dump_json().unwrap()).unwrap();

    assert_eq!(copy.value(), record.value());
    assert_eq!(copy.dump_json().unwrap(), record.dump_json().unwrap());
}

#[test]
fn leaf_representations() {
    let order = models::order();

    let record = Record::from_value(
        &order,
        record! {
            "customer" => "ann",
            "total" => 12.5,
            "items" => Value::List(vec![Value::Record(record! {
                "sku" => "A-1",
                "quantity" => 2,
                "price" => "9.999",
            })]),
        },
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&record.dump_json().unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "customer": "ann",
            "total": "12.50",
            "items": [{ "sku": "A-1", "quantity": 2, "price": "10.00" }],
        })
    );

    let mut copy = Record::new(&order);
    copy.load_json(&json.to_string()).unwrap();
    assert_eq!(copy.value(), record.value());
}

#[test]
fn stored_record_dumps_keys_and_pointers() {
    let Setup { mut db, .. } = setup(models::PERSON_SQL);
    let person = models::person();

    let mut record = ann();
    record.save(&mut db).unwrap();

    let mut loaded = Record::new(&person);
    loaded.query(&mut db, Some(Criteria::id(1))).unwrap();

    // An unloaded nested record is written as its key
    assert_eq!(
        loaded.dump_json().unwrap(),
        r#"{"id":1,"name":"ann","settings":{"theme":"dark","size":3},"address":1}"#
    );

    loaded.child(&mut db, "address").unwrap();
    let json: serde_json::Value = serde_json::from_str(&loaded.dump_json().unwrap()).unwrap();
    assert_eq!(
        json["address"],
        json!({ "id": 1, "street": "1 Main", "city": "Springfield" })
    );
}

#[test]
fn load_json_validates() {
    let user = models::user();

    let mut record = Record::new(&user);
    let err = record
        .load_json(r#"{"email": "a@b.com", "age": 151}"#)
        .unwrap_err();
    assert_eq!(err.as_field().unwrap().field(), "age");
    assert_eq!(record.get("email").unwrap(), Value::Null);

    let err = record.load_json("[1, 2]").unwrap_err();
    assert!(err.is_validation());

    assert!(record.load_json("{not json").is_err());
}

#[test]
fn record_from_another_record() {
    let record = ann();

    let copy = Record::from_record(record.model(), &record).unwrap();
    assert_eq!(copy.value(), record.value());
    assert_eq!(copy.changed().collect::<Vec<_>>(), ["name", "settings"]);

    // Only fields declared on the target model are copied
    let address = models::address();
    let other = Record::from_record(&address, &record).unwrap();
    assert!(other.value().is_empty());
}

#[test]
fn collection_json() {
    let line_item = models::line_item();

    let mut items = Collection::new(&line_item);
    items
        .load_json(r#"[{"sku": "A-1", "quantity": 1, "price": 2}, {"sku": "B-2", "quantity": 3}]"#)
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(
        items.dump_json().unwrap(),
        r#"[{"sku":"A-1","quantity":1,"price":"2.00"},{"sku":"B-2","quantity":3}]"#
    );

    let err = items.load_json(r#"[{"sku": "C-3", "quantity": 0}]"#).unwrap_err();
    assert!(err.is_field());
    assert_eq!(items.len(), 2);
}

#[test]
fn every_leaf_type_round_trips() {
    let account = petrel::Model::builder("Account")
        .table("account")
        .field("active", Field::boolean())
        .field("logins", Field::integer())
        .field("score", Field::number())
        .field("token", Field::uuid())
        .field("phone", Field::phone())
        .field("seen", Field::datetime())
        .field("password", Field::password().rounds(4))
        .field("email", Field::email())
        .build()
        .unwrap();

    let record = Record::from_value(
        &account,
        record! {
            "active" => true,
            "logins" => 7,
            "score" => 1.25,
            "token" => "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "phone" => "+1 650 253 0000",
            "seen" => "2021-12-31 23:59:59.250",
            "password" => "Secret123",
            "email" => "a@b.com",
        },
    )
    .unwrap();

    let dumped = record.dump_json().unwrap();
    let json: serde_json::Value = serde_json::from_str(&dumped).unwrap();
    assert_eq!(json["active"], json!(true));
    assert_eq!(json["phone"], json!("+16502530000"));
    assert_eq!(json["seen"], json!("2021/12/31 23:59:59"));
    assert_eq!(json["password"], json!(record.get("password").unwrap().as_str().unwrap()));

    let mut copy = Record::new(&account);
    copy.load_json(&dumped).unwrap();

    assert_eq!(copy.value(), record.value());
    assert_eq!(copy.dump_json().unwrap(), dumped);
}

#[test]
fn loaded_items_round_trip() {
    let Setup { mut db, .. } = setup(models::ORDER_SQL);
    let order = models::order();
    let line_item = models::line_item();

    let mut record = Record::new(&order);
    record.assign(record! { "customer" => "ann" }).unwrap();
    record
        .collection(&mut db, "items")
        .unwrap()
        .push(record! { "sku" => "A", "quantity" => 2, "price" => "9.99" })
        .unwrap();
    record.save(&mut db).unwrap();

    let mut items = Collection::new(&line_item);
    items.query(&mut db, None).unwrap();

    let dumped = items.dump_json().unwrap();
    assert_eq!(
        dumped,
        r#"[{"id":1,"order_id":1,"sku":"A","quantity":2,"price":"9.99"}]"#
    );

    let mut copy = Collection::new(&line_item);
    copy.load_json(&dumped).unwrap();

    assert_eq!(copy.value(), items.value());
    assert_eq!(copy.dump_json().unwrap(), dumped);

    // The same holds for a record copied field by field
    let item = items.get(0).unwrap();
    let copied = Record::from_record(&line_item, item).unwrap();
    assert_eq!(copied.value(), item.value());
}
