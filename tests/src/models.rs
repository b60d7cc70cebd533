//! Schemas shared by the integration tests, each with the SQL that creates
//! its tables.

use petrel::{Field, Model};
use std::sync::Arc;

pub const USER_SQL: &str = r#"
    CREATE TABLE user (
        id INTEGER PRIMARY KEY,
        email TEXT,
        age INTEGER,
        active INTEGER,
        password TEXT
    );
"#;

pub fn user() -> Arc<Model> {
    Model::builder("User")
        .table("user")
        .field("email", Field::email().required())
        .field("age", Field::integer().minimum(0).maximum(150))
        .field("active", Field::boolean())
        .field("password", Field::password().rounds(4))
        .build()
        .unwrap()
}

pub const ORDER_SQL: &str = r#"
    CREATE TABLE "order" (
        id INTEGER PRIMARY KEY,
        customer TEXT,
        total TEXT
    );
    CREATE TABLE line_item (
        id INTEGER PRIMARY KEY,
        order_id INTEGER,
        sku TEXT,
        quantity INTEGER,
        price TEXT
    );
"#;

pub fn line_item() -> Arc<Model> {
    Model::builder("LineItem")
        .table("line_item")
        .field("order_id", Field::integer().readonly())
        .field("sku", Field::text().required().max_length(16))
        .field("quantity", Field::integer().minimum(1))
        .field("price", Field::decimal())
        .build()
        .unwrap()
}

pub fn order() -> Arc<Model> {
    Model::builder("Order")
        .table("order")
        .field("customer", Field::text().required())
        .field("total", Field::decimal())
        .field("items", Field::collection(line_item(), "order_id"))
        .build()
        .unwrap()
}

pub const PERSON_SQL: &str = r#"
    CREATE TABLE address (
        id INTEGER PRIMARY KEY,
        street TEXT,
        city TEXT
    );
    CREATE TABLE passport (
        id TEXT PRIMARY KEY,
        person_id INTEGER,
        number TEXT
    );
    CREATE TABLE person (
        id INTEGER PRIMARY KEY,
        name TEXT,
        settings TEXT,
        address INTEGER
    );
"#;

pub fn address() -> Arc<Model> {
    Model::builder("Address")
        .table("address")
        .field("street", Field::text())
        .field("city", Field::text())
        .build()
        .unwrap()
}

/// Keyed by a client-generated UUID; stores its owner's key.
pub fn passport() -> Arc<Model> {
    Model::builder("Passport")
        .table("passport")
        .field("id", Field::uuid())
        .field("person_id", Field::integer().readonly())
        .field("number", Field::text())
        .build()
        .unwrap()
}

pub fn person() -> Arc<Model> {
    Model::builder("Person")
        .table("person")
        .field("name", Field::text().required())
        .field("settings", Field::json())
        .field("address", Field::record(address()))
        .field(
            "passport",
            Field::record(passport()).foreign_key_on_child("person_id"),
        )
        .build()
        .unwrap()
}
