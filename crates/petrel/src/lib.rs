mod collection;
pub use collection::Collection;

mod criteria;
pub use criteria::Criteria;

pub mod db;
pub use db::Db;

mod record;
pub use record::{Link, Record};

pub use petrel_core::{
    driver, password, record, schema, stmt, Error, Field, FieldError, Model, Result,
};
