#[macro_use]
mod macros;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, FieldError, IntoError};

pub mod password;

pub mod schema;
pub use schema::{Field, Model};

pub mod stmt;

/// A Result type alias that uses Petrel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
