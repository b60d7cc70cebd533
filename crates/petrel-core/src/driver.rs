mod capability;
pub use capability::{Capability, Dialect};

use crate::stmt::{Value, ValueRecord};

use std::fmt::Debug;

/// Rows returned by a statement, each keyed by column name.
pub type Rows = Vec<ValueRecord>;

/// A blocking connection to the storage backend.
///
/// One connection serves one unit of work at a time. Connection pooling,
/// reconnection and transaction lifetime belong to the caller.
pub trait Connection: Debug + Send {
    /// Describes the backend's SQL dialect.
    fn capability(&self) -> &'static Capability;

    /// Execute a SQL statement with positional parameters, returning any rows
    /// it produced.
    fn execute(&mut self, sql: &str, params: &[Value]) -> crate::Result<Rows>;

    /// The key generated by the most recent insert, if any.
    fn last_insert_id(&self) -> Option<Value>;

    /// Number of rows changed by the most recent insert, update or delete.
    fn affected_rows(&self) -> u64;

    /// Commit the current unit of work.
    fn commit(&mut self) -> crate::Result<()>;

    /// Discard the current unit of work.
    fn rollback(&mut self) -> crate::Result<()>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn capability(&self) -> &'static Capability {
        (**self).capability()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> crate::Result<Rows> {
        (**self).execute(sql, params)
    }

    fn last_insert_id(&self) -> Option<Value> {
        (**self).last_insert_id()
    }

    fn affected_rows(&self) -> u64 {
        (**self).affected_rows()
    }

    fn commit(&mut self) -> crate::Result<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> crate::Result<()> {
        (**self).rollback()
    }
}
