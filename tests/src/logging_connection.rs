use crate::exec_log::ExecOp;

use petrel_core::{
    driver::{Capability, Connection, Rows},
    stmt::Value,
    Result,
};
use std::sync::{Arc, Mutex};

/// A connection wrapper that logs every executed statement for testing
/// purposes.
#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes statements
    inner: Box<dyn Connection>,

    /// Log of all statements executed through this connection.
    /// Using Arc<Mutex> so tests keep a handle after the connection moves
    /// into the `Db`.
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

impl LoggingConnection {
    pub fn new(inner: impl Connection + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the statement log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<ExecOp>>> {
        self.ops_log.clone()
    }
}

impl Connection for LoggingConnection {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Rows> {
        let rows = self.inner.execute(sql, params)?;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(ExecOp {
                sql: sql.to_string(),
                params: params.to_vec(),
                rows: rows.len(),
            });

        Ok(rows)
    }

    fn last_insert_id(&self) -> Option<Value> {
        self.inner.last_insert_id()
    }

    fn affected_rows(&self) -> u64 {
        self.inner.affected_rows()
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.inner.rollback()
    }
}
