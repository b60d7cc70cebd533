use super::{Statement, Value};

#[derive(Debug, Clone)]
pub struct Insert {
    /// Table to insert into
    pub table: String,

    /// Column names, in the order values are given
    pub columns: Vec<String>,

    /// One value per column
    pub values: Vec<Value>,

    /// When set, a row that conflicts on this column is updated with the
    /// inserted values instead.
    pub upsert_key: Option<String>,
}

impl Insert {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            values: vec![],
            upsert_key: None,
        }
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    pub fn upsert_on(mut self, key: impl Into<String>) -> Self {
        self.upsert_key = Some(key.into());
        self
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
