use petrel_core::stmt::Value;

/// Selects the rows a [`Record`](crate::Record) or
/// [`Collection`](crate::Collection) loads.
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    /// The row whose primary key equals the value.
    Id(Value),

    /// Rows whose `column` equals `value`.
    Column { column: String, value: Value },

    /// Rows returned by a select statement with positional parameters.
    Sql { sql: String, params: Vec<Value> },
}

impl Criteria {
    pub fn id(value: impl Into<Value>) -> Self {
        Self::Id(value.into())
    }

    pub fn column(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Column {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn sql(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self::Sql {
            sql: sql.into(),
            params,
        }
    }
}
