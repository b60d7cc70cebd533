use petrel_core::stmt::{self, Value as CoreValue, STORAGE_DATETIME_FORMAT};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core Petrel value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a Petrel value.
    ///
    /// Columns carry no declared type here; fields restore their own
    /// representation from these storage values.
    pub fn from_sql(row: &Row, index: usize) -> rusqlite::Result<Self> {
        let core_value = match row.get::<_, SqlValue>(index)? {
            SqlValue::Null => stmt::Value::Null,
            SqlValue::Integer(value) => stmt::Value::I64(value),
            SqlValue::Real(value) => stmt::Value::F64(value),
            SqlValue::Text(value) => stmt::Value::String(value),
            SqlValue::Blob(value) => {
                stmt::Value::String(String::from_utf8_lossy(&value).into_owned())
            }
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::DateTime(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(
                v.format(STORAGE_DATETIME_FORMAT).to_string(),
            ))),
            Value::Decimal(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::Json(v) | Value::String(v) => {
                Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())))
            }
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::List(_) | Value::Record(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                format!("{} values have no column representation", self.0.kind_name()).into(),
            )),
        }
    }
}
