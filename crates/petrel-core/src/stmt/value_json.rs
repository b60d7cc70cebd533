use super::{Value, ValueRecord, DATETIME_FORMAT};

use serde_json::{Map, Number};

impl Value {
    /// Leaf JSON representation: decimals become strings, datetimes are
    /// formatted as `%Y/%m/%d %H:%M:%S`, encoded JSON text is parsed back into
    /// its structure, and everything else maps to the native JSON scalar.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(v) => serde_json::Value::Bool(*v),
            Self::DateTime(v) => serde_json::Value::String(v.format(DATETIME_FORMAT).to_string()),
            Self::Decimal(v) => serde_json::Value::String(v.to_string()),
            Self::F64(v) => Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::I64(v) => serde_json::Value::Number((*v).into()),
            Self::Json(text) => {
                if text.trim().is_empty() {
                    return serde_json::Value::Null;
                }
                serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.clone()))
            }
            Self::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Self::Null => serde_json::Value::Null,
            Self::Record(record) => serde_json::Value::Object(
                record
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Self::String(v) => serde_json::Value::String(v.clone()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(src: serde_json::Value) -> Self {
        match src {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(number) => {
                if let Some(v) = number.as_i64() {
                    Self::I64(v)
                } else if let Some(v) = number.as_f64() {
                    Self::F64(v)
                } else {
                    Self::String(number.to_string())
                }
            }
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Record(ValueRecord::from(map)),
        }
    }
}

impl From<Map<String, serde_json::Value>> for ValueRecord {
    fn from(map: Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect()
    }
}
