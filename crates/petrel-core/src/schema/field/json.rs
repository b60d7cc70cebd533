use super::{Field, FieldTy};
use crate::{stmt::Value, Result};

impl Field {
    /// The JSON representation of a stored value of this field.
    pub fn to_json(&self, value: &Value) -> serde_json::Value {
        match (&self.ty, value) {
            (FieldTy::Bool, Value::Null) => serde_json::Value::Bool(false),
            (_, value) => value.to_json(),
        }
    }

    /// Builds a stored value from JSON input through the full
    /// validate/coerce pipeline.
    pub fn from_json(&self, json: serde_json::Value) -> Result<Value> {
        let value = match (&self.ty, json) {
            (FieldTy::Json, json) if !json.is_null() => Value::Json(serde_json::to_string(&json)?),
            (_, json) => Value::from(json),
        };

        self.construct(value)
    }
}
