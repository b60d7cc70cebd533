use super::{validate::strip_whitespace, Field, FieldTy};
use crate::{
    password,
    stmt::{parse_datetime, Value},
    Result,
};

use chrono::Timelike;
use rust_decimal::{prelude::ToPrimitive, RoundingStrategy};

impl Field {
    /// Normalizes a validated value into the field's stored representation.
    ///
    /// Coercion is idempotent: coercing an already coerced value returns it
    /// unchanged.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        if value.is_null() && !self.ty.is_bool() {
            return Ok(value);
        }

        Ok(match &self.ty {
            FieldTy::Bool => Value::Bool(match value {
                Value::Bool(v) => v,
                Value::I64(v) => v != 0,
                Value::F64(v) => v != 0.0,
                _ => false,
            }),
            // Whole seconds, matching the marshalled form
            FieldTy::DateTime => match value {
                Value::String(text) => parse_datetime(&text)
                    .and_then(|v| v.with_nanosecond(0))
                    .map(Value::DateTime)
                    .ok_or_else(|| self.error("invalid datetime value", text))?,
                Value::DateTime(v) => Value::DateTime(v.with_nanosecond(0).unwrap_or(v)),
                value => value,
            },
            FieldTy::Decimal(decimal) => {
                let mut parsed = self.parse_decimal(&value)?;
                if let Some(places) = decimal.round {
                    parsed = parsed.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
                    parsed.rescale(places);
                }
                Value::Decimal(parsed)
            }
            FieldTy::Integer => match value {
                Value::Decimal(v) => v
                    .to_i64()
                    .map(Value::I64)
                    .ok_or_else(|| self.error("invalid integer value", v))?,
                value => value,
            },
            FieldTy::Json => match value {
                Value::Json(text) => Value::Json(text),
                value => Value::Json(serde_json::to_string(&value.to_json())?),
            },
            FieldTy::Number => match value {
                Value::Decimal(v) => v
                    .to_f64()
                    .map(Value::F64)
                    .ok_or_else(|| self.error("invalid number value", v))?,
                value => value,
            },
            FieldTy::Password(ty) => match value {
                Value::String(text)
                    if !ty.ignore && !text.is_empty() && !password::is_hashed(&text) =>
                {
                    Value::String(password::hash(&text, ty.algorithm, ty.rounds)?)
                }
                value => value,
            },
            FieldTy::Phone => match value {
                Value::String(text) => Value::String(strip_whitespace(&text)),
                value => value,
            },
            FieldTy::Email | FieldTy::Text | FieldTy::Uuid => value,
            FieldTy::Record(_) | FieldTy::Collection(_) => {
                return Err(self.error("nested values are set through the record", value));
            }
        })
    }

    /// Validates then coerces untrusted input.
    pub fn construct(&self, value: Value) -> Result<Value> {
        self.validate(&value)?;
        self.coerce(value)
    }

    /// Converts a value read from storage back into the field's
    /// representation, without validation.
    pub fn restore(&self, value: Value) -> Result<Value> {
        match (&self.ty, value) {
            (FieldTy::Json, Value::String(text)) => Ok(Value::Json(text)),
            (FieldTy::Password(_), value) => Ok(value),
            (FieldTy::Record(_) | FieldTy::Collection(_), value) => Ok(value),
            (_, value) => self.coerce(value),
        }
    }

    /// Returns `true` when assigning `raw` would leave `current` as it is.
    ///
    /// Password hashes are salted, so a password is unchanged when `raw` is
    /// the current hash or verifies against it.
    pub fn unchanged(&self, current: &Value, raw: &Value) -> bool {
        match (&self.ty, current, raw) {
            (FieldTy::Password(_), Value::String(hashed), Value::String(text)) => {
                hashed == text || (password::is_hashed(hashed) && password::verify(text, hashed))
            }
            (FieldTy::Password(_), current, raw) => current == raw,
            _ => self
                .coerce(raw.clone())
                .is_ok_and(|coerced| &coerced == current),
        }
    }
}
