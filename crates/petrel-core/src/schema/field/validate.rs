use super::{Field, FieldTy};
use crate::{
    password,
    stmt::{parse_datetime, Value},
    Result,
};

use rust_decimal::Decimal;
use std::str::FromStr;

impl Field {
    /// Checks `value` against the field's type and constraints without
    /// changing it.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if value.is_null() {
            return self.validate_null();
        }

        if self.required && value.as_str().is_some_and(str::is_empty) {
            return Err(self.error("value required", value.clone()));
        }

        match &self.ty {
            FieldTy::Bool => match value {
                Value::Bool(_) | Value::I64(_) | Value::F64(_) => {}
                _ => return Err(self.error("invalid boolean value", value.clone())),
            },
            FieldTy::DateTime => match value {
                Value::DateTime(_) => {}
                Value::String(text) if parse_datetime(text).is_some() => {}
                _ => return Err(self.error("invalid datetime value", value.clone())),
            },
            FieldTy::Decimal(_) => {
                let decimal = self.parse_decimal(value)?;
                self.check_constraints(&Value::Decimal(decimal))?;
            }
            FieldTy::Email => {
                let text = self.check_string(value)?;
                self.check_constraints(value)?;
                self.check_email(text)?;
            }
            FieldTy::Integer => {
                match value {
                    Value::I64(_) => {}
                    Value::Decimal(v) if v.fract().is_zero() => {}
                    _ => return Err(self.error("invalid integer value", value.clone())),
                }
                self.check_constraints(value)?;
            }
            FieldTy::Json => {}
            FieldTy::Number => {
                match value {
                    Value::I64(_) | Value::F64(_) | Value::Decimal(_) => {}
                    _ => return Err(self.error("invalid number value", value.clone())),
                }
                self.check_constraints(value)?;
            }
            FieldTy::Password(_) => {
                let text = self.check_string(value)?;
                if !password::is_hashed(text) {
                    self.check_constraints(value)?;
                    self.check_password_strength(text)?;
                }
            }
            FieldTy::Phone => {
                let text = self.check_string(value)?;
                let stripped = strip_whitespace(text);
                self.check_constraints(&Value::String(stripped.clone()))?;
                self.check_phone(&stripped)?;
            }
            FieldTy::Text => {
                self.check_string(value)?;
                self.check_constraints(value)?;
            }
            FieldTy::Uuid => self.check_uuid(value)?,
            FieldTy::Record(_) | FieldTy::Collection(_) => {
                return Err(self.error("nested values are set through the record", value.clone()));
            }
        }

        self.check_choices(value)
    }

    fn validate_null(&self) -> Result<()> {
        if self.required {
            Err(self.error("value required", Value::Null))
        } else if !self.nullable && !self.ty.is_bool() {
            Err(self.error("null value not allowed", Value::Null))
        } else {
            Ok(())
        }
    }

    fn check_choices(&self, value: &Value) -> Result<()> {
        let Some(choices) = &self.choices else {
            return Ok(());
        };

        if choices.iter().any(|(choice, _)| choice == value) {
            Ok(())
        } else {
            Err(self.error("invalid choice", value.clone()))
        }
    }

    pub(super) fn parse_decimal(&self, value: &Value) -> Result<Decimal> {
        let parsed = match value {
            Value::Decimal(v) => Some(*v),
            Value::I64(v) => Some(Decimal::from(*v)),
            Value::F64(v) => Decimal::try_from(*v).ok(),
            Value::String(text) => {
                let text = text.trim();
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .ok()
            }
            _ => None,
        };

        parsed.ok_or_else(|| self.error("invalid number value", value.clone()))
    }
}

pub(super) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
