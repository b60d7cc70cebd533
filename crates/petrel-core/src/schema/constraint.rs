mod length;
pub use length::ConstraintLength;

mod range;
pub use range::ConstraintRange;

use super::Field;
use crate::{stmt::Value, Result};

#[derive(Debug, Clone)]
pub enum Constraint {
    Length(ConstraintLength),
    Range(ConstraintRange),
}

impl Constraint {
    /// Checks text against length constraints and numbers against range
    /// constraints. Other combinations pass.
    pub fn check(&self, field: &Field, value: &Value) -> Result<()> {
        match self {
            Constraint::Length(length) => match value {
                Value::String(text) => length.check(field, text),
                _ => Ok(()),
            },
            Constraint::Range(range) => range.check(field, value),
        }
    }
}
