use super::Constraint;

use crate::{schema::Field, stmt::Value, Result};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct ConstraintRange {
    /// Inclusive lower bound.
    pub min: Option<Value>,

    /// Inclusive upper bound.
    pub max: Option<Value>,
}

impl ConstraintRange {
    pub(crate) fn check(&self, field: &Field, value: &Value) -> Result<()> {
        if let Some(max) = &self.max {
            if compare(value, max) == Some(Ordering::Greater) {
                return Err(field.error("exceeded maximum value", max.clone()));
            }
        }

        if let Some(min) = &self.min {
            if compare(value, min) == Some(Ordering::Less) {
                return Err(field.error("less than minimum value", min.clone()));
            }
        }

        Ok(())
    }
}

/// Orders two numeric values. Non-numeric operands are unordered.
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::I64(lhs), Value::I64(rhs)) => Some(lhs.cmp(rhs)),
        (Value::Decimal(_), _) | (_, Value::Decimal(_)) => {
            as_decimal(lhs)?.partial_cmp(&as_decimal(rhs)?)
        }
        _ => as_f64(lhs)?.partial_cmp(&as_f64(rhs)?),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Decimal(v) => Some(*v),
        Value::I64(v) => Some(Decimal::from(*v)),
        Value::F64(v) => Decimal::try_from(*v).ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::F64(v) => Some(*v),
        Value::I64(v) => Some(*v as f64),
        Value::Decimal(v) => v.to_f64(),
        _ => None,
    }
}

impl From<ConstraintRange> for Constraint {
    fn from(range: ConstraintRange) -> Self {
        Constraint::Range(range)
    }
}
