use super::Constraint;

use crate::{schema::Field, Result};

#[derive(Debug, Clone, Default)]
pub struct ConstraintLength {
    /// The minimum length of the field, in characters.
    pub min: Option<usize>,

    /// The maximum length of the field, in characters. Zero means unbounded.
    pub max: Option<usize>,
}

impl ConstraintLength {
    pub(crate) fn check(&self, field: &Field, value: &str) -> Result<()> {
        let value_len = value.chars().count();

        if let Some(max) = self.max.filter(|max| *max != 0) {
            if value_len > max {
                return Err(field.error("exceeded maximum length", max as i64));
            }
        }

        if let Some(min) = self.min {
            if value_len < min {
                return Err(field.error("less than required length", min as i64));
            }
        }

        Ok(())
    }
}

impl From<ConstraintLength> for Constraint {
    fn from(length: ConstraintLength) -> Self {
        Constraint::Length(length)
    }
}
