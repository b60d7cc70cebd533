use super::Error;
use crate::stmt::Value;

/// A single field's raw value failed validation.
///
/// Carries the field name, its label, a human description of the failure and
/// the offending value (or the bound that was violated).
#[derive(Debug)]
pub struct FieldError {
    field: Box<str>,
    label: Box<str>,
    description: Box<str>,
    value: Value,
}

impl FieldError {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The message shown to an end user, naming the field by its label.
    pub fn user_message(&self) -> String {
        format!("{} {} {}", self.label, self.description, self.value)
    }
}

impl std::error::Error for FieldError {}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {} {}", self.field, self.description, self.value)
    }
}

impl Error {
    /// Creates a field validation error.
    pub fn field(
        field: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<Value>,
    ) -> Error {
        Error::from(super::ErrorKind::Field(FieldError {
            field: field.into().into(),
            label: label.into().into(),
            description: description.into().into(),
            value: value.into(),
        }))
    }

    /// Returns `true` if this error is a field validation error.
    pub fn is_field(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::Field(_))
    }

    /// Returns the field validation error, if this is one.
    pub fn as_field(&self) -> Option<&FieldError> {
        match self.root().kind() {
            super::ErrorKind::Field(err) => Some(err),
            _ => None,
        }
    }
}
