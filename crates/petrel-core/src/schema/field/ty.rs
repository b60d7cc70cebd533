use crate::{password::Algorithm, schema::Relation};

/// The semantic type of a field.
///
/// Every consumer (validation, coercion, marshalling, storage) matches on
/// this exhaustively, so a new kind is a compile-checked change.
#[derive(Debug, Clone)]
pub enum FieldTy {
    Bool,
    DateTime,
    Decimal(DecimalTy),
    Email,
    /// Signed 64-bit integer
    Integer,
    /// Arbitrary structure stored as JSON text
    Json,
    /// Double precision float
    Number,
    Password(PasswordTy),
    Phone,
    Text,
    Uuid,

    /// Nested one-to-one record
    Record(Relation),

    /// Nested one-to-many collection
    Collection(Relation),
}

#[derive(Debug, Clone)]
pub struct DecimalTy {
    /// Decimal places kept after half-up rounding.
    pub round: Option<u32>,
}

impl Default for DecimalTy {
    fn default() -> Self {
        Self { round: Some(2) }
    }
}

#[derive(Debug, Clone)]
pub struct PasswordTy {
    pub algorithm: Algorithm,
    pub rounds: u32,
    /// Store text as given.
    pub ignore: bool,
}

impl Default for PasswordTy {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bcrypt,
            rounds: 12,
            ignore: false,
        }
    }
}

impl FieldTy {
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Collection(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::DateTime => "datetime",
            Self::Decimal(_) => "decimal",
            Self::Email => "email",
            Self::Integer => "integer",
            Self::Json => "json",
            Self::Number => "number",
            Self::Password(_) => "password",
            Self::Phone => "phone",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::Record(_) => "record",
            Self::Collection(_) => "collection",
        }
    }
}
