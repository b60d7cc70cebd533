mod checks;

mod coerce;

mod json;

mod ty;
pub use ty::{DecimalTy, FieldTy, PasswordTy};

mod validate;

use super::{Constraint, ConstraintLength, ConstraintRange, ForeignKey, Model, Relation};
use crate::{password::Algorithm, stmt::Value, Error};

use std::sync::Arc;

/// Declares one field of a model: its semantic type and the metadata that
/// drives validation, storage and rendering.
///
/// A `Field` is an immutable descriptor. Records hold their own values and
/// consult the descriptor to validate and coerce them, so no state is ever
/// shared between two records of the same model.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name. Assigned when the field is added to a model.
    pub name: String,

    /// Semantic type
    pub ty: FieldTy,

    /// Human readable name, used in user-facing errors. Defaults to the name.
    pub label: Option<String>,

    /// Null and empty text are rejected.
    pub required: bool,

    /// Validated input may not change the field; only rows loaded from
    /// storage populate it.
    pub readonly: bool,

    /// Not shown by form renderers.
    pub hidden: bool,

    /// Null is accepted.
    pub nullable: bool,

    /// Changes are persisted. Transient fields are validated but never written.
    pub store: bool,

    /// The field has no storage column.
    pub nodb: bool,

    /// The accepted values and their display labels.
    pub choices: Option<Vec<(Value, String)>>,

    /// Hint text for form renderers.
    pub placeholder: Option<String>,

    /// Length and range constraints.
    pub constraints: Vec<Constraint>,
}

impl Field {
    pub fn new(ty: FieldTy) -> Self {
        Self {
            name: String::new(),
            ty,
            label: None,
            required: false,
            readonly: false,
            hidden: false,
            nullable: true,
            store: true,
            nodb: false,
            choices: None,
            placeholder: None,
            constraints: vec![],
        }
    }

    pub fn integer() -> Self {
        Self::new(FieldTy::Integer)
    }

    pub fn number() -> Self {
        Self::new(FieldTy::Number)
    }

    /// A decimal rounded half-up to two places.
    pub fn decimal() -> Self {
        Self::new(FieldTy::Decimal(DecimalTy::default()))
    }

    pub fn boolean() -> Self {
        Self::new(FieldTy::Bool)
    }

    pub fn text() -> Self {
        Self::new(FieldTy::Text)
    }

    pub fn email() -> Self {
        Self::new(FieldTy::Email)
    }

    pub fn phone() -> Self {
        Self::new(FieldTy::Phone).placeholder("+16502530000")
    }

    pub fn password() -> Self {
        Self::new(FieldTy::Password(PasswordTy::default()))
    }

    pub fn uuid() -> Self {
        Self::new(FieldTy::Uuid)
    }

    pub fn datetime() -> Self {
        Self::new(FieldTy::DateTime)
    }

    pub fn json() -> Self {
        Self::new(FieldTy::Json)
    }

    /// A nested one-to-one record. By default the parent's column stores the
    /// child's primary key.
    pub fn record(model: Arc<Model>) -> Self {
        let target = model.primary_key().to_string();
        Self::new(FieldTy::Record(Relation {
            model,
            foreign_key: ForeignKey::Parent { target },
        }))
    }

    /// A nested one-to-many collection whose rows store the parent's primary
    /// key in `column`.
    pub fn collection(model: Arc<Model>, column: impl Into<String>) -> Self {
        Self::new(FieldTy::Collection(Relation {
            model,
            foreign_key: ForeignKey::Child {
                column: column.into(),
            },
        }))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    pub fn nodb(mut self) -> Self {
        self.nodb = true;
        self
    }

    pub fn choices<V, L>(mut self, choices: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
    {
        self.choices = Some(
            choices
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        );
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.length_mut().min = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.length_mut().max = Some(max);
        self
    }

    pub fn minimum(mut self, min: impl Into<Value>) -> Self {
        self.range_mut().min = Some(min.into());
        self
    }

    pub fn maximum(mut self, max: impl Into<Value>) -> Self {
        self.range_mut().max = Some(max.into());
        self
    }

    /// Decimal places kept by a decimal field; `None` keeps every place.
    pub fn round(mut self, places: Option<u32>) -> Self {
        if let FieldTy::Decimal(decimal) = &mut self.ty {
            decimal.round = places;
        }
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        if let FieldTy::Password(password) = &mut self.ty {
            password.algorithm = algorithm;
        }
        self
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        if let FieldTy::Password(password) = &mut self.ty {
            password.rounds = rounds;
        }
        self
    }

    /// Store password text as given, without hashing.
    pub fn ignore(mut self) -> Self {
        if let FieldTy::Password(password) = &mut self.ty {
            password.ignore = true;
        }
        self
    }

    /// Moves a nested record's key onto the child: the child's `column`
    /// stores the parent's primary key.
    pub fn foreign_key_on_child(mut self, column: impl Into<String>) -> Self {
        if let FieldTy::Record(relation) = &mut self.ty {
            relation.foreign_key = ForeignKey::Child {
                column: column.into(),
            };
        }
        self
    }

    /// Makes the parent's column store the child's `target` column instead
    /// of its primary key.
    pub fn foreign_key_target(mut self, target: impl Into<String>) -> Self {
        if let FieldTy::Record(relation) = &mut self.ty {
            relation.foreign_key = ForeignKey::Parent {
                target: target.into(),
            };
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    /// The label, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The nested schema, if this field is a relation.
    pub fn relation(&self) -> Option<&Relation> {
        match &self.ty {
            FieldTy::Record(relation) | FieldTy::Collection(relation) => Some(relation),
            _ => None,
        }
    }

    /// True when the field maps to a column of its model's table.
    pub fn is_column(&self) -> bool {
        if self.nodb {
            return false;
        }

        match &self.ty {
            FieldTy::Collection(_) => false,
            FieldTy::Record(relation) => relation.foreign_key.is_parent(),
            _ => true,
        }
    }

    /// Builds a [`FieldError`](crate::FieldError) naming this field.
    pub fn error(&self, description: impl Into<String>, value: impl Into<Value>) -> Error {
        Error::field(&self.name, self.display_label(), description, value)
    }

    fn length_mut(&mut self) -> &mut ConstraintLength {
        let index = match self
            .constraints
            .iter()
            .position(|constraint| matches!(constraint, Constraint::Length(_)))
        {
            Some(index) => index,
            None => {
                self.constraints.push(ConstraintLength::default().into());
                self.constraints.len() - 1
            }
        };

        match &mut self.constraints[index] {
            Constraint::Length(length) => length,
            Constraint::Range(_) => unreachable!(),
        }
    }

    fn range_mut(&mut self) -> &mut ConstraintRange {
        let index = match self
            .constraints
            .iter()
            .position(|constraint| matches!(constraint, Constraint::Range(_)))
        {
            Some(index) => index,
            None => {
                self.constraints.push(ConstraintRange::default().into());
                self.constraints.len() - 1
            }
        };

        match &mut self.constraints[index] {
            Constraint::Range(range) => range,
            Constraint::Length(_) => unreachable!(),
        }
    }
}
