use super::Model;

use std::sync::Arc;

/// A nested record or collection declared on a parent model.
#[derive(Debug, Clone)]
pub struct Relation {
    /// Schema of the nested records.
    pub model: Arc<Model>,

    /// Where the key linking parent and child is stored.
    pub foreign_key: ForeignKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForeignKey {
    /// The parent's column (named after the relation field) stores the value
    /// of the child's `target` column, usually the child's primary key.
    Parent { target: String },

    /// The child's `column` stores the parent's primary key.
    Child { column: String },
}

impl ForeignKey {
    pub fn is_parent(&self) -> bool {
        matches!(self, Self::Parent { .. })
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Self::Child { .. })
    }
}
