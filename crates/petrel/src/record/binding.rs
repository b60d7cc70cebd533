use petrel_core::stmt::Value;

/// How a nested record is tied to the record that holds it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Binding {
    /// The parent's `field` column stores this record's `target` column.
    Pointer { field: String, target: String },

    /// This record's `column` stores the parent's primary key, once known.
    Owner {
        column: String,
        parent_id: Option<Value>,
    },
}

/// A change a child record asks its parent to make to its pointer column.
///
/// Saving or deleting a record whose key is stored on the parent yields a
/// `Link`; the parent applies it with [`Record::apply`](crate::Record::apply).
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The parent's pointer field
    pub field: String,

    /// The new pointer value. `Null` unlinks the child.
    pub value: Value,
}
