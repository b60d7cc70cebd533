mod delete;
pub use delete::Delete;

mod filter;
pub use filter::Filter;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod update;
pub use update::Update;

pub use petrel_core::stmt::Value;

/// A SQL statement issued on behalf of a record.
#[derive(Debug, Clone)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    /// The table the statement reads or writes.
    pub fn table(&self) -> &str {
        match self {
            Self::Delete(stmt) => &stmt.table,
            Self::Insert(stmt) => &stmt.table,
            Self::Select(stmt) => &stmt.table,
            Self::Update(stmt) => &stmt.table,
        }
    }
}
