use super::{Filter, Statement};

#[derive(Debug, Clone)]
pub struct Delete {
    pub table: String,
    pub filter: Filter,
}

impl Delete {
    pub fn new(table: impl Into<String>, filter: Filter) -> Self {
        Self {
            table: table.into(),
            filter,
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
