use super::{Filter, Statement, Value};

#[derive(Debug, Clone)]
pub struct Update {
    pub table: String,

    /// `column = value` pairs, in order
    pub assignments: Vec<(String, Value)>,

    pub filter: Filter,
}

impl Update {
    pub fn new(table: impl Into<String>, filter: Filter) -> Self {
        Self {
            table: table.into(),
            assignments: vec![],
            filter,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
