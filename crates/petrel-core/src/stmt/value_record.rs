use super::Value;

use indexmap::IndexMap;
use std::ops;

/// An ordered mapping of names to values: an input mapping, a row read from
/// storage, or the value of a record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    pub fields: IndexMap<String, Value>,
}

impl ValueRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Inserts a value, keeping the position of an existing key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.fields
    }
}

impl ops::Deref for ValueRecord {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for ValueRecord {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl<'a> IntoIterator for &'a ValueRecord {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for ValueRecord {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
