use super::Record;

use petrel_core::{
    stmt::{Value, ValueRecord},
    Error, Model, Result,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

impl Record {
    /// A new record built from the declared fields set on `other`, run
    /// through the same validation as any other input.
    pub fn from_record(model: &Arc<Model>, other: &Record) -> Result<Record> {
        let input: ValueRecord = other
            .value()
            .into_iter()
            .filter(|(name, _)| model.field(name).is_some())
            .collect();

        Record::from_value(model, input)
    }

    /// Validate and apply a JSON object, exactly as [`assign`](Record::assign)
    /// does for a mapping.
    pub fn load_json(&mut self, text: &str) -> Result<()> {
        match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Object(map) => self.assign(ValueRecord::from(map)),
            json => Err(Error::validation(format!(
                "expected a JSON object for `{}`, found {}",
                self.model.name(),
                Value::from(json).kind_name()
            ))),
        }
    }

    pub fn dump_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Declared fields that are set, in declaration order. Nested records and
/// collections are written inline; a nested record that was never loaded is
/// written as its key.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        for field in self.model.fields() {
            let name = field.name();

            if let Some(child) = self.children.get(name) {
                map.serialize_entry(name, child)?;
            } else if let Some(collection) = self.collections.get(name) {
                map.serialize_entry(name, collection)?;
            } else if let Some(value) = self.values.get(name) {
                map.serialize_entry(name, &field.to_json(value))?;
            }
        }

        map.end()
    }
}
