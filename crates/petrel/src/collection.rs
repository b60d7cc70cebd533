use crate::{record::Binding, Criteria, Db, Record};

use petrel_core::{
    stmt::{Value, ValueRecord},
    Error, Model, Result,
};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::sync::Arc;

/// An ordered list of records of one model.
///
/// A collection nested in a parent record shares the parent's foreign key:
/// every item is written with the parent's primary key in that column.
#[derive(Debug, Clone)]
pub struct Collection {
    model: Arc<Model>,
    binding: Option<Binding>,
    items: Vec<Record>,
}

impl Collection {
    pub fn new(model: &Arc<Model>) -> Collection {
        Collection {
            model: model.clone(),
            binding: None,
            items: vec![],
        }
    }

    pub(crate) fn bound(model: &Arc<Model>, binding: Binding) -> Collection {
        Collection {
            model: model.clone(),
            binding: Some(binding),
            items: vec![],
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Validate `input` as a new item and add it without saving.
    pub fn push(&mut self, input: ValueRecord) -> Result<()> {
        self.push_with(input, true)
    }

    pub(crate) fn push_with(&mut self, input: ValueRecord, validate: bool) -> Result<()> {
        let mut record = self.new_item();
        record.set_values(input, validate)?;
        self.items.push(record);
        Ok(())
    }

    /// Validate `input` as a new item, save it and add it.
    pub fn append(&mut self, db: &mut Db, input: ValueRecord) -> Result<&Record> {
        if let Some(Binding::Owner {
            column,
            parent_id: None,
        }) = &self.binding
        {
            return Err(Error::validation(format!(
                "cannot append to `{}` before its parent is saved; `{column}` has no value",
                self.model.name()
            )));
        }

        let mut record = self.new_item();
        record.assign(input)?;
        record.save(db)?;

        self.items.push(record);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace the items with the rows matching `criteria`. Without
    /// criteria, a nested collection loads the rows holding its parent's
    /// key and a top-level one loads every row of the model.
    pub fn query(&mut self, db: &mut Db, criteria: Option<Criteria>) -> Result<()> {
        let criteria = match (criteria, &self.binding) {
            (Some(criteria), _) => Some(criteria),
            (
                None,
                Some(Binding::Owner {
                    column,
                    parent_id: Some(parent_id),
                }),
            ) => Some(Criteria::column(column, parent_id.clone())),
            (None, _) => None,
        };

        let rows = db.select(&self.model, criteria.as_ref())?;

        self.items = rows
            .into_iter()
            .map(|row| Record::restore(&self.model, self.binding.clone(), row))
            .collect::<Result<_>>()?;

        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.items.get_mut(index)
    }

    /// Remove an item, deleting its row if it was saved.
    pub fn remove(&mut self, db: &mut Db, index: usize) -> Result<Record> {
        if index >= self.items.len() {
            return Err(Error::record_not_found(format!(
                "`{}` has {} items; no item at index {index}",
                self.model.name(),
                self.items.len()
            )));
        }

        let record = self.items.remove(index);

        if let (Some(id), true) = (record.id(), record.is_stored()) {
            db.delete(&self.model, id)?;
        }

        Ok(record)
    }

    pub fn value(&self) -> Value {
        Value::List(
            self.items
                .iter()
                .map(|item| Value::Record(item.value()))
                .collect(),
        )
    }

    /// True when any item has unsaved changes or was never saved.
    pub fn is_dirty(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.is_dirty() || !item.is_stored())
    }

    /// Write every unsaved item.
    pub fn save(&mut self, db: &mut Db) -> Result<()> {
        for item in &mut self.items {
            if item.is_dirty() || !item.is_stored() {
                item.persist(db)?;
            }
        }
        Ok(())
    }

    /// Validate a JSON array of objects and add each as a new item.
    pub fn load_json(&mut self, text: &str) -> Result<()> {
        let items = match serde_json::from_str::<serde_json::Value>(text)? {
            serde_json::Value::Array(items) => items,
            json => {
                return Err(Error::validation(format!(
                    "expected a JSON array for `{}`, found {}",
                    self.model.name(),
                    Value::from(json).kind_name()
                )))
            }
        };

        let mut staged = self.clone();

        for item in items {
            match item {
                serde_json::Value::Object(map) => staged.push(ValueRecord::from(map))?,
                json => {
                    return Err(Error::validation(format!(
                        "expected a JSON object in `{}`, found {}",
                        self.model.name(),
                        Value::from(json).kind_name()
                    )))
                }
            }
        }

        *self = staged;
        Ok(())
    }

    pub fn dump_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn bind_parent(&mut self, id: &Value) {
        if let Some(Binding::Owner { parent_id, .. }) = &mut self.binding {
            *parent_id = Some(id.clone());
        }

        for item in &mut self.items {
            item.bind_parent(id);
        }
    }

    fn new_item(&self) -> Record {
        let Some(binding) = &self.binding else {
            return Record::new(&self.model);
        };

        let mut record = Record::bound(&self.model, binding.clone());

        if let Binding::Owner {
            parent_id: Some(id),
            ..
        } = binding
        {
            record.bind_parent(id);
        }

        record
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;

        for item in &self.items {
            seq.serialize_element(item)?;
        }

        seq.end()
    }
}
