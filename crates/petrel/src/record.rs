mod binding;
pub(crate) use binding::Binding;
pub use binding::Link;

mod json;

mod persist;

use crate::{Collection, Criteria};

use indexmap::{IndexMap, IndexSet};
use petrel_core::{
    schema::{FieldTy, ForeignKey, Relation},
    stmt::{Value, ValueRecord},
    Error, Field, Model, Result,
};
use std::sync::Arc;

/// One row of a model, with its nested records and collections.
///
/// Input is validated and coerced field by field; fields whose value
/// actually changed are tracked and only those are written on save.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<Model>,

    /// Scalar values, including pointer columns of nested records.
    values: IndexMap<String, Value>,

    /// Fields changed since the last save.
    dirty: IndexSet<String>,

    /// Nested records that have been set or loaded.
    children: IndexMap<String, Record>,

    /// Nested records known only by key, loaded on first access.
    pending: IndexMap<String, Criteria>,

    collections: IndexMap<String, Collection>,

    binding: Option<Binding>,

    /// The row exists in storage.
    stored: bool,
}

impl Record {
    pub fn new(model: &Arc<Model>) -> Record {
        Record {
            model: model.clone(),
            values: IndexMap::new(),
            dirty: IndexSet::new(),
            children: IndexMap::new(),
            pending: IndexMap::new(),
            collections: IndexMap::new(),
            binding: None,
            stored: false,
        }
    }

    /// A new record holding validated `input`.
    pub fn from_value(model: &Arc<Model>, input: ValueRecord) -> Result<Record> {
        let mut record = Record::new(model);
        record.assign(input)?;
        Ok(record)
    }

    pub(crate) fn bound(model: &Arc<Model>, binding: Binding) -> Record {
        let mut record = Record::new(model);
        record.binding = Some(binding);
        record
    }

    /// Rebuild a record from a stored row without validation.
    pub(crate) fn restore(model: &Arc<Model>, binding: Option<Binding>, row: ValueRecord) -> Result<Record> {
        let mut record = Record::new(model);
        record.binding = binding;
        record.load_row(row)?;
        Ok(record)
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The primary key, once assigned or generated.
    pub fn id(&self) -> Option<&Value> {
        self.values
            .get(self.model.primary_key())
            .filter(|value| !value.is_null())
    }

    /// True once the record has been saved or loaded from storage.
    pub fn is_stored(&self) -> bool {
        self.stored
    }

    /// True when the record or anything nested in it has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
            || self.children.values().any(Record::is_dirty)
            || self.collections.values().any(Collection::is_dirty)
    }

    /// Names of the fields changed since the last save, in the order they
    /// were changed.
    pub fn changed(&self) -> impl Iterator<Item = &str> + '_ {
        self.dirty.iter().map(String::as_str)
    }

    /// Validate `input` and apply it.
    ///
    /// Only keys naming a declared field are considered. Readonly fields are
    /// applied without validation. Every value is checked before any is
    /// applied, so on error the record is left untouched.
    pub fn assign(&mut self, input: ValueRecord) -> Result<()> {
        let mut staged = self.clone();
        staged.set_values(input, true)?;
        *self = staged;
        Ok(())
    }

    /// Validate and apply `input`, then save the changes.
    pub fn set(&mut self, db: &mut crate::Db, input: ValueRecord) -> Result<()> {
        self.assign(input)?;
        self.save(db)
    }

    /// The value of a scalar field. Booleans that were never set read as
    /// `false`; other unset fields read as `Null`.
    pub fn get(&self, name: &str) -> Result<Value> {
        let field = self
            .model
            .field(name)
            .ok_or_else(|| Error::field_not_found(name))?;

        match (self.values.get(name), &field.ty) {
            (Some(value), _) => Ok(value.clone()),
            (None, FieldTy::Bool) => Ok(Value::Bool(false)),
            (None, FieldTy::Record(_)) => Ok(self
                .children
                .get(name)
                .map(|child| Value::Record(child.value()))
                .unwrap_or_default()),
            (None, FieldTy::Collection(_)) => Ok(self
                .collections
                .get(name)
                .map(Collection::value)
                .unwrap_or_default()),
            (None, _) => Ok(Value::Null),
        }
    }

    /// Every field that has been set, in declaration order, with nested
    /// records and collections expanded.
    pub fn value(&self) -> ValueRecord {
        let mut value = ValueRecord::new();

        for field in self.model.fields() {
            let name = field.name();

            if let Some(child) = self.children.get(name) {
                value.insert(name, Value::Record(child.value()));
            } else if let Some(collection) = self.collections.get(name) {
                value.insert(name, collection.value());
            } else if let Some(v) = self.values.get(name) {
                value.insert(name, v.clone());
            }
        }

        value
    }

    /// Declared scalar fields with their current values, in declaration
    /// order. Used to render forms.
    pub fn fields(&self) -> impl Iterator<Item = (&Field, Option<&Value>)> + '_ {
        self.model
            .fields()
            .filter(|field| !field.ty.is_relation())
            .map(|field| (field, self.values.get(field.name())))
    }

    /// A nested record that has been set or loaded.
    pub fn get_child(&self, name: &str) -> Option<&Record> {
        self.children.get(name)
    }

    /// A nested record, loading it from storage on first access.
    pub fn child(&mut self, db: &mut crate::Db, name: &str) -> Result<&mut Record> {
        if !self.children.contains_key(name) {
            let model = self.model.clone();
            let relation = record_relation(&model, name)?;

            let mut child = Record::bound(&relation.model, self.binding_for(name, relation));

            match self.pending.shift_remove(name) {
                Some(criteria) => child.query(db, Some(criteria))?,
                None if relation.foreign_key.is_child() && self.id().is_some() => {
                    match child.query(db, None) {
                        Ok(()) => {}
                        Err(err) if err.is_record_not_found() => {}
                        Err(err) => return Err(err),
                    }
                }
                None => {}
            }

            self.children.insert(name.to_string(), child);
        }

        self.children
            .get_mut(name)
            .ok_or_else(|| Error::field_not_found(name))
    }

    /// A nested collection that has been set or loaded.
    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// A nested collection, loading its rows on first access when this
    /// record is stored.
    pub fn collection(&mut self, db: &mut crate::Db, name: &str) -> Result<&mut Collection> {
        let model = self.model.clone();
        let relation = collection_relation(&model, name)?;

        let load = !self.collections.contains_key(name) && self.stored && self.id().is_some();
        let collection = self.collection_entry(name, relation);

        if load {
            collection.query(db, None)?;
        }

        Ok(collection)
    }

    /// Apply a pointer change reported by a nested record.
    pub fn apply(&mut self, link: Link) {
        let store = self.model.field(&link.field).is_some_and(|field| field.store);

        if self.values.get(&link.field) != Some(&link.value) {
            if store {
                self.dirty.insert(link.field.clone());
            }
            self.values.insert(link.field, link.value);
        }
    }

    pub(crate) fn set_values(&mut self, input: ValueRecord, validate: bool) -> Result<()> {
        let model = self.model.clone();

        for (name, raw) in input {
            let Some(field) = model.field(&name) else {
                continue;
            };

            match &field.ty {
                FieldTy::Record(relation) => self.set_child(field, relation, raw, validate)?,
                FieldTy::Collection(relation) => {
                    self.set_collection(field, relation, raw, validate)?
                }
                _ => self.set_scalar(field, raw, validate)?,
            }
        }

        Ok(())
    }

    fn set_scalar(&mut self, field: &Field, raw: Value, validate: bool) -> Result<()> {
        let name = field.name();

        let value = if validate {
            if !field.readonly {
                field.validate(&raw)?;
            }

            if let Some(current) = self.values.get(name) {
                if field.unchanged(current, &raw) {
                    return Ok(());
                }
            }

            let value = field.coerce(raw)?;

            if name == self.model.primary_key() && self.id().is_some_and(|id| *id != value) {
                return Err(Error::validation("cannot set primary key")
                    .context(petrel_core::err!("{}.{name}", self.model.name())));
            }

            value
        } else {
            field.restore(raw)?
        };

        self.values.insert(name.to_string(), value);

        if validate && field.store {
            self.dirty.insert(name.to_string());
        }

        Ok(())
    }

    fn set_child(&mut self, field: &Field, relation: &Relation, raw: Value, validate: bool) -> Result<()> {
        let name = field.name();

        match (raw, &relation.foreign_key) {
            (Value::Record(input), _) => {
                if !self.children.contains_key(name) {
                    let child = self.new_child(name, relation);
                    self.children.insert(name.to_string(), child);
                }

                if let Some(child) = self.children.get_mut(name) {
                    child.set_values(input, validate)?;
                }
            }
            (raw, ForeignKey::Parent { target }) => {
                let target_field = relation
                    .model
                    .field(target)
                    .ok_or_else(|| Error::field_not_found(target))?;

                let value = if validate {
                    target_field.construct(raw)?
                } else {
                    target_field.restore(raw)?
                };

                if self.values.get(name) == Some(&value) {
                    return Ok(());
                }

                self.children.shift_remove(name);
                self.pending.shift_remove(name);

                if !value.is_null() {
                    self.pending
                        .insert(name.to_string(), Criteria::column(target, value.clone()));
                }

                self.values.insert(name.to_string(), value);

                if validate && field.store {
                    self.dirty.insert(name.to_string());
                }
            }
            (Value::Null, ForeignKey::Child { .. }) => {
                self.children.shift_remove(name);
                self.pending.shift_remove(name);
            }
            (raw, ForeignKey::Child { .. }) => {
                let id_field = relation.model.primary_key_field();
                let id = if validate {
                    id_field.construct(raw)?
                } else {
                    id_field.restore(raw)?
                };

                self.children.shift_remove(name);
                self.pending.insert(name.to_string(), Criteria::Id(id));
            }
        }

        Ok(())
    }

    fn set_collection(&mut self, field: &Field, relation: &Relation, raw: Value, validate: bool) -> Result<()> {
        let items = match raw {
            Value::Null => return Ok(()),
            Value::List(items) => items,
            raw => return Err(field.error("invalid collection value", raw)),
        };

        let collection = self.collection_entry(field.name(), relation);

        for item in items {
            match item {
                Value::Record(input) => collection.push_with(input, validate)?,
                item => return Err(field.error("invalid collection item", item)),
            }
        }

        Ok(())
    }

    /// A fresh nested record for `name`. A known pointer to the child's
    /// primary key becomes the child's key, so saving it updates that row.
    fn new_child(&mut self, name: &str, relation: &Relation) -> Record {
        let mut child = Record::bound(&relation.model, self.binding_for(name, relation));

        if let ForeignKey::Parent { target } = &relation.foreign_key {
            let pointer = self.values.get(name).filter(|value| !value.is_null());

            if let Some(pointer) = pointer {
                if target == relation.model.primary_key() {
                    child
                        .values
                        .insert(target.clone(), pointer.clone());
                }
            }

            self.pending.shift_remove(name);
        }

        child
    }

    fn collection_entry(&mut self, name: &str, relation: &Relation) -> &mut Collection {
        let binding = self.binding_for(name, relation);

        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::bound(&relation.model, binding))
    }

    fn binding_for(&self, name: &str, relation: &Relation) -> Binding {
        match &relation.foreign_key {
            ForeignKey::Parent { target } => Binding::Pointer {
                field: name.to_string(),
                target: target.clone(),
            },
            ForeignKey::Child { column } => Binding::Owner {
                column: column.clone(),
                parent_id: self.id().cloned(),
            },
        }
    }

    /// Point an owned record at its parent's primary key.
    pub(crate) fn bind_parent(&mut self, id: &Value) {
        if let Some(Binding::Owner { column, parent_id }) = &mut self.binding {
            *parent_id = Some(id.clone());

            if self.values.get(column.as_str()) != Some(id) {
                self.values.insert(column.clone(), id.clone());
                self.dirty.insert(column.clone());
            }
        }
    }

    fn clear(&mut self) {
        self.values.clear();
        self.dirty.clear();
        self.children.clear();
        self.pending.clear();
        self.collections.clear();
        self.stored = false;
    }

    fn load_row(&mut self, row: ValueRecord) -> Result<()> {
        self.clear();
        self.set_values(row, false)?;
        self.stored = true;
        Ok(())
    }
}

fn record_relation<'a>(model: &'a Model, name: &str) -> Result<&'a Relation> {
    match model.field(name).map(|field| &field.ty) {
        Some(FieldTy::Record(relation)) => Ok(relation),
        Some(_) => Err(Error::validation(format!(
            "`{}.{name}` is not a nested record",
            model.name()
        ))),
        None => Err(Error::field_not_found(name)),
    }
}

fn collection_relation<'a>(model: &'a Model, name: &str) -> Result<&'a Relation> {
    match model.field(name).map(|field| &field.ty) {
        Some(FieldTy::Collection(relation)) => Ok(relation),
        Some(_) => Err(Error::validation(format!(
            "`{}.{name}` is not a collection",
            model.name()
        ))),
        None => Err(Error::field_not_found(name)),
    }
}
