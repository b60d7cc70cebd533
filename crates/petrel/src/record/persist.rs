use super::{Binding, Link, Record};
use crate::{Criteria, Db};

use petrel_core::{
    schema::FieldTy,
    stmt::{Value, ValueRecord},
    Error, Result,
};

impl Record {
    /// Write every unsaved change in this record and the records nested in
    /// it.
    ///
    /// Records whose key is stored on this record are saved first so their
    /// keys can be written here. Records that store this record's key are
    /// saved last, once that key is known.
    pub fn save(&mut self, db: &mut Db) -> Result<()> {
        self.persist(db)?;
        Ok(())
    }

    pub(crate) fn persist(&mut self, db: &mut Db) -> Result<Option<Link>> {
        let mut links = vec![];

        for child in self.children.values_mut() {
            if matches!(child.binding, Some(Binding::Pointer { .. })) && child.is_dirty() {
                if let Some(link) = child.persist(db)? {
                    links.push(link);
                }
            }
        }

        for link in links {
            self.apply(link);
        }

        let owned_dirty = self
            .children
            .values()
            .filter(|child| matches!(child.binding, Some(Binding::Owner { .. })))
            .any(Record::is_dirty)
            || self.collections.values().any(|collection| collection.is_dirty());

        if self.has_column_changes() || (!self.stored && owned_dirty) {
            self.write(db)?;
        }

        if owned_dirty {
            let id = self.id().cloned().ok_or_else(|| {
                Error::invalid_schema(format!(
                    "`{}` has nested records but no primary key",
                    self.model.name()
                ))
            })?;

            for child in self.children.values_mut() {
                if matches!(child.binding, Some(Binding::Owner { .. })) {
                    child.bind_parent(&id);
                    if child.is_dirty() {
                        child.persist(db)?;
                    }
                }
            }

            for collection in self.collections.values_mut() {
                collection.bind_parent(&id);
                collection.save(db)?;
            }
        }

        Ok(self.link())
    }

    fn has_column_changes(&self) -> bool {
        self.dirty.iter().any(|name| self.model.is_column(name))
    }

    /// The pointer value the parent stores for this record.
    fn link(&self) -> Option<Link> {
        match &self.binding {
            Some(Binding::Pointer { field, target }) => Some(Link {
                field: field.clone(),
                value: self.values.get(target).cloned().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    /// Insert or update this record's own row.
    fn write(&mut self, db: &mut Db) -> Result<()> {
        let model = self.model.clone();
        let primary_key = model.primary_key();

        let mut changes: ValueRecord = self
            .dirty
            .iter()
            .filter(|name| model.is_column(name))
            .filter_map(|name| Some((name.clone(), self.values.get(name)?.clone())))
            .collect();

        match self.id().cloned() {
            Some(id) if self.stored => {
                if !db.update(&model, &changes, &id)? {
                    // The row is gone; write the whole record back
                    let row: ValueRecord = self
                        .values
                        .iter()
                        .filter(|(name, _)| model.is_column(name))
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect();
                    db.insert(&model, &row)?;
                }
            }
            Some(id) => {
                changes.insert(primary_key, id);
                db.insert(&model, &changes)?;
            }
            None => match model.primary_key_field().ty {
                FieldTy::Uuid => {
                    let id = Value::from(uuid::Uuid::new_v4());
                    changes.insert(primary_key, id.clone());
                    db.insert(&model, &changes)?;
                    self.values.insert(primary_key.to_string(), id);
                }
                FieldTy::Integer => {
                    let id = db.insert(&model, &changes)?.ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "storage did not report a key for `{}`",
                            model.name()
                        ))
                    })?;
                    let id = model.primary_key_field().restore(id)?;
                    self.values.insert(primary_key.to_string(), id);
                }
                _ => {
                    return Err(Error::invalid_schema(format!(
                        "primary key `{}.{primary_key}` has no value and cannot be generated",
                        model.name()
                    )));
                }
            },
        }

        self.stored = true;
        self.dirty.clear();

        Ok(())
    }

    /// Remove this record.
    ///
    /// A record whose key is stored on its parent is only unlinked: its row
    /// is kept and the returned [`Link`] clears the parent's pointer. Any
    /// other stored record has its row deleted.
    pub fn delete(&mut self, db: &mut Db) -> Result<Option<Link>> {
        let link = match &self.binding {
            Some(Binding::Pointer { field, .. }) => Some(Link {
                field: field.clone(),
                value: Value::Null,
            }),
            _ => {
                if let (Some(id), true) = (self.id(), self.stored) {
                    db.delete(&self.model, id)?;
                }
                None
            }
        };

        self.clear();
        Ok(link)
    }

    /// Delete or unlink a nested record and save the resulting pointer
    /// change.
    pub fn delete_child(&mut self, db: &mut Db, name: &str) -> Result<()> {
        let link = self.child(db, name)?.delete(db)?;
        self.children.shift_remove(name);
        self.pending.shift_remove(name);

        if let Some(link) = link {
            self.apply(link);
            self.save(db)?;
        }

        Ok(())
    }

    /// Reload this record from storage, replacing its state.
    ///
    /// Without criteria the record is found by its primary key, or for a
    /// record that stores its parent's key, through that key. Exactly one
    /// row must match.
    pub fn query(&mut self, db: &mut Db, criteria: Option<Criteria>) -> Result<()> {
        let row = match criteria {
            Some(criteria) => db.select_one(&self.model, &criteria)?,
            None => match (self.id(), &self.binding) {
                (Some(id), _) => db.select_by_id(&self.model, id)?,
                (
                    None,
                    Some(Binding::Owner {
                        column,
                        parent_id: Some(parent_id),
                    }),
                ) => {
                    let id = db.foreign_key(&self.model, column, parent_id)?;
                    db.select_by_id(&self.model, &id)?
                }
                _ => {
                    return Err(Error::record_not_found(format!(
                        "`{}` has no key to load by",
                        self.model.name()
                    )))
                }
            },
        };

        self.load_row(row)
    }
}
