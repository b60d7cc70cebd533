use super::{Field, FieldTy, ForeignKey};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The schema of one record type: its table, primary key and fields in
/// declaration order.
#[derive(Debug)]
pub struct Model {
    name: String,
    table: String,
    primary_key: String,
    query: Option<String>,
    fields: IndexMap<String, Field>,
}

#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    table: Option<String>,
    primary_key: String,
    query: Option<String>,
    fields: Vec<(String, Field)>,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            table: None,
            primary_key: "id".to_string(),
            query: None,
            fields: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// The primary key's field.
    pub fn primary_key_field(&self) -> &Field {
        &self.fields[self.primary_key.as_str()]
    }

    /// A custom select used instead of the table when loading records.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.values()
    }

    /// Fields with a storage column, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields().filter(|field| field.is_column())
    }

    pub fn is_column(&self, name: &str) -> bool {
        self.field(name).is_some_and(Field::is_column)
    }
}

impl ModelBuilder {
    /// Table name. Defaults to the model name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Primary key field name. Defaults to `id`.
    pub fn primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// A select statement used as the source of rows instead of the table.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn build(self) -> Result<Arc<Model>> {
        let mut fields = IndexMap::with_capacity(self.fields.len() + 1);

        if !self.fields.iter().any(|(name, _)| *name == self.primary_key) {
            let mut id = Field::integer().hidden();
            id.name = self.primary_key.clone();
            fields.insert(self.primary_key.clone(), id);
        }

        for (name, mut field) in self.fields {
            if fields.contains_key(&name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` declares field `{name}` twice",
                    self.name
                )));
            }
            field.name = name.clone();
            fields.insert(name, field);
        }

        let model = Model {
            table: self.table.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            primary_key: self.primary_key,
            query: self.query,
            fields,
        };

        model.verify()?;

        Ok(Arc::new(model))
    }
}

impl Model {
    fn verify(&self) -> Result<()> {
        if self.primary_key_field().ty.is_relation() {
            return Err(Error::invalid_schema(format!(
                "primary key `{}.{}` cannot be a relation",
                self.name, self.primary_key
            )));
        }

        for field in self.fields() {
            match (&field.ty, field.relation().map(|relation| &relation.foreign_key)) {
                (FieldTy::Collection(relation), Some(ForeignKey::Child { column }))
                | (FieldTy::Record(relation), Some(ForeignKey::Child { column })) => {
                    if !relation.model.is_column(column) {
                        return Err(Error::invalid_schema(format!(
                            "`{}.{}` links through `{}.{column}`, which is not a column",
                            self.name,
                            field.name,
                            relation.model.name()
                        )));
                    }
                }
                (FieldTy::Collection(_), _) => {
                    return Err(Error::invalid_schema(format!(
                        "collection `{}.{}` must store its key on the child",
                        self.name, field.name
                    )));
                }
                (FieldTy::Record(relation), Some(ForeignKey::Parent { target })) => {
                    if !relation.model.is_column(target) {
                        return Err(Error::invalid_schema(format!(
                            "`{}.{}` points at `{}.{target}`, which is not a column",
                            self.name,
                            field.name,
                            relation.model.name()
                        )));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
