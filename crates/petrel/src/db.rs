mod builder;
pub use builder::Builder;

mod connect;

use crate::Criteria;

use petrel_core::{
    driver::{Connection, Dialect, Rows},
    stmt::{Value, ValueRecord},
    Error, Model, Result,
};
use petrel_sql::{
    stmt::{Delete, Filter, Insert, Select, Update},
    Serializer, Statement,
};

use std::time::{Duration, Instant};

/// Statements slower than this are logged with a `!SLOW!` marker.
const DEFAULT_SLOW_QUERY: Duration = Duration::from_millis(100);

/// The persistence adapter: turns record changes into SQL, runs it on one
/// connection and maps rows back to the model's columns.
///
/// A `Db` serves a single unit of work. Nothing is committed until
/// [`commit`](Db::commit) is called.
#[derive(Debug)]
pub struct Db {
    connection: Box<dyn Connection>,
    serializer: Serializer,
    slow_query: Duration,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Wrap an open connection.
    pub fn new(connection: impl Connection + 'static) -> Db {
        Db::builder().build(connection)
    }

    /// Open a connection from a URL such as `sqlite::memory:`.
    pub fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url)
    }

    fn from_parts(connection: Box<dyn Connection>, slow_query: Duration) -> Db {
        let serializer = match connection.capability().dialect {
            Dialect::Mysql => Serializer::mysql(),
            Dialect::Postgresql => Serializer::postgresql(),
            Dialect::Sqlite => Serializer::sqlite(),
        };

        Db {
            connection,
            serializer,
            slow_query,
        }
    }

    /// Insert the given columns. A row that already holds the same primary
    /// key is updated instead. Returns the key generated by storage, if any.
    pub fn insert(&mut self, model: &Model, values: &ValueRecord) -> Result<Option<Value>> {
        let mut stmt = Insert::new(model.table()).upsert_on(model.primary_key());

        for (name, value) in columns(model, values) {
            stmt = stmt.value(name, value.clone());
        }

        self.exec(stmt.into())?;

        Ok(self.connection.last_insert_id())
    }

    /// Update the given columns of the row with primary key `id`.
    ///
    /// Returns `false` when no row has that key.
    pub fn update(&mut self, model: &Model, values: &ValueRecord, id: &Value) -> Result<bool> {
        let mut stmt = Update::new(
            model.table(),
            Filter::eq(model.primary_key(), id.clone()),
        );

        for (name, value) in columns(model, values) {
            if name != model.primary_key() {
                stmt = stmt.set(name, value.clone());
            }
        }

        if stmt.assignments.is_empty() {
            return Ok(true);
        }

        self.exec(stmt.into())?;
        Ok(self.connection.affected_rows() > 0)
    }

    /// Load rows matching `criteria`, restricted to the model's columns.
    pub fn select(&mut self, model: &Model, criteria: Option<&Criteria>) -> Result<Rows> {
        let rows = match criteria {
            None => match model.query() {
                Some(sql) => self.execute(sql, &[])?,
                None => self.exec(select(model, None).into())?,
            },
            Some(Criteria::Id(id)) => {
                let filter = Filter::eq(model.primary_key(), id.clone());
                self.exec(select(model, Some(filter)).into())?
            }
            Some(Criteria::Column { column, value }) => {
                let filter = Filter::eq(column.clone(), value.clone());
                self.exec(select(model, Some(filter)).into())?
            }
            Some(Criteria::Sql { sql, params }) => self.execute(sql, params)?,
        };

        Ok(rows.into_iter().map(|row| clean(model, row)).collect())
    }

    /// Load exactly one row matching `criteria`.
    pub fn select_one(&mut self, model: &Model, criteria: &Criteria) -> Result<ValueRecord> {
        let rows = self.select(model, Some(criteria))?;
        single(model, rows, criteria)
    }

    /// Load the row with primary key `id`.
    pub fn select_by_id(&mut self, model: &Model, id: &Value) -> Result<ValueRecord> {
        self.select_one(model, &Criteria::Id(id.clone()))
    }

    /// Resolve the primary key of the single row whose `column` holds
    /// `value`.
    pub fn foreign_key(&mut self, model: &Model, column: &str, value: &Value) -> Result<Value> {
        let criteria = Criteria::column(column, value.clone());
        let filter = Filter::eq(column, value.clone());
        let stmt = Select::new(model.table())
            .columns([model.primary_key()])
            .filter(filter);

        let rows = self.exec(stmt.into())?;
        let mut row = single(model, rows, &criteria)?;

        Ok(row
            .shift_remove(model.primary_key())
            .unwrap_or(Value::Null))
    }

    /// Returns `true` when a row with primary key `id` exists.
    pub fn exists(&mut self, model: &Model, id: &Value) -> Result<bool> {
        let stmt = Select::new(model.table())
            .columns([model.primary_key()])
            .filter(Filter::eq(model.primary_key(), id.clone()));

        Ok(!self.exec(stmt.into())?.is_empty())
    }

    pub fn delete(&mut self, model: &Model, id: &Value) -> Result<()> {
        let stmt = Delete::new(model.table(), Filter::eq(model.primary_key(), id.clone()));
        self.exec(stmt.into())?;
        Ok(())
    }

    pub fn commit(&mut self) -> Result<()> {
        log::debug!("commit");
        self.connection.commit()
    }

    pub fn rollback(&mut self) -> Result<()> {
        log::debug!("rollback");
        self.connection.rollback()
    }

    /// Run raw SQL on the connection, logging it like any other statement.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Rows> {
        let params: Vec<Value> = params.iter().cloned().map(to_storage).collect();

        let start = Instant::now();
        let result = self.connection.execute(sql, &params);
        let elapsed = start.elapsed();

        if elapsed > self.slow_query {
            log::warn!("!SLOW! ({elapsed:?}) {sql} params={}", params.len());
        } else {
            log::debug!("({elapsed:?}) {sql} params={}", params.len());
        }

        result.map_err(|err| err.context(petrel_core::err!("executing `{sql}`")))
    }

    fn exec(&mut self, stmt: Statement) -> Result<Rows> {
        let mut params: Vec<Value> = vec![];
        let sql = self.serializer.serialize(&stmt, &mut params);
        self.execute(&sql, &params)
    }
}

/// Booleans are stored as integers.
fn to_storage(value: Value) -> Value {
    match value {
        Value::Bool(v) => Value::I64(v as i64),
        value => value,
    }
}

/// The model's columns present in `values`, in declaration order.
fn columns<'a>(model: &'a Model, values: &'a ValueRecord) -> impl Iterator<Item = (&'a str, &'a Value)> {
    model
        .columns()
        .filter_map(|field| Some((field.name(), values.get(field.name())?)))
}

fn select(model: &Model, filter: Option<Filter>) -> Select {
    let stmt = Select::new(model.table()).columns(model.columns().map(|field| field.name()));

    match filter {
        Some(filter) => stmt.filter(filter),
        None => stmt,
    }
}

/// Keep only the model's storage columns, in declaration order.
fn clean(model: &Model, mut row: ValueRecord) -> ValueRecord {
    model
        .columns()
        .filter_map(|field| Some((field.name(), row.shift_remove(field.name())?)))
        .collect()
}

fn single(model: &Model, mut rows: Rows, criteria: &Criteria) -> Result<ValueRecord> {
    match rows.len() {
        0 => Err(Error::record_not_found(format!(
            "table={} {}",
            model.table(),
            describe(criteria)
        ))),
        1 => Ok(rows.remove(0)),
        n => Err(Error::too_many_records(format!(
            "{n} rows in table={} for {}",
            model.table(),
            describe(criteria)
        ))),
    }
}

fn describe(criteria: &Criteria) -> String {
    match criteria {
        Criteria::Id(id) => format!("id={id}"),
        Criteria::Column { column, value } => format!("{column}={value}"),
        Criteria::Sql { sql, .. } => format!("query=`{sql}`"),
    }
}
