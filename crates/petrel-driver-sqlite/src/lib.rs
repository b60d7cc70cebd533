mod value;
pub(crate) use value::Value;

use petrel_core::{
    driver::{Capability, Rows},
    stmt::{self, ValueRecord},
    Error, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,

    /// A transaction is open. One begins with the first statement after a
    /// commit or rollback.
    in_transaction: bool,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self::from_rusqlite(connection))
    }

    fn from_rusqlite(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            in_transaction: false,
        }
    }

    /// Runs SQL that takes no parameters, such as schema setup, outside the
    /// unit of work.
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.connection.execute_batch(sql).map_err(Error::driver)
    }

    fn begin(&mut self) -> Result<()> {
        if !self.in_transaction {
            self.connection.execute_batch("BEGIN").map_err(Error::driver)?;
            self.in_transaction = true;
        }
        Ok(())
    }

    fn finish(&mut self, sql: &str) -> Result<()> {
        if self.in_transaction {
            self.connection.execute_batch(sql).map_err(Error::driver)?;
            self.in_transaction = false;
        }
        Ok(())
    }
}

impl petrel_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<Rows> {
        self.begin()?;

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;

        let params = params
            .iter()
            .cloned()
            .map(Value::from)
            .collect::<Vec<_>>();

        if stmt.column_count() == 0 {
            stmt.execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver)?;
            return Ok(vec![]);
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut record = ValueRecord::new();

            for (index, column) in columns.iter().enumerate() {
                let value = Value::from_sql(row, index).map_err(Error::driver)?;
                record.insert(column.clone(), value.into_inner());
            }

            ret.push(record);
        }

        Ok(ret)
    }

    fn last_insert_id(&self) -> Option<stmt::Value> {
        match self.connection.last_insert_rowid() {
            0 => None,
            id => Some(stmt::Value::I64(id)),
        }
    }

    fn affected_rows(&self) -> u64 {
        self.connection.changes()
    }

    fn commit(&mut self) -> Result<()> {
        self.finish("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.finish("ROLLBACK")
    }
}
