#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Mysql,
    Postgresql,
    Sqlite,
}

/// What the storage backend speaks. Informs statement serialization.
#[derive(Debug)]
pub struct Capability {
    /// SQL dialect used for placeholders, identifier quoting and upserts.
    pub dialect: Dialect,

    /// True when the backend reports generated keys through
    /// [`Connection::last_insert_id`](super::Connection::last_insert_id).
    pub last_insert_id: bool,
}

impl Capability {
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        last_insert_id: true,
    };

    pub const MYSQL: Self = Self {
        dialect: Dialect::Mysql,
        last_insert_id: true,
    };

    pub const POSTGRESQL: Self = Self {
        dialect: Dialect::Postgresql,
        last_insert_id: false,
    };
}
