use super::{Comma, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let filter = &self.filter;
        fmt!(f, "DELETE FROM " Ident(&self.table) " WHERE " filter);
    }
}

impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let value = &self.value;
        fmt!(f, Ident(&self.column) " = " value);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "INSERT INTO " Ident(&self.table));

        if self.columns.is_empty() {
            match f.serializer.flavor {
                Flavor::Mysql => fmt!(f, " () VALUES ()"),
                Flavor::Postgresql | Flavor::Sqlite => fmt!(f, " DEFAULT VALUES"),
            }
            return;
        }

        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(self.values.iter());
        fmt!(f, " (" columns ") VALUES (" values ")");

        let Some(key) = self
            .upsert_key
            .as_ref()
            .filter(|key| self.columns.contains(key))
        else {
            return;
        };

        let updates: Vec<&String> = self.columns.iter().filter(|column| *column != key).collect();

        match f.serializer.flavor {
            Flavor::Mysql => {
                fmt!(f, " ON DUPLICATE KEY UPDATE ");
                if updates.is_empty() {
                    fmt!(f, Ident(key) " = " Ident(key));
                } else {
                    fmt!(f, Comma(updates.iter().copied().map(MysqlAssignValues)));
                }
            }
            Flavor::Postgresql | Flavor::Sqlite => {
                fmt!(f, " ON CONFLICT (" Ident(key) ") DO ");
                if updates.is_empty() {
                    fmt!(f, "NOTHING");
                } else {
                    fmt!(f, "UPDATE SET " Comma(updates.iter().copied().map(AssignExcluded)));
                }
            }
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ");

        if self.columns.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(self.columns.iter().map(Ident)));
        }

        fmt!(f, " FROM " Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(self.assignments.iter().map(Assign));
        let filter = &self.filter;
        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments " WHERE " filter);
    }
}

/// `"column" = ?`
struct Assign<'a>(&'a (String, stmt::Value));

impl ToSql for Assign<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, Ident(column) " = " value);
    }
}

/// `"column" = excluded."column"`
struct AssignExcluded<'a>(&'a String);

impl ToSql for AssignExcluded<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let keyword = if f.serializer.is_postgresql() {
            "EXCLUDED."
        } else {
            "excluded."
        };
        fmt!(f, Ident(self.0) " = " keyword Ident(self.0));
    }
}

/// `` `column` = VALUES(`column`) ``
struct MysqlAssignValues<'a>(&'a String);

impl ToSql for MysqlAssignValues<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0) " = VALUES(" Ident(self.0) ")");
    }
}
