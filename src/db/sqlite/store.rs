//! Generic record store over one SQLite table.
//!
//! A [`Record`] describes how an entity maps onto its table; [`RecordStore`]
//! provides the uniform add/get/put/delete/indexed-lookup primitives the
//! repositories are built from. Every call is a single statement, so each
//! runs in its own implicit transaction.

use std::marker::PhantomData;

use chrono::NaiveDate;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqlitePool};

use crate::db::{DbError, DbResult, Id};

/// A value bound into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

/// A named secondary index over one column.
#[derive(Debug, Clone, Copy)]
pub struct Index {
    pub name: &'static str,
    pub column: &'static str,
}

/// Mapping between an entity and its table.
///
/// The key column is always `id`; `COLUMNS` lists the remaining columns in
/// the order `values` produces them.
pub trait Record: Sized + Send + Unpin {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const INDEXES: &'static [Index] = &[];

    fn id(&self) -> Option<Id>;

    fn values(&self) -> Vec<SqlValue>;

    fn from_row(row: &SqliteRow) -> DbResult<Self>;

    fn validate(&self) -> DbResult<()>;
}

/// CRUD and indexed lookup over the table of `R`.
pub struct RecordStore<'a, R: Record> {
    pool: &'a SqlitePool,
    record: PhantomData<R>,
}

impl<'a, R: Record> RecordStore<'a, R> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            record: PhantomData,
        }
    }

    /// Insert a record and return its store-assigned key. Any id the record
    /// carries is ignored.
    pub async fn add(&self, record: &R) -> DbResult<Id> {
        record.validate()?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders(R::COLUMNS.len())
        );

        let mut query = sqlx::query(&sql);
        for value in record.values() {
            query = bind_value(query, value);
        }

        let result = query.execute(self.pool).await.map_err(DbError::database)?;
        Ok(result.last_insert_rowid())
    }

    /// All records in key order.
    pub async fn get_all(&self) -> DbResult<Vec<R>> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", select_list::<R>(), R::TABLE);

        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(DbError::database)?;

        rows.iter().map(R::from_row).collect()
    }

    pub async fn get(&self, id: Id) -> DbResult<Option<R>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", select_list::<R>(), R::TABLE);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        row.as_ref().map(R::from_row).transpose()
    }

    /// All records whose indexed column equals `value`, in key order.
    /// An empty result is not an error.
    pub async fn get_all_by_index(
        &self,
        index_name: &str,
        value: impl Into<SqlValue>,
    ) -> DbResult<Vec<R>> {
        let index = find_index::<R>(index_name)?;
        let sql = format!(
            "SELECT {} FROM {} INDEXED BY {} WHERE {} = ? ORDER BY id",
            select_list::<R>(),
            R::TABLE,
            index.name,
            index.column
        );

        let rows = bind_value(sqlx::query(&sql), value.into())
            .fetch_all(self.pool)
            .await
            .map_err(DbError::database)?;

        rows.iter().map(R::from_row).collect()
    }

    /// Replace the record stored under its key, inserting it if the key is
    /// free. A record without a key is added.
    pub async fn put(&self, record: &R) -> DbResult<Id> {
        let Some(id) = record.id() else {
            return self.add(record).await;
        };
        record.validate()?;

        let assignments = R::COLUMNS
            .iter()
            .map(|c| format!("{c} = excluded.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} (id, {}) VALUES (?, {}) ON CONFLICT(id) DO UPDATE SET {}",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders(R::COLUMNS.len()),
            assignments
        );

        let mut query = sqlx::query(&sql).bind(id);
        for value in record.values() {
            query = bind_value(query, value);
        }

        query.execute(self.pool).await.map_err(DbError::database)?;
        Ok(id)
    }

    /// Remove a record. Removing a missing key succeeds.
    pub async fn delete(&self, id: Id) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        sqlx::query(&sql)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::database)?;
        Ok(())
    }

    /// Remove every record whose indexed column equals `value`.
    pub async fn delete_by_index(
        &self,
        index_name: &str,
        value: impl Into<SqlValue>,
    ) -> DbResult<u64> {
        let index = find_index::<R>(index_name)?;
        let sql = format!("DELETE FROM {} WHERE {} = ?", R::TABLE, index.column);

        let result = bind_value(sqlx::query(&sql), value.into())
            .execute(self.pool)
            .await
            .map_err(DbError::database)?;
        Ok(result.rows_affected())
    }
}

fn find_index<R: Record>(name: &str) -> DbResult<&'static Index> {
    R::INDEXES
        .iter()
        .find(|i| i.name == name)
        .ok_or_else(|| DbError::InvalidData {
            message: format!("{} has no index named '{}'", R::TABLE, name),
            help: format!(
                "Known indexes: {}",
                R::INDEXES
                    .iter()
                    .map(|i| i.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

fn select_list<R: Record>() -> String {
    format!("id, {}", R::COLUMNS.join(", "))
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Date(v) => query.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_match_column_count() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(4), "?, ?, ?, ?");
    }

    #[test]
    fn sql_value_conversions() {
        assert_eq!(SqlValue::from(3i64), SqlValue::Integer(3));
        assert_eq!(SqlValue::from("a"), SqlValue::Text("a".to_string()));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(true));
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(SqlValue::from(day), SqlValue::Date(day));
    }
}
