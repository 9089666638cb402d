use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ToSql};
use tracing::debug;
use url::Url;

use crate::error::{DynOrmError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{Dialect, RawQueryResult, SqlValue};

/// Embedded SQLite driver implementation using rusqlite.
///
/// One connection guarded by a mutex. SQLite serializes statements itself;
/// the lock keeps an insert and its `last_insert_rowid()` lookup together.
pub struct SqliteDriver {
    connection: Mutex<Connection>,
}

impl SqliteDriver {
    /// Open a driver from a `sqlite:` URL. `sqlite::memory:` opens an
    /// in-memory database, anything else is treated as a file path.
    pub fn connect(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| DynOrmError::InvalidConnectionUrl(e.to_string()))?;

        if parsed.scheme() != "sqlite" {
            return Err(DynOrmError::InvalidConnectionUrl(format!(
                "connection URL does not have a `sqlite` scheme; url={url}"
            )));
        }

        if parsed.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(PathBuf::from(parsed.path()))
        }
    }

    /// Create an in-memory SQLite database.
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()
            .map_err(|e| DynOrmError::ConnectionFailed(e.to_string()))?;
        Ok(Self::from_connection(connection))
    }

    /// Open a SQLite database at the specified file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).map_err(|e| DynOrmError::ConnectionFailed(e.to_string()))?;
        Ok(Self::from_connection(connection))
    }

    fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| DynOrmError::ConnectionFailed("sqlite connection lock poisoned".into()))
    }
}

#[async_trait]
impl DatabaseDriver for SqliteDriver {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        debug!(%sql, params = params.len(), "sqlite execute");
        let connection = self.lock()?;
        run(&connection, sql, params).map_err(|e| DynOrmError::QueryFailed(e.to_string()))
    }

    async fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!(%sql, "sqlite batch");
        let connection = self.lock()?;
        connection
            .execute_batch(sql)
            .map_err(|e| DynOrmError::QueryFailed(e.to_string()))
    }

    async fn execute_insert(&self, sql: &str, params: &[SqlValue]) -> Result<i64> {
        debug!(%sql, params = params.len(), "sqlite insert");
        let connection = self.lock()?;
        run(&connection, sql, params).map_err(|e| DynOrmError::QueryFailed(e.to_string()))?;
        Ok(connection.last_insert_rowid())
    }
}

/// Runs one statement and collects whatever rows it produces.
fn run(connection: &Connection, sql: &str, params: &[SqlValue]) -> rusqlite::Result<RawQueryResult> {
    let mut stmt = connection.prepare_cached(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    let mut result_rows = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for index in 0..width {
            values.push(value_to_string(row.get_ref(index)?));
        }
        result_rows.push(values);
    }

    Ok(RawQueryResult::new(columns, result_rows))
}

fn value_to_string(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Int32(i) => ToSqlOutput::Owned(Value::Integer(*i as i64)),
            SqlValue::Int64(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(*b as i64)),
        })
    }
}
