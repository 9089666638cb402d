use async_trait::async_trait;

use crate::error::{DynOrmError, Result};
use crate::types::{Dialect, QueryResult, RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Connecting to the database
/// - Converting SqlValue parameters to native types
/// - Executing queries and converting results to RawQueryResult
/// - Reporting the identity generated by their own last insert
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// The SQL flavor this driver speaks.
    fn dialect(&self) -> Dialect;

    /// Execute a SQL query with the given parameters.
    /// Parameters use `$1, $2, ...` placeholders.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Execute a script of one or more statements without parameters.
    ///
    /// The default hands the whole script to `execute`, which suits drivers
    /// that accept several statements at once.
    async fn execute_batch(&self, sql: &str) -> Result<()> {
        self.execute(sql, &[]).await.map(|_| ())
    }

    /// Execute an INSERT and return the identity it generated on this connection.
    ///
    /// The default runs the statement, then the dialect's last-identity query.
    /// Drivers that can hold their connection across both steps should override it.
    async fn execute_insert(&self, sql: &str, params: &[SqlValue]) -> Result<i64> {
        self.execute(sql, params).await?;
        let raw = self
            .execute(self.dialect().last_insert_id_query(), &[])
            .await?;
        parse_identity(raw)
    }
}

/// Reads the single integer cell returned by a last-identity query.
pub(crate) fn parse_identity(raw: RawQueryResult) -> Result<i64> {
    let row = QueryResult::from_raw(raw).single_row()?;
    let columns = row.columns();
    let column = columns
        .first()
        .ok_or_else(|| DynOrmError::QueryFailed("identity query returned no columns".into()))?;
    let cell = row
        .get_by_name(column)?
        .ok_or_else(|| DynOrmError::QueryFailed("identity query returned NULL".into()))?;
    cell.parse::<i64>()
        .map_err(|e| DynOrmError::QueryFailed(format!("invalid identity `{cell}`: {e}")))
}
