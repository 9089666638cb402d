use std::sync::Arc;

use tracing::debug;

use crate::clauses::WhereClause;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{quote_ident, SqlValue};

/// Builder for an UPDATE with a bound SET list and an optional WHERE clause.
pub struct Update {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
    assignments: Vec<(String, SqlValue)>,
    where_clause: Option<WhereClause>,
    returning: Option<String>,
}

impl Update {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, table: impl Into<String>) -> Self {
        Self {
            driver,
            table: table.into(),
            assignments: Vec::new(),
            where_clause: None,
            returning: None,
        }
    }

    /// Add a `column = value` assignment.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    /// Add a WHERE clause to the statement.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Return `column` for every updated row, so the row count is observable.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        self.returning = Some(column.into());
        self
    }

    /// Build the SQL statement and parameters.
    pub(crate) fn build_sql(&self) -> (String, Vec<SqlValue>) {
        let mut sql = String::with_capacity(128);
        let mut params = Vec::with_capacity(self.assignments.len() + 1);

        sql.push_str("UPDATE ");
        sql.push_str(&quote_ident(&self.table));
        sql.push_str(" SET ");
        for (i, (col, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            params.push(value.clone());
            sql.push_str(&quote_ident(col));
            sql.push_str(" = $");
            sql.push_str(&params.len().to_string());
        }

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            let where_sql = where_clause.build_sql(0, &mut params);
            sql.push_str(&where_sql);
        }

        if let Some(ref returning) = self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(&quote_ident(returning));
        }

        (sql, params)
    }

    /// Execute the update. Returns the number of rows handed back, which is the
    /// number of updated rows when `returning` was set and zero otherwise.
    pub async fn execute(self) -> Result<usize> {
        let (sql, params) = self.build_sql();
        debug!(table = %self.table, %sql, params = params.len(), "update");
        let raw = self.driver.execute(&sql, &params).await?;
        Ok(raw.rows.len())
    }
}
