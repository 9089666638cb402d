use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{quote_ident, SqlValue};

/// Builder for a single-row INSERT.
///
/// Column names are interpolated as quoted identifiers; every value is bound,
/// NULL included, so columns and values stay positionally aligned.
pub struct Insert {
    driver: Arc<dyn DatabaseDriver>,
    table: String,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Insert {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, table: impl Into<String>) -> Self {
        Self {
            driver,
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add a column and the value to insert into it.
    pub fn value(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    /// Build the SQL statement and parameters.
    pub(crate) fn build_sql(&self) -> (String, Vec<SqlValue>) {
        let mut sql = String::with_capacity(128);

        sql.push_str("INSERT INTO ");
        sql.push_str(&quote_ident(&self.table));

        if self.columns.is_empty() {
            sql.push_str(" DEFAULT VALUES");
            return (sql, Vec::new());
        }

        sql.push_str(" (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&quote_ident(col));
        }

        sql.push_str(") VALUES (");
        for i in 1..=self.values.len() {
            if i > 1 {
                sql.push_str(", ");
            }
            sql.push('$');
            sql.push_str(&i.to_string());
        }
        sql.push(')');

        (sql, self.values.clone())
    }

    /// Execute the insert and return the identity the engine generated for it.
    pub async fn execute(self) -> Result<i64> {
        let (sql, params) = self.build_sql();
        debug!(table = %self.table, %sql, params = params.len(), "insert");
        self.driver.execute_insert(&sql, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::InMemoryTestDriver;

    #[test]
    fn test_build_insert() {
        let insert = Insert::new(Arc::new(InMemoryTestDriver::new()), "songs")
            .value("name", "Hello")
            .value("album", "25");

        let (sql, params) = insert.build_sql();
        assert_eq!(
            sql,
            "INSERT INTO \"songs\" (\"name\", \"album\") VALUES ($1, $2)"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Text("Hello".to_string()),
                SqlValue::Text("25".to_string())
            ]
        );
    }

    #[test]
    fn test_build_insert_keeps_nulls_in_place() {
        let insert = Insert::new(Arc::new(InMemoryTestDriver::new()), "songs")
            .value("name", SqlValue::Null)
            .value("album", "25");

        let (sql, params) = insert.build_sql();
        assert_eq!(
            sql,
            "INSERT INTO \"songs\" (\"name\", \"album\") VALUES ($1, $2)"
        );
        assert_eq!(params[0], SqlValue::Null);
        assert_eq!(params[1], SqlValue::Text("25".to_string()));
    }

    #[test]
    fn test_build_insert_without_columns() {
        let insert = Insert::new(Arc::new(InMemoryTestDriver::new()), "songs");

        let (sql, params) = insert.build_sql();
        assert_eq!(sql, "INSERT INTO \"songs\" DEFAULT VALUES");
        assert!(params.is_empty());
    }
}
