use crate::types::quote_ident;

/// Trait representing a database column.
/// Implemented by introspected column metadata and by plain column references.
pub trait Column {
    /// Returns the column name as it appears in the database.
    fn column_name(&self) -> &str;

    /// Returns the table name this column belongs to.
    fn table_name(&self) -> &str;

    /// Returns the fully qualified column name (table.column).
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }

    /// Returns the qualified name with both parts quoted, ready to splice into SQL.
    fn quoted_name(&self) -> String {
        format!(
            "{}.{}",
            quote_ident(self.table_name()),
            quote_ident(self.column_name())
        )
    }
}

/// A reference to a column, used internally by query builders.
/// This allows storing column information without requiring the original Column type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self {
            table: col.table_name().to_string(),
            column: col.column_name().to_string(),
        }
    }
}

impl Column for ColumnRef {
    fn column_name(&self) -> &str {
        &self.column
    }

    fn table_name(&self) -> &str {
        &self.table
    }
}
