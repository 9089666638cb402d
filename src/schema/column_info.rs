use crate::traits::Column;

/// Metadata for one column, as reported by the engine's table-info query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub table: String,
    /// Zero-based ordinal position.
    pub position: usize,
    pub name: String,
    pub declared_type: Option<String>,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl Column for ColumnInfo {
    fn column_name(&self) -> &str {
        &self.name
    }

    fn table_name(&self) -> &str {
        &self.table
    }
}
