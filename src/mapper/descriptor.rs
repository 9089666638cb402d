use tracing::info;

use crate::error::{DynOrmError, Result};
use crate::mapper::accessor::{install_accessors, AccessorRegistry};
use crate::naming::table_name_for;
use crate::schema::{columns_for, ColumnInfo};
use crate::traits::DatabaseDriver;

/// Identity column used when none is configured.
pub const DEFAULT_IDENTITY_COLUMN: &str = "id";

/// The resolved pairing of a model with its table and live column list.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    model_name: String,
    table_name: String,
    columns: Vec<ColumnInfo>,
    column_names: Vec<String>,
    identity_column: String,
    accessors: AccessorRegistry,
}

impl ModelDescriptor {
    /// Resolves the table for `model_name`, introspects it and installs the
    /// accessors. Fails with `TableNotFound` when the table has no columns.
    pub async fn introspect(
        driver: &dyn DatabaseDriver,
        model_name: &str,
        identity_column: &str,
    ) -> Result<Self> {
        let table_name = table_name_for(model_name);
        let columns = columns_for(driver, &table_name).await?;
        let descriptor = Self::from_columns(model_name, table_name, columns, identity_column)?;

        info!(
            model = %descriptor.model_name,
            table = %descriptor.table_name,
            columns = descriptor.column_names.len(),
            "registered model"
        );
        Ok(descriptor)
    }

    /// Builds a descriptor from already introspected columns.
    pub fn from_columns(
        model_name: &str,
        table_name: String,
        columns: Vec<ColumnInfo>,
        identity_column: &str,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(DynOrmError::TableNotFound {
                model: model_name.to_string(),
                table: table_name,
            });
        }

        let column_names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        if !column_names.iter().any(|c| c == identity_column) {
            return Err(DynOrmError::MissingIdentity {
                table: table_name,
                column: identity_column.to_string(),
            });
        }

        let accessors = install_accessors(&column_names);

        Ok(Self {
            model_name: model_name.to_string(),
            table_name,
            columns,
            column_names,
            identity_column: identity_column.to_string(),
            accessors,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Column names in ordinal order, identity included.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn identity_column(&self) -> &str {
        &self.identity_column
    }

    pub fn accessors(&self) -> &AccessorRegistry {
        &self.accessors
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.accessors.contains(name)
    }

    /// Columns written by an insert: every column except the identity,
    /// compared by exact name.
    pub fn insert_columns(&self) -> impl Iterator<Item = &str> {
        self.column_names
            .iter()
            .map(String::as_str)
            .filter(move |c| *c != self.identity_column)
    }

    pub(crate) fn unknown_property(&self, property: &str) -> DynOrmError {
        DynOrmError::UnknownProperty {
            table: self.table_name.clone(),
            property: property.to_string(),
        }
    }
}
