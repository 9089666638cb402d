use tracing::{debug, warn};

use crate::error::Result;
use crate::schema::ColumnInfo;
use crate::traits::DatabaseDriver;
use crate::types::{QueryResult, Row, SqlValue};

/// Returns the column metadata of `table`, in the engine's ordinal order.
///
/// A table that does not exist yields an empty vector. Rows with a NULL or
/// empty column name are dropped.
pub async fn columns_for(driver: &dyn DatabaseDriver, table: &str) -> Result<Vec<ColumnInfo>> {
    let sql = driver.dialect().table_info_query();
    let raw = driver.execute(sql, &[SqlValue::from(table)]).await?;
    let rows = QueryResult::from_raw(raw).rows();

    let mut columns = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match column_from_row(table, index, row) {
            Some(column) => columns.push(column),
            None => warn!(table, index, "dropping table-info row without a column name"),
        }
    }

    debug!(table, columns = columns.len(), "introspected table");
    Ok(columns)
}

/// Returns the column names of `table`, in the engine's ordinal order.
pub async fn column_names_for(driver: &dyn DatabaseDriver, table: &str) -> Result<Vec<String>> {
    Ok(columns_for(driver, table)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

fn cell<'r>(row: &'r Row, name: &str) -> Option<&'r str> {
    row.get_by_name(name).ok().flatten()
}

fn flag(row: &Row, name: &str) -> bool {
    cell(row, name).is_some_and(|v| v != "0")
}

fn column_from_row(table: &str, index: usize, row: &Row) -> Option<ColumnInfo> {
    let name = cell(row, "name").filter(|n| !n.is_empty())?;

    Some(ColumnInfo {
        table: table.to_string(),
        position: cell(row, "cid")
            .and_then(|c| c.parse().ok())
            .unwrap_or(index),
        name: name.to_string(),
        declared_type: cell(row, "type")
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        not_null: flag(row, "notnull"),
        default_value: cell(row, "dflt_value").map(str::to_string),
        primary_key: flag(row, "pk"),
    })
}
