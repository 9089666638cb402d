use async_trait::async_trait;
use tokio_postgres::{
    types::{ToSql, Type},
    Client, NoTls,
};
use tracing::{debug, error};

use crate::error::{DynOrmError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{Dialect, RawQueryResult, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
///
/// Holds a single client connection, so `lastval()` is scoped to the session
/// that ran the insert.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| DynOrmError::ConnectionFailed(e.to_string()))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "postgres connection closed with error");
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        debug!(%sql, params = params.len(), "postgres execute");

        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| DynOrmError::QueryFailed(e.to_string()))?;

        // Convert SqlValue params to the types the server inferred for them
        let converted_params = params
            .iter()
            .zip(statement.params())
            .map(|(value, type_)| sql_value_to_tosql(value, type_))
            .collect::<Result<Vec<_>>>()?;

        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(|e| DynOrmError::QueryFailed(e.to_string()))?;

        // Extract column names
        let columns: Vec<String> = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => Vec::new(),
        };

        // Convert rows to string values
        let result_rows: Vec<Vec<Option<String>>> = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| row_value_to_string(row, i, col.type_()))
                    .collect()
            })
            .collect();

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!(%sql, "postgres batch");
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| DynOrmError::QueryFailed(e.to_string()))
    }
}

/// Convert a SqlValue to a boxed ToSql trait object of the parameter's type.
///
/// Record values are mostly text, so numeric and boolean parameters are parsed
/// from their text form.
fn sql_value_to_tosql(value: &SqlValue, type_: &Type) -> Result<Box<dyn ToSql + Sync + Send>> {
    fn parse<T>(text: Option<String>, type_: &Type) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        text.map(|t| {
            t.parse::<T>().map_err(|e| {
                DynOrmError::QueryFailed(format!("cannot bind `{t}` as {type_}: {e}"))
            })
        })
        .transpose()
    }

    let text = value.to_text();
    let boxed: Box<dyn ToSql + Sync + Send> = match *type_ {
        Type::INT2 => Box::new(parse::<i16>(text, type_)?),
        Type::INT4 => Box::new(parse::<i32>(text, type_)?),
        Type::INT8 => Box::new(parse::<i64>(text, type_)?),
        Type::FLOAT4 => Box::new(parse::<f32>(text, type_)?),
        Type::FLOAT8 => Box::new(parse::<f64>(text, type_)?),
        Type::BOOL => Box::new(parse::<bool>(text, type_)?),
        _ => Box::new(text),
    };
    Ok(boxed)
}

/// Convert a row value at a given index to a string, `None` for NULL.
fn row_value_to_string(row: &tokio_postgres::Row, index: usize, type_: &Type) -> Option<String> {
    let value = match *type_ {
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map(|v| v.map(|v| v.to_string())),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map(|v| v.map(|v| v.to_string())),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(index)
            .map(|v| v.map(|v| v.to_string())),
        Type::BOOL => row
            .try_get::<_, Option<bool>>(index)
            .map(|v| v.map(|v| v.to_string())),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(index)
            .map(|v| v.map(|v| v.to_string())),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(index)
            .map(|v| v.map(|v| v.to_string())),
        _ => row.try_get::<_, Option<String>>(index),
    };

    // Types without a text mapping come back as NULL
    value.unwrap_or_else(|e| {
        debug!(index, type_ = %type_, error = %e, "unsupported postgres column type");
        None
    })
}
