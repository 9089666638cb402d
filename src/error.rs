use thiserror::Error;

/// Error type for dynorm operations
#[derive(Debug, Error)]
pub enum DynOrmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid connection URL: {0}")]
    InvalidConnectionUrl(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Table `{table}` for model `{model}` not found or has no columns")]
    TableNotFound { model: String, table: String },

    #[error("Table `{table}` has no identity column `{column}`")]
    MissingIdentity { table: String, column: String },

    #[error("Identity `{column}` of a persisted `{table}` record cannot be reassigned")]
    IdentityReassigned { table: String, column: String },

    #[error("Record of table `{actual}` saved through the `{expected}` repository")]
    ModelMismatch { expected: String, actual: String },

    #[error("Unknown property `{property}` for table `{table}`")]
    UnknownProperty { table: String, property: String },

    #[error("Persistence failed on `{table}`: {message}")]
    Persistence { table: String, message: String },
}

impl DynOrmError {
    /// Wraps an engine failure raised while persisting or loading records of `table`.
    pub(crate) fn persistence(table: &str, err: DynOrmError) -> Self {
        let message = match err {
            DynOrmError::QueryFailed(message) | DynOrmError::ConnectionFailed(message) => message,
            DynOrmError::Persistence { message, .. } => message,
            other => other.to_string(),
        };
        DynOrmError::Persistence {
            table: table.to_string(),
            message,
        }
    }
}

/// Result type alias for dynorm operations
pub type Result<T> = std::result::Result<T, DynOrmError>;
