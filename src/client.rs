use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::{Backend, ClientConfig};
use crate::drivers::{SqliteDriver, TokioPostgresDriver};
use crate::error::{DynOrmError, Result};
use crate::mapper::{ModelDescriptor, Record, DEFAULT_IDENTITY_COLUMN};
use crate::querier::Querier;
use crate::repository::Repository;
use crate::traits::{DatabaseDriver, Model};
use crate::types::SqlValue;

/// Main entry point for dynorm.
/// Holds the shared database connection and the registry of mapped models.
pub struct DynOrmClient {
    driver: Arc<dyn DatabaseDriver>,
    identity_column: String,
    models: RwLock<HashMap<String, Arc<ModelDescriptor>>>,
}

impl DynOrmClient {
    /// Connect using a connection URL; the scheme picks the driver.
    ///
    /// # Example
    /// ```ignore
    /// let client = DynOrmClient::connect("sqlite::memory:").await?;
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(ClientConfig::new(url)?).await
    }

    /// Connect using a prepared configuration.
    pub async fn connect_with(config: ClientConfig) -> Result<Self> {
        let driver: Arc<dyn DatabaseDriver> = match config.backend() {
            Backend::Sqlite => Arc::new(SqliteDriver::connect(config.url().as_str())?),
            Backend::Postgres => {
                Arc::new(TokioPostgresDriver::connect(config.url().as_str()).await?)
            }
        };
        Ok(Self::with_driver(driver).identity_column(config.identity_column()))
    }

    /// Create a new client with a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn with_driver(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            driver,
            identity_column: DEFAULT_IDENTITY_COLUMN.to_string(),
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Set the identity column used for models registered from now on.
    pub fn identity_column(mut self, column: &str) -> Self {
        self.identity_column = column.to_string();
        self
    }

    /// Create a Querier for building and executing queries.
    pub fn querier(&self) -> Querier {
        Querier::new(Arc::clone(&self.driver))
    }

    /// Run a raw script of one or more statements, e.g. bootstrap DDL.
    pub async fn execute(&self, sql: &str) -> Result<()> {
        self.driver.execute_batch(sql).await
    }

    /// Introspect the table of `model_name` and (re)install its descriptor.
    ///
    /// Call again after the table's schema changes.
    pub async fn register(&self, model_name: &str) -> Result<Repository> {
        let descriptor = Arc::new(
            ModelDescriptor::introspect(self.driver.as_ref(), model_name, &self.identity_column)
                .await?,
        );
        self.models
            .write()
            .map_err(|_| DynOrmError::QueryFailed("model registry lock poisoned".into()))?
            .insert(model_name.to_string(), Arc::clone(&descriptor));
        Ok(Repository::new(self.querier(), descriptor))
    }

    /// Repository for `model_name`, registering the model on first use.
    pub async fn repository(&self, model_name: &str) -> Result<Repository> {
        match self.descriptor(model_name)? {
            Some(descriptor) => Ok(Repository::new(self.querier(), descriptor)),
            None => self.register(model_name).await,
        }
    }

    /// Repository for a marker type implementing [`Model`].
    pub async fn repository_for<M: Model>(&self) -> Result<Repository> {
        self.repository(M::model_name()).await
    }

    /// The registered descriptor of `model_name`, if any.
    pub fn descriptor(&self, model_name: &str) -> Result<Option<Arc<ModelDescriptor>>> {
        let models = self
            .models
            .read()
            .map_err(|_| DynOrmError::QueryFailed("model registry lock poisoned".into()))?;
        Ok(models.get(model_name).cloned())
    }

    /// Finds the records of `model_name` whose `property` equals `value`.
    pub async fn find_by(
        &self,
        model_name: &str,
        property: &str,
        value: impl Into<SqlValue>,
    ) -> Result<Vec<Record>> {
        self.repository(model_name)
            .await?
            .find_by(property, value)
            .await
    }
}
