use std::sync::Arc;

use crate::builders::{InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::traits::DatabaseDriver;

/// Query builder factory.
/// Created from a DynOrmClient and used to build and execute queries.
#[derive(Clone)]
pub struct Querier {
    driver: Arc<dyn DatabaseDriver>,
}

impl Querier {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Start building a SELECT query.
    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new(Arc::clone(&self.driver))
    }

    /// Start building an INSERT into `table`.
    pub fn insert(&self, table: &str) -> InsertBuilder {
        InsertBuilder::new(Arc::clone(&self.driver), table)
    }

    /// Start building an UPDATE of `table`.
    pub fn update(&self, table: &str) -> UpdateBuilder {
        UpdateBuilder::new(Arc::clone(&self.driver), table)
    }
}
