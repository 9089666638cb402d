use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::clauses::WhereClause;
use crate::error::{DynOrmError, Result};
use crate::mapper::{construct, ModelDescriptor, Record, RecordState};
use crate::querier::Querier;
use crate::traits::{Column, ColumnRef};
use crate::types::{QueryResult, SqlValue};

/// Generic CRUD over one mapped model.
///
/// Every statement is generated from the descriptor's table name and
/// introspected columns; values are always bound.
#[derive(Clone)]
pub struct Repository {
    querier: Querier,
    descriptor: Arc<ModelDescriptor>,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Repository {
    pub(crate) fn new(querier: Querier, descriptor: Arc<ModelDescriptor>) -> Self {
        Self {
            querier,
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// Builds a transient record from a property map.
    pub fn construct<I, K, V>(&self, properties: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SqlValue>,
    {
        construct(&self.descriptor, properties)
    }

    /// A transient record with every property NULL.
    pub fn new_record(&self) -> Record {
        Record::empty(&self.descriptor)
    }

    /// Persists a record.
    ///
    /// A transient record is inserted and receives the identity the engine
    /// generated on this connection. A persisted record is updated in place;
    /// its identity never changes. On failure the record is left untouched.
    pub async fn save(&self, record: &mut Record) -> Result<()> {
        let table = record.descriptor().table_name();
        if table != self.descriptor.table_name() {
            return Err(DynOrmError::ModelMismatch {
                expected: self.descriptor.table_name().to_string(),
                actual: table.to_string(),
            });
        }

        match record.state() {
            RecordState::Transient => self.insert(record).await,
            RecordState::Persisted => self.update(record).await,
        }
    }

    async fn insert(&self, record: &mut Record) -> Result<()> {
        let descriptor = Arc::clone(record.descriptor());
        let table = descriptor.table_name();

        let mut insert = self.querier.insert(table);
        for column in descriptor.insert_columns() {
            insert = insert.value(column, record.get(column)?.clone());
        }

        let id = insert
            .execute()
            .await
            .map_err(|e| DynOrmError::persistence(table, e))?;

        record.assign_identity(id);
        debug!(table, id, "inserted record");
        Ok(())
    }

    async fn update(&self, record: &mut Record) -> Result<()> {
        let descriptor = Arc::clone(record.descriptor());
        let table = descriptor.table_name();
        let identity = descriptor.identity_column();
        let id = record.get(identity)?.clone();

        let by_identity = WhereClause::eq(&ColumnRef::new(table, identity), id.clone());

        let mut update = self.querier.update(table);
        let mut assignments = 0;
        for column in descriptor.insert_columns() {
            update = update.set(column, record.get(column)?.clone());
            assignments += 1;
        }

        // Nothing to write; the row must still exist
        let updated = if assignments == 0 {
            let exists = self
                .querier
                .select()
                .columns(&[&ColumnRef::new(table, identity)])
                .from(table)
                .where_(by_identity);
            exists
                .execute()
                .await
                .map_err(|e| DynOrmError::persistence(table, e))?
                .len()
        } else {
            update
                .where_(by_identity)
                .returning(identity)
                .execute()
                .await
                .map_err(|e| DynOrmError::persistence(table, e))?
        };

        if updated == 0 {
            return Err(DynOrmError::Persistence {
                table: table.to_string(),
                message: format!("no row with {identity} = {id}"),
            });
        }

        debug!(table, %id, "updated record");
        Ok(())
    }

    /// Returns every record whose `property` equals `value`.
    ///
    /// `property` must be one of the introspected columns; anything else fails
    /// with `UnknownProperty` before a query is issued.
    pub async fn find_by(&self, property: &str, value: impl Into<SqlValue>) -> Result<Vec<Record>> {
        if !self.descriptor.has_column(property) {
            return Err(self.descriptor.unknown_property(property));
        }

        let table = self.descriptor.table_name();
        let clause = WhereClause::eq(&ColumnRef::new(table, property), value);
        let select = self
            .querier
            .select()
            .columns(&self.column_refs())
            .from(table)
            .where_(clause);
        let result = select
            .execute()
            .await
            .map_err(|e| DynOrmError::persistence(table, e))?;

        self.records_from(result)
    }

    /// Looks a record up by identity.
    pub async fn find_by_id(&self, id: impl Into<SqlValue>) -> Result<Option<Record>> {
        let identity = self.descriptor.identity_column().to_string();
        Ok(self.find_by(&identity, id).await?.into_iter().next())
    }

    /// Returns every record of the table.
    pub async fn all(&self) -> Result<Vec<Record>> {
        let table = self.descriptor.table_name();
        let select = self.querier.select().columns(&self.column_refs()).from(table);
        let result = select
            .execute()
            .await
            .map_err(|e| DynOrmError::persistence(table, e))?;

        self.records_from(result)
    }

    fn column_refs(&self) -> Vec<&dyn Column> {
        self.descriptor
            .columns()
            .iter()
            .map(|c| c as &dyn Column)
            .collect()
    }

    fn records_from(&self, result: QueryResult) -> Result<Vec<Record>> {
        result
            .rows()
            .into_iter()
            .map(|row| {
                let mut record = construct(&self.descriptor, row.into_properties())?;
                record.normalize_identity();
                Ok(record)
            })
            .collect()
    }
}
