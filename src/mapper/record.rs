use std::sync::Arc;

use crate::error::{DynOrmError, Result};
use crate::mapper::ModelDescriptor;
use crate::types::SqlValue;

/// Persistence state of a record, derived from its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Identity unset; never saved.
    Transient,
    /// Identity assigned by the storage engine.
    Persisted,
}

/// An instance of a mapped model: one value slot per introspected column.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<ModelDescriptor>,
    values: Vec<SqlValue>,
}

impl Record {
    /// A transient record with every property NULL.
    pub fn empty(descriptor: &Arc<ModelDescriptor>) -> Self {
        Self {
            descriptor: Arc::clone(descriptor),
            values: vec![SqlValue::Null; descriptor.accessors().len()],
        }
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// Reads a property through its accessor.
    pub fn get(&self, property: &str) -> Result<&SqlValue> {
        let accessor = self
            .descriptor
            .accessors()
            .get(property)
            .ok_or_else(|| self.descriptor.unknown_property(property))?;
        Ok(accessor.get(&self.values))
    }

    /// Writes a property through its accessor.
    ///
    /// The identity of a persisted record is owned by the engine and fails
    /// with `IdentityReassigned`.
    pub fn set(&mut self, property: &str, value: impl Into<SqlValue>) -> Result<()> {
        if property == self.descriptor.identity_column() && self.is_persisted() {
            return Err(DynOrmError::IdentityReassigned {
                table: self.descriptor.table_name().to_string(),
                column: property.to_string(),
            });
        }
        let accessor = self
            .descriptor
            .accessors()
            .get(property)
            .ok_or_else(|| self.descriptor.unknown_property(property))?;
        accessor.set(&mut self.values, value.into());
        Ok(())
    }

    /// The identity value, `None` while the record is transient.
    pub fn id(&self) -> Option<&SqlValue> {
        self.get(self.descriptor.identity_column())
            .ok()
            .filter(|v| !v.is_null())
    }

    pub fn state(&self) -> RecordState {
        match self.id() {
            Some(_) => RecordState::Persisted,
            None => RecordState::Transient,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.state() == RecordState::Persisted
    }

    /// Property names and values in column order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        let values = &self.values;
        self.descriptor
            .accessors()
            .iter()
            .map(move |a| (a.name(), a.get(values)))
    }

    pub(crate) fn assign_identity(&mut self, id: i64) {
        if let Some(accessor) = self
            .descriptor
            .accessors()
            .get(self.descriptor.identity_column())
        {
            accessor.set(&mut self.values, SqlValue::Int64(id));
        }
    }

    /// Loaded identities arrive as text; integer ones are stored as `Int64`
    /// so they compare equal to the identity `save` assigns.
    pub(crate) fn normalize_identity(&mut self) {
        let parsed = match self.id() {
            Some(SqlValue::Text(text)) => text.parse::<i64>().ok(),
            Some(SqlValue::Int32(id)) => Some(i64::from(*id)),
            _ => None,
        };
        if let Some(id) = parsed {
            self.assign_identity(id);
        }
    }
}

/// Builds a record from a property map.
///
/// Every key is checked before anything is assigned: an unknown key fails
/// with `UnknownProperty` and no record is produced. Unsupplied properties
/// are NULL.
pub fn construct<I, K, V>(descriptor: &Arc<ModelDescriptor>, properties: I) -> Result<Record>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<SqlValue>,
{
    let accessors = descriptor.accessors();
    let mut assignments = Vec::new();
    for (key, value) in properties {
        let accessor = accessors
            .get(key.as_ref())
            .ok_or_else(|| descriptor.unknown_property(key.as_ref()))?;
        assignments.push((accessor, value.into()));
    }

    let mut record = Record::empty(descriptor);
    for (accessor, value) in assignments {
        accessor.set(&mut record.values, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::mapper::descriptor::tests::songs;

    #[test]
    fn test_construct_empty_is_all_null() {
        let descriptor = Arc::new(songs());

        let record = construct(&descriptor, HashMap::<String, SqlValue>::new()).unwrap();

        for (_, value) in record.properties() {
            assert!(value.is_null());
        }
        assert_eq!(record.state(), RecordState::Transient);
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_construct_partial() {
        let descriptor = Arc::new(songs());

        let record = construct(&descriptor, [("name", "Hello")]).unwrap();

        assert_eq!(record.get("name").unwrap(), &SqlValue::from("Hello"));
        assert!(record.get("album").unwrap().is_null());
    }

    #[test]
    fn test_construct_unknown_property() {
        let descriptor = Arc::new(songs());

        let err = construct(&descriptor, [("name", "Hello"), ("genre", "pop")]).unwrap_err();

        match err {
            DynOrmError::UnknownProperty { table, property } => {
                assert_eq!(table, "songs");
                assert_eq!(property, "genre");
            }
            other => panic!("Expected UnknownProperty, got {other:?}"),
        }
    }

    #[test]
    fn test_set_and_get() {
        let descriptor = Arc::new(songs());
        let mut record = construct(&descriptor, [("name", "Hello")]).unwrap();

        record.set("album", "25").unwrap();

        assert_eq!(record.get("album").unwrap(), &SqlValue::from("25"));
        assert!(record.set("genre", "pop").is_err());
        assert!(record.get("genre").is_err());
    }

    #[test]
    fn test_identity_marks_persisted() {
        let descriptor = Arc::new(songs());
        let mut record = construct(&descriptor, [("name", "Hello")]).unwrap();

        record.assign_identity(1);

        assert!(record.is_persisted());
        assert_eq!(record.id(), Some(&SqlValue::Int64(1)));
    }

    #[test]
    fn test_persisted_identity_cannot_be_reassigned() {
        let descriptor = Arc::new(songs());
        let mut saved = construct(&descriptor, [("name", "Hello")]).unwrap();
        saved.assign_identity(1);
        let err = saved.set("id", 2i64).unwrap_err();

        match err {
            DynOrmError::IdentityReassigned { table, column } => {
                assert_eq!(table, "songs");
                assert_eq!(column, "id");
            }
            other => panic!("Expected IdentityReassigned, got {other:?}"),
        }
        assert_eq!(saved.id(), Some(&SqlValue::Int64(1)));
        saved.set("name", "Hello again").unwrap();
    }

    #[test]
    fn test_normalize_identity_from_text() {
        let descriptor = Arc::new(songs());
        let mut record = construct(&descriptor, [("id", "3"), ("name", "Hello")]).unwrap();

        record.normalize_identity();

        assert_eq!(record.id(), Some(&SqlValue::Int64(3)));
    }

    #[test]
    fn test_properties_in_column_order() {
        let descriptor = Arc::new(songs());
        let record = construct(&descriptor, [("album", "25"), ("name", "Hello")]).unwrap();

        let names: Vec<&str> = record.properties().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["id", "name", "album"]);
    }
}
