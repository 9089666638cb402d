use std::collections::HashMap;

use crate::types::SqlValue;

/// A getter/setter pair bound to one value slot of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    name: String,
    slot: usize,
}

impl Accessor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Reads this property out of a record's value slots.
    pub fn get<'v>(&self, values: &'v [SqlValue]) -> &'v SqlValue {
        &values[self.slot]
    }

    /// Writes this property into a record's value slots.
    pub fn set(&self, values: &mut [SqlValue], value: SqlValue) {
        values[self.slot] = value;
    }
}

/// Per-model registry of accessors, keyed by property name.
#[derive(Debug, Clone, Default)]
pub struct AccessorRegistry {
    accessors: Vec<Accessor>,
    by_name: HashMap<String, usize>,
}

impl AccessorRegistry {
    /// Registers an accessor for `name`. A name that is already registered
    /// keeps its original slot.
    pub fn install(&mut self, name: &str) -> &Accessor {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                let index = self.accessors.len();
                self.accessors.push(Accessor {
                    name: name.to_string(),
                    slot: index,
                });
                self.by_name.insert(name.to_string(), index);
                index
            }
        };
        &self.accessors[index]
    }

    pub fn get(&self, name: &str) -> Option<&Accessor> {
        self.by_name.get(name).map(|&index| &self.accessors[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Accessors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Accessor> {
        self.accessors.iter()
    }

    /// Number of value slots a record of this model carries.
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

/// Builds the accessor registry for a model from its column names.
pub fn install_accessors<S: AsRef<str>>(column_names: &[S]) -> AccessorRegistry {
    let mut registry = AccessorRegistry::default();
    for name in column_names {
        registry.install(name.as_ref());
    }
    registry
}
