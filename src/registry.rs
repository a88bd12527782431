//! Classification sets and the ignored-field set

use crate::error::ConfigError;
use crate::traits::{Comparable, Record};
use crate::types::TypeDescriptor;
use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};

/// A set of types identified by static type identity or by qualified name
#[derive(Debug, Clone, Default)]
pub struct TypeSet {
    types: HashMap<TypeId, &'static str>,
    names: BTreeSet<String>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type by identity; returns false if already present
    pub fn insert_type(&mut self, descriptor: TypeDescriptor) -> bool {
        self.types.insert(descriptor.id(), descriptor.name()).is_none()
    }

    /// Register a type by its fully-qualified name
    pub fn insert_name(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Remove a type, whether it was registered by identity or by name
    pub fn remove_type(&mut self, descriptor: &TypeDescriptor) -> bool {
        let by_id = self.types.remove(&descriptor.id()).is_some();
        let by_name = self.names.remove(descriptor.name());
        by_id || by_name
    }

    /// Remove a name registration, and any identity registration with that name
    pub fn remove_name(&mut self, name: &str) -> bool {
        let by_name = self.names.remove(name);
        let before = self.types.len();
        self.types.retain(|_, registered| *registered != name);
        by_name || self.types.len() != before
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.types.contains_key(&descriptor.id()) || self.names.contains(descriptor.name())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name) || self.types.values().any(|registered| *registered == name)
    }

    /// Every registered name, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self.names.clone();
        names.extend(self.types.values().map(|name| name.to_string()));
        names.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.names.is_empty()
    }
}

/// Fields excluded from comparison, keyed by declaring type and field name
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    fields: HashMap<TypeId, Vec<&'static str>>,
    labels: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore `field` on records of type `T`
    ///
    /// Fails with `UnknownField` when `T` declares no such field.
    pub fn insert<T: Comparable + Record>(&mut self, field: &str) -> Result<(), ConfigError> {
        let descriptor = T::type_descriptor();
        let name = T::field_names()
            .iter()
            .copied()
            .find(|name| *name == field)
            .ok_or_else(|| ConfigError::UnknownField {
                type_name: descriptor.name().to_string(),
                field: field.to_string(),
            })?;

        let names = self.fields.entry(descriptor.id()).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
        self.labels.insert(format!("{}.{}", descriptor.name(), name));
        Ok(())
    }

    pub fn contains(&self, owner: &TypeDescriptor, field: &str) -> bool {
        self.fields
            .get(&owner.id())
            .map_or(false, |names| names.iter().any(|name| *name == field))
    }

    /// `Type.field` labels of every ignored field, sorted
    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
