//! Type classification: how each field value is compared
//!
//! The decision order is fixed: sequences are aligned, registered
//! descend-into types are recursed into, decimals go through the decimal
//! policy, and everything else is left to the [`ClassificationPolicy`].
//! [`Strict`] requires that remainder to be whitelisted value types; [`Lax`]
//! compares it with the type's own equality.

use crate::error::ConfigError;
use crate::registry::TypeSet;
use crate::types::{TypeDescriptor, TypeKind};
use serde::{Deserialize, Serialize};

/// Comparison strategy chosen for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Align element by element
    Sequence,
    /// Compare field by field
    Descend,
    /// Compare through the decimal policy
    Decimal,
    /// Compare with the type's own equality
    Equality,
}

/// Name of a classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Strict,
    Lax,
}

/// Policy for values that are neither sequences, descend-into types nor decimals
pub trait ClassificationPolicy {
    fn mode(&self) -> Mode;

    /// Whether the descent stack is tracked to stop on cycles
    fn tracks_descent(&self) -> bool;

    /// Strategy for a remaining value, or `None` when it is unclassified
    fn classify_remaining(&self, descriptor: &TypeDescriptor) -> Option<Classification>;

    /// Whether the type is explicitly whitelisted as a value type
    fn is_value_type(&self, descriptor: &TypeDescriptor) -> bool;

    /// Whether a value type is registered under this fully-qualified name
    fn is_value_type_name(&self, name: &str) -> bool;

    fn value_type_names(&self) -> Vec<String>;

    /// Fail if the policy cannot hold value types, without registering anything
    fn check_value_type_name(&self, name: &str) -> Result<(), ConfigError>;

    /// Whitelist a value type by identity
    fn add_value_type(&mut self, descriptor: TypeDescriptor) -> Result<(), ConfigError>;

    /// Whitelist a value type by fully-qualified name
    fn add_value_type_name(&mut self, name: &str) -> Result<(), ConfigError>;
}

/// Unregistered types are a hard error; cycles are detected
#[derive(Debug, Clone, Default)]
pub struct Strict {
    value_types: TypeSet,
}

impl Strict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value_types(&self) -> &TypeSet {
        &self.value_types
    }
}

impl ClassificationPolicy for Strict {
    fn mode(&self) -> Mode {
        Mode::Strict
    }

    fn tracks_descent(&self) -> bool {
        true
    }

    fn classify_remaining(&self, descriptor: &TypeDescriptor) -> Option<Classification> {
        self.value_types
            .contains(descriptor)
            .then_some(Classification::Equality)
    }

    fn is_value_type(&self, descriptor: &TypeDescriptor) -> bool {
        self.value_types.contains(descriptor)
    }

    fn is_value_type_name(&self, name: &str) -> bool {
        self.value_types.contains_name(name)
    }

    fn value_type_names(&self) -> Vec<String> {
        self.value_types.names()
    }

    fn check_value_type_name(&self, _name: &str) -> Result<(), ConfigError> {
        Ok(())
    }

    fn add_value_type(&mut self, descriptor: TypeDescriptor) -> Result<(), ConfigError> {
        self.value_types.insert_type(descriptor);
        Ok(())
    }

    fn add_value_type_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.value_types.insert_name(name);
        Ok(())
    }
}

/// Unregistered types fall back to their own equality
///
/// There is no cycle detection: comparing cyclic graphs in lax mode does not
/// terminate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lax;

impl ClassificationPolicy for Lax {
    fn mode(&self) -> Mode {
        Mode::Lax
    }

    fn tracks_descent(&self) -> bool {
        false
    }

    fn classify_remaining(&self, _descriptor: &TypeDescriptor) -> Option<Classification> {
        Some(Classification::Equality)
    }

    fn is_value_type(&self, _descriptor: &TypeDescriptor) -> bool {
        false
    }

    fn is_value_type_name(&self, _name: &str) -> bool {
        false
    }

    fn value_type_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn check_value_type_name(&self, name: &str) -> Result<(), ConfigError> {
        Err(ConfigError::InvalidConfiguration {
            reason: format!(
                "value type {} cannot be registered in lax mode; every type is compared by equality",
                name
            ),
        })
    }

    fn add_value_type(&mut self, descriptor: TypeDescriptor) -> Result<(), ConfigError> {
        self.check_value_type_name(descriptor.name())
    }

    fn add_value_type_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.check_value_type_name(name)
    }
}

/// Pick the comparison strategy for a value of the given runtime type
pub fn classify<P: ClassificationPolicy + ?Sized>(
    policy: &P,
    descend_into: &TypeSet,
    descriptor: &TypeDescriptor,
) -> Option<Classification> {
    if descriptor.kind() == TypeKind::Sequence {
        return Some(Classification::Sequence);
    }
    if descend_into.contains(descriptor) {
        return Some(Classification::Descend);
    }
    if descriptor.kind() == TypeKind::Decimal {
        return Some(Classification::Decimal);
    }
    policy.classify_remaining(descriptor)
}
