//! Core data types for object comparison

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;

/// Text standing in for an absent value on one side of a difference
pub const NULL_VALUE: &str = "null";

/// Suffix appended to a field segment when two sequences differ in length
pub const SIZE_MARKER: &str = ".size()";

/// A single field-level discrepancy between two compared objects
///
/// The path locates the field (nested field names, `name[i]` for sequence
/// elements, `name.size()` for length mismatches) and the two values are the
/// rendered values found on each side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDifference {
    path: Vec<String>,
    value1: String,
    value2: String,
}

impl FieldDifference {
    /// Create a new difference record
    pub fn new(path: Vec<String>, value1: impl Into<String>, value2: impl Into<String>) -> Self {
        Self {
            path,
            value1: value1.into(),
            value2: value2.into(),
        }
    }

    /// Path segments locating the differing field
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Dot-joined path, e.g. `order.items[2].price`
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// The last path segment
    pub fn field_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Value found in the first object
    pub fn value1(&self) -> &str {
        &self.value1
    }

    /// Value found in the second object
    pub fn value2(&self) -> &str {
        &self.value2
    }

    /// Whether this difference reports a sequence length mismatch
    pub fn is_size_mismatch(&self) -> bool {
        self.field_name().ends_with(SIZE_MARKER)
    }
}

impl fmt::Display for FieldDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} != {}", self.path_string(), self.value1, self.value2)
    }
}

/// Location of the field currently being compared
///
/// Every extension returns a new path; a path is never mutated once handed
/// to a nested comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ComparisonPath {
    segments: Vec<String>,
}

impl ComparisonPath {
    /// The empty root path
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with a field name
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Annotate the last segment with a sequence index, `items` -> `items[3]`
    pub fn with_index(&self, index: usize) -> Self {
        self.annotate_last(&format!("[{}]", index))
    }

    /// Annotate the last segment with the size marker, `items` -> `items.size()`
    pub fn with_size_marker(&self) -> Self {
        self.annotate_last(SIZE_MARKER)
    }

    fn annotate_last(&self, suffix: &str) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => last.push_str(suffix),
            None => segments.push(suffix.to_string()),
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

impl fmt::Display for ComparisonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Structural category of a comparable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// Atomic value compared with its own equality
    Scalar,
    /// Struct-like value exposing named fields
    Record,
    /// Sum type; always atomic
    Enumeration,
    /// Ordered collection aligned element by element
    Sequence,
    /// Arbitrary-precision decimal
    Decimal,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Scalar => "scalar",
            TypeKind::Record => "record",
            TypeKind::Enumeration => "enumeration",
            TypeKind::Sequence => "sequence",
            TypeKind::Decimal => "decimal",
        };
        f.write_str(name)
    }
}

/// Runtime identity of a comparable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe `T` as a type of the given kind
    pub fn of<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether two descriptors denote the same runtime type
    pub fn same_type(&self, other: &TypeDescriptor) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
