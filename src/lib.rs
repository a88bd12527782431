//! Structural object comparison
//!
//! A library for finding every field-level difference between two objects of
//! the same type, reported as path-qualified records for use in test assertions.
//!
//! Types take part by implementing [`Comparable`] (and [`Record`] for struct-like
//! types), usually through [`impl_record!`], [`impl_scalar!`] and [`impl_enum!`].
//! Two classification policies are available: [`StrictObjectDiff`] rejects
//! unregistered types and stops on cycles, [`LaxObjectDiff`] compares
//! unregistered types with their own equality.

#[macro_use]
mod macros;

pub mod classifier;
pub mod comparator;
pub mod decimal;
pub mod error;
pub mod guard;
pub mod hasher;
pub mod logging;
pub mod registry;
pub mod render;
pub mod report;
pub mod sequence;
pub mod settings;
pub mod traits;
pub mod types;
pub mod values;

// Re-export core types and traits
pub use classifier::{Classification, ClassificationPolicy, Lax, Mode, Strict};
pub use comparator::{LaxObjectDiff, ObjectDiff, ObjectDiffBuilder, StrictObjectDiff};
pub use decimal::{DecimalPolicy, MAX_DECIMAL_SCALE};
pub use error::{CompareError, ConfigError, DiffError, ReportError};
pub use hasher::{ReportDigest, ReportHasher};
pub use logging::{DiffEvent, DiffLogger, LogEntry, LogLevel};
pub use registry::{IgnoreSet, TypeSet};
pub use render::render_value;
pub use report::DiffReport;
pub use settings::DiffSettings;
pub use traits::{AsFieldValue, Comparable, Elements, Field, Record, RecordRef, View};
pub use types::{
    ComparisonPath, FieldDifference, TypeDescriptor, TypeKind, NULL_VALUE, SIZE_MARKER,
};
pub use values::builtin_scalar_types;
