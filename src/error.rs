//! Error types for object comparison

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that abort a comparison call
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("objects must not be null ({left}, {right})")]
    NullInput { left: String, right: String },

    #[error("objects must be of same type ({left}, {right})\n  PATH: {path}")]
    TypeMismatch {
        left: String,
        right: String,
        path: String,
    },

    #[error(
        "the following type was not classified as value|descend-into: {type_name}\n  PATH: {path}\n  STACK: {}",
        .stack.join("\n")
    )]
    UnclassifiedType {
        type_name: String,
        path: String,
        stack: Vec<String>,
    },

    #[error("type {type_name} exposes no fields to compare\n  PATH: {path}")]
    NotARecord { type_name: String, path: String },
}

/// Errors raised while configuring a comparator
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("No field `{field}` declared on {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Malformed settings: {reason}")]
    MalformedSettings { reason: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report serialization failed: {reason}")]
    SerializationFailed { reason: String },
}
