//! Error types for tree conversion and rendering.

use crate::path::KeyPath;

/// A value that has no textual form in SPA-JSON.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("cannot render non-finite number {value} at {path}")]
    NonFiniteNumber { path: KeyPath, value: f64 },
}

/// A parsed document that does not describe a configuration tree.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("document root must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("`_priority` at {path} must be an integer")]
    InvalidPriority { path: KeyPath },

    #[error("`_content` at {path} must not be null")]
    NullEntryContent { path: KeyPath },

    #[error("`_priority` is not allowed at the document root")]
    PriorityAtRoot,
}
