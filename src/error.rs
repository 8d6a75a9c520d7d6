//! Error types for the site viewer.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors raised while building the scene from a catalog.
///
/// These are fatal: when one is returned, nothing has been instantiated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A catalog part names a floor tag outside the fixed enumeration.
    #[error("part #{index} (task '{task_id}') has unknown floor tag '{floor}'")]
    UnknownFloor {
        index: usize,
        task_id: String,
        floor: String,
    },

    /// A catalog part has an empty task identifier.
    #[error("part #{index} has an empty task id")]
    EmptyTaskId { index: usize },

    /// No catalog exists for the requested project type.
    #[error("unknown project type '{name}'")]
    UnknownProjectType { name: String },
}

/// Errors that can occur when loading schedule or cost files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures while writing a simulation snapshot to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create snapshot file '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
