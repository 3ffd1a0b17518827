//! Error handling for CardKit
//!
//! Provides error types for the layers of the engine:
//! - Design errors (document/element model violations)
//! - Data errors (templates and datasets failing to load)
//! - Export errors (rendering and file output)
//!
//! Per-element recoverable conditions (an unreadable image asset, a
//! mapping column missing from a row) are not errors: they are logged
//! and rendering/binding continues. Undo with no prior state and redo
//! with no future state return `None`, never an error.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Document and element model errors
#[derive(Error, Debug, Clone)]
pub enum DesignError {
    /// Element creation with an unrecognized type tag
    #[error("Invalid element type: {kind}")]
    InvalidElementType {
        /// The rejected type tag.
        kind: String,
    },

    /// A property bag could not be merged into the element's schema
    #[error("Invalid properties for {kind} element: {reason}")]
    InvalidProperties {
        /// The element type being edited.
        kind: String,
        /// Why the merge was rejected.
        reason: String,
    },
}

/// Template and dataset loading errors
///
/// These are hard pre-flight failures: they surface to the caller before
/// any binding or export work begins.
#[derive(Error, Debug)]
pub enum DataError {
    /// CSV file unreadable or malformed
    #[error("Failed to load dataset {path}: {reason}")]
    DatasetLoad {
        /// Path of the dataset file.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// Template file unreadable or malformed
    #[error("Failed to load template {path}: {reason}")]
    TemplateLoad {
        /// Path of the template file.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// Template has no data source configured
    #[error("Template {name} has no data source")]
    MissingDataSource {
        /// Name of the template.
        name: String,
    },

    /// Template not found in the store
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// Name of the missing template.
        name: String,
    },
}

/// Export pipeline errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// No dataset rows survived filtering
    #[error("No records match the filter criteria")]
    NoRowsMatched,

    /// Encoding or writing an image file failed
    #[error("Failed to write image {path}: {reason}")]
    ImageWrite {
        /// Destination path.
        path: PathBuf,
        /// Why the write failed.
        reason: String,
    },

    /// Assembling or writing the PDF failed
    #[error("PDF export failed: {reason}")]
    Pdf {
        /// Why assembly failed.
        reason: String,
    },
}

/// Main error type for CardKit
///
/// A unified error that can represent any failure from the engine's
/// layers. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Design error
    #[error(transparent)]
    Design(#[from] DesignError),

    /// Data error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a hard data-load failure
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
