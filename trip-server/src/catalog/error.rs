//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the CSV file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file is empty or has no header row
    #[error("{0} has no header row")]
    MissingHeader(PathBuf),

    /// A required column is absent from the header
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    /// No usable station rows were found
    #[error("{0} contains no valid station rows")]
    Empty(PathBuf),
}
