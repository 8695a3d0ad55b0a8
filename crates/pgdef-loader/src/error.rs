//! # Loader Errors
//!
//! Every error names the file it came from. Validation failures carry the
//! aggregated [`ValidationError`] unchanged.

use std::path::PathBuf;

use pgdef_core::ValidationError;
use thiserror::Error;

use crate::parser::YamlError;

/// Failure to turn a file into a validated definition.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not YAML, or uses YAML with no JSON equivalent.
    #[error("{}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: YamlError,
    },

    /// The file is not well-formed JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but repeats a key or does not describe a valid
    /// definition.
    #[error("{}: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Yaml { path, .. }
            | Self::Json { path, .. }
            | Self::Validation { path, .. } => path,
        }
    }

    /// The validation failure, when the document parsed but was rejected.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;
