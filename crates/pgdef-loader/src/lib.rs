//! # pgdef-loader — Definition Files
//!
//! Reads definition documents from disk and constructs validated models
//! from them through [`pgdef_core::construct`]:
//!
//! - **Parsing** (`parser.rs`): YAML (`.yaml`, `.yml`) or JSON (any other
//!   extension), normalized to `serde_json::Value`.
//! - **Errors** (`error.rs`): every failure names the file it came from.
//!   A JSON document that repeats a key is rejected, never resolved
//!   last-wins.
//!
//! ## Example
//!
//! ```
//! use pgdef_loader::from_yaml_str;
//! use pgdef_models::Sequence;
//!
//! let seq: Sequence = from_yaml_str(
//!     "schema: public\nname: orders_id_seq\nincrement_by: 10\n",
//! ).unwrap();
//! assert_eq!(seq.increment_by, 10);
//! ```
//!
//! ## Crate Policy
//!
//! - The only crate in the workspace that touches the filesystem.
//! - Each file in a directory load is reported independently; one invalid
//!   document never hides the result of another.

pub mod error;
pub mod parser;

use std::path::{Path, PathBuf};

use pgdef_core::document::parse_json;
use pgdef_core::{construct_document, Model, Violations};
use serde_json::Value;
use tracing::{debug, info, warn};

pub use error::{LoadError, LoadResult};
pub use parser::{from_yaml_str, parse_yaml, yaml_to_json_value, Format, YamlError};

/// Read a document and return its untyped value.
///
/// A JSON document that repeats a key fails with
/// [`LoadError::Validation`] listing every repeat.
pub fn load_value(path: &Path) -> LoadResult<Value> {
    let (value, duplicates) = read_document(path)?;
    match duplicates.into_result("document") {
        Ok(()) => Ok(value),
        Err(source) => Err(LoadError::Validation {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a document and construct a model from it.
pub fn load_model<T: Model>(path: &Path) -> LoadResult<T> {
    let (value, duplicates) = read_document(path)?;
    match construct_document::<T>(value, duplicates) {
        Ok(model) => {
            info!(path = %path.display(), object = T::spec().object, "loaded definition");
            Ok(model)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "invalid definition");
            Err(LoadError::Validation {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

// The value plus any repeated keys found while parsing it.
fn read_document(path: &Path) -> LoadResult<(Value, Violations)> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = Format::from_extension(path.extension().and_then(|e| e.to_str()));
    debug!(path = %path.display(), ?format, "parsing definition document");

    match format {
        Format::Yaml => parse_yaml(&text)
            .map(|value| (value, Violations::new()))
            .map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        Format::Json => parse_json(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load every file in `dir` whose extension is one of `extensions`.
///
/// The directory is not searched recursively. Results are ordered by file
/// name; the outer error is only for an unreadable directory.
pub fn load_dir<T: Model>(
    dir: &Path,
    extensions: &[&str],
) -> LoadResult<Vec<(PathBuf, LoadResult<T>)>> {
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if path.is_file() && matches {
            paths.push(path);
        }
    }
    paths.sort();
    info!(dir = %dir.display(), files = paths.len(), "loading definition directory");

    Ok(paths
        .into_iter()
        .map(|path| {
            let result = load_model::<T>(&path);
            (path, result)
        })
        .collect())
}
