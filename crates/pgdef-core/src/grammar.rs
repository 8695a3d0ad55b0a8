//! # Identifier Grammars
//!
//! Namespaced identifiers reference database objects by path rather than
//! by existence: `schema.object`, `schema.object.column`,
//! `schema.function(args)`, numeric OIDs, and bare configuration names.
//! Every check is an exact, whole-string match. Nothing is trimmed or
//! coerced.
//!
//! Path segments (`schema`, `object`, `column`) are restricted to
//! `[A-Za-z0-9_-]+`. The argument list of a function signature is opaque
//! text between the first `(` and the final `)`.
//!
//! The validated newtypes [`QualifiedName`], [`ColumnRef`] and
//! [`FunctionSignature`] give callers typed access to the parts of an
//! identifier once it has been accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Violation, ViolationKind};
use crate::path::FieldPath;

/// Tablespace options PostgreSQL accepts in `CREATE TABLESPACE ... WITH`.
pub const TABLESPACE_OPTIONS: &[&str] =
    &["seq_page_cost", "random_page_cost", "effective_io_concurrency"];

/// A string failed to parse as a namespaced identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value:?} must match {expected}")]
pub struct IdentifierError {
    /// The rejected input.
    pub value: String,
    /// The grammar that was expected.
    pub expected: &'static str,
}

/// The identifier grammars a field or mapping key can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `schema.object`
    SchemaObject,
    /// `schema.object.column`
    SchemaObjectColumn,
    /// `schema.function(args)`
    SchemaFunction,
    /// All-digit object identifier, e.g. a large-object OID.
    NumericId,
    /// Configuration or option name: `^[A-Za-z_][A-Za-z0-9_.]*$`.
    BareIdentifier,
    /// Storage parameter name: `^[A-Za-z0-9_]+$`.
    StorageParameter,
    /// One of [`TABLESPACE_OPTIONS`].
    TablespaceOption,
}

impl Grammar {
    /// Human-readable form of the grammar used in violation messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::SchemaObject => "schema.object",
            Self::SchemaObjectColumn => "schema.object.column",
            Self::SchemaFunction => "schema.function(args)",
            Self::NumericId => "a numeric OID",
            Self::BareIdentifier => "^[A-Za-z_][A-Za-z0-9_.]*$",
            Self::StorageParameter => "^[A-Za-z0-9_]+$",
            Self::TablespaceOption => {
                "one of: seq_page_cost, random_page_cost, effective_io_concurrency"
            }
        }
    }

    /// True when `value` satisfies the grammar exactly.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::SchemaObject => split_segments(value, 2).is_some(),
            Self::SchemaObjectColumn => split_segments(value, 3).is_some(),
            Self::SchemaFunction => split_function(value).is_some(),
            Self::NumericId => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Self::BareIdentifier => is_bare_identifier(value),
            Self::StorageParameter => {
                !value.is_empty()
                    && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
            }
            Self::TablespaceOption => TABLESPACE_OPTIONS.contains(&value),
        }
    }

    /// Check `value` against the grammar, producing a
    /// [`ViolationKind::Grammar`] violation at `path` on failure.
    pub fn check(&self, path: &FieldPath, value: &str) -> Result<(), Violation> {
        if self.matches(value) {
            Ok(())
        } else {
            Err(Violation::new(
                path.clone(),
                ViolationKind::Grammar,
                format!("{value:?} must match {}", self.expected()),
            ))
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expected())
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn split_segments(value: &str, count: usize) -> Option<Vec<&str>> {
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() == count && parts.iter().all(|p| is_segment(p)) {
        Some(parts)
    } else {
        None
    }
}

// (schema, name, args)
fn split_function(value: &str) -> Option<(&str, &str, &str)> {
    let open = value.find('(')?;
    if !value.ends_with(')') || value.len() < open + 2 {
        return None;
    }
    let head = &value[..open];
    let args = &value[open + 1..value.len() - 1];
    let (schema, name) = head.split_once('.')?;
    if is_segment(schema) && is_segment(name) {
        Some((schema, name, args))
    } else {
        None
    }
}

fn is_bare_identifier(value: &str) -> bool {
    let mut bytes = value.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

/// A `schema.object` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Parse a `schema.object` string.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if Grammar::SchemaObject.matches(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(identifier_error(value, Grammar::SchemaObject))
        }
    }

    /// The schema segment.
    pub fn schema(&self) -> &str {
        self.0.split_once('.').map_or("", |(schema, _)| schema)
    }

    /// The object segment.
    pub fn name(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, name)| name)
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A `schema.object.column` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnRef(String);

impl ColumnRef {
    /// Parse a `schema.object.column` string.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if Grammar::SchemaObjectColumn.matches(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(identifier_error(value, Grammar::SchemaObjectColumn))
        }
    }

    /// The `schema.object` that owns the column.
    pub fn relation(&self) -> QualifiedName {
        let end = self.0.rfind('.').unwrap_or(self.0.len());
        QualifiedName(self.0[..end].to_string())
    }

    /// The column segment.
    pub fn column(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or("")
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A `schema.function(args)` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FunctionSignature(String);

impl FunctionSignature {
    /// Parse a `schema.function(args)` string.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if Grammar::SchemaFunction.matches(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(identifier_error(value, Grammar::SchemaFunction))
        }
    }

    /// The schema segment.
    pub fn schema(&self) -> &str {
        split_function(&self.0).map_or("", |(schema, _, _)| schema)
    }

    /// The function name.
    pub fn name(&self) -> &str {
        split_function(&self.0).map_or("", |(_, name, _)| name)
    }

    /// The argument list text, without the surrounding parentheses.
    pub fn args(&self) -> &str {
        split_function(&self.0).map_or("", |(_, _, args)| args)
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn identifier_error(value: &str, grammar: Grammar) -> IdentifierError {
    IdentifierError {
        value: value.to_string(),
        expected: grammar.expected(),
    }
}

macro_rules! string_newtype {
    ($ty:ident) => {
        impl FromStr for $ty {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(QualifiedName);
string_newtype!(ColumnRef);
string_newtype!(FunctionSignature);
