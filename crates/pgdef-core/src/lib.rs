//! # pgdef-core — Dual-Representation Validation Engine
//!
//! Every PostgreSQL object a declarative schema describes can be given in
//! one of two forms: a raw `sql` snippet passed through verbatim, or a
//! structured set of typed fields. This crate enforces that choice, once,
//! for every object kind:
//!
//! - [`spec`]: the per-kind specification table (`ObjectSpec`) that says
//!   which fields are raw, structured, identity or metadata, their
//!   declared defaults, and the group rules between structured fields.
//! - [`gate`]: the single raw-versus-structured decision, driven by that
//!   table.
//! - [`document`]: JSON parsing that reports repeated mapping keys.
//! - [`alias`]: the bidirectional wire-name/internal-name rename, plus
//!   strict rejection of undeclared fields.
//! - [`grammar`]: namespaced identifier grammars (`schema.object`,
//!   `schema.object.column`, `schema.function(args)`, OIDs, bare names).
//! - [`unique`] and [`validate`]: field-level checks run before the gate.
//! - [`model`]: the `Model` trait and the atomic `construct` / `to_value`
//!   entry points.
//!
//! ## Crate Policy
//!
//! - No I/O. Callers supply parsed `serde_json::Value` mappings.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Construction is all-or-nothing: a caller gets a fully valid instance
//!   or one `ValidationError` listing every violation.

pub mod alias;
pub mod document;
pub mod error;
pub mod gate;
pub mod grammar;
pub mod literal;
pub mod model;
pub mod path;
pub mod spec;
pub mod unique;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::{ValidationError, Violation, ViolationKind, Violations};
pub use grammar::{ColumnRef, FunctionSignature, Grammar, IdentifierError, QualifiedName};
pub use literal::Literal;
pub use model::{construct, construct_document, from_json_str, to_value, validate, Model};
pub use path::FieldPath;
pub use spec::{
    Alias, Discriminant, FieldDefault, FieldRole, FieldSpec, KindPartition, Nested, ObjectSpec,
    SCHEMA_ALIAS,
};
pub use validate::{Context, ListField, MapField, TextField, Validate};
