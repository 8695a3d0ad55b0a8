//! Shared enums and serde default helpers.

use std::collections::BTreeMap;

use pgdef_core::Literal;
use serde::{Deserialize, Serialize};

/// Deployment environments an object can be limited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Development,
    Staging,
    Testing,
    Production,
}

/// Named configuration values (`SET name = value`).
pub type Settings = BTreeMap<String, Literal>;

/// Storage parameters (`WITH (name = value)`), names restricted to
/// `[A-Za-z0-9_]+`.
pub type StorageParameters = BTreeMap<String, Literal>;

/// Foreign-data option maps (`OPTIONS (name 'value')`), names restricted
/// to bare identifiers.
pub type Options = BTreeMap<String, Literal>;

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn is_true(value: &bool) -> bool {
    *value
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn default_one() -> i64 {
    1
}

pub(crate) fn is_one(value: &i64) -> bool {
    *value == 1
}

pub(crate) fn default_connection_limit() -> i64 {
    -1
}

pub(crate) fn is_no_connection_limit(value: &i64) -> bool {
    *value == -1
}
