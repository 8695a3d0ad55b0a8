//! Aggregate arguments.

use pgdef_core::{FieldDefault, FieldSpec, ObjectSpec};
use serde::{Deserialize, Serialize};

/// Argument mode; aggregates accept only `IN` and `VARIADIC`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArgumentMode {
    #[default]
    In,
    Variadic,
}

impl ArgumentMode {
    fn is_in(&self) -> bool {
        *self == Self::In
    }
}

/// One input argument of an aggregate. `data_type` is `*` for a
/// zero-argument aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "ArgumentMode::is_in")]
    pub mode: ArgumentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data_type: String,
}

pub static ARGUMENT_SPEC: ObjectSpec = ObjectSpec {
    object: "argument",
    fields: &[
        FieldSpec::structured("mode").default(FieldDefault::Str("IN")),
        FieldSpec::meta("name"),
        FieldSpec::structured("data_type").required(),
    ],
    ..ObjectSpec::EMPTY
};
