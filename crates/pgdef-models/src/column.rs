//! Table columns.

use pgdef_core::{FieldDefault, FieldSpec, Literal, ObjectSpec};
use serde::{Deserialize, Serialize};

use crate::common::{default_true, is_true};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceBehavior {
    #[serde(rename = "ALWAYS")]
    Always,
    #[serde(rename = "BY DEFAULT")]
    ByDefault,
}

/// A generated column: either a stored expression or an identity
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_behavior: Option<SequenceBehavior>,
}

pub static GENERATED_COLUMN_SPEC: ObjectSpec = ObjectSpec {
    object: "generated column",
    fields: &[
        FieldSpec::structured("expression"),
        FieldSpec::structured("sequence"),
        FieldSpec::structured("sequence_behavior"),
    ],
    requires: &[("sequence_behavior", "sequence")],
    alternatives: &[&[&["expression"], &["sequence"]]],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static COLUMN_SPEC: ObjectSpec = ObjectSpec {
    object: "column",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("data_type").required(),
        FieldSpec::structured("nullable").default(FieldDefault::Bool(true)),
        FieldSpec::structured("default"),
        FieldSpec::structured("collation"),
        FieldSpec::structured("check_constraint"),
        FieldSpec::structured("generated").nested(&GENERATED_COLUMN_SPEC),
        FieldSpec::meta("comment"),
    ],
    ..ObjectSpec::EMPTY
};
