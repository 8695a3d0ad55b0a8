//! Operators and per-schema operator lists.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

/// `CREATE OPERATOR`. `schema` and `name` may be left to the raw `sql`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// The function implementing the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commutator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negator: Option<String>,
    /// Restriction selectivity estimator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict: Option<String>,
    /// Join selectivity estimator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merges: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static OPERATOR_SPEC: ObjectSpec = ObjectSpec {
    object: "operator",
    fields: &[
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::identity_unless_raw("schema_name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("function"),
        FieldSpec::structured("left_arg"),
        FieldSpec::structured("right_arg"),
        FieldSpec::structured("commutator"),
        FieldSpec::structured("negator"),
        FieldSpec::structured("restrict"),
        FieldSpec::structured("join"),
        FieldSpec::structured("hashes"),
        FieldSpec::structured("merges"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["function"],
    ..ObjectSpec::EMPTY
};

impl Validate for Operator {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Operator {
    fn spec() -> &'static ObjectSpec {
        &OPERATOR_SPEC
    }
}

/// The operators defined in one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operators {
    pub schema_name: String,
    pub operators: Vec<Operator>,
}

pub static OPERATORS_SPEC: ObjectSpec = ObjectSpec {
    object: "operators",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::structured("operators").required().nested(&OPERATOR_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Operators {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("operators", Some(self.operators.as_slice()));
        ctx.nested("operators", &self.operators);
    }
}

impl Model for Operators {
    fn spec() -> &'static ObjectSpec {
        &OPERATORS_SPEC
    }
}
