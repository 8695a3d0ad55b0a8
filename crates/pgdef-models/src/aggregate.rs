//! # Aggregates
//!
//! `CREATE AGGREGATE`, either as raw `sql` or as its component functions
//! and state. A structured aggregate needs `arguments`, `sfunc` and
//! `state_data_type`; `serialfunc` and `deserialfunc` come as a pair.
//! `order_by` marks an ordered-set aggregate and counts as structured.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::argument::{Argument, ARGUMENT_SPEC};
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};
use crate::function::Parallel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalFuncModify {
    ReadOnly,
    Shareable,
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Aggregate {
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Argument>>,
    /// Aggregated arguments of an ordered-set aggregate (`WITHIN GROUP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<Argument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_data_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalfunc_extra: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalfunc_modify: Option<FinalFuncModify>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combinefunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialfunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deserialfunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msfunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minvfunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mstate_data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mstate_data_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mffunc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfinalfunc_extra: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfinalfunc_modify: Option<FinalFuncModify>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minitial_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<Parallel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothetical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static AGGREGATE_SPEC: ObjectSpec = ObjectSpec {
    object: "aggregate",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("arguments").nested(&ARGUMENT_SPEC),
        FieldSpec::structured("order_by").nested(&ARGUMENT_SPEC),
        FieldSpec::structured("sfunc"),
        FieldSpec::structured("state_data_type"),
        FieldSpec::structured("state_data_size"),
        FieldSpec::structured("ffunc"),
        FieldSpec::structured("finalfunc_extra"),
        FieldSpec::structured("finalfunc_modify"),
        FieldSpec::structured("combinefunc"),
        FieldSpec::structured("serialfunc"),
        FieldSpec::structured("deserialfunc"),
        FieldSpec::structured("initial_condition"),
        FieldSpec::structured("msfunc"),
        FieldSpec::structured("minvfunc"),
        FieldSpec::structured("mstate_data_type"),
        FieldSpec::structured("mstate_data_size"),
        FieldSpec::structured("mffunc"),
        FieldSpec::structured("mfinalfunc_extra"),
        FieldSpec::structured("mfinalfunc_modify"),
        FieldSpec::structured("minitial_condition"),
        FieldSpec::structured("sort_operator"),
        FieldSpec::structured("parallel"),
        FieldSpec::structured("hypothetical"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["arguments", "sfunc", "state_data_type"],
    together: &[&["serialfunc", "deserialfunc"]],
    ..ObjectSpec::EMPTY
};

impl Validate for Aggregate {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Aggregate {
    fn spec() -> &'static ObjectSpec {
        &AGGREGATE_SPEC
    }
}
