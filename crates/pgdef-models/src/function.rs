//! # Functions
//!
//! `CREATE FUNCTION`, given either as raw `sql` or structured. A
//! structured function names its `language` and `returns` type and takes
//! its body from exactly one source: an inline `definition`, or a
//! dynamically loaded `object_file` with an optional `link_symbol`.
//!
//! `called_on_null_input` defaults to `true`; `strict` and the boolean
//! attributes (`window`, `immutable`, `stable`, `volatile`, `leak_proof`)
//! default to `false`. Each counts as structured only when set to the
//! other value, so `immutable: false` next to raw `sql` is still raw, and
//! at most one volatility flag may be `true`. `parameters` is metadata and
//! may accompany either form.
//!
//! Accepting `object_file` and `link_symbol` as a body is an extension:
//! older definition files required an inline `definition` for every
//! structured function and rejected `object_file` or `link_symbol` unless
//! `sql` was given.

use pgdef_core::{
    Context, FieldDefault, FieldSpec, Grammar, Literal, Model, ObjectSpec, Validate, SCHEMA_ALIAS,
};
use serde::{Deserialize, Serialize};

use crate::common::{default_true, is_false, is_true, Settings};
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterMode {
    In,
    Out,
    Both,
    Variadic,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Security {
    Invoker,
    Definer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Parallel {
    Safe,
    Unsafe,
    Restricted,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub mode: ParameterMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

pub static PARAMETER_SPEC: ObjectSpec = ObjectSpec {
    object: "parameter",
    fields: &[
        FieldSpec::structured("mode").required(),
        FieldSpec::meta("name"),
        FieldSpec::structured("data_type").required(),
        FieldSpec::structured("default"),
    ],
    ..ObjectSpec::EMPTY
};

/// A PostgreSQL function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Function {
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// `sql`, `c`, `internal` or a procedural language name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leak_proof: Option<bool>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub called_on_null_input: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<Parallel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<String>,
    /// `SET` clauses applied while the function runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static FUNCTION_SPEC: ObjectSpec = ObjectSpec {
    object: "function",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::meta("parameters").nested(&PARAMETER_SPEC),
        FieldSpec::structured("returns"),
        FieldSpec::structured("language"),
        FieldSpec::structured("transform_types"),
        FieldSpec::structured("window").default(FieldDefault::Bool(false)),
        FieldSpec::structured("immutable").default(FieldDefault::Bool(false)),
        FieldSpec::structured("stable").default(FieldDefault::Bool(false)),
        FieldSpec::structured("volatile").default(FieldDefault::Bool(false)),
        FieldSpec::structured("leak_proof").default(FieldDefault::Bool(false)),
        FieldSpec::structured("called_on_null_input").default(FieldDefault::Bool(true)),
        FieldSpec::structured("strict").default(FieldDefault::Bool(false)),
        FieldSpec::structured("security"),
        FieldSpec::structured("parallel"),
        FieldSpec::structured("cost"),
        FieldSpec::structured("rows"),
        FieldSpec::structured("support"),
        FieldSpec::structured("configuration"),
        FieldSpec::structured("definition"),
        FieldSpec::structured("object_file"),
        FieldSpec::structured("link_symbol"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["language", "returns"],
    requires: &[("link_symbol", "object_file")],
    exclusive: &[&["immutable", "stable", "volatile"]],
    alternatives: &[&[&["definition"], &["object_file", "link_symbol"]]],
    ..ObjectSpec::EMPTY
};

impl Validate for Function {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("configuration", Grammar::BareIdentifier, &self.configuration);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Function {
    fn spec() -> &'static ObjectSpec {
        &FUNCTION_SPEC
    }
}
