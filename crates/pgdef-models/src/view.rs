//! # Views
//!
//! Plain and materialized views. Either is given as raw `sql` or as a
//! structured `query`; view columns are bare names or named columns with
//! a comment.

use pgdef_core::{Context, FieldSpec, Grammar, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::common::StorageParameters;
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckOption {
    Local,
    Cascaded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedColumn {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static NAMED_COLUMN_SPEC: ObjectSpec = ObjectSpec {
    object: "view column",
    fields: &[FieldSpec::identity("name"), FieldSpec::meta("comment")],
    ..ObjectSpec::EMPTY
};

/// A view column: just a name, or a name with a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewColumn {
    Name(String),
    Named(NamedColumn),
}

impl ViewColumn {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Named(column) => &column.name,
        }
    }
}

fn unique_column_names(ctx: &mut Context<'_>, columns: &Option<Vec<ViewColumn>>) {
    let names: Vec<&str> = columns.iter().flatten().map(ViewColumn::name).collect();
    ctx.unique("columns", &names);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct View {
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ViewColumn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_option: Option<CheckOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_barrier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static VIEW_SPEC: ObjectSpec = ObjectSpec {
    object: "view",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("recursive"),
        FieldSpec::structured("columns").nested(&NAMED_COLUMN_SPEC),
        FieldSpec::structured("check_option"),
        FieldSpec::structured("security_barrier"),
        FieldSpec::structured("query"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["query"],
    ..ObjectSpec::EMPTY
};

impl Validate for View {
    fn validate(&self, ctx: &mut Context<'_>) {
        unique_column_names(ctx, &self.columns);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for View {
    fn spec() -> &'static ObjectSpec {
        &VIEW_SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterializedView {
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ViewColumn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_access_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_parameters: Option<StorageParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static MATERIALIZED_VIEW_SPEC: ObjectSpec = ObjectSpec {
    object: "materialized view",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("columns").nested(&NAMED_COLUMN_SPEC),
        FieldSpec::structured("table_access_method"),
        FieldSpec::structured("storage_parameters"),
        FieldSpec::structured("tablespace"),
        FieldSpec::structured("query"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["query"],
    ..ObjectSpec::EMPTY
};

impl Validate for MaterializedView {
    fn validate(&self, ctx: &mut Context<'_>) {
        unique_column_names(ctx, &self.columns);
        ctx.grammar_keys("storage_parameters", Grammar::StorageParameter, &self.storage_parameters);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for MaterializedView {
    fn spec() -> &'static ObjectSpec {
        &MATERIALIZED_VIEW_SPEC
    }
}
