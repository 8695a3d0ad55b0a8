//! # Tables
//!
//! `CREATE TABLE` in one of four forms: raw `sql`, a column list,
//! inheritance from `parents`, or a foreign table on a `server` with
//! remote `options`. Exactly one form may be used. Columns, indexes,
//! foreign keys and triggers are nested objects with their own rules.

use pgdef_core::{
    Context, FieldSpec, Grammar, Model, ObjectSpec, Validate, ViolationKind, SCHEMA_ALIAS,
};
use serde::{Deserialize, Serialize};

use crate::column::{Column, COLUMN_SPEC};
use crate::common::StorageParameters;
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};
use crate::foreign_key::{ForeignKey, FOREIGN_KEY_SPEC};
use crate::index::{Index, INDEX_SPEC};
use crate::trigger::{Trigger, TRIGGER_SPEC};

/// `LIKE source_table [INCLUDING ...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LikeTable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_constraints: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_defaults: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_generated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_identity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_indexes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_statistics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_storage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
}

pub static LIKE_TABLE_SPEC: ObjectSpec = ObjectSpec {
    object: "like table",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("include_comments"),
        FieldSpec::structured("include_constraints"),
        FieldSpec::structured("include_defaults"),
        FieldSpec::structured("include_generated"),
        FieldSpec::structured("include_identity"),
        FieldSpec::structured("include_indexes"),
        FieldSpec::structured("include_statistics"),
        FieldSpec::structured("include_storage"),
        FieldSpec::structured("include_all"),
    ],
    ..ObjectSpec::EMPTY
};

/// Key columns with optional covering columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyColumns {
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

pub static KEY_COLUMNS_SPEC: ObjectSpec = ObjectSpec {
    object: "key",
    fields: &[
        FieldSpec::structured("columns").required(),
        FieldSpec::structured("include"),
    ],
    ..ObjectSpec::EMPTY
};

/// A primary or unique key: one column, a column list, or columns with
/// `INCLUDE` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Column(String),
    Columns(Vec<String>),
    Covering(KeyColumns),
}

impl Key {
    pub fn columns(&self) -> &[String] {
        match self {
            Self::Column(column) => std::slice::from_ref(column),
            Self::Columns(columns) => columns,
            Self::Covering(key) => &key.columns,
        }
    }
}

impl Validate for Key {
    fn validate(&self, ctx: &mut Context<'_>) {
        let columns = self.columns();
        if columns.is_empty() {
            ctx.report_here(ViolationKind::Constraint, "a key must name at least one column");
        }
        ctx.unique_here(columns);
        if let Self::Covering(key) = self {
            ctx.unique("include", &key.include);
        }
    }
}

/// A table check constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableCheckConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub expression: String,
}

pub static TABLE_CHECK_CONSTRAINT_SPEC: ObjectSpec = ObjectSpec {
    object: "check constraint",
    fields: &[
        FieldSpec::meta("name"),
        FieldSpec::structured("expression").required(),
    ],
    ..ObjectSpec::EMPTY
};

/// Remote object a foreign table maps to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignTableOptions {
    pub schema_name: String,
    pub name: String,
}

pub static FOREIGN_TABLE_OPTIONS_SPEC: ObjectSpec = ObjectSpec {
    object: "foreign table options",
    fields: &[FieldSpec::identity("schema_name"), FieldSpec::identity("name")],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Table {
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlogged: Option<bool>,
    /// Typed table (`OF type_name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_table: Option<LikeTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<Index>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraints: Option<Vec<TableCheckConstraint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_constraints: Option<Vec<Key>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<ForeignKey>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<Trigger>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_parameters: Option<StorageParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_tablespace: Option<String>,
    /// Foreign server for a foreign table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ForeignTableOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static TABLE_SPEC: ObjectSpec = ObjectSpec {
    object: "table",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("unlogged"),
        FieldSpec::structured("from_type"),
        FieldSpec::structured("parents"),
        FieldSpec::structured("like_table").nested(&LIKE_TABLE_SPEC),
        FieldSpec::structured("columns").nested(&COLUMN_SPEC),
        FieldSpec::structured("primary_key").nested(&KEY_COLUMNS_SPEC),
        FieldSpec::structured("indexes").nested(&INDEX_SPEC),
        FieldSpec::structured("check_constraints").nested(&TABLE_CHECK_CONSTRAINT_SPEC),
        FieldSpec::structured("unique_constraints").nested(&KEY_COLUMNS_SPEC),
        FieldSpec::structured("foreign_keys").nested(&FOREIGN_KEY_SPEC),
        FieldSpec::structured("triggers").nested(&TRIGGER_SPEC),
        FieldSpec::structured("access_method"),
        FieldSpec::structured("storage_parameters"),
        FieldSpec::structured("tablespace"),
        FieldSpec::structured("index_tablespace"),
        FieldSpec::structured("server"),
        FieldSpec::structured("options").nested(&FOREIGN_TABLE_OPTIONS_SPEC),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    together: &[&["server", "options"]],
    alternatives: &[&[&["columns"], &["parents"], &["server", "options"]]],
    ..ObjectSpec::EMPTY
};

impl Validate for Table {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.unique("parents", &self.parents);
        ctx.nested("primary_key", &self.primary_key);
        ctx.nested("indexes", &self.indexes);
        ctx.unique("check_constraints", &self.check_constraints);
        ctx.nested("unique_constraints", &self.unique_constraints);
        ctx.nested("foreign_keys", &self.foreign_keys);
        ctx.nested("triggers", &self.triggers);
        ctx.grammar_keys("storage_parameters", Grammar::StorageParameter, &self.storage_parameters);
        ctx.nested("dependencies", &self.dependencies);

        let names: Vec<&str> = self
            .columns
            .iter()
            .flatten()
            .map(|column| column.name.as_str())
            .collect();
        ctx.unique("columns", &names);
    }
}

impl Model for Table {
    fn spec() -> &'static ObjectSpec {
        &TABLE_SPEC
    }
}
