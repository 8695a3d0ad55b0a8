//! # Text Search
//!
//! Text search configurations, dictionaries, parsers and templates, each
//! raw or structured, grouped per schema in a [`TextSearch`] document.

use std::collections::BTreeMap;

use pgdef_core::{Context, FieldSpec, Grammar, Literal, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

/// A configuration built on a parser, or copied from a `source`
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static CONFIGURATION_SPEC: ObjectSpec = ObjectSpec {
    object: "text search configuration",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("parser"),
        FieldSpec::structured("source"),
        FieldSpec::meta("comment"),
    ],
    alternatives: &[&[&["parser"], &["source"]]],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dictionary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Template-specific options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, Literal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static DICTIONARY_SPEC: ObjectSpec = ObjectSpec {
    object: "text search dictionary",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("template"),
        FieldSpec::structured("options"),
        FieldSpec::meta("comment"),
    ],
    required: &["template"],
    ..ObjectSpec::EMPTY
};

impl Validate for Dictionary {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("options", Grammar::StorageParameter, &self.options);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gettoken_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lextypes_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static PARSER_SPEC: ObjectSpec = ObjectSpec {
    object: "text search parser",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("start_function"),
        FieldSpec::structured("gettoken_function"),
        FieldSpec::structured("end_function"),
        FieldSpec::structured("lextypes_function"),
        FieldSpec::structured("headline_function"),
        FieldSpec::meta("comment"),
    ],
    required: &["start_function", "gettoken_function", "end_function", "lextypes_function"],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexize_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static TEMPLATE_SPEC: ObjectSpec = ObjectSpec {
    object: "text search template",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("init_function"),
        FieldSpec::structured("lexize_function"),
        FieldSpec::meta("comment"),
    ],
    required: &["lexize_function"],
    ..ObjectSpec::EMPTY
};

/// The text search objects of one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextSearch {
    pub schema_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<Configuration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Vec<Dictionary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsers: Option<Vec<Parser>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
}

pub static TEXT_SEARCH_SPEC: ObjectSpec = ObjectSpec {
    object: "text search",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::structured("configurations").nested(&CONFIGURATION_SPEC),
        FieldSpec::structured("dictionaries").nested(&DICTIONARY_SPEC),
        FieldSpec::structured("parsers").nested(&PARSER_SPEC),
        FieldSpec::structured("templates").nested(&TEMPLATE_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for TextSearch {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dictionaries", &self.dictionaries);
    }
}

impl Model for TextSearch {
    fn spec() -> &'static ObjectSpec {
        &TEXT_SEARCH_SPEC
    }
}
