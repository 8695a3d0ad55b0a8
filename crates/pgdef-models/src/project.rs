//! # Projects
//!
//! The top-level document of a schema project: database-wide settings,
//! extensions, procedural languages and foreign-data wrappers.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::server::{ForeignDataWrapper, FOREIGN_DATA_WRAPPER_SPEC};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Extension {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static EXTENSION_SPEC: ObjectSpec = ObjectSpec {
    object: "extension",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::meta("schema_name"),
        FieldSpec::structured("version"),
        FieldSpec::structured("cascade"),
        FieldSpec::meta("comment"),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

/// A procedural language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Language {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
}

pub static LANGUAGE_SPEC: ObjectSpec = ObjectSpec {
    object: "language",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("trusted"),
        FieldSpec::structured("replace"),
        FieldSpec::structured("handler"),
        FieldSpec::structured("inline_handler"),
        FieldSpec::structured("validator"),
    ],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// `standard_conforming_strings`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdstrings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superuser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<Extension>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_data_wrappers: Option<Vec<ForeignDataWrapper>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
}

pub static PROJECT_SPEC: ObjectSpec = ObjectSpec {
    object: "project",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("encoding"),
        FieldSpec::structured("stdstrings"),
        FieldSpec::structured("superuser"),
        FieldSpec::structured("extensions").nested(&EXTENSION_SPEC),
        FieldSpec::structured("foreign_data_wrappers").nested(&FOREIGN_DATA_WRAPPER_SPEC),
        FieldSpec::structured("languages").nested(&LANGUAGE_SPEC),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Project {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("foreign_data_wrappers", &self.foreign_data_wrappers);

        let extensions: Vec<&str> = self
            .extensions
            .iter()
            .flatten()
            .map(|e| e.name.as_str())
            .collect();
        ctx.unique("extensions", &extensions);
        let languages: Vec<&str> = self
            .languages
            .iter()
            .flatten()
            .map(|l| l.name.as_str())
            .collect();
        ctx.unique("languages", &languages);
    }
}

impl Model for Project {
    fn spec() -> &'static ObjectSpec {
        &PROJECT_SPEC
    }
}
