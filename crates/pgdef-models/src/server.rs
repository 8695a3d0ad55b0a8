//! # Foreign Data
//!
//! Foreign servers, foreign-data wrappers and user mappings. None of them
//! has a raw form; every option name must be a bare identifier.

use pgdef_core::{Alias, Context, FieldSpec, Grammar, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::common::Options;
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Server {
    pub name: String,
    pub foreign_data_wrapper: String,
    /// Server type, interpreted by the wrapper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static SERVER_SPEC: ObjectSpec = ObjectSpec {
    object: "server",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("foreign_data_wrapper").required(),
        FieldSpec::structured("server_type"),
        FieldSpec::structured("version"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("options"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: &[Alias::new("server_type", "type")],
    ..ObjectSpec::EMPTY
};

impl Validate for Server {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("options", Grammar::BareIdentifier, &self.options);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Server {
    fn spec() -> &'static ObjectSpec {
        &SERVER_SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignDataWrapper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

pub static FOREIGN_DATA_WRAPPER_SPEC: ObjectSpec = ObjectSpec {
    object: "foreign data wrapper",
    fields: &[
        FieldSpec::meta("name"),
        FieldSpec::meta("owner"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("handler"),
        FieldSpec::structured("validator"),
        FieldSpec::structured("options"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for ForeignDataWrapper {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("options", Grammar::BareIdentifier, &self.options);
    }
}

impl Model for ForeignDataWrapper {
    fn spec() -> &'static ObjectSpec {
        &FOREIGN_DATA_WRAPPER_SPEC
    }
}

/// Options for one server within a user mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerMapping {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

pub static SERVER_MAPPING_SPEC: ObjectSpec = ObjectSpec {
    object: "server mapping",
    fields: &[FieldSpec::identity("name"), FieldSpec::structured("options")],
    ..ObjectSpec::EMPTY
};

impl Validate for ServerMapping {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("options", Grammar::BareIdentifier, &self.options);
    }
}

/// Maps a local user onto one or more foreign servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserMapping {
    pub name: String,
    pub servers: Vec<ServerMapping>,
}

pub static USER_MAPPING_SPEC: ObjectSpec = ObjectSpec {
    object: "user mapping",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("servers").required().nested(&SERVER_MAPPING_SPEC),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for UserMapping {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("servers", Some(self.servers.as_slice()));
        ctx.nested("servers", &self.servers);
    }
}

impl Model for UserMapping {
    fn spec() -> &'static ObjectSpec {
        &USER_MAPPING_SPEC
    }
}
