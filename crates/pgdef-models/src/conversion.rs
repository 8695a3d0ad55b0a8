//! Encoding conversions and per-schema conversion lists.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Conversion {
    pub name: String,
    pub schema_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// `CREATE DEFAULT CONVERSION`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static CONVERSION_SPEC: ObjectSpec = ObjectSpec {
    object: "conversion",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::identity("schema_name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("default"),
        FieldSpec::structured("encoding_from"),
        FieldSpec::structured("encoding_to"),
        FieldSpec::structured("function"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["encoding_from", "encoding_to", "function"],
    ..ObjectSpec::EMPTY
};

impl Validate for Conversion {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Conversion {
    fn spec() -> &'static ObjectSpec {
        &CONVERSION_SPEC
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Conversions {
    pub schema_name: String,
    pub conversions: Vec<Conversion>,
}

pub static CONVERSIONS_SPEC: ObjectSpec = ObjectSpec {
    object: "conversions",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::structured("conversions").required().nested(&CONVERSION_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Conversions {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("conversions", &self.conversions);
    }
}

impl Model for Conversions {
    fn spec() -> &'static ObjectSpec {
        &CONVERSIONS_SPEC
    }
}
