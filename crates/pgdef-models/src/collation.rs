//! # Collations
//!
//! `CREATE COLLATION`, in one of three forms: raw `sql`, a copy of an
//! existing collation (`copy_from`), or locale parameters. The `locale`
//! shortcut excludes `lc_collate` and `lc_ctype`. `deterministic`
//! defaults to `true`; setting it to `false` is a locale parameter.

use pgdef_core::{Context, FieldDefault, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::common::{default_true, is_true};
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleProvider {
    Icu,
    Libc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Collation {
    pub name: String,
    pub schema_name: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lc_collate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lc_ctype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<LocaleProvider>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub deterministic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

const LOCALE_PARAMETERS: &[&str] = &["locale", "lc_collate", "lc_ctype", "provider", "deterministic"];

pub static COLLATION_SPEC: ObjectSpec = ObjectSpec {
    object: "collation",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::identity("schema_name"),
        FieldSpec::meta("owner").required(),
        FieldSpec::raw("sql"),
        FieldSpec::structured("locale"),
        FieldSpec::structured("lc_collate"),
        FieldSpec::structured("lc_ctype"),
        FieldSpec::structured("provider"),
        FieldSpec::structured("deterministic").default(FieldDefault::Bool(true)),
        FieldSpec::structured("copy_from"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    exclusive: &[&["locale", "lc_collate"], &["locale", "lc_ctype"]],
    alternatives: &[&[&["copy_from"], LOCALE_PARAMETERS]],
    ..ObjectSpec::EMPTY
};

impl Validate for Collation {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Collation {
    fn spec() -> &'static ObjectSpec {
        &COLLATION_SPEC
    }
}
