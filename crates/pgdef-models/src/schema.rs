//! Schemas.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate, ViolationKind};
use serde::{Deserialize, Serialize};

/// Prefix PostgreSQL reserves for system schemas.
pub const RESERVED_PREFIX: &str = "pg_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static SCHEMA_SPEC: ObjectSpec = ObjectSpec {
    object: "schema",
    fields: &[
        FieldSpec::meta("name"),
        FieldSpec::meta("owner"),
        FieldSpec::meta("comment"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Schema {
    fn validate(&self, ctx: &mut Context<'_>) {
        if let Some(name) = self.name.as_deref().filter(|n| n.starts_with(RESERVED_PREFIX)) {
            ctx.report(
                "name",
                ViolationKind::Constraint,
                format!("schema name {name:?} must not begin with `{RESERVED_PREFIX}` (reserved for system schemas)"),
            );
        }
    }
}

impl Model for Schema {
    fn spec() -> &'static ObjectSpec {
        &SCHEMA_SPEC
    }
}
