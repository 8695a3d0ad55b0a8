//! # Roles
//!
//! A role owns objects and holds privileges. Groups and users are roles
//! with a narrower option set; see [`crate::group`] and [`crate::user`].

use pgdef_core::{Context, FieldDefault, FieldSpec, Grammar, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::acls::{Acls, ACLS_SPEC};
use crate::common::{
    default_connection_limit, default_true, is_false, is_no_connection_limit, is_true,
    Environment, Settings,
};

/// `CREATE ROLE ... WITH` options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleOptions {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bypass_rls: bool,
    /// Concurrent connection limit; `-1` means unlimited.
    #[serde(
        default = "default_connection_limit",
        skip_serializing_if = "is_no_connection_limit"
    )]
    pub connection_limit: i64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub create_db: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub create_role: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inherit: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub login: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub replication: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub superuser: bool,
}

impl Default for RoleOptions {
    fn default() -> Self {
        Self {
            bypass_rls: false,
            connection_limit: -1,
            create_db: false,
            create_role: false,
            inherit: false,
            login: false,
            replication: false,
            superuser: false,
        }
    }
}

pub static ROLE_OPTIONS_SPEC: ObjectSpec = ObjectSpec {
    object: "role options",
    fields: &[
        FieldSpec::structured("bypass_rls").default(FieldDefault::Bool(false)),
        FieldSpec::structured("connection_limit").default(FieldDefault::Int(-1)),
        FieldSpec::structured("create_db").default(FieldDefault::Bool(false)),
        FieldSpec::structured("create_role").default(FieldDefault::Bool(false)),
        FieldSpec::structured("inherit").default(FieldDefault::Bool(false)),
        FieldSpec::structured("login").default(FieldDefault::Bool(false)),
        FieldSpec::structured("replication").default(FieldDefault::Bool(false)),
        FieldSpec::structured("superuser").default(FieldDefault::Bool(false)),
    ],
    ..ObjectSpec::EMPTY
};

/// A PostgreSQL role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `false` for roles that are referenced but never created, such as `PUBLIC`.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub create: bool,
    /// Environments the role is created in; all when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocations: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RoleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<Settings>>,
}

pub static ROLE_SPEC: ObjectSpec = ObjectSpec {
    object: "role",
    fields: &[
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("create").default(FieldDefault::Bool(true)),
        FieldSpec::structured("environments"),
        FieldSpec::structured("grants").nested(&ACLS_SPEC),
        FieldSpec::structured("revocations").nested(&ACLS_SPEC),
        FieldSpec::structured("options").nested(&ROLE_OPTIONS_SPEC),
        FieldSpec::structured("settings"),
    ],
    ..ObjectSpec::EMPTY
};

/// Setting names must be configuration identifiers.
pub(crate) fn validate_settings(ctx: &mut Context<'_>, settings: &Option<Vec<Settings>>) {
    let Some(settings) = settings else {
        return;
    };
    let mut ctx = ctx.field("settings");
    for (i, setting) in settings.iter().enumerate() {
        ctx.index(i).keys_here(Grammar::BareIdentifier, setting);
    }
}

impl Validate for Role {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.unique("environments", &self.environments);
        ctx.nested("grants", &self.grants);
        ctx.nested("revocations", &self.revocations);
        validate_settings(ctx, &self.settings);
    }
}

impl Model for Role {
    fn spec() -> &'static ObjectSpec {
        &ROLE_SPEC
    }
}
