//! Users: roles permitted to log in.

use chrono::{DateTime, Utc};
use pgdef_core::{Context, FieldDefault, FieldSpec, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::acls::{Acls, ACLS_SPEC};
use crate::common::{
    default_connection_limit, is_false, is_no_connection_limit, Environment, Settings,
};
use crate::role::validate_settings;

/// `CREATE USER ... WITH` options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserOptions {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bypass_rls: bool,
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
    pub replication: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub superuser: bool,
}

pub static USER_OPTIONS_SPEC: ObjectSpec = ObjectSpec {
    object: "user options",
    fields: &[
        FieldSpec::structured("bypass_rls").default(FieldDefault::Bool(false)),
        FieldSpec::structured("connection_limit").default(FieldDefault::Int(-1)),
        FieldSpec::structured("create_db").default(FieldDefault::Bool(false)),
        FieldSpec::structured("create_role").default(FieldDefault::Bool(false)),
        FieldSpec::structured("inherit").default(FieldDefault::Bool(false)),
        FieldSpec::structured("replication").default(FieldDefault::Bool(false)),
        FieldSpec::structured("superuser").default(FieldDefault::Bool(false)),
    ],
    ..ObjectSpec::EMPTY
};

/// A PostgreSQL login role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Password expiry, as an RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocations: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<UserOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<Settings>>,
}

pub static USER_SPEC: ObjectSpec = ObjectSpec {
    object: "user",
    fields: &[
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("environments"),
        FieldSpec::structured("password"),
        FieldSpec::structured("valid_until"),
        FieldSpec::structured("grants").nested(&ACLS_SPEC),
        FieldSpec::structured("revocations").nested(&ACLS_SPEC),
        FieldSpec::structured("options").nested(&USER_OPTIONS_SPEC),
        FieldSpec::structured("settings"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for User {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.unique("environments", &self.environments);
        ctx.nested("grants", &self.grants);
        ctx.nested("revocations", &self.revocations);
        validate_settings(ctx, &self.settings);
    }
}

impl Model for User {
    fn spec() -> &'static ObjectSpec {
        &USER_SPEC
    }
}
