//! Groups: roles without login that collect privileges for members.

use pgdef_core::{Context, FieldDefault, FieldSpec, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::acls::{Acls, ACLS_SPEC};
use crate::common::{is_false, Environment};

/// Options applied to every member of a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupOptions {
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

pub static GROUP_OPTIONS_SPEC: ObjectSpec = ObjectSpec {
    object: "group options",
    fields: &[
        FieldSpec::structured("create_db").default(FieldDefault::Bool(false)),
        FieldSpec::structured("create_role").default(FieldDefault::Bool(false)),
        FieldSpec::structured("inherit").default(FieldDefault::Bool(false)),
        FieldSpec::structured("replication").default(FieldDefault::Bool(false)),
        FieldSpec::structured("superuser").default(FieldDefault::Bool(false)),
    ],
    ..ObjectSpec::EMPTY
};

/// A PostgreSQL group role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<Environment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grants: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocations: Option<Acls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GroupOptions>,
}

pub static GROUP_SPEC: ObjectSpec = ObjectSpec {
    object: "group",
    fields: &[
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::meta("comment"),
        FieldSpec::structured("environments"),
        FieldSpec::structured("grants").nested(&ACLS_SPEC),
        FieldSpec::structured("revocations").nested(&ACLS_SPEC),
        FieldSpec::structured("options").nested(&GROUP_OPTIONS_SPEC),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Group {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.unique("environments", &self.environments);
        ctx.nested("grants", &self.grants);
        ctx.nested("revocations", &self.revocations);
    }
}

impl Model for Group {
    fn spec() -> &'static ObjectSpec {
        &GROUP_SPEC
    }
}
