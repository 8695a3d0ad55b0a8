//! Logical replication subscriptions.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynchronousCommit {
    On,
    RemoteApply,
    RemoteWrite,
    Local,
    Off,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_slot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronous_commit: Option<SynchronousCommit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<bool>,
}

pub static SUBSCRIPTION_PARAMETERS_SPEC: ObjectSpec = ObjectSpec {
    object: "subscription parameters",
    fields: &[
        FieldSpec::meta("copy_data"),
        FieldSpec::meta("create_slot"),
        FieldSpec::meta("enabled"),
        FieldSpec::meta("slot_name"),
        FieldSpec::meta("synchronous_commit"),
        FieldSpec::meta("connect"),
    ],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subscription {
    pub name: String,
    /// libpq connection string for the publisher.
    pub connection: String,
    pub publications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SubscriptionParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static SUBSCRIPTION_SPEC: ObjectSpec = ObjectSpec {
    object: "subscription",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("connection").required(),
        FieldSpec::structured("publications").required(),
        FieldSpec::structured("parameters").nested(&SUBSCRIPTION_PARAMETERS_SPEC),
        FieldSpec::meta("comment"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Subscription {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("publications", Some(self.publications.as_slice()));
        ctx.unique("publications", &self.publications);
    }
}

impl Model for Subscription {
    fn spec() -> &'static ObjectSpec {
        &SUBSCRIPTION_SPEC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{construct, ViolationKind};
    use serde_json::json;

    #[test]
    fn subscription_with_parameters() {
        let sub: Subscription = construct(json!({
            "name": "orders_sub",
            "connection": "host=primary dbname=shop",
            "publications": ["orders"],
            "parameters": {"copy_data": false, "synchronous_commit": "remote_apply"},
        }))
        .unwrap();
        assert_eq!(
            sub.parameters.unwrap().synchronous_commit,
            Some(SynchronousCommit::RemoteApply)
        );
    }

    #[test]
    fn publications_non_empty_and_unique() {
        let err = construct::<Subscription>(json!({
            "name": "s",
            "connection": "host=primary",
            "publications": [],
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Constraint));

        let err = construct::<Subscription>(json!({
            "name": "s",
            "connection": "host=primary",
            "publications": ["orders", "orders"],
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Duplicate));
    }

    #[test]
    fn connection_is_required() {
        let err = construct::<Subscription>(json!({"name": "s", "publications": ["orders"]}))
            .unwrap_err();
        assert!(err.has_kind(ViolationKind::MissingRequired));
        assert_eq!(err.violations().unwrap().violations()[0].path.to_string(), "connection");
    }
}
