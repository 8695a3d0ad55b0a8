//! The six reference scenarios for the dual-representation gate and the
//! field-level validators.

use pgdef_core::{construct, ViolationKind};
use pgdef_models::{Acls, Domain, Role, Type};
use serde_json::json;

#[test]
fn domain_with_raw_sql_only() {
    let domain: Domain = construct(json!({
        "schema": "public",
        "name": "positive_int",
        "sql": "CREATE DOMAIN public.positive_int AS integer CHECK (VALUE > 0)",
    }))
    .unwrap();
    assert!(domain.data_type.is_none());
}

#[test]
fn domain_with_raw_sql_and_data_type() {
    let err = construct::<Domain>(json!({
        "schema": "public",
        "name": "positive_int",
        "sql": "CREATE DOMAIN public.positive_int AS integer",
        "data_type": "integer",
    }))
    .unwrap_err();
    assert!(err.has_kind(ViolationKind::MutualExclusion));
    assert!(err.to_string().contains("cannot combine raw `sql`"));
}

#[test]
fn enum_type_with_base_input() {
    let err = construct::<Type>(json!({
        "schema": "public",
        "name": "mood",
        "type": "ENUM",
        "enum": ["a", "b"],
        "input": "f",
    }))
    .unwrap_err();
    let violations = err.violations().unwrap();
    assert!(violations.contains_kind(ViolationKind::MutualExclusion));
    assert!(violations.iter().any(|v| v.path.to_string() == "input"));
}

#[test]
fn enum_label_length_limit() {
    let build = |label: String| {
        json!({
            "schema": "public",
            "name": "mood",
            "type": "ENUM",
            "enum": [label],
        })
    };
    let err = construct::<Type>(build("x".repeat(65))).unwrap_err();
    assert!(err.has_kind(ViolationKind::Constraint));
    assert_eq!(err.violations().unwrap().violations()[0].path.to_string(), "enum[0]");

    assert!(construct::<Type>(build("x".repeat(64))).is_ok());
}

#[test]
fn column_acl_key_grammar() {
    assert!(construct::<Acls>(json!({
        "columns": {"public.users.email": ["SELECT"]}
    }))
    .is_ok());

    let err = construct::<Acls>(json!({"columns": {"users.email": ["SELECT"]}})).unwrap_err();
    assert!(err.has_kind(ViolationKind::Grammar));
    assert!(err.to_string().contains("users.email"));
}

#[test]
fn role_environments_are_unique() {
    let err = construct::<Role>(json!({
        "name": "app",
        "environments": ["PRODUCTION", "PRODUCTION"],
    }))
    .unwrap_err();
    assert!(err.has_kind(ViolationKind::Duplicate));

    assert!(construct::<Role>(json!({
        "name": "app",
        "environments": ["PRODUCTION", "STAGING"],
    }))
    .is_ok());
}
