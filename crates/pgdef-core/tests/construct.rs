//! End-to-end construction through the public `pgdef-core` API, using a
//! small sequence-like model with an aliased nested list.

use pgdef_core::{
    construct, from_json_str, to_value, validate, Alias, Context, FieldDefault, FieldSpec, Grammar,
    Model, ObjectSpec, Validate, ValidationError, ViolationKind, SCHEMA_ALIAS,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn default_one() -> i64 {
    1
}

fn is_one(value: &i64) -> bool {
    *value == 1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Counter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sql: Option<String>,
    #[serde(default = "default_one", skip_serializing_if = "is_one")]
    increment_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Part {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form: Option<String>,
}

static PART_SPEC: ObjectSpec = ObjectSpec {
    object: "part",
    fields: &[FieldSpec::identity("name"), FieldSpec::structured("form")],
    aliases: &[Alias::new("form", "type")],
    ..ObjectSpec::EMPTY
};

static COUNTER_SPEC: ObjectSpec = ObjectSpec {
    object: "counter",
    fields: &[
        FieldSpec::identity_unless_raw("schema_name"),
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("increment_by").default(FieldDefault::Int(1)),
        FieldSpec::meta("owned_by"),
        FieldSpec::structured("parts").nested(&PART_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Counter {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar("owned_by", Grammar::SchemaObjectColumn, &self.owned_by);
    }
}

impl Model for Counter {
    fn spec() -> &'static ObjectSpec {
        &COUNTER_SPEC
    }
}

fn violation_paths(err: &ValidationError) -> Vec<String> {
    err.violations()
        .map(|v| v.iter().map(|x| x.path.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn raw_only_definition_succeeds() {
    let counter: Counter = construct(json!({"sql": "CREATE SEQUENCE public.c"})).unwrap();
    assert_eq!(counter.sql.as_deref(), Some("CREATE SEQUENCE public.c"));
    assert_eq!(counter.increment_by, 1);
}

#[test]
fn explicit_default_does_not_count_as_structured() {
    let result: Result<Counter, _> =
        construct(json!({"sql": "CREATE SEQUENCE public.c", "increment_by": 1}));
    assert!(result.is_ok());
}

#[test]
fn raw_with_structured_field_fails() {
    let err = construct::<Counter>(json!({"sql": "CREATE SEQUENCE public.c", "increment_by": 5}))
        .unwrap_err();
    assert!(err.has_kind(ViolationKind::MutualExclusion));
    assert!(err.to_string().contains("cannot combine raw `sql`"));
}

#[test]
fn neither_representation_fails() {
    let err = construct::<Counter>(json!({"schema": "public", "name": "c"})).unwrap_err();
    assert!(err.has_kind(ViolationKind::Completeness));
    assert!(err.to_string().contains("must specify either raw `sql`"));
}

#[test]
fn strict_mode_rejects_unknown_and_internal_names() {
    let err = construct::<Counter>(json!({
        "schema_name": "public",
        "name": "c",
        "increment_by": 2,
        "cycle": true,
    }))
    .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["schema_name", "cycle"]);
    assert!(err
        .violations()
        .unwrap()
        .iter()
        .all(|v| v.kind == ViolationKind::UnknownField));
}

#[test]
fn field_and_gate_violations_are_aggregated() {
    let err = construct::<Counter>(json!({
        "name": "c",
        "increment_by": 2,
        "owned_by": "users.id",
    }))
    .unwrap_err();
    let violations = err.violations().unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations.contains_kind(ViolationKind::Grammar));
    assert!(violations.contains_kind(ViolationKind::MissingRequired));
}

#[test]
fn wrong_value_type_is_reported() {
    let err = construct::<Counter>(json!({"schema": "public", "name": "c", "increment_by": "two"}))
        .unwrap_err();
    assert!(err.has_kind(ViolationKind::InvalidType));
    let err = construct::<Counter>(json!(["not", "a", "mapping"])).unwrap_err();
    assert!(err.to_string().contains("expected a mapping, found a list"));
}

#[test]
fn malformed_json_text() {
    let err = from_json_str::<Counter>("{\"sql\": ").unwrap_err();
    assert!(matches!(err, ValidationError::Malformed { object: "counter", .. }));
}

#[test]
fn output_uses_wire_names_and_omits_unset_fields() {
    let input = json!({
        "schema": "public",
        "name": "c",
        "increment_by": 2,
        "parts": [{"name": "p", "type": "x"}],
    });
    let counter: Counter = construct(input.clone()).unwrap();
    assert_eq!(counter.parts.as_ref().unwrap()[0].form.as_deref(), Some("x"));
    let output = to_value(&counter).unwrap();
    assert_eq!(output, input);

    let reparsed: Counter = construct(output).unwrap();
    assert_eq!(reparsed, counter);
    assert!(validate(&reparsed).is_ok());
}

#[test]
fn nested_unknown_fields_carry_paths() {
    let err = construct::<Counter>(json!({
        "schema": "public",
        "name": "c",
        "parts": [{"name": "p"}, {"name": "q", "form": "x"}],
    }))
    .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["parts[1].form"]);
}

#[test]
fn repeated_json_keys_are_rejected() {
    let err = from_json_str::<Counter>(
        r#"{"sql": "CREATE SEQUENCE public.a", "sql": "CREATE SEQUENCE public.b"}"#,
    )
    .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["sql"]);
    assert!(err.has_kind(ViolationKind::Duplicate));

    let counter: Counter =
        from_json_str(r#"{"schema": "public", "name": "c", "increment_by": 2}"#).unwrap();
    assert_eq!(counter.increment_by, 2);
}

#[test]
fn repeated_keys_join_other_violations() {
    let err = from_json_str::<Counter>(
        r#"{
            "schema": "public",
            "name": "c",
            "owned_by": "users.id",
            "parts": [{"name": "p", "type": "x", "type": "y"}]
        }"#,
    )
    .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["parts[0].type", "owned_by"]);
}
