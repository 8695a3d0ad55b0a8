//! Properties that hold for every object kind with a raw form: raw plus a
//! non-default structured field fails, neither form fails, and raw alone
//! succeeds. Also covers the type discriminant and output round-trips.

use pgdef_core::{construct, to_value, Model, ValidationError, ViolationKind};
use pgdef_models::{
    Aggregate, Cast, Collation, Conversion, Domain, EventTrigger, Function, MaterializedView,
    Operator, Sequence, Table, Type, View,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

type Check = fn(Value) -> Result<(), ValidationError>;

fn check<T: Model>(input: Value) -> Result<(), ValidationError> {
    construct::<T>(input).map(|_| ())
}

fn merge(base: &Value, extra: &Value) -> Value {
    let mut out: Map<String, Value> = base.as_object().cloned().unwrap_or_default();
    if let Some(extra) = extra.as_object() {
        out.extend(extra.clone());
    }
    Value::Object(out)
}

/// One object kind: its identity fields, one non-default structured field,
/// and how to build it. Kinds nested inside a table are wrapped by `wrap`.
struct Kind {
    name: &'static str,
    identity: Value,
    structured: Value,
    wrap: Option<&'static str>,
    check: Check,
}

impl Kind {
    fn run(&self, object: Value) -> Result<(), ValidationError> {
        let input = match self.wrap {
            Some(field) => {
                let mut table = json!({
                    "schema": "public",
                    "name": "orders",
                    "columns": [{"name": "id", "data_type": "integer"}],
                });
                table[field] = json!([object]);
                table
            }
            None => object,
        };
        (self.check)(input)
    }
}

fn top(name: &'static str, identity: Value, structured: Value, check: Check) -> Kind {
    Kind {
        name,
        identity,
        structured,
        wrap: None,
        check,
    }
}

fn in_table(name: &'static str, field: &'static str, identity: Value, structured: Value) -> Kind {
    Kind {
        name,
        identity,
        structured,
        wrap: Some(field),
        check: check::<Table>,
    }
}

fn kinds() -> Vec<Kind> {
    let qualified = || json!({"schema": "public", "name": "thing"});
    vec![
        top("domain", qualified(), json!({"data_type": "integer"}), check::<Domain>),
        top("type", qualified(), json!({"type": "enum", "enum": ["a"]}), check::<Type>),
        top("function", qualified(), json!({"language": "sql"}), check::<Function>),
        top(
            "function flag",
            qualified(),
            json!({"called_on_null_input": false}),
            check::<Function>,
        ),
        top("aggregate", qualified(), json!({"sfunc": "int4pl"}), check::<Aggregate>),
        top("sequence", qualified(), json!({"increment_by": 2}), check::<Sequence>),
        top("table", qualified(), json!({"parents": ["public.base"]}), check::<Table>),
        top("view", qualified(), json!({"query": "SELECT 1"}), check::<View>),
        top(
            "materialized view",
            qualified(),
            json!({"tablespace": "fast"}),
            check::<MaterializedView>,
        ),
        top("operator", qualified(), json!({"hashes": true}), check::<Operator>),
        top(
            "cast",
            json!({"source_type": "text", "target_type": "integer"}),
            json!({"implicit": true}),
            check::<Cast>,
        ),
        top("conversion", qualified(), json!({"encoding_to": "UTF8"}), check::<Conversion>),
        top(
            "collation",
            json!({"schema": "public", "name": "thing", "owner": "postgres"}),
            json!({"deterministic": false}),
            check::<Collation>,
        ),
        top("event trigger", json!({}), json!({"event": "sql_drop"}), check::<EventTrigger>),
        in_table("index", "indexes", json!({}), json!({"method": "gin"})),
        in_table(
            "foreign key",
            "foreign_keys",
            json!({"name": "orders_customer_fk"}),
            json!({"on_delete": "CASCADE"}),
        ),
        in_table("trigger", "triggers", json!({}), json!({"for_each": "ROW"})),
    ]
}

fn raw() -> Value {
    json!({"sql": "CREATE ..."})
}

#[test]
fn raw_alone_succeeds_for_every_kind() {
    for kind in kinds() {
        let result = kind.run(merge(&kind.identity, &raw()));
        assert!(result.is_ok(), "{}: {:?}", kind.name, result);
    }
}

#[test]
fn raw_with_structured_fails_for_every_kind() {
    for kind in kinds() {
        let input = merge(&merge(&kind.identity, &raw()), &kind.structured);
        let err = kind.run(input).expect_err(kind.name);
        assert!(err.has_kind(ViolationKind::MutualExclusion), "{}: {err}", kind.name);
        assert!(err.to_string().contains("cannot combine raw `sql`"), "{}: {err}", kind.name);
    }
}

#[test]
fn neither_form_fails_for_every_kind() {
    for kind in kinds() {
        let err = kind.run(kind.identity.clone()).expect_err(kind.name);
        assert!(err.has_kind(ViolationKind::Completeness), "{}: {err}", kind.name);
        assert!(
            err.to_string().contains("must specify either raw `sql`"),
            "{}: {err}",
            kind.name
        );
    }
}

const FORMS: &[&str] = &["base", "composite", "enum", "range"];

fn type_form(form: &str) -> Value {
    let required = match form {
        "base" => json!({"input": "t_in", "output": "t_out"}),
        "composite" => json!({"columns": [{"name": "a", "data_type": "integer"}]}),
        "enum" => json!({"enum": ["a", "b"]}),
        _ => json!({"subtype": "float8"}),
    };
    merge(&json!({"schema": "public", "name": "t", "type": form}), &required)
}

/// A field that belongs only to `form`.
fn form_field(form: &str) -> Value {
    match form {
        "base" => json!({"receive": "t_recv"}),
        "composite" => json!({"columns": [{"name": "b", "data_type": "text"}]}),
        "enum" => json!({"enum": ["x"]}),
        _ => json!({"subtype_diff": "float8mi"}),
    }
}

#[test]
fn every_type_form_accepts_its_required_subset() {
    for form in FORMS {
        let ty: Type = construct(type_form(form)).unwrap();
        let out = to_value(&ty).unwrap();
        assert_eq!(out, type_form(form));
        let reparsed: Type = construct(out).unwrap();
        assert_eq!(reparsed, ty);
    }
}

#[test]
fn every_type_form_requires_its_fields() {
    for form in FORMS {
        let err = construct::<Type>(json!({"schema": "public", "name": "t", "type": form}))
            .unwrap_err();
        assert!(err.has_kind(ViolationKind::Completeness), "{form}: {err}");
    }
}

proptest! {
    #[test]
    fn field_of_another_form_is_rejected(form in 0usize..4, other in 0usize..4) {
        prop_assume!(form != other);
        let input = merge(&type_form(FORMS[form]), &form_field(FORMS[other]));
        let err = construct::<Type>(input).unwrap_err();
        prop_assert!(err.has_kind(ViolationKind::MutualExclusion));
        prop_assert!(err.to_string().contains("is not allowed when `type`"));
    }

    #[test]
    fn raw_plus_any_non_default_increment_fails(step in any::<i64>().prop_filter("non-default", |s| *s != 1)) {
        let err = construct::<Sequence>(json!({
            "sql": "CREATE SEQUENCE public.s",
            "increment_by": step,
        }))
        .unwrap_err();
        prop_assert!(err.has_kind(ViolationKind::MutualExclusion));
    }
}

#[test]
fn structured_documents_round_trip() {
    let function = json!({
        "schema": "public",
        "name": "add",
        "parameters": [
            {"mode": "IN", "name": "a", "data_type": "integer", "default": 0},
            {"mode": "IN", "name": "b", "data_type": "integer"},
        ],
        "returns": "integer",
        "language": "sql",
        "immutable": true,
        "strict": true,
        "security": "DEFINER",
        "configuration": {"search_path": "pg_catalog"},
        "definition": "SELECT a + b",
    });
    let sequence = json!({
        "schema": "public",
        "name": "orders_id_seq",
        "data_type": "INTEGER",
        "increment_by": 10,
        "cycle": true,
        "owned_by": "public.orders.id",
    });

    let built: Function = construct(function.clone()).unwrap();
    assert_eq!(to_value(&built).unwrap(), function);
    let built: Sequence = construct(sequence.clone()).unwrap();
    assert_eq!(to_value(&built).unwrap(), sequence);
}
