//! # Alias Normalizer
//!
//! Renames fields between their wire names and internal names using the
//! [`Alias`](crate::spec::Alias) table of each [`ObjectSpec`]. The rename
//! is applied recursively through nested specs, keeps key order, and
//! touches nothing but keys.
//!
//! On input the same pass enforces strict mode: a key that is not a
//! declared wire name is an [`UnknownField`](ViolationKind::UnknownField)
//! violation, including the internal name of an aliased field. Fields
//! marked `required` that are absent or null are reported as
//! [`MissingRequired`](ViolationKind::MissingRequired).

use serde_json::{Map, Value};

use crate::error::{ViolationKind, Violations};
use crate::path::FieldPath;
use crate::spec::{Nested, ObjectSpec};

/// Rename wire keys to internal keys, collecting strict-mode violations.
pub fn normalize_input(
    spec: &ObjectSpec,
    input: Map<String, Value>,
    path: &FieldPath,
    violations: &mut Violations,
) -> Map<String, Value> {
    let mut output = Map::with_capacity(input.len());

    for (key, value) in input {
        let field_path = path.field(&key);
        let Some(internal) = spec.internal_name(&key) else {
            let message = match spec.aliases.iter().find(|a| a.internal == key) {
                Some(alias) => format!("unknown field `{key}`, expected `{}`", alias.external),
                None => format!("unknown field `{key}` for {}", spec.object),
            };
            violations.add(field_path, ViolationKind::UnknownField, message);
            continue;
        };
        let value = match spec.field(internal).and_then(|f| f.nested) {
            Some(nested) => normalize_nested(nested, value, &field_path, violations),
            None => value,
        };
        output.insert(internal.to_string(), value);
    }

    for field in spec.fields.iter().filter(|f| f.required) {
        let present = output.get(field.name).is_some_and(|v| !v.is_null());
        if !present {
            let external = spec.external_name(field.name);
            violations.add(
                path.field(external),
                ViolationKind::MissingRequired,
                format!("missing required field `{external}`"),
            );
        }
    }

    output
}

fn normalize_nested(
    nested: Nested,
    value: Value,
    path: &FieldPath,
    violations: &mut Violations,
) -> Value {
    let spec = nested.spec();
    match (nested, value) {
        (Nested::Object(_), value) => normalize_items(spec, value, path, violations),
        (Nested::Values(_), Value::Object(map)) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = normalize_items(spec, value, &path.key(&key), violations);
                    (key, value)
                })
                .collect(),
        ),
        (Nested::Values(_), other) => other,
    }
}

// An object, or a list whose object items follow `spec`. Other values are
// left for the type checker.
fn normalize_items(
    spec: &ObjectSpec,
    value: Value,
    path: &FieldPath,
    violations: &mut Violations,
) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_input(spec, map, path, violations)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => {
                        Value::Object(normalize_input(spec, map, &path.index(i), violations))
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Rename internal keys back to wire keys.
pub fn denormalize_output(spec: &ObjectSpec, value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };
    let output = map
        .into_iter()
        .map(|(key, value)| {
            let value = match spec.field(&key).and_then(|f| f.nested) {
                Some(Nested::Object(nested)) => denormalize_items(nested, value),
                Some(Nested::Values(nested)) => match value {
                    Value::Object(entries) => Value::Object(
                        entries
                            .into_iter()
                            .map(|(k, v)| (k, denormalize_items(nested, v)))
                            .collect(),
                    ),
                    other => other,
                },
                None => value,
            };
            (spec.external_name(&key).to_string(), value)
        })
        .collect();
    Value::Object(output)
}

fn denormalize_items(spec: &ObjectSpec, value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| denormalize_output(spec, item))
                .collect(),
        ),
        other => denormalize_output(spec, other),
    }
}
