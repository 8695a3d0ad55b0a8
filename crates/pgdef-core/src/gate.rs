//! # Dual-Representation Gate
//!
//! Decides, from an object's [`ObjectSpec`], whether a candidate is a
//! legal raw definition or a legal structured definition:
//!
//! 1. `has_raw`: the raw field is set.
//! 2. `has_structured`: any structured or kind field deviates from its
//!    own declared default.
//! 3. Both set is a [`MutualExclusion`](ViolationKind::MutualExclusion)
//!    violation; neither is a [`Completeness`](ViolationKind::Completeness)
//!    violation.
//! 4. In structured mode, identity fields that raw mode may omit become
//!    required, and the spec's group rules run: required fields,
//!    all-or-nothing groups, field dependencies, exclusive groups,
//!    alternative definition sources and the kind partition.
//!
//! Kinds without a raw field skip steps 1–3 and run only the group rules.
//!
//! The gate reads the internal-name form of an already field-validated
//! object and never changes it.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ViolationKind, Violations};
use crate::path::FieldPath;
use crate::spec::{FieldRole, Nested, ObjectSpec};

/// Run the gate for one object.
pub fn check(
    spec: &ObjectSpec,
    map: &Map<String, Value>,
    path: &FieldPath,
    violations: &mut Violations,
) {
    let gate = Gate { spec, map, path };

    if let Some(raw) = spec.raw_field() {
        let has_raw = gate.is_set(raw.name);
        let structured: Vec<&str> = spec
            .fields
            .iter()
            .filter(|f| f.is_structured() && f.is_set(map.get(f.name)))
            .map(|f| spec.external_name(f.name))
            .collect();
        let raw_name = spec.external_name(raw.name);

        match (has_raw, structured.is_empty()) {
            (true, true) => {
                debug!(object = spec.object, path = %path, "raw definition");
                return;
            }
            (true, false) => {
                debug!(object = spec.object, path = %path, "raw and structured combined");
                violations.add(
                    path.clone(),
                    ViolationKind::MutualExclusion,
                    format!(
                        "cannot combine raw `{raw_name}` with structured fields: {}",
                        quoted(&structured)
                    ),
                );
                return;
            }
            (false, true) => {
                debug!(object = spec.object, path = %path, "no definition supplied");
                violations.add(
                    path.clone(),
                    ViolationKind::Completeness,
                    format!(
                        "must specify either raw `{raw_name}` or a structured definition ({})",
                        quoted(&spec.structured_names())
                    ),
                );
                return;
            }
            (false, false) => {
                debug!(object = spec.object, path = %path, "structured definition");
            }
        }

        for field in spec
            .fields
            .iter()
            .filter(|f| f.role == FieldRole::Identity && !f.required)
        {
            if !gate.is_set(field.name) {
                let name = spec.external_name(field.name);
                violations.add(
                    path.field(name),
                    ViolationKind::MissingRequired,
                    format!("missing required field `{name}` (required unless `{raw_name}` is given)"),
                );
            }
        }
    }

    gate.required(violations);
    gate.together(violations);
    gate.requires(violations);
    gate.exclusive(violations);
    gate.alternatives(violations);
    gate.discriminant(violations);
}

/// Run the gate for an object and every nested object beneath it.
pub fn check_tree(
    spec: &ObjectSpec,
    map: &Map<String, Value>,
    path: &FieldPath,
    violations: &mut Violations,
) {
    check(spec, map, path, violations);

    for field in spec.fields {
        let (Some(nested), Some(value)) = (field.nested, map.get(field.name)) else {
            continue;
        };
        let field_path = path.field(spec.external_name(field.name));
        match nested {
            Nested::Object(inner) => check_items(inner, value, &field_path, violations),
            Nested::Values(inner) => {
                if let Value::Object(entries) = value {
                    for (key, item) in entries {
                        check_items(inner, item, &field_path.key(key), violations);
                    }
                }
            }
        }
    }
}

fn check_items(spec: &ObjectSpec, value: &Value, path: &FieldPath, violations: &mut Violations) {
    match value {
        Value::Object(map) => check_tree(spec, map, path, violations),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if let Value::Object(map) = item {
                    check_tree(spec, map, &path.index(i), violations);
                }
            }
        }
        _ => {}
    }
}

struct Gate<'a> {
    spec: &'a ObjectSpec,
    map: &'a Map<String, Value>,
    path: &'a FieldPath,
}

impl Gate<'_> {
    fn is_set(&self, name: &str) -> bool {
        let value = self.map.get(name);
        match self.spec.field(name) {
            Some(field) => field.is_set(value),
            None => value.is_some_and(|v| !v.is_null()),
        }
    }

    fn name<'n>(&self, internal: &'n str) -> &'n str {
        self.spec.external_name(internal)
    }

    fn names(&self, fields: &[&str]) -> String {
        let names: Vec<&str> = fields.iter().map(|f| self.name(f)).collect();
        quoted(&names)
    }

    fn required(&self, violations: &mut Violations) {
        for &field in self.spec.required {
            if !self.is_set(field) {
                let name = self.name(field);
                violations.add(
                    self.path.field(name),
                    ViolationKind::Completeness,
                    format!("`{name}` is required for a structured {} definition", self.spec.object),
                );
            }
        }
    }

    fn together(&self, violations: &mut Violations) {
        for group in self.spec.together {
            let missing: Vec<&'static str> =
                group.iter().copied().filter(|f| !self.is_set(f)).collect();
            if !missing.is_empty() && missing.len() < group.len() {
                violations.add(
                    self.path.clone(),
                    ViolationKind::Completeness,
                    format!(
                        "{} must be specified together (missing {})",
                        self.names(group),
                        self.names(&missing)
                    ),
                );
            }
        }
    }

    fn requires(&self, violations: &mut Violations) {
        for &(field, needed) in self.spec.requires {
            if self.is_set(field) && !self.is_set(needed) {
                let name = self.name(field);
                violations.add(
                    self.path.field(name),
                    ViolationKind::Completeness,
                    format!("`{name}` requires `{}`", self.name(needed)),
                );
            }
        }
    }

    fn exclusive(&self, violations: &mut Violations) {
        for group in self.spec.exclusive {
            let set: Vec<&'static str> = group.iter().copied().filter(|f| self.is_set(f)).collect();
            if set.len() > 1 {
                violations.add(
                    self.path.clone(),
                    ViolationKind::MutualExclusion,
                    format!(
                        "at most one of {} may be specified, found {}",
                        self.names(group),
                        self.names(&set)
                    ),
                );
            }
        }
    }

    fn alternatives(&self, violations: &mut Violations) {
        for choice in self.spec.alternatives {
            let populated = choice
                .iter()
                .filter(|alternative| alternative.iter().any(|f| self.is_set(f)))
                .count();
            let described: Vec<String> = choice
                .iter()
                .map(|alternative| match alternative {
                    [single] => format!("`{}`", self.name(single)),
                    group => format!("({})", self.names(group)),
                })
                .collect();
            match populated {
                1 => {}
                0 => violations.add(
                    self.path.clone(),
                    ViolationKind::Completeness,
                    format!("must specify one of: {}", described.join(", ")),
                ),
                _ => violations.add(
                    self.path.clone(),
                    ViolationKind::MutualExclusion,
                    format!("only one of {} may be specified", described.join(", ")),
                ),
            }
        }
    }

    fn discriminant(&self, violations: &mut Violations) {
        let Some(discriminant) = self.spec.discriminant else {
            return;
        };
        let kind_name = self.name(discriminant.field);
        let Some(kind) = self.map.get(discriminant.field).and_then(Value::as_str) else {
            violations.add(
                self.path.field(kind_name),
                ViolationKind::Completeness,
                format!("`{kind_name}` is required for a structured {} definition", self.spec.object),
            );
            return;
        };
        let Some(partition) = discriminant.partition(kind) else {
            return;
        };
        debug!(object = self.spec.object, path = %self.path, kind, "active kind");

        for field in self.spec.fields {
            if self.is_set(field.name)
                && discriminant.is_partitioned(field.name)
                && !partition.fields.contains(&field.name)
            {
                let name = self.name(field.name);
                violations.add(
                    self.path.field(name),
                    ViolationKind::MutualExclusion,
                    format!("`{name}` is not allowed when `{kind_name}` is `{kind}`"),
                );
            }
        }
        for &field in partition.required {
            if !self.is_set(field) {
                let name = self.name(field);
                violations.add(
                    self.path.field(name),
                    ViolationKind::Completeness,
                    format!("`{name}` is required when `{kind_name}` is `{kind}`"),
                );
            }
        }
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Alias, Discriminant, FieldDefault, FieldSpec, KindPartition, SCHEMA_ALIAS};
    use serde_json::json;

    static FUNCTION: ObjectSpec = ObjectSpec {
        object: "function",
        fields: &[
            FieldSpec::identity("schema_name"),
            FieldSpec::identity("name"),
            FieldSpec::raw("sql"),
            FieldSpec::structured("language"),
            FieldSpec::structured("returns"),
            FieldSpec::structured("definition"),
            FieldSpec::structured("object_file"),
            FieldSpec::structured("link_symbol"),
            FieldSpec::structured("immutable"),
            FieldSpec::structured("stable"),
            FieldSpec::structured("called_on_null_input").default(FieldDefault::Bool(true)),
            FieldSpec::meta("comment"),
        ],
        aliases: SCHEMA_ALIAS,
        required: &["language", "returns"],
        requires: &[("link_symbol", "object_file")],
        exclusive: &[&["immutable", "stable"]],
        alternatives: &[&[&["definition"], &["object_file", "link_symbol"]]],
        ..ObjectSpec::EMPTY
    };

    static SEQUENCE: ObjectSpec = ObjectSpec {
        object: "sequence",
        fields: &[
            FieldSpec::identity_unless_raw("schema_name"),
            FieldSpec::identity_unless_raw("name"),
            FieldSpec::raw("sql"),
            FieldSpec::structured("cache").default(FieldDefault::Int(1)),
        ],
        aliases: SCHEMA_ALIAS,
        ..ObjectSpec::EMPTY
    };

    static KINDS: ObjectSpec = ObjectSpec {
        object: "type",
        fields: &[
            FieldSpec::raw("sql"),
            FieldSpec::kind("form"),
            FieldSpec::structured("input"),
            FieldSpec::structured("output"),
            FieldSpec::structured("enum_values"),
            FieldSpec::meta("comment"),
        ],
        aliases: &[Alias::new("form", "type"), Alias::new("enum_values", "enum")],
        together: &[&["input", "output"]],
        discriminant: Some(Discriminant {
            field: "form",
            partitions: &[
                KindPartition {
                    kind: "base",
                    fields: &["input", "output"],
                    required: &["input", "output"],
                },
                KindPartition {
                    kind: "enum",
                    fields: &["enum_values"],
                    required: &["enum_values"],
                },
            ],
        }),
        ..ObjectSpec::EMPTY
    };

    fn run(spec: &ObjectSpec, value: Value) -> Violations {
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        let mut violations = Violations::new();
        check(spec, &map, &FieldPath::root(), &mut violations);
        violations
    }

    fn kinds(violations: &Violations) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn raw_alone_passes() {
        let v = run(&FUNCTION, json!({"schema_name": "public", "name": "f", "sql": "CREATE FUNCTION"}));
        assert!(v.is_empty(), "{v}");
    }

    #[test]
    fn raw_with_default_valued_flag_passes() {
        let v = run(
            &FUNCTION,
            json!({"name": "f", "sql": "CREATE FUNCTION", "called_on_null_input": true}),
        );
        assert!(v.is_empty(), "{v}");
    }

    #[test]
    fn raw_with_non_default_flag_fails() {
        let v = run(
            &FUNCTION,
            json!({"name": "f", "sql": "CREATE FUNCTION", "called_on_null_input": false}),
        );
        assert_eq!(kinds(&v), vec![ViolationKind::MutualExclusion]);
        assert!(v.violations()[0].message.contains("`called_on_null_input`"));
    }

    #[test]
    fn neither_representation_fails() {
        let v = run(&FUNCTION, json!({"name": "f", "comment": "meta only"}));
        assert_eq!(kinds(&v), vec![ViolationKind::Completeness]);
        assert!(v.violations()[0].message.starts_with("must specify either raw `sql`"));
    }

    #[test]
    fn structured_requires_subset() {
        let v = run(&FUNCTION, json!({"name": "f", "definition": "SELECT 1"}));
        let paths: Vec<String> = v.iter().map(|x| x.path.to_string()).collect();
        assert_eq!(paths, vec!["language", "returns"]);
        assert!(v.iter().all(|x| x.kind == ViolationKind::Completeness));
    }

    #[test]
    fn alternatives_demand_exactly_one() {
        let base = json!({"name": "f", "language": "c", "returns": "int"});
        let v = run(&FUNCTION, base.clone());
        assert_eq!(kinds(&v), vec![ViolationKind::Completeness]);
        assert!(v.violations()[0].message.contains("(`object_file`, `link_symbol`)"));

        let mut both = base.clone();
        both["definition"] = json!("x");
        both["object_file"] = json!("lib.so");
        assert_eq!(kinds(&run(&FUNCTION, both)), vec![ViolationKind::MutualExclusion]);

        let mut object_file = base;
        object_file["object_file"] = json!("lib.so");
        assert!(run(&FUNCTION, object_file).is_empty());
    }

    #[test]
    fn requires_and_exclusive_groups() {
        let v = run(
            &FUNCTION,
            json!({
                "name": "f", "language": "c", "returns": "int",
                "link_symbol": "sym", "immutable": true, "stable": true
            }),
        );
        let found = kinds(&v);
        assert!(found.contains(&ViolationKind::Completeness));
        assert!(found.contains(&ViolationKind::MutualExclusion));
        assert!(v.iter().any(|x| x.message == "`link_symbol` requires `object_file`"));
    }

    #[test]
    fn identity_required_unless_raw() {
        assert!(run(&SEQUENCE, json!({"sql": "CREATE SEQUENCE s"})).is_empty());
        let v = run(&SEQUENCE, json!({"cache": 10}));
        assert_eq!(
            kinds(&v),
            vec![ViolationKind::MissingRequired, ViolationKind::MissingRequired]
        );
        assert_eq!(v.violations()[0].path.to_string(), "schema");
    }

    #[test]
    fn default_valued_structured_field_is_not_structured() {
        let v = run(&SEQUENCE, json!({"schema_name": "s", "name": "n", "cache": 1}));
        assert_eq!(kinds(&v), vec![ViolationKind::Completeness]);
    }

    #[test]
    fn wrong_kind_field_fails() {
        let v = run(
            &KINDS,
            json!({"form": "enum", "enum_values": ["a", "b"], "input": "f"}),
        );
        assert!(kinds(&v).contains(&ViolationKind::MutualExclusion));
        let offending = v
            .iter()
            .find(|x| x.kind == ViolationKind::MutualExclusion)
            .unwrap();
        assert_eq!(offending.path.to_string(), "input");
        assert_eq!(offending.message, "`input` is not allowed when `type` is `enum`");
    }

    #[test]
    fn kind_partition_required_fields() {
        let v = run(&KINDS, json!({"form": "base", "input": "f"}));
        assert!(v.iter().any(|x| x.message.contains("must be specified together")));
        assert!(v.iter().any(|x| x.message == "`output` is required when `type` is `base`"));
        assert!(run(&KINDS, json!({"form": "enum", "enum_values": ["a"]})).is_empty());
    }

    #[test]
    fn missing_kind_in_structured_mode() {
        let v = run(&KINDS, json!({"enum_values": ["a"]}));
        assert_eq!(kinds(&v), vec![ViolationKind::Completeness]);
        assert_eq!(v.violations()[0].path.to_string(), "type");
    }

    #[test]
    fn check_tree_recurses_with_paths() {
        static INNER: ObjectSpec = ObjectSpec {
            object: "generated",
            fields: &[FieldSpec::structured("expression"), FieldSpec::structured("sequence")],
            alternatives: &[&[&["expression"], &["sequence"]]],
            ..ObjectSpec::EMPTY
        };
        static OUTER: ObjectSpec = ObjectSpec {
            object: "column_list",
            fields: &[FieldSpec::structured("items").nested(&INNER)],
            ..ObjectSpec::EMPTY
        };
        let Value::Object(map) = json!({"items": [{"expression": "1"}, {}]}) else {
            unreachable!()
        };
        let mut violations = Violations::new();
        check_tree(&OUTER, &map, &FieldPath::root(), &mut violations);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.violations()[0].path.to_string(), "items[1]");
    }
}
