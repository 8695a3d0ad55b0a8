//! # Domains
//!
//! `CREATE DOMAIN`: a named data type with optional default, collation
//! and check constraints, given either as raw `sql` or structured with a
//! required `data_type`.

use pgdef_core::{Context, FieldSpec, Literal, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

/// A domain check constraint: an expression or a nullability rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

pub static CHECK_CONSTRAINT_SPEC: ObjectSpec = ObjectSpec {
    object: "check constraint",
    fields: &[
        FieldSpec::meta("name"),
        FieldSpec::structured("nullable"),
        FieldSpec::structured("expression"),
    ],
    alternatives: &[&[&["expression"], &["nullable"]]],
    ..ObjectSpec::EMPTY
};

/// A PostgreSQL domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Domain {
    pub name: String,
    pub schema_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Defaults to the collation of the underlying data type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraints: Option<Vec<CheckConstraint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static DOMAIN_SPEC: ObjectSpec = ObjectSpec {
    object: "domain",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::identity("schema_name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("data_type"),
        FieldSpec::structured("collation"),
        FieldSpec::structured("default"),
        FieldSpec::structured("check_constraints").nested(&CHECK_CONSTRAINT_SPEC),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    required: &["data_type"],
    ..ObjectSpec::EMPTY
};

impl Validate for Domain {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.unique("check_constraints", &self.check_constraints);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Domain {
    fn spec() -> &'static ObjectSpec {
        &DOMAIN_SPEC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{construct, ViolationKind};
    use serde_json::json;

    #[test]
    fn raw_definition_alone() {
        let domain: Domain = construct(json!({
            "schema": "public",
            "name": "email",
            "sql": "CREATE DOMAIN public.email AS text",
        }))
        .unwrap();
        assert_eq!(domain.schema_name, "public");
        assert!(domain.data_type.is_none());
    }

    #[test]
    fn raw_and_data_type_conflict() {
        let err = construct::<Domain>(json!({
            "schema": "public",
            "name": "email",
            "sql": "CREATE DOMAIN public.email AS text",
            "data_type": "integer",
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::MutualExclusion));
        assert!(err.to_string().contains("`data_type`"));
    }

    #[test]
    fn structured_requires_data_type() {
        let err = construct::<Domain>(json!({
            "schema": "public",
            "name": "email",
            "collation": "C",
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Completeness));
    }

    #[test]
    fn check_constraints() {
        let domain: Domain = construct(json!({
            "schema": "public",
            "name": "positive",
            "data_type": "integer",
            "default": 1,
            "check_constraints": [
                {"name": "gt_zero", "expression": "VALUE > 0"},
                {"nullable": false},
            ],
        }))
        .unwrap();
        assert_eq!(domain.default, Some(Literal::Integer(1)));
        assert_eq!(domain.check_constraints.unwrap().len(), 2);
    }

    #[test]
    fn check_constraint_is_expression_xor_nullable() {
        let err = construct::<Domain>(json!({
            "schema": "public",
            "name": "positive",
            "data_type": "integer",
            "check_constraints": [
                {"expression": "VALUE > 0", "nullable": true},
                {"name": "empty"},
            ],
        }))
        .unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.violations()[0].kind, ViolationKind::MutualExclusion);
        assert_eq!(violations.violations()[0].path.to_string(), "check_constraints[0]");
        assert_eq!(violations.violations()[1].kind, ViolationKind::Completeness);
    }

    #[test]
    fn duplicate_check_constraints() {
        let err = construct::<Domain>(json!({
            "schema": "public",
            "name": "positive",
            "data_type": "integer",
            "check_constraints": [
                {"expression": "VALUE > 0"},
                {"expression": "VALUE > 0"},
            ],
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Duplicate));
    }

    #[test]
    fn identity_is_always_required() {
        let err = construct::<Domain>(json!({"sql": "CREATE DOMAIN x AS text"})).unwrap_err();
        let paths: Vec<String> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.path.to_string())
            .collect();
        assert_eq!(paths, vec!["name", "schema"]);
    }
}
