//! # Indexes
//!
//! `CREATE INDEX`, raw or structured. A structured index needs a `name`
//! and at least one column; each index column is either a column name or
//! an expression. The partial-index predicate is `where` on the wire.

use pgdef_core::{Alias, Context, FieldSpec, Grammar, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::common::StorageParameters;
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMethod {
    Brin,
    Btree,
    Gin,
    Gist,
    Hash,
    Spgist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullPlacement {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opclass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_placement: Option<NullPlacement>,
}

pub static INDEX_COLUMN_SPEC: ObjectSpec = ObjectSpec {
    object: "index column",
    fields: &[
        FieldSpec::structured("name"),
        FieldSpec::structured("expression"),
        FieldSpec::structured("collation"),
        FieldSpec::structured("opclass"),
        FieldSpec::structured("direction"),
        FieldSpec::structured("null_placement"),
    ],
    alternatives: &[&[&["name"], &["expression"]]],
    ..ObjectSpec::EMPTY
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<IndexMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<IndexColumn>>,
    /// Non-key columns (`INCLUDE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_parameters: Option<StorageParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static INDEX_SPEC: ObjectSpec = ObjectSpec {
    object: "index",
    fields: &[
        FieldSpec::structured("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("unique"),
        FieldSpec::structured("recurse"),
        FieldSpec::structured("method"),
        FieldSpec::structured("columns").nested(&INDEX_COLUMN_SPEC),
        FieldSpec::structured("include"),
        FieldSpec::structured("storage_parameters"),
        FieldSpec::structured("tablespace"),
        FieldSpec::structured("where_clause"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: &[Alias::new("where_clause", "where")],
    required: &["name", "columns"],
    ..ObjectSpec::EMPTY
};

impl Validate for Index {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("columns", self.columns.as_deref());
        ctx.unique("include", &self.include);
        ctx.grammar_keys("storage_parameters", Grammar::StorageParameter, &self.storage_parameters);
        ctx.nested("dependencies", &self.dependencies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{FieldPath, Violations};
    use serde_json::json;

    fn check(value: serde_json::Value) -> Violations {
        let mut violations = Violations::new();
        let index: Index = serde_json::from_value(value).unwrap();
        index.validate(&mut Context::new(&mut violations));
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(&index) {
            pgdef_core::gate::check_tree(&INDEX_SPEC, &map, &FieldPath::root(), &mut violations);
        }
        violations
    }

    #[test]
    fn partial_expression_index() {
        let violations = check(json!({
            "name": "users_lower_email",
            "unique": true,
            "columns": [{"expression": "lower(email)"}],
            "where_clause": "deleted_at IS NULL",
            "storage_parameters": {"fillfactor": 70},
        }));
        assert!(violations.is_empty());
    }

    #[test]
    fn raw_index_cannot_be_named() {
        let violations = check(json!({"name": "idx", "sql": "CREATE INDEX idx ON t (a)"}));
        assert_eq!(violations.len(), 1);
        assert!(violations.violations()[0].message.contains("`name`"));
    }

    #[test]
    fn column_is_name_or_expression() {
        let violations = check(json!({
            "name": "idx",
            "columns": [{"name": "a", "expression": "lower(a)"}, {"direction": "DESC"}],
        }));
        let paths: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["columns[0]", "columns[1]"]);
    }

    #[test]
    fn storage_parameter_names() {
        let violations = check(json!({
            "name": "idx",
            "columns": [{"name": "a"}],
            "storage_parameters": {"fill-factor": 70},
        }));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.violations()[0].path.to_string(),
            r#"storage_parameters["fill-factor"]"#
        );
    }
}
