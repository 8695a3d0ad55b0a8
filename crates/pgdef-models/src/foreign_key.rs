//! Foreign key constraints.

use pgdef_core::{Context, FieldSpec, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    Full,
    Partial,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[serde(rename = "NO ACTION")]
    NoAction,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

/// The referenced table and its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKeyReference {
    pub name: String,
    pub columns: Vec<String>,
}

pub static FOREIGN_KEY_REFERENCE_SPEC: ObjectSpec = ObjectSpec {
    object: "foreign key reference",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("columns").required(),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for ForeignKeyReference {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("columns", Some(self.columns.as_slice()));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initially_deferred: Option<bool>,
}

pub static FOREIGN_KEY_SPEC: ObjectSpec = ObjectSpec {
    object: "foreign key",
    fields: &[
        FieldSpec::meta("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("columns"),
        FieldSpec::structured("references").nested(&FOREIGN_KEY_REFERENCE_SPEC),
        FieldSpec::structured("match_type"),
        FieldSpec::structured("on_delete"),
        FieldSpec::structured("on_update"),
        FieldSpec::structured("deferrable"),
        FieldSpec::structured("initially_deferred"),
    ],
    required: &["columns", "references"],
    ..ObjectSpec::EMPTY
};

impl Validate for ForeignKey {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("columns", self.columns.as_deref());
        ctx.nested("references", &self.references);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn referential_actions_use_sql_spelling() {
        let fk: ForeignKey = serde_json::from_value(json!({
            "columns": ["user_id"],
            "references": {"name": "public.users", "columns": ["id"]},
            "on_delete": "SET NULL",
            "on_update": "NO ACTION",
            "match_type": "FULL",
        }))
        .unwrap();
        assert_eq!(fk.on_delete, Some(ReferentialAction::SetNull));
        assert_eq!(fk.on_update, Some(ReferentialAction::NoAction));
    }
}
