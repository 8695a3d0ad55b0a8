//! Sequences.
//!
//! `schema` and `name` may be left out when the sequence is given as raw
//! `sql`. The numeric options carry non-null defaults and count as
//! structured only when changed from them. `owned_by` is bookkeeping and
//! may accompany raw SQL.

use pgdef_core::{Context, FieldDefault, FieldSpec, Grammar, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::common::{default_one, is_one};

/// Integer type backing a sequence. Lowercase names and the `int2`/`int4`
/// /`int8` spellings are accepted; output always uses the uppercase
/// standard name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceDataType {
    #[serde(rename = "SMALLINT", alias = "smallint", alias = "INT2", alias = "int2")]
    Smallint,
    #[serde(rename = "INTEGER", alias = "integer", alias = "INT4", alias = "int4")]
    Integer,
    #[default]
    #[serde(rename = "BIGINT", alias = "bigint", alias = "INT8", alias = "int8")]
    Bigint,
}

impl SequenceDataType {
    fn is_bigint(&self) -> bool {
        *self == Self::Bigint
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "SequenceDataType::is_bigint")]
    pub data_type: SequenceDataType,
    #[serde(default = "default_one", skip_serializing_if = "is_one")]
    pub increment_by: i64,
    #[serde(default = "default_one", skip_serializing_if = "is_one")]
    pub min_value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<i64>,
    #[serde(default = "default_one", skip_serializing_if = "is_one")]
    pub cache: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<bool>,
    /// `schema.table.column`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static SEQUENCE_SPEC: ObjectSpec = ObjectSpec {
    object: "sequence",
    fields: &[
        FieldSpec::identity_unless_raw("schema_name"),
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("data_type").default(FieldDefault::Str("BIGINT")),
        FieldSpec::structured("increment_by").default(FieldDefault::Int(1)),
        FieldSpec::structured("min_value").default(FieldDefault::Int(1)),
        FieldSpec::structured("max_value"),
        FieldSpec::structured("start_with"),
        FieldSpec::structured("cache").default(FieldDefault::Int(1)),
        FieldSpec::structured("cycle"),
        FieldSpec::meta("owned_by"),
        FieldSpec::meta("comment"),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Sequence {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar("owned_by", Grammar::SchemaObjectColumn, &self.owned_by);
    }
}

impl Model for Sequence {
    fn spec() -> &'static ObjectSpec {
        &SEQUENCE_SPEC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{construct, to_value, ViolationKind};
    use serde_json::json;

    #[test]
    fn raw_sequence_without_identity() {
        let sequence: Sequence = construct(json!({
            "sql": "CREATE SEQUENCE public.users_id_seq",
            "owned_by": "public.users.id",
        }))
        .unwrap();
        assert_eq!(sequence.data_type, SequenceDataType::Bigint);
        assert_eq!(sequence.cache, 1);
    }

    #[test]
    fn raw_with_defaults_spelled_out() {
        let ok: Result<Sequence, _> = construct(json!({
            "sql": "CREATE SEQUENCE public.s",
            "data_type": "bigint",
            "increment_by": 1,
            "min_value": 1,
        }));
        assert!(ok.is_ok());
    }

    #[test]
    fn raw_with_changed_option_fails() {
        let err = construct::<Sequence>(json!({
            "sql": "CREATE SEQUENCE public.s",
            "data_type": "int4",
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::MutualExclusion));
        assert!(err.to_string().contains("`data_type`"));
    }

    #[test]
    fn structured_sequence_requires_identity() {
        let err = construct::<Sequence>(json!({"increment_by": 10})).unwrap_err();
        let paths: Vec<String> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.path.to_string())
            .collect();
        assert_eq!(paths, vec!["schema", "name"]);
        assert!(err.has_kind(ViolationKind::MissingRequired));
    }

    #[test]
    fn identity_alone_is_not_a_definition() {
        let err = construct::<Sequence>(json!({"schema": "public", "name": "s"})).unwrap_err();
        assert!(err.has_kind(ViolationKind::Completeness));
    }

    #[test]
    fn owned_by_grammar() {
        let err = construct::<Sequence>(json!({
            "schema": "public",
            "name": "s",
            "cycle": true,
            "owned_by": "users.id",
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Grammar));
    }

    #[test]
    fn output_uses_standard_type_name() {
        let sequence: Sequence = construct(json!({
            "schema": "public",
            "name": "s",
            "data_type": "int2",
            "start_with": 100,
        }))
        .unwrap();
        assert_eq!(
            to_value(&sequence).unwrap(),
            json!({"schema": "public", "name": "s", "data_type": "SMALLINT", "start_with": 100})
        );
    }
}
