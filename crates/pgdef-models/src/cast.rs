//! # Casts
//!
//! `CREATE CAST` between two types. A structured cast names its function
//! or declares `inout`, and may be marked `assignment` or `implicit`. The
//! three flags default to `false` and count as structured only when true.

use pgdef_core::{Context, FieldDefault, FieldSpec, Model, ObjectSpec, Validate, SCHEMA_ALIAS};
use serde::{Deserialize, Serialize};

use crate::common::is_false;
use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub source_type: String,
    pub target_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inout: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub assignment: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub implicit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static CAST_SPEC: ObjectSpec = ObjectSpec {
    object: "cast",
    fields: &[
        FieldSpec::meta("schema_name"),
        FieldSpec::meta("owner"),
        FieldSpec::identity("source_type"),
        FieldSpec::identity("target_type"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("function"),
        FieldSpec::structured("inout").default(FieldDefault::Bool(false)),
        FieldSpec::structured("assignment").default(FieldDefault::Bool(false)),
        FieldSpec::structured("implicit").default(FieldDefault::Bool(false)),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    exclusive: &[&["function", "inout"], &["assignment", "implicit"]],
    ..ObjectSpec::EMPTY
};

impl Validate for Cast {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Cast {
    fn spec() -> &'static ObjectSpec {
        &CAST_SPEC
    }
}

/// The casts defined in one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Casts {
    pub schema_name: String,
    pub casts: Vec<Cast>,
}

pub static CASTS_SPEC: ObjectSpec = ObjectSpec {
    object: "casts",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::structured("casts").required().nested(&CAST_SPEC),
    ],
    aliases: SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Casts {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("casts", &self.casts);
    }
}

impl Model for Casts {
    fn spec() -> &'static ObjectSpec {
        &CASTS_SPEC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{construct, to_value, ViolationKind};
    use serde_json::json;

    fn cast(extra: serde_json::Value) -> serde_json::Value {
        let mut value = json!({"source_type": "text", "target_type": "public.email"});
        if let (Some(target), Some(source)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }
        value
    }

    #[test]
    fn function_cast() {
        let cast: Cast = construct(cast(json!({
            "function": "public.to_email(text)",
            "implicit": true,
        })))
        .unwrap();
        assert!(cast.implicit);
        assert!(!cast.inout);
    }

    #[test]
    fn raw_cast_with_false_flags() {
        let cast: Cast = construct(cast(json!({
            "sql": "CREATE CAST (text AS public.email) WITH INOUT",
            "inout": false,
            "assignment": false,
        })))
        .unwrap();
        assert_eq!(
            to_value(&cast).unwrap(),
            json!({
                "source_type": "text",
                "target_type": "public.email",
                "sql": "CREATE CAST (text AS public.email) WITH INOUT",
            })
        );
    }

    #[test]
    fn raw_cast_with_true_flag_fails() {
        let err = construct::<Cast>(cast(json!({"sql": "CREATE CAST ...", "inout": true})))
            .unwrap_err();
        assert!(err.has_kind(ViolationKind::MutualExclusion));
    }

    #[test]
    fn conflicting_cast_flags() {
        let err = construct::<Cast>(cast(json!({
            "function": "public.to_email(text)",
            "inout": true,
            "assignment": true,
            "implicit": true,
        })))
        .unwrap_err();
        assert_eq!(err.violations().unwrap().len(), 2);
    }

    #[test]
    fn cast_needs_a_definition() {
        let err = construct::<Cast>(cast(json!({}))).unwrap_err();
        assert!(err.has_kind(ViolationKind::Completeness));
    }

    #[test]
    fn casts_container_validates_members() {
        let err = construct::<Casts>(json!({
            "schema": "public",
            "casts": [
                {"source_type": "text", "target_type": "int", "inout": true},
                {"source_type": "text", "target_type": "bool"},
            ],
        }))
        .unwrap_err();
        assert_eq!(err.violations().unwrap().violations()[0].path.to_string(), "casts[1]");
    }
}
