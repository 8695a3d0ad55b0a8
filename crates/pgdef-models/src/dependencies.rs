//! Declared dependencies on other database objects.
//!
//! References are validated by grammar only; no graph is built over them.

use pgdef_core::{Context, FieldSpec, Grammar, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

/// Objects a definition depends upon, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependencies {
    /// `schema.domain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_data_wrappers: Option<Vec<String>>,
    /// `schema.function(args)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// `schema.sequence`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequences: Option<Vec<String>>,
    /// `schema.table`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    /// `schema.type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// `schema.view`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<Vec<String>>,
}

pub static DEPENDENCIES_SPEC: ObjectSpec = ObjectSpec {
    object: "dependencies",
    fields: &[
        FieldSpec::meta("domains"),
        FieldSpec::meta("extensions"),
        FieldSpec::meta("foreign_data_wrappers"),
        FieldSpec::meta("functions"),
        FieldSpec::meta("languages"),
        FieldSpec::meta("sequences"),
        FieldSpec::meta("tables"),
        FieldSpec::meta("types"),
        FieldSpec::meta("views"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Dependencies {
    fn validate(&self, ctx: &mut Context<'_>) {
        let schema_objects = [
            ("domains", &self.domains),
            ("sequences", &self.sequences),
            ("tables", &self.tables),
            ("types", &self.types),
            ("views", &self.views),
        ];
        for (field, list) in schema_objects {
            ctx.grammar_each(field, Grammar::SchemaObject, list);
        }
        ctx.grammar_each("functions", Grammar::SchemaFunction, &self.functions);

        for (field, list) in [
            ("domains", &self.domains),
            ("extensions", &self.extensions),
            ("foreign_data_wrappers", &self.foreign_data_wrappers),
            ("functions", &self.functions),
            ("languages", &self.languages),
            ("sequences", &self.sequences),
            ("tables", &self.tables),
            ("types", &self.types),
            ("views", &self.views),
        ] {
            ctx.unique(field, list);
        }
    }
}

impl Model for Dependencies {
    fn spec() -> &'static ObjectSpec {
        &DEPENDENCIES_SPEC
    }
}
