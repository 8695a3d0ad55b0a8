//! Logical replication publications.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishOperation {
    Insert,
    Update,
    Delete,
    Truncate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationParameters {
    pub publish: Vec<PublishOperation>,
}

pub static PUBLICATION_PARAMETERS_SPEC: ObjectSpec = ObjectSpec {
    object: "publication parameters",
    fields: &[FieldSpec::structured("publish").required()],
    ..ObjectSpec::EMPTY
};

/// A publication of listed tables or of every table (`FOR ALL TABLES`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    pub name: String,
    /// `schema.table`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_tables: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<PublicationParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static PUBLICATION_SPEC: ObjectSpec = ObjectSpec {
    object: "publication",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("tables"),
        FieldSpec::structured("all_tables"),
        FieldSpec::structured("parameters").nested(&PUBLICATION_PARAMETERS_SPEC),
        FieldSpec::meta("comment"),
    ],
    alternatives: &[&[&["tables"], &["all_tables"]]],
    ..ObjectSpec::EMPTY
};

impl Validate for Publication {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("tables", self.tables.as_deref());
        ctx.unique("tables", &self.tables);
        if let Some(parameters) = &self.parameters {
            ctx.field("parameters").unique("publish", &parameters.publish);
        }
    }
}

impl Model for Publication {
    fn spec() -> &'static ObjectSpec {
        &PUBLICATION_SPEC
    }
}
