//! Event triggers.

use pgdef_core::{Context, FieldSpec, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    DdlCommandStart,
    DdlCommandEnd,
    TableRewrite,
    SqlDrop,
}

/// Command tags the trigger fires for (`WHEN TAG IN (...)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    pub tags: Vec<String>,
}

pub static FILTER_SPEC: ObjectSpec = ObjectSpec {
    object: "event trigger filter",
    fields: &[FieldSpec::structured("tags").required()],
    ..ObjectSpec::EMPTY
};

impl Validate for Filter {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("tags", Some(self.tags.as_slice()));
        ctx.unique("tags", &self.tags);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventTrigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static EVENT_TRIGGER_SPEC: ObjectSpec = ObjectSpec {
    object: "event trigger",
    fields: &[
        FieldSpec::raw("sql"),
        FieldSpec::structured("name"),
        FieldSpec::structured("event"),
        FieldSpec::structured("filter").nested(&FILTER_SPEC),
        FieldSpec::structured("function"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    required: &["name", "event", "function"],
    ..ObjectSpec::EMPTY
};

impl Validate for EventTrigger {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("filter", &self.filter);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for EventTrigger {
    fn spec() -> &'static ObjectSpec {
        &EVENT_TRIGGER_SPEC
    }
}
