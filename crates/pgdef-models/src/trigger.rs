//! Triggers.

use pgdef_core::{Context, FieldSpec, Literal, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerWhen {
    #[serde(rename = "BEFORE")]
    Before,
    #[serde(rename = "AFTER")]
    After,
    #[serde(rename = "INSTEAD OF")]
    InsteadOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
    Truncate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriggerForEach {
    Row,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<TriggerWhen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<TriggerEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_each: Option<TriggerForEach>,
    /// `WHEN (...)` condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Literal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

pub static TRIGGER_SPEC: ObjectSpec = ObjectSpec {
    object: "trigger",
    fields: &[
        FieldSpec::structured("name"),
        FieldSpec::raw("sql"),
        FieldSpec::structured("when"),
        FieldSpec::structured("events"),
        FieldSpec::structured("for_each"),
        FieldSpec::structured("condition"),
        FieldSpec::structured("function"),
        FieldSpec::structured("arguments"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    required: &["name", "when", "events", "function"],
    ..ObjectSpec::EMPTY
};

impl Validate for Trigger {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.non_empty("events", self.events.as_deref());
        ctx.unique("events", &self.events);
        ctx.nested("dependencies", &self.dependencies);
    }
}
