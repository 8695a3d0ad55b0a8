//! Tablespaces.

use std::collections::BTreeMap;

use pgdef_core::{Context, FieldSpec, Grammar, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tablespace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Directory on the database server.
    pub location: String,
    /// Planner cost overrides, one mapping per option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<BTreeMap<String, f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub static TABLESPACE_SPEC: ObjectSpec = ObjectSpec {
    object: "tablespace",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::meta("owner"),
        FieldSpec::structured("location").required(),
        FieldSpec::structured("options"),
        FieldSpec::meta("comment"),
    ],
    ..ObjectSpec::EMPTY
};

impl Validate for Tablespace {
    fn validate(&self, ctx: &mut Context<'_>) {
        let Some(options) = &self.options else {
            return;
        };
        let mut options_ctx = ctx.field("options");
        for (i, option) in options.iter().enumerate() {
            options_ctx.index(i).keys_here(Grammar::TablespaceOption, option);
        }
    }
}

impl Model for Tablespace {
    fn spec() -> &'static ObjectSpec {
        &TABLESPACE_SPEC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgdef_core::{construct, ViolationKind};
    use serde_json::json;

    #[test]
    fn planner_options() {
        let ok: Result<Tablespace, _> = construct(json!({
            "name": "fast",
            "location": "/mnt/nvme/pg",
            "options": [{"random_page_cost": 1.1}, {"effective_io_concurrency": 200}],
        }));
        assert!(ok.is_ok());

        let err = construct::<Tablespace>(json!({
            "name": "fast",
            "location": "/mnt/nvme/pg",
            "options": [{"seq_page_cost": 1.0}, {"work_mem": 64}],
        }))
        .unwrap_err();
        assert!(err.has_kind(ViolationKind::Grammar));
        assert_eq!(
            err.violations().unwrap().violations()[0].path.to_string(),
            r#"options[1]["work_mem"]"#
        );
    }

    #[test]
    fn location_is_required() {
        let err = construct::<Tablespace>(json!({"name": "fast"})).unwrap_err();
        assert!(err.has_kind(ViolationKind::MissingRequired));
    }
}
