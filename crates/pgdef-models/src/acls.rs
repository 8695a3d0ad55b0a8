//! # Access Control Lists
//!
//! Privileges granted to or revoked from a role, group or user, keyed by
//! the object they apply to. Keys are namespaced identifiers validated by
//! grammar: `schema.object` for relations and types, `schema.object.column`
//! for columns, `schema.function(args)` for functions and numeric OIDs for
//! large objects. Database, language, server, wrapper, schema and
//! tablespace keys are plain names.

use std::collections::BTreeMap;

use pgdef_core::{Context, FieldSpec, Grammar, Model, ObjectSpec, Validate};
use serde::{Deserialize, Serialize};

macro_rules! privilege {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            $($variant),+
        }
    };
}

privilege!(
    /// Column-level privileges.
    ColumnPrivilege { Select, Insert, Update, Delete, All }
);
privilege!(
    /// Database-level privileges.
    DatabasePrivilege { Create, Connect, Temp, Temporary, All }
);
privilege!(
    /// `USAGE` for domains, wrappers, servers, languages and types.
    UsagePrivilege { Usage, All }
);
privilege!(
    /// `EXECUTE` for functions.
    ExecutePrivilege { Execute, All }
);
privilege!(
    /// Large object privileges.
    LargeObjectPrivilege { Select, Update, All }
);
privilege!(
    /// Schema and tablespace privileges.
    SchemaPrivilege { Create, Usage, All }
);
privilege!(
    /// Sequence privileges.
    SequencePrivilege { Select, Update, Usage, All }
);
privilege!(
    /// Table privileges.
    TablePrivilege { Select, Insert, Update, Delete, All }
);
privilege!(
    /// View privileges.
    ViewPrivilege { Select, All }
);

type Grants<P> = Option<BTreeMap<String, Vec<P>>>;

/// Privileges keyed by the object they apply to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Acls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Grants<ColumnPrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub databases: Grants<DatabasePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Grants<UsagePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_data_wrappers: Grants<UsagePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_servers: Grants<UsagePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Grants<ExecutePrivilege>,
    /// Groups granted membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Grants<UsagePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_objects: Grants<LargeObjectPrivilege>,
    /// Roles granted membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemata: Grants<SchemaPrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequences: Grants<SequencePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Grants<TablePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespaces: Grants<SchemaPrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Grants<UsagePrivilege>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Grants<ViewPrivilege>,
}

pub static ACLS_SPEC: ObjectSpec = ObjectSpec {
    object: "acls",
    fields: &[
        FieldSpec::structured("columns"),
        FieldSpec::structured("databases"),
        FieldSpec::structured("domains"),
        FieldSpec::structured("foreign_data_wrappers"),
        FieldSpec::structured("foreign_servers"),
        FieldSpec::structured("functions"),
        FieldSpec::structured("groups"),
        FieldSpec::structured("languages"),
        FieldSpec::structured("large_objects"),
        FieldSpec::structured("roles"),
        FieldSpec::structured("schemata"),
        FieldSpec::structured("sequences"),
        FieldSpec::structured("tables"),
        FieldSpec::structured("tablespaces"),
        FieldSpec::structured("types"),
        FieldSpec::structured("views"),
    ],
    ..ObjectSpec::EMPTY
};

// Each privilege list behaves as a set.
fn unique_privileges<P>(ctx: &mut Context<'_>, field: &str, grants: &Grants<P>)
where
    P: PartialEq + std::fmt::Debug,
{
    let Some(grants) = grants else {
        return;
    };
    let mut ctx = ctx.field(field);
    for (key, privileges) in grants {
        ctx.key(key).unique_here(privileges);
    }
}

impl Validate for Acls {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.grammar_keys("columns", Grammar::SchemaObjectColumn, &self.columns);
        ctx.grammar_keys("domains", Grammar::SchemaObject, &self.domains);
        ctx.grammar_keys("sequences", Grammar::SchemaObject, &self.sequences);
        ctx.grammar_keys("tables", Grammar::SchemaObject, &self.tables);
        ctx.grammar_keys("types", Grammar::SchemaObject, &self.types);
        ctx.grammar_keys("views", Grammar::SchemaObject, &self.views);
        ctx.grammar_keys("functions", Grammar::SchemaFunction, &self.functions);
        ctx.grammar_keys("large_objects", Grammar::NumericId, &self.large_objects);
        ctx.unique("groups", &self.groups);
        ctx.unique("roles", &self.roles);

        unique_privileges(ctx, "columns", &self.columns);
        unique_privileges(ctx, "databases", &self.databases);
        unique_privileges(ctx, "domains", &self.domains);
        unique_privileges(ctx, "foreign_data_wrappers", &self.foreign_data_wrappers);
        unique_privileges(ctx, "foreign_servers", &self.foreign_servers);
        unique_privileges(ctx, "functions", &self.functions);
        unique_privileges(ctx, "languages", &self.languages);
        unique_privileges(ctx, "large_objects", &self.large_objects);
        unique_privileges(ctx, "schemata", &self.schemata);
        unique_privileges(ctx, "sequences", &self.sequences);
        unique_privileges(ctx, "tables", &self.tables);
        unique_privileges(ctx, "tablespaces", &self.tablespaces);
        unique_privileges(ctx, "types", &self.types);
        unique_privileges(ctx, "views", &self.views);
    }
}

impl Model for Acls {
    fn spec() -> &'static ObjectSpec {
        &ACLS_SPEC
    }
}
