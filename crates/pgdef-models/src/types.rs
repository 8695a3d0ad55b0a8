//! # User-Defined Types
//!
//! `CREATE TYPE` in its four structured forms, selected by the `type`
//! discriminant:
//!
//! | Form | Required | Legal only for this form |
//! |------|----------|--------------------------|
//! | `base` | `input`, `output` | the I/O functions and physical layout fields |
//! | `composite` | `columns` | `columns` |
//! | `enum` | `enum` | `enum` |
//! | `range` | `subtype` | `subtype`, `subtype_opclass`, `collation`, `canonical`, `subtype_diff` |
//!
//! The wire names `type` and `enum` are stored as `form` and `enum_values`.

use pgdef_core::{
    Alias, Context, Discriminant, FieldSpec, KindPartition, Literal, Model, ObjectSpec,
    Validate, ViolationKind,
};
use serde::{Deserialize, Serialize};

use crate::dependencies::{Dependencies, DEPENDENCIES_SPEC};

/// Maximum byte length of an enum label (`NAMEDATALEN - 1`).
pub const MAX_ENUM_LABEL_BYTES: usize = 64;

/// The structured form of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeForm {
    #[serde(alias = "BASE")]
    Base,
    #[serde(alias = "COMPOSITE")]
    Composite,
    #[serde(alias = "ENUM")]
    Enum,
    #[serde(alias = "RANGE")]
    Range,
}

/// Storage alignment of a base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Char,
    Double,
    Int2,
    Int4,
}

/// TOAST storage strategy of a base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    Plain,
    Extended,
    External,
    Main,
}

/// `pg_type.typcategory` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
    D,
    E,
    G,
    I,
    N,
    P,
    R,
    S,
    T,
    U,
    V,
    X,
}

/// `INTERNALLENGTH`: a byte count or `VARIABLE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InternalLength {
    Fixed(i64),
    Variable(String),
}

/// An attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeColumn {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
}

pub static TYPE_COLUMN_SPEC: ObjectSpec = ObjectSpec {
    object: "type column",
    fields: &[
        FieldSpec::identity("name"),
        FieldSpec::structured("data_type").required(),
        FieldSpec::structured("collation"),
    ],
    ..ObjectSpec::EMPTY
};

/// A user-defined type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Type {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<TypeForm>,

    // base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typmod_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typmod_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyze: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_length: Option<InternalLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_by_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collatable: Option<bool>,

    // composite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<TypeColumn>>,

    // enum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    // range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_opclass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_diff: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
}

const BASE_FIELDS: &[&str] = &[
    "input",
    "output",
    "receive",
    "send",
    "typmod_in",
    "typmod_out",
    "analyze",
    "internal_length",
    "passed_by_value",
    "alignment",
    "storage",
    "like_type",
    "category",
    "preferred",
    "default",
    "element",
    "delimiter",
    "collatable",
];

const RANGE_FIELDS: &[&str] = &[
    "subtype",
    "subtype_opclass",
    "collation",
    "canonical",
    "subtype_diff",
];

pub static TYPE_SPEC: ObjectSpec = ObjectSpec {
    object: "type",
    fields: &[
        FieldSpec::identity_unless_raw("name"),
        FieldSpec::identity_unless_raw("schema_name"),
        FieldSpec::meta("owner"),
        FieldSpec::raw("sql"),
        FieldSpec::kind("form"),
        FieldSpec::structured("input"),
        FieldSpec::structured("output"),
        FieldSpec::structured("receive"),
        FieldSpec::structured("send"),
        FieldSpec::structured("typmod_in"),
        FieldSpec::structured("typmod_out"),
        FieldSpec::structured("analyze"),
        FieldSpec::structured("internal_length"),
        FieldSpec::structured("passed_by_value"),
        FieldSpec::structured("alignment"),
        FieldSpec::structured("storage"),
        FieldSpec::structured("like_type"),
        FieldSpec::structured("category"),
        FieldSpec::structured("preferred"),
        FieldSpec::structured("default"),
        FieldSpec::structured("element"),
        FieldSpec::structured("delimiter"),
        FieldSpec::structured("collatable"),
        FieldSpec::structured("columns").nested(&TYPE_COLUMN_SPEC),
        FieldSpec::structured("enum_values"),
        FieldSpec::structured("subtype"),
        FieldSpec::structured("subtype_opclass"),
        FieldSpec::structured("collation"),
        FieldSpec::structured("canonical"),
        FieldSpec::structured("subtype_diff"),
        FieldSpec::meta("comment"),
        FieldSpec::meta("dependencies").nested(&DEPENDENCIES_SPEC),
    ],
    aliases: &[
        Alias::new("schema_name", "schema"),
        Alias::new("form", "type"),
        Alias::new("enum_values", "enum"),
    ],
    together: &[&["input", "output"]],
    discriminant: Some(Discriminant {
        field: "form",
        partitions: &[
            KindPartition {
                kind: "base",
                fields: BASE_FIELDS,
                required: &["input", "output"],
            },
            KindPartition {
                kind: "composite",
                fields: &["columns"],
                required: &["columns"],
            },
            KindPartition {
                kind: "enum",
                fields: &["enum_values"],
                required: &["enum_values"],
            },
            KindPartition {
                kind: "range",
                fields: RANGE_FIELDS,
                required: &["subtype"],
            },
        ],
    }),
    ..ObjectSpec::EMPTY
};

impl Validate for Type {
    fn validate(&self, ctx: &mut Context<'_>) {
        if let Some(InternalLength::Variable(text)) = &self.internal_length {
            if text != "VARIABLE" {
                ctx.report(
                    "internal_length",
                    ViolationKind::Constraint,
                    format!("internal_length must be an integer or \"VARIABLE\", found {text:?}"),
                );
            }
        }
        ctx.non_empty("columns", self.columns.as_deref());
        ctx.non_empty("enum", self.enum_values.as_deref());
        ctx.max_bytes("enum", &self.enum_values, MAX_ENUM_LABEL_BYTES);
        ctx.unique("enum", &self.enum_values);
        ctx.nested("dependencies", &self.dependencies);
    }
}

impl Model for Type {
    fn spec() -> &'static ObjectSpec {
        &TYPE_SPEC
    }
}

/// Every user-defined type in one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Types {
    pub schema_name: String,
    pub types: Vec<Type>,
}

pub static TYPES_SPEC: ObjectSpec = ObjectSpec {
    object: "types",
    fields: &[
        FieldSpec::identity("schema_name"),
        FieldSpec::structured("types").required().nested(&TYPE_SPEC),
    ],
    aliases: pgdef_core::SCHEMA_ALIAS,
    ..ObjectSpec::EMPTY
};

impl Validate for Types {
    fn validate(&self, ctx: &mut Context<'_>) {
        ctx.nested("types", &self.types);
    }
}

impl Model for Types {
    fn spec() -> &'static ObjectSpec {
        &TYPES_SPEC
    }
}
