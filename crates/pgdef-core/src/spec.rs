//! # Object Specification Tables
//!
//! Each object kind describes its legal shape once, as a `static`
//! [`ObjectSpec`]: which field carries the raw definition, which fields
//! make up the structured form (with their declared defaults), which
//! fields identify the object, and the group rules that relate structured
//! fields to each other. The [`gate`](crate::gate) and
//! [`alias`](crate::alias) modules consume these tables; no object kind
//! re-implements the raw-versus-structured decision itself.
//!
//! Field names in a table are internal names. [`Alias`] entries map them
//! to the wire names used in input and output documents.

use serde_json::Value;

/// The value a field takes when it is not supplied.
///
/// A field whose value equals its declared default is not considered
/// meaningfully set. `null` always counts as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// No default: any non-null value is set.
    Absent,
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl FieldDefault {
    /// True when `value` is indistinguishable from the declared default.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Absent, _) => false,
            (Self::Bool(d), Value::Bool(b)) => d == b,
            (Self::Int(d), Value::Number(n)) => n.as_i64() == Some(*d),
            (Self::Str(d), Value::String(s)) => d == s,
            _ => false,
        }
    }
}

/// How a field participates in the dual-representation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Names the object (`schema`, `name`). Never counts as structured.
    Identity,
    /// The verbatim definition text.
    Raw,
    /// Part of the typed definition.
    Structured,
    /// Selects the active field partition. Counts as structured.
    Kind,
    /// Metadata legal in either mode: owner, comment, dependencies.
    Meta,
}

/// Where a nested specification applies within a field's value.
#[derive(Debug, Clone, Copy)]
pub enum Nested {
    /// The value is an object, or a list whose object items follow the spec.
    Object(&'static ObjectSpec),
    /// The value is a mapping whose values follow the spec.
    Values(&'static ObjectSpec),
}

impl Nested {
    /// The nested specification.
    pub fn spec(&self) -> &'static ObjectSpec {
        match self {
            Self::Object(spec) | Self::Values(spec) => spec,
        }
    }
}

/// One declared field of an object.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Internal field name.
    pub name: &'static str,
    pub role: FieldRole,
    pub default: FieldDefault,
    /// Must be present in every input document.
    pub required: bool,
    pub nested: Option<Nested>,
}

impl FieldSpec {
    const fn with_role(name: &'static str, role: FieldRole, required: bool) -> Self {
        Self {
            name,
            role,
            default: FieldDefault::Absent,
            required,
            nested: None,
        }
    }

    /// An identity field that must always be present.
    pub const fn identity(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Identity, true)
    }

    /// An identity field that may be omitted when the raw definition is used.
    pub const fn identity_unless_raw(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Identity, false)
    }

    /// The raw definition field.
    pub const fn raw(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Raw, false)
    }

    /// A structured field.
    pub const fn structured(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Structured, false)
    }

    /// The kind discriminant field.
    pub const fn kind(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Kind, false)
    }

    /// A metadata field.
    pub const fn meta(name: &'static str) -> Self {
        Self::with_role(name, FieldRole::Meta, false)
    }

    /// Mark the field as present in every input document.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare the field's default value.
    pub const fn default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    /// Attach a nested specification applied to object values.
    pub const fn nested(mut self, spec: &'static ObjectSpec) -> Self {
        self.nested = Some(Nested::Object(spec));
        self
    }

    /// Attach a nested specification applied to the values of a mapping.
    pub const fn nested_values(mut self, spec: &'static ObjectSpec) -> Self {
        self.nested = Some(Nested::Values(spec));
        self
    }

    /// True for fields that make up the structured form.
    pub fn is_structured(&self) -> bool {
        matches!(self.role, FieldRole::Structured | FieldRole::Kind)
    }

    /// True when `value` is meaningfully set for this field.
    pub fn is_set(&self, value: Option<&Value>) -> bool {
        value.is_some_and(|v| !self.default.matches(v))
    }
}

/// A rename between an internal field name and its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub internal: &'static str,
    pub external: &'static str,
}

impl Alias {
    pub const fn new(internal: &'static str, external: &'static str) -> Self {
        Self { internal, external }
    }
}

/// The fields legal for one value of a kind discriminant.
#[derive(Debug, Clone, Copy)]
pub struct KindPartition {
    /// Discriminant value, as it appears in the document.
    pub kind: &'static str,
    /// Fields legal only for this kind. Fields listed in no partition are
    /// legal for every kind.
    pub fields: &'static [&'static str],
    /// Fields this kind must set.
    pub required: &'static [&'static str],
}

/// A kind field and the partitions it selects between.
#[derive(Debug, Clone, Copy)]
pub struct Discriminant {
    pub field: &'static str,
    pub partitions: &'static [KindPartition],
}

impl Discriminant {
    /// The partition for `kind`, if declared.
    pub fn partition(&self, kind: &str) -> Option<&KindPartition> {
        self.partitions.iter().find(|p| p.kind == kind)
    }

    /// True when `field` belongs to at least one partition.
    pub fn is_partitioned(&self, field: &str) -> bool {
        self.partitions.iter().any(|p| p.fields.contains(&field))
    }
}

/// Declarative description of one object kind's legal shape.
#[derive(Debug, Clone, Copy)]
pub struct ObjectSpec {
    /// Object kind name used in error messages.
    pub object: &'static str,
    pub fields: &'static [FieldSpec],
    pub aliases: &'static [Alias],
    /// Structured fields that must be set in structured mode.
    pub required: &'static [&'static str],
    /// All-or-nothing groups.
    pub together: &'static [&'static [&'static str]],
    /// `(a, b)`: setting `a` requires `b`.
    pub requires: &'static [(&'static str, &'static str)],
    /// At most one field of each group may be set.
    pub exclusive: &'static [&'static [&'static str]],
    /// Each entry lists alternative definition sources; exactly one
    /// alternative must be populated.
    pub alternatives: &'static [&'static [&'static [&'static str]]],
    pub discriminant: Option<Discriminant>,
}

impl ObjectSpec {
    /// A spec with no fields or rules, used as a struct-update base.
    pub const EMPTY: ObjectSpec = ObjectSpec {
        object: "",
        fields: &[],
        aliases: &[],
        required: &[],
        together: &[],
        requires: &[],
        exclusive: &[],
        alternatives: &[],
        discriminant: None,
    };

    /// The raw definition field, if this kind has one.
    pub fn raw_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.role == FieldRole::Raw)
    }

    /// Look up a field by internal name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The wire name for an internal field name.
    pub fn external_name<'a>(&self, internal: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|a| a.internal == internal)
            .map_or(internal, |a| a.external)
    }

    /// The internal name for a wire field name, or `None` when the wire
    /// name is not declared.
    pub fn internal_name(&self, external: &str) -> Option<&'static str> {
        if let Some(alias) = self.aliases.iter().find(|a| a.external == external) {
            return Some(alias.internal);
        }
        // An internal name that has an alias is not accepted on the wire.
        if self.aliases.iter().any(|a| a.internal == external) {
            return None;
        }
        self.field(external).map(|f| f.name)
    }

    /// True when the kind carries a raw definition alternative.
    pub fn is_gated(&self) -> bool {
        self.raw_field().is_some()
    }

    /// Wire names of the structured fields, for messages.
    pub fn structured_names(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.is_structured())
            .map(|f| self.external_name(f.name))
            .collect()
    }
}

/// The `schema` wire name stored as `schema_name`.
pub const SCHEMA_ALIAS: &[Alias] = &[Alias::new("schema_name", "schema")];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SAMPLE: ObjectSpec = ObjectSpec {
        object: "sample",
        fields: &[
            FieldSpec::identity("schema_name"),
            FieldSpec::raw("sql"),
            FieldSpec::structured("strict").default(FieldDefault::Bool(false)),
            FieldSpec::structured("cache").default(FieldDefault::Int(1)),
            FieldSpec::meta("comment"),
        ],
        aliases: SCHEMA_ALIAS,
        ..ObjectSpec::EMPTY
    };

    #[test]
    fn default_matching_is_per_field() {
        assert!(FieldDefault::Bool(true).matches(&json!(true)));
        assert!(!FieldDefault::Bool(true).matches(&json!(false)));
        assert!(FieldDefault::Int(-1).matches(&json!(-1)));
        assert!(!FieldDefault::Int(-1).matches(&json!(0)));
        assert!(FieldDefault::Str("BIGINT").matches(&json!("BIGINT")));
        assert!(!FieldDefault::Str("BIGINT").matches(&json!("bigint")));
        assert!(FieldDefault::Absent.matches(&Value::Null));
        assert!(!FieldDefault::Absent.matches(&json!(false)));
        assert!(!FieldDefault::Bool(false).matches(&json!(0)));
    }

    #[test]
    fn is_set_ignores_defaults() {
        let strict = SAMPLE.field("strict").unwrap();
        assert!(!strict.is_set(None));
        assert!(!strict.is_set(Some(&json!(false))));
        assert!(strict.is_set(Some(&json!(true))));
    }

    #[test]
    fn alias_lookup() {
        assert_eq!(SAMPLE.external_name("schema_name"), "schema");
        assert_eq!(SAMPLE.external_name("comment"), "comment");
        assert_eq!(SAMPLE.internal_name("schema"), Some("schema_name"));
        assert_eq!(SAMPLE.internal_name("schema_name"), None);
        assert_eq!(SAMPLE.internal_name("cache"), Some("cache"));
        assert_eq!(SAMPLE.internal_name("bogus"), None);
    }

    #[test]
    fn raw_field_and_structured_names() {
        assert_eq!(SAMPLE.raw_field().map(|f| f.name), Some("sql"));
        assert!(SAMPLE.is_gated());
        assert_eq!(SAMPLE.structured_names(), vec!["strict", "cache"]);
        assert!(!ObjectSpec::EMPTY.is_gated());
    }
}
