//! # Model Construction
//!
//! A [`Model`] is built from an untyped mapping in one atomic pass:
//!
//! 1. the input must be a mapping;
//! 2. wire names are renamed to internal names, unknown fields and
//!    missing required fields are collected ([`alias::normalize_input`]);
//! 3. serde converts the mapping into the typed model;
//! 4. field-level validators run ([`Validate`]);
//! 5. the dual-representation gate runs on the serialized form of the
//!    typed model, recursively through nested objects ([`gate::check_tree`]).
//!
//! Any violation from steps 2–5 fails the whole construction with one
//! aggregated [`ValidationError`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::alias;
use crate::document;
use crate::error::{ValidationError, ViolationKind, Violations};
use crate::gate;
use crate::path::FieldPath;
use crate::spec::ObjectSpec;
use crate::validate::{Context, Validate};

/// A validated definition object.
pub trait Model: Serialize + DeserializeOwned + Validate {
    /// The declarative shape of this object kind.
    fn spec() -> &'static ObjectSpec;
}

/// Construct a model from an untyped mapping keyed by wire names.
pub fn construct<T: Model>(input: Value) -> Result<T, ValidationError> {
    let spec = T::spec();
    let root = FieldPath::root();
    let mut violations = Violations::new();
    debug!(object = spec.object, "constructing definition");

    let map = match input {
        Value::Object(map) => map,
        other => {
            violations.add(
                root,
                ViolationKind::InvalidType,
                format!("expected a mapping, found {}", value_kind(&other)),
            );
            return Err(reject(spec, violations));
        }
    };

    let normalized = alias::normalize_input(spec, map, &root, &mut violations);
    if !violations.is_empty() {
        return Err(reject(spec, violations));
    }

    let model: T = match serde_json::from_value(Value::Object(normalized)) {
        Ok(model) => model,
        Err(err) => {
            violations.add(root, ViolationKind::InvalidType, err.to_string());
            return Err(reject(spec, violations));
        }
    };

    model.validate(&mut Context::new(&mut violations));

    match serde_json::to_value(&model) {
        Ok(Value::Object(internal)) => gate::check_tree(spec, &internal, &root, &mut violations),
        Ok(_) => {}
        Err(err) => {
            return Err(ValidationError::Serialization {
                object: spec.object,
                reason: err.to_string(),
            })
        }
    }

    if !violations.is_empty() {
        return Err(reject(spec, violations));
    }
    debug!(object = spec.object, "definition constructed");
    Ok(model)
}

fn reject(spec: &'static ObjectSpec, violations: Violations) -> ValidationError {
    debug!(
        object = spec.object,
        violations = violations.len(),
        "definition rejected"
    );
    ValidationError::Invalid {
        object: spec.object,
        violations,
    }
}

/// Parse JSON text and construct a model from it.
///
/// Repeated keys anywhere in the document are reported together with
/// every other violation.
pub fn from_json_str<T: Model>(text: &str) -> Result<T, ValidationError> {
    let (value, duplicates) =
        document::parse_json(text).map_err(|err| ValidationError::Malformed {
            object: T::spec().object,
            reason: err.to_string(),
        })?;
    construct_document(value, duplicates)
}

/// Construct a model from a parsed document, failing with `found`
/// prepended to the construction's own violations.
///
/// `found` holds problems the parser already detected, such as repeated
/// keys. When it is empty this is exactly [`construct`].
pub fn construct_document<T: Model>(
    value: Value,
    found: Violations,
) -> Result<T, ValidationError> {
    if found.is_empty() {
        return construct(value);
    }
    let spec = T::spec();
    let mut violations = found;
    match construct::<T>(value) {
        Ok(_) => {}
        Err(ValidationError::Invalid { violations: more, .. }) => {
            for violation in more.into_inner() {
                violations.push(violation);
            }
        }
        Err(other) => return Err(other),
    }
    Err(reject(spec, violations))
}

/// Serialize a model to its external form: unset fields omitted and
/// internal names renamed back to wire names.
pub fn to_value<T: Model>(model: &T) -> Result<Value, ValidationError> {
    let spec = T::spec();
    let internal = serde_json::to_value(model).map_err(|err| ValidationError::Serialization {
        object: spec.object,
        reason: err.to_string(),
    })?;
    Ok(alias::denormalize_output(spec, internal))
}

/// Re-run the full construction pipeline on an existing instance.
pub fn validate<T: Model>(model: &T) -> Result<(), ValidationError> {
    construct::<T>(to_value(model)?).map(|_| ())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
