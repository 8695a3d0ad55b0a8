//! YAML and JSON parsing into the untyped value model that
//! [`pgdef_core::construct`] consumes.

use pgdef_core::document::key_path;
use pgdef_core::{construct, FieldPath, Model, ValidationError};
use serde_json::{Map, Value};
use thiserror::Error;

/// Document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.yaml` and `.yml` are YAML; anything else is read as JSON.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Why YAML text could not be turned into a JSON value.
#[derive(Error, Debug)]
pub enum YamlError {
    /// The text is not well-formed YAML.
    #[error("invalid YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// A number JSON cannot hold (NaN or an infinity).
    #[error("{path}: number {number} has no JSON equivalent")]
    Number { path: FieldPath, number: String },

    /// A sequence or mapping used as a mapping key.
    #[error("{path}: mapping key {key} is not a scalar")]
    Key { path: FieldPath, key: String },

    /// Two scalar keys that become the same string, such as `1` and `"1"`.
    #[error("{path}: key appears more than once in the same mapping")]
    DuplicateKey { path: FieldPath },
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// Tags are ignored. Scalar mapping keys are stringified; sequence and
/// mapping keys have no JSON equivalent and are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, YamlError> {
    convert(yaml, &FieldPath::root())
}

fn convert(yaml: &serde_yaml::Value, path: &FieldPath) -> Result<Value, YamlError> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => number(n).ok_or_else(|| YamlError::Number {
            path: path.clone(),
            number: n.to_string(),
        })?,
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| convert(item, &path.index(i)))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                let key = scalar_key(k).ok_or_else(|| YamlError::Key {
                    path: path.clone(),
                    key: format!("{k:?}"),
                })?;
                let at = key_path(path, &key);
                if map.contains_key(&key) {
                    return Err(YamlError::DuplicateKey { path: at });
                }
                let value = convert(v, &at)?;
                map.insert(key, value);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => convert(&tagged.value, path)?,
    })
}

fn number(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        Some(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Value::from(u))
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
    }
}

fn scalar_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        Yaml::Tagged(tagged) => scalar_key(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

/// Parse YAML text into a JSON value.
pub fn parse_yaml(text: &str) -> Result<Value, YamlError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    yaml_to_json_value(&yaml)
}

/// Parse YAML text and construct a model from it.
pub fn from_yaml_str<T: Model>(text: &str) -> Result<T, ValidationError> {
    let value = parse_yaml(text).map_err(|err| ValidationError::Malformed {
        object: T::spec().object,
        reason: err.to_string(),
    })?;
    construct(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(text: &str) -> Result<Value, YamlError> {
        match parse_yaml(text) {
            Err(YamlError::Syntax(err)) => panic!("test document is not YAML: {err}"),
            other => other,
        }
    }

    #[test]
    fn scalars_sequences_and_mappings() {
        let value = convert(
            "schema: public\nname: orders_id_seq\nincrement_by: 10\ncycle: true\ncomment: ~\nratio: 0.5\nlist: [a, b]\n",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "schema": "public",
                "name": "orders_id_seq",
                "increment_by": 10,
                "cycle": true,
                "comment": null,
                "ratio": 0.5,
                "list": ["a", "b"],
            })
        );
    }

    #[test]
    fn key_order_is_preserved() {
        let value = convert("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let value = convert("16384: [SELECT]\ntrue: yes\n").unwrap();
        assert_eq!(value, json!({"16384": ["SELECT"], "true": "yes"}));
    }

    #[test]
    fn tags_are_ignored() {
        let value = convert("name: !custom orders\n").unwrap();
        assert_eq!(value, json!({"name": "orders"}));
    }

    #[test]
    fn collection_keys_are_rejected() {
        let err = convert("grants:\n  ? [a, b]\n  : value\n").unwrap_err();
        assert!(matches!(&err, YamlError::Key { path, .. } if path.to_string() == "grants"));
    }

    #[test]
    fn keys_colliding_as_strings_are_rejected() {
        let err = convert("large_objects:\n  16384: [SELECT]\n  '16384': [UPDATE]\n").unwrap_err();
        assert!(err.to_string().starts_with(r#"large_objects["16384"]"#));
        assert!(matches!(err, YamlError::DuplicateKey { .. }));
    }

    #[test]
    fn repeated_literal_keys_are_syntax_errors() {
        let err = parse_yaml("sql: CREATE 1\nsql: CREATE 2\n").unwrap_err();
        assert!(matches!(err, YamlError::Syntax(_)));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = convert("cost: .nan\n").unwrap_err();
        assert!(matches!(&err, YamlError::Number { path, .. } if path.to_string() == "cost"));
    }

    #[test]
    fn extension_selects_format() {
        assert_eq!(Format::from_extension(Some("yaml")), Format::Yaml);
        assert_eq!(Format::from_extension(Some("yml")), Format::Yaml);
        assert_eq!(Format::from_extension(Some("json")), Format::Json);
        assert_eq!(Format::from_extension(None), Format::Json);
    }
}
