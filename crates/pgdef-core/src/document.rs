//! # JSON Documents
//!
//! Parses JSON text into a [`Value`] while recording every mapping key
//! that appears more than once. `serde_json` on its own keeps the last
//! occurrence of a repeated key; here each repeat becomes a
//! [`Duplicate`](ViolationKind::Duplicate) violation at the key's path and
//! the first occurrence is kept.
//!
//! Keys that read as plain words (`sql`, `columns`) are rendered as field
//! segments of the path, anything else as a quoted key segment, so a
//! repeated ACL key shows up as `columns["public.users.email"]`.

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::{ViolationKind, Violations};
use crate::path::FieldPath;

/// Parse JSON text, returning the value and any repeated-key violations.
///
/// A syntax error is returned as is; repeated keys never stop the parse.
pub fn parse_json(text: &str) -> Result<(Value, Violations), serde_json::Error> {
    let mut duplicates = Violations::new();
    let mut de = serde_json::Deserializer::from_str(text);
    let value = Scan {
        path: FieldPath::root(),
        duplicates: &mut duplicates,
    }
    .deserialize(&mut de)?;
    de.end()?;
    Ok((value, duplicates))
}

/// The path of `key` inside the mapping at `path`.
pub fn key_path(path: &FieldPath, key: &str) -> FieldPath {
    let mut chars = key.chars();
    let word = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if word {
        path.field(key)
    } else {
        path.key(key)
    }
}

struct Scan<'a> {
    path: FieldPath,
    duplicates: &'a mut Violations,
}

impl<'de> DeserializeSeed<'de> for Scan<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Scan<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let Scan { path, duplicates } = self;
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(Scan {
            path: path.index(items.len()),
            duplicates: &mut *duplicates,
        })? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let Scan { path, duplicates } = self;
        let mut map = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            let at = key_path(&path, &key);
            let value = access.next_value_seed(Scan {
                path: at.clone(),
                duplicates: &mut *duplicates,
            })?;
            if map.contains_key(&key) {
                duplicates.add(
                    at,
                    ViolationKind::Duplicate,
                    format!("key {key:?} appears more than once in the same mapping"),
                );
            } else {
                map.insert(key, value);
            }
        }
        Ok(Value::Object(map))
    }
}
