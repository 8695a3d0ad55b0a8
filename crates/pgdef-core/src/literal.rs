//! Untyped scalar values for option maps, settings and defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar configuration value: boolean, integer, float or string.
///
/// Deserialization tries the variants in that order, so `1` is an
/// integer and `1.5` a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    /// Returns the string form when this is a text literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untagged_variant_order() {
        let values: Vec<Literal> =
            serde_json::from_value(json!([true, 8, 0.5, "on"])).unwrap();
        assert_eq!(
            values,
            vec![
                Literal::Bool(true),
                Literal::Integer(8),
                Literal::Float(0.5),
                Literal::Text("on".to_string()),
            ]
        );
    }

    #[test]
    fn serializes_as_bare_scalar() {
        assert_eq!(serde_json::to_value(Literal::from(4)).unwrap(), json!(4));
        assert_eq!(Literal::from("utf8").to_string(), "utf8");
        assert_eq!(Literal::from("utf8").as_str(), Some("utf8"));
        assert_eq!(Literal::from(false).as_str(), None);
    }
}
