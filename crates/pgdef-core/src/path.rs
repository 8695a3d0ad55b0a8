//! # Field Paths
//!
//! Locates a violation inside a nested definition. Paths are built from
//! wire (external) field names so that messages point at what the user
//! actually wrote, e.g. `columns[2].generated` or
//! `grants.columns["public.users.email"]`.

use std::fmt;

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named field of a mapping.
    Field(String),
    /// A position in a list.
    Index(usize),
    /// A key of a user-keyed mapping (ACL keys, option names).
    Key(String),
}

/// Location of a value relative to the root of the object being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The empty path, pointing at the object itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a child path for a named field.
    pub fn field(&self, name: &str) -> Self {
        self.child(Segment::Field(name.to_string()))
    }

    /// Returns a child path for a list position.
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Returns a child path for a mapping key.
    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    /// True when the path has no segments.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments in order from the root.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The last named field on the path, if any.
    pub fn last_field(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|s| match s {
            Segment::Field(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}
