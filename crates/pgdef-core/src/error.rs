//! # Error Types — Aggregated Validation Failures
//!
//! Construction of a definition either fully succeeds or fails with a
//! single [`ValidationError`] carrying every violation found. Each
//! [`Violation`] names the offending field (as a [`FieldPath`]), the
//! category of the failure, and a human-readable message.
//!
//! ## Design
//!
//! - Violations are collected, never thrown one at a time, so a user
//!   fixing a definition sees all of its problems in one pass.
//! - Messages name the rejected value and what was expected instead of
//!   a generic "invalid input".

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

/// Category of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An identity or always-required field is absent.
    MissingRequired,
    /// An identifier or key does not match its grammar.
    Grammar,
    /// Raw and structured representations were combined, or a field was
    /// supplied that is illegal for the active kind or sibling choice.
    MutualExclusion,
    /// Neither representation was supplied, or structured mode is active
    /// but a required field subset is incomplete.
    Completeness,
    /// A collection marked unique repeats an element.
    Duplicate,
    /// A field that the object does not declare.
    UnknownField,
    /// A value of the wrong shape (string instead of list, unknown enum
    /// variant, malformed document).
    InvalidType,
    /// A value outside its allowed range: length limits, empty lists,
    /// reserved prefixes.
    Constraint,
}

impl ViolationKind {
    /// Returns the stable snake_case label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::Grammar => "grammar",
            Self::MutualExclusion => "mutual_exclusion",
            Self::Completeness => "completeness",
            Self::Duplicate => "duplicate",
            Self::UnknownField => "unknown_field",
            Self::InvalidType => "invalid_type",
            Self::Constraint => "constraint",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the offending value.
    pub path: FieldPath,
    /// Category of the failure.
    pub kind: ViolationKind,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {} [{}]", self.path, self.message, self.kind)
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Record a violation built from its parts.
    pub fn add(&mut self, path: FieldPath, kind: ViolationKind, message: impl Into<String>) {
        self.push(Violation::new(path, kind, message));
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violations in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// True if any violation has the given kind.
    pub fn contains_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// Convert into a result: `Ok(())` when empty, otherwise an
    /// aggregated [`ValidationError::Invalid`] for `object`.
    pub fn into_result(self, object: &'static str) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid {
                object,
                violations: self,
            })
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Failure to construct or serialize a definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input did not describe a valid object.
    #[error("invalid {object} definition:\n{violations}")]
    Invalid {
        /// Name of the object kind being constructed.
        object: &'static str,
        /// Every violation found, in discovery order.
        violations: Violations,
    },

    /// The input text could not be parsed at all.
    #[error("malformed {object} document: {reason}")]
    Malformed {
        /// Name of the object kind being constructed.
        object: &'static str,
        /// Parser error text.
        reason: String,
    },

    /// A validated instance could not be converted to its external form.
    #[error("failed to serialize {object}: {reason}")]
    Serialization {
        /// Name of the object kind being serialized.
        object: &'static str,
        /// Serializer error text.
        reason: String,
    },
}

impl ValidationError {
    /// The object kind the error refers to.
    pub fn object(&self) -> &'static str {
        match self {
            Self::Invalid { object, .. }
            | Self::Malformed { object, .. }
            | Self::Serialization { object, .. } => object,
        }
    }

    /// The aggregated violations, if this is an [`Invalid`](Self::Invalid) error.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid { violations, .. } => Some(violations),
            _ => None,
        }
    }

    /// True if any violation has the given kind.
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations().is_some_and(|v| v.contains_kind(kind))
    }
}
