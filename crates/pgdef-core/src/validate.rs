//! # Field-Level Validation
//!
//! Field validators run before the [`gate`](crate::gate), each checking
//! one field independently of the others: identifier grammars on values
//! and mapping keys, uniqueness of set-like lists, non-empty lists, byte
//! length limits, and recursion into nested models.
//!
//! A [`Context`] tracks the current [`FieldPath`] and collects violations;
//! validators never stop at the first problem.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{Violation, ViolationKind, Violations};
use crate::grammar::Grammar;
use crate::path::FieldPath;
use crate::unique::first_duplicate;

/// Field-level checks for a model or nested value.
pub trait Validate {
    fn validate(&self, ctx: &mut Context<'_>);
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, ctx: &mut Context<'_>) {
        if let Some(value) = self {
            value.validate(ctx);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, ctx: &mut Context<'_>) {
        for (i, item) in self.iter().enumerate() {
            item.validate(&mut ctx.index(i));
        }
    }
}

impl<T: Validate> Validate for BTreeMap<String, T> {
    fn validate(&self, ctx: &mut Context<'_>) {
        for (key, value) in self {
            value.validate(&mut ctx.key(key));
        }
    }
}

impl<T: Validate> Validate for Box<T> {
    fn validate(&self, ctx: &mut Context<'_>) {
        (**self).validate(ctx);
    }
}

/// A list-valued field, optional or not.
pub trait ListField {
    type Item;
    fn items(&self) -> &[Self::Item];
}

impl<T> ListField for [T] {
    type Item = T;
    fn items(&self) -> &[T] {
        self
    }
}

impl<T> ListField for Vec<T> {
    type Item = T;
    fn items(&self) -> &[T] {
        self
    }
}

impl<T> ListField for Option<Vec<T>> {
    type Item = T;
    fn items(&self) -> &[T] {
        self.as_deref().unwrap_or_default()
    }
}

/// A string-valued field, optional or not.
pub trait TextField {
    fn text(&self) -> Option<&str>;
}

impl TextField for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextField for Option<String> {
    fn text(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// A mapping-valued field keyed by strings, optional or not.
pub trait MapField {
    type Value;
    fn entries(&self) -> Option<&BTreeMap<String, Self::Value>>;
}

impl<V> MapField for BTreeMap<String, V> {
    type Value = V;
    fn entries(&self) -> Option<&BTreeMap<String, V>> {
        Some(self)
    }
}

impl<V> MapField for Option<BTreeMap<String, V>> {
    type Value = V;
    fn entries(&self) -> Option<&BTreeMap<String, V>> {
        self.as_ref()
    }
}

/// Path-tracking violation collector.
pub struct Context<'a> {
    path: FieldPath,
    violations: &'a mut Violations,
}

impl<'a> Context<'a> {
    /// A context rooted at the object being constructed.
    pub fn new(violations: &'a mut Violations) -> Self {
        Self::at(FieldPath::root(), violations)
    }

    /// A context rooted at `path`.
    pub fn at(path: FieldPath, violations: &'a mut Violations) -> Self {
        Self { path, violations }
    }

    /// The current location.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// A child context for a named field.
    pub fn field(&mut self, name: &str) -> Context<'_> {
        Context {
            path: self.path.field(name),
            violations: &mut *self.violations,
        }
    }

    /// A child context for a list position.
    pub fn index(&mut self, index: usize) -> Context<'_> {
        Context {
            path: self.path.index(index),
            violations: &mut *self.violations,
        }
    }

    /// A child context for a mapping key.
    pub fn key(&mut self, key: &str) -> Context<'_> {
        Context {
            path: self.path.key(key),
            violations: &mut *self.violations,
        }
    }

    /// Record a violation at the current location.
    pub fn report_here(&mut self, kind: ViolationKind, message: impl Into<String>) {
        self.violations.add(self.path.clone(), kind, message);
    }

    /// Record a violation on a named field.
    pub fn report(&mut self, field: &str, kind: ViolationKind, message: impl Into<String>) {
        self.violations.add(self.path.field(field), kind, message);
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check a string field against `grammar`.
    pub fn grammar(&mut self, field: &str, grammar: Grammar, value: &impl TextField) {
        if let Some(text) = value.text() {
            if let Err(violation) = grammar.check(&self.path.field(field), text) {
                self.push(violation);
            }
        }
    }

    /// Check every element of a string list against `grammar`.
    pub fn grammar_each<L>(&mut self, field: &str, grammar: Grammar, list: &L)
    where
        L: ListField + ?Sized,
        L::Item: AsRef<str>,
    {
        let path = self.path.field(field);
        for (i, item) in list.items().iter().enumerate() {
            if let Err(violation) = grammar.check(&path.index(i), item.as_ref()) {
                self.push(violation);
            }
        }
    }

    /// Check every key of a mapping field against `grammar`.
    pub fn grammar_keys<M>(&mut self, field: &str, grammar: Grammar, map: &M)
    where
        M: MapField + ?Sized,
    {
        self.field(field).keys_here(grammar, map);
    }

    /// Check every key of a mapping at the current location.
    pub fn keys_here<M>(&mut self, grammar: Grammar, map: &M)
    where
        M: MapField + ?Sized,
    {
        let Some(entries) = map.entries() else {
            return;
        };
        for key in entries.keys() {
            if !grammar.matches(key) {
                let path = self.path.key(key);
                self.push(Violation::new(
                    path,
                    ViolationKind::Grammar,
                    format!("key {key:?} must match {}", grammar.expected()),
                ));
            }
        }
    }

    /// Reject repeated elements in a set-like list.
    pub fn unique<L>(&mut self, field: &str, list: &L)
    where
        L: ListField + ?Sized,
        L::Item: PartialEq + Debug,
    {
        self.field(field).unique_here(list);
    }

    /// Reject repeated elements in a set-like list at the current location.
    pub fn unique_here<L>(&mut self, list: &L)
    where
        L: ListField + ?Sized,
        L::Item: PartialEq + Debug,
    {
        let items = list.items();
        if let Some((first, repeat)) = first_duplicate(items) {
            let label = self.path.to_string();
            let path = self.path.index(repeat);
            self.push(Violation::new(
                path,
                ViolationKind::Duplicate,
                format!(
                    "`{label}` must be unique: {:?} repeats the entry at index {first}",
                    items[repeat]
                ),
            ));
        }
    }

    /// Reject an empty list. An absent optional list is not checked.
    pub fn non_empty<T>(&mut self, field: &str, list: Option<&[T]>) {
        if list.is_some_and(<[T]>::is_empty) {
            self.report(
                field,
                ViolationKind::Constraint,
                format!("`{field}` must contain at least one entry"),
            );
        }
    }

    /// Reject list elements longer than `max` bytes.
    pub fn max_bytes<L>(&mut self, field: &str, list: &L, max: usize)
    where
        L: ListField + ?Sized,
        L::Item: AsRef<str>,
    {
        let path = self.path.field(field);
        for (i, item) in list.items().iter().enumerate() {
            let text = item.as_ref();
            if text.len() > max {
                self.push(Violation::new(
                    path.index(i),
                    ViolationKind::Constraint,
                    format!("{text:?} exceeds the maximum length of {max} bytes"),
                ));
            }
        }
    }

    /// Run the field-level checks of a nested value under `field`.
    pub fn nested<T: Validate + ?Sized>(&mut self, field: &str, value: &T) {
        value.validate(&mut self.field(field));
    }
}
