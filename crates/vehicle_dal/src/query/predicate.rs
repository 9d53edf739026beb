//! Explicit "find matching" descriptors and their three-tier resolution.
//!
//! A [`Predicate`] is resolved, first match wins, into:
//! 1. an identity lookup (`ById`, or `ByField("Id", Int)`),
//! 2. a native single-table filter when every field is one of the entity's
//!    [`FieldShortcut`]s and the value kind fits the column,
//! 3. a full in-memory scan evaluating [`Predicate::matches`] on every row.
//!
//! # Invariants
//! - Tier 3 never fails for an unrecognized shape; it is only slower.
//! - Text equality is ASCII case-insensitive in every tier (SQLite `lower()`
//!   folds ASCII only), so native and scan results agree.

use crate::model::DomainModel;
use chrono::NaiveDate;
use std::fmt::{Debug, Formatter};

/// Comparable scalar taken from a domain model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    /// Equality as used by predicates: text ignores ASCII case, mismatched
    /// kinds never match.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left.eq_ignore_ascii_case(right),
            (Self::Date(left), Self::Date(right)) => left == right,
            _ => false,
        }
    }

    fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Int(_) => Some(FieldKind::Int),
            Self::Text(_) => Some(FieldKind::Text),
            Self::Date(_) => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// `field == value` for one named model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: String,
    pub value: FieldValue,
}

impl FieldMatch {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    fn matches<M: DomainModel>(&self, model: &M) -> bool {
        model
            .field(&normalize_field_name(&self.field))
            .is_some_and(|actual| actual.matches(&self.value))
    }
}

/// Caller condition for `find_first` / `exists`.
pub enum Predicate<M> {
    ById(i64),
    ByField(FieldMatch),
    /// Conjunction of field equalities.
    AllOf(Vec<FieldMatch>),
    /// Arbitrary condition; always resolved by a full scan.
    Custom(Box<dyn Fn(&M) -> bool>),
}

impl<M> Predicate<M> {
    pub fn by_id(id: i64) -> Self {
        Self::ById(id)
    }

    pub fn field_eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::ByField(FieldMatch::new(field, value))
    }

    pub fn all_of(matches: impl IntoIterator<Item = FieldMatch>) -> Self {
        Self::AllOf(matches.into_iter().collect())
    }

    pub fn custom(condition: impl Fn(&M) -> bool + 'static) -> Self {
        Self::Custom(Box::new(condition))
    }
}

impl<M: DomainModel> Predicate<M> {
    /// In-memory evaluation used by the scan tier.
    pub fn matches(&self, model: &M) -> bool {
        match self {
            Self::ById(id) => model.id() == *id,
            Self::ByField(field_match) => field_match.matches(model),
            Self::AllOf(matches) => matches.iter().all(|field_match| field_match.matches(model)),
            Self::Custom(condition) => condition(model),
        }
    }
}

impl<M> Debug for Predicate<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ById(id) => f.debug_tuple("ById").field(id).finish(),
            Self::ByField(field_match) => f.debug_tuple("ByField").field(field_match).finish(),
            Self::AllOf(matches) => f.debug_tuple("AllOf").field(matches).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Text,
}

/// A model field that can be answered with a native column filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShortcut {
    /// Normalized field name, see [`normalize_field_name`].
    pub field: &'static str,
    /// Qualified SQL column, e.g. `makes.name`.
    pub column: &'static str,
    pub kind: FieldKind,
}

/// One native `column = value` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCondition<'p> {
    pub column: &'static str,
    pub kind: FieldKind,
    pub value: &'p FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'p> {
    Identity(i64),
    Native(Vec<NativeCondition<'p>>),
    Scan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    Identity,
    NativeField,
    FullScan,
}

impl ResolutionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::NativeField => "native_field",
            Self::FullScan => "full_scan",
        }
    }
}

impl Resolution<'_> {
    pub fn tier(&self) -> ResolutionTier {
        match self {
            Self::Identity(_) => ResolutionTier::Identity,
            Self::Native(_) => ResolutionTier::NativeField,
            Self::Scan => ResolutionTier::FullScan,
        }
    }
}

/// Picks the cheapest tier able to answer `predicate`.
pub fn resolve<'p, M>(predicate: &'p Predicate<M>, shortcuts: &[FieldShortcut]) -> Resolution<'p> {
    match predicate {
        Predicate::ById(id) => Resolution::Identity(*id),
        Predicate::ByField(field_match) => {
            resolve_matches(std::slice::from_ref(field_match), shortcuts)
        }
        Predicate::AllOf(matches) => resolve_matches(matches, shortcuts),
        Predicate::Custom(_) => Resolution::Scan,
    }
}

fn resolve_matches<'p>(matches: &'p [FieldMatch], shortcuts: &[FieldShortcut]) -> Resolution<'p> {
    if let [single] = matches {
        if let FieldValue::Int(id) = single.value {
            if normalize_field_name(&single.field) == "id" {
                return Resolution::Identity(id);
            }
        }
    }

    let mut conditions = Vec::with_capacity(matches.len());
    for field_match in matches {
        let name = normalize_field_name(&field_match.field);
        let Some(shortcut) = shortcuts.iter().find(|shortcut| shortcut.field == name) else {
            return Resolution::Scan;
        };
        if field_match.value.kind() != Some(shortcut.kind) {
            return Resolution::Scan;
        }
        conditions.push(NativeCondition {
            column: shortcut.column,
            kind: shortcut.kind,
            value: &field_match.value,
        });
    }
    Resolution::Native(conditions)
}

/// Lowercases and drops `_`, `-` and spaces: `first_name`, `FirstName` and
/// `firstName` all become `firstname`.
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|ch| !matches!(ch, '_' | '-' | ' '))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
