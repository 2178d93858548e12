//! Native constraint reconciliation
//!
//! Host platforms that run their own constraint checks report the outcome as a
//! set of boolean flags. This module turns that snapshot into an ordered list
//! of [`NativeConstraint`]s, each tied to the library rule it overlaps with so
//! the evaluator can report one failure per constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// NATIVE CONSTRAINT
// ============================================================================

/// One native constraint violation, named by its host key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NativeConstraint {
    PatternMismatch,
    RangeOverflow,
    RangeUnderflow,
    StepMismatch,
    TooLong,
    TooShort,
    TypeMismatch,
    ValueMissing,
}

impl NativeConstraint {
    /// Every constraint, in host enumeration order.
    pub const ALL: [Self; 8] = [
        Self::PatternMismatch,
        Self::RangeOverflow,
        Self::RangeUnderflow,
        Self::StepMismatch,
        Self::TooLong,
        Self::TooShort,
        Self::TypeMismatch,
        Self::ValueMissing,
    ];

    /// The host key, e.g. `valueMissing`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PatternMismatch => "patternMismatch",
            Self::RangeOverflow => "rangeOverflow",
            Self::RangeUnderflow => "rangeUnderflow",
            Self::StepMismatch => "stepMismatch",
            Self::TooLong => "tooLong",
            Self::TooShort => "tooShort",
            Self::TypeMismatch => "typeMismatch",
            Self::ValueMissing => "valueMissing",
        }
    }

    /// The library rule checking the same thing.
    ///
    /// `typeMismatch` has no fixed counterpart; it pairs with whichever type
    /// rule (`email`, `url`, `number`, `date`) the field's rule set carries.
    #[must_use]
    pub fn equivalent_rule(self) -> Option<&'static str> {
        match self {
            Self::PatternMismatch => Some("pattern"),
            Self::RangeOverflow => Some("max"),
            Self::RangeUnderflow => Some("min"),
            Self::StepMismatch => Some("step"),
            Self::TooLong => Some("maxLength"),
            Self::TooShort => Some("minLength"),
            Self::TypeMismatch => None,
            Self::ValueMissing => Some("required"),
        }
    }

    /// Name used to deduplicate failures against configured rules.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        self.equivalent_rule().unwrap_or_else(|| self.name())
    }

    /// Parses a host key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// The constraint a library rule overlaps with, if any.
    #[must_use]
    pub fn for_rule(rule: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.equivalent_rule() == Some(rule))
    }
}

impl fmt::Display for NativeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical form of any failure name: native keys collapse onto their
/// equivalent rule, everything else is already canonical.
#[must_use]
pub fn canonical_name(name: &str) -> &str {
    NativeConstraint::from_name(name).map_or(name, |c| c.canonical_name())
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Read-only view of the host's constraint validation state.
///
/// Field names follow the host's camelCase keys so a snapshot can be
/// deserialized straight from what the host reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeConstraintSnapshot {
    pub pattern_mismatch: bool,
    pub range_overflow: bool,
    pub range_underflow: bool,
    pub step_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub type_mismatch: bool,
    pub value_missing: bool,
    /// Host-provided text describing the violations; may be empty.
    pub validation_message: String,
}

impl NativeConstraintSnapshot {
    /// A snapshot with no violations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `constraint` as violated.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, constraint: NativeConstraint) -> Self {
        *self.flag_mut(constraint) = true;
        self
    }

    /// Sets the host's validation message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = message.into();
        self
    }

    /// Whether `constraint` is flagged.
    #[must_use]
    pub fn is_set(&self, constraint: NativeConstraint) -> bool {
        match constraint {
            NativeConstraint::PatternMismatch => self.pattern_mismatch,
            NativeConstraint::RangeOverflow => self.range_overflow,
            NativeConstraint::RangeUnderflow => self.range_underflow,
            NativeConstraint::StepMismatch => self.step_mismatch,
            NativeConstraint::TooLong => self.too_long,
            NativeConstraint::TooShort => self.too_short,
            NativeConstraint::TypeMismatch => self.type_mismatch,
            NativeConstraint::ValueMissing => self.value_missing,
        }
    }

    /// Whether no constraint is flagged.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !NativeConstraint::ALL.into_iter().any(|c| self.is_set(c))
    }

    fn flag_mut(&mut self, constraint: NativeConstraint) -> &mut bool {
        match constraint {
            NativeConstraint::PatternMismatch => &mut self.pattern_mismatch,
            NativeConstraint::RangeOverflow => &mut self.range_overflow,
            NativeConstraint::RangeUnderflow => &mut self.range_underflow,
            NativeConstraint::StepMismatch => &mut self.step_mismatch,
            NativeConstraint::TooLong => &mut self.too_long,
            NativeConstraint::TooShort => &mut self.too_short,
            NativeConstraint::TypeMismatch => &mut self.type_mismatch,
            NativeConstraint::ValueMissing => &mut self.value_missing,
        }
    }
}

impl FromIterator<NativeConstraint> for NativeConstraintSnapshot {
    fn from_iter<I: IntoIterator<Item = NativeConstraint>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

/// Lists the flagged constraints in host enumeration order.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::native::{NativeConstraint, NativeConstraintSnapshot, reconcile};
///
/// let snapshot = NativeConstraintSnapshot::new()
///     .with(NativeConstraint::ValueMissing)
///     .with(NativeConstraint::PatternMismatch);
///
/// assert_eq!(
///     reconcile(&snapshot),
///     [NativeConstraint::PatternMismatch, NativeConstraint::ValueMissing]
/// );
/// ```
#[must_use]
pub fn reconcile(snapshot: &NativeConstraintSnapshot) -> Vec<NativeConstraint> {
    NativeConstraint::ALL
        .into_iter()
        .filter(|c| snapshot.is_set(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_snapshot_reconciles_to_nothing() {
        let snapshot = NativeConstraintSnapshot::new().with_message("ignored");
        assert!(snapshot.is_valid());
        assert!(reconcile(&snapshot).is_empty());
    }

    #[test]
    fn all_flags_in_host_order() {
        let snapshot: NativeConstraintSnapshot = NativeConstraint::ALL.into_iter().rev().collect();
        assert_eq!(reconcile(&snapshot), NativeConstraint::ALL);
    }

    #[test]
    fn names_round_trip() {
        for constraint in NativeConstraint::ALL {
            assert_eq!(NativeConstraint::from_name(constraint.name()), Some(constraint));
        }
        assert_eq!(NativeConstraint::from_name("required"), None);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_name("valueMissing"), "required");
        assert_eq!(canonical_name("tooShort"), "minLength");
        assert_eq!(canonical_name("typeMismatch"), "typeMismatch");
        assert_eq!(canonical_name("required"), "required");
        assert_eq!(canonical_name("email"), "email");
        assert_eq!(NativeConstraint::for_rule("max"), Some(NativeConstraint::RangeOverflow));
        assert_eq!(NativeConstraint::for_rule("email"), None);
    }

    #[test]
    fn deserializes_host_validity() {
        let snapshot: NativeConstraintSnapshot = serde_json::from_str(
            r#"{ "valueMissing": true, "tooShort": false, "validationMessage": "Fill this in." }"#,
        )
        .unwrap();
        assert_eq!(reconcile(&snapshot), [NativeConstraint::ValueMissing]);
        assert_eq!(snapshot.validation_message, "Fill this in.");
    }
}
