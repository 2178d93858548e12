//! Declarative rule sets.
//!
//! A [`RuleSet`] maps rule names to [`RuleSpec`]s in insertion order; the
//! order is the order rules run in and the order failures are reported in.
//! It deserializes from the same shape hosts write by hand:
//!
//! ```json
//! { "required": true, "minLength": { "value": 5 }, "native": false }
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::foundation::{ConfigError, ConfigResult, RuleParam};

/// Reserved key toggling native constraint reconciliation.
pub const NATIVE_KEY: &str = "native";

/// Caller-supplied predicate; `true` means the value passes.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

// ============================================================================
// RULE SPEC
// ============================================================================

/// How one entry of a rule set is configured.
#[derive(Clone)]
pub enum RuleSpec {
    /// `true` runs the named library rule without a parameter, `false`
    /// disables the entry.
    Flag(bool),
    /// Runs the named library rule with a payload.
    Parameterized(RuleParam),
    /// Runs a caller-supplied predicate instead of a library rule.
    Predicate(Predicate),
}

impl RuleSpec {
    /// Wraps a closure as a predicate entry.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Whether the entry takes part in evaluation.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }

    /// The payload of a parameterized entry.
    #[must_use]
    pub fn param(&self) -> Option<&RuleParam> {
        match self {
            Self::Parameterized(param) => Some(param),
            _ => None,
        }
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(on) => f.debug_tuple("Flag").field(on).finish(),
            Self::Parameterized(param) => f.debug_tuple("Parameterized").field(param).finish(),
            Self::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

impl From<bool> for RuleSpec {
    fn from(on: bool) -> Self {
        Self::Flag(on)
    }
}

impl From<RuleParam> for RuleSpec {
    fn from(param: RuleParam) -> Self {
        Self::Parameterized(param)
    }
}

/// Wire shapes accepted for a rule entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSpecRepr {
    Flag(bool),
    Wrapped { value: RuleParam },
    Bare(RuleParam),
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RuleSpecRepr::deserialize(deserializer).map_err(|_| {
            de::Error::custom("expected a boolean flag or a `{ value = ... }` parameter")
        })?;
        Ok(match repr {
            RuleSpecRepr::Flag(on) => Self::Flag(on),
            RuleSpecRepr::Wrapped { value } | RuleSpecRepr::Bare(value) => {
                Self::Parameterized(value)
            }
        })
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag(on) => serializer.serialize_bool(*on),
            Self::Parameterized(param) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("value", param)?;
                map.end()
            }
            Self::Predicate(_) => Err(ser::Error::custom(
                "predicate rules cannot be serialized",
            )),
        }
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Insertion-ordered map of rule name to [`RuleSpec`].
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::ruleset::RuleSet;
///
/// let rules = RuleSet::new()
///     .flag("required")
///     .param("minLength", 5)
///     .predicate("noSpaces", |v| !v.contains(' '))
///     .native(false);
///
/// let names: Vec<_> = rules.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["required", "minLength", "noSpaces", "native"]);
/// assert_eq!(rules.native_enabled(), Ok(false));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    entries: IndexMap<String, RuleSpec>,
}

impl RuleSet {
    /// An empty rule set with native reconciliation enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, keeping the original position on replace.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        spec: impl Into<RuleSpec>,
    ) -> Option<RuleSpec> {
        self.entries.insert(name.into(), spec.into())
    }

    /// Adds `name` as an enabled flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.insert(name, RuleSpec::Flag(true));
        self
    }

    /// Adds `name` with a payload.
    #[must_use = "builder methods must be chained or built"]
    pub fn param(mut self, name: impl Into<String>, param: impl Into<RuleParam>) -> Self {
        self.insert(name, RuleSpec::Parameterized(param.into()));
        self
    }

    /// Adds a custom predicate under `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn predicate<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.insert(name, RuleSpec::predicate(f));
        self
    }

    /// Sets the reserved native toggle.
    #[must_use = "builder methods must be chained or built"]
    pub fn native(mut self, enabled: bool) -> Self {
        self.insert(NATIVE_KEY, RuleSpec::Flag(enabled));
        self
    }

    /// The entry configured under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.entries.get(name)
    }

    /// Whether an entry exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries in configured order, the native toggle included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Entries that actually run: the native toggle and disabled flags are
    /// left out.
    pub fn active(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.iter()
            .filter(|(name, spec)| *name != NATIVE_KEY && spec.is_enabled())
    }

    /// Names of disabled flags, the native toggle excluded.
    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(name, spec)| *name != NATIVE_KEY && matches!(spec, RuleSpec::Flag(false)))
            .map(|(name, _)| name)
    }

    /// The first active rule that checks the input's type (`email`, `url`,
    /// `number` or `date`).
    #[must_use]
    pub fn type_rule(&self) -> Option<&str> {
        self.active()
            .map(|(name, _)| name)
            .find(|name| InputKind::implying(name).is_some())
    }

    /// Number of entries, the native toggle included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether native constraint reconciliation runs; on unless turned off.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidNativeToggle`] when the reserved entry is not a
    /// boolean flag.
    pub fn native_enabled(&self) -> ConfigResult<bool> {
        match self.entries.get(NATIVE_KEY) {
            None => Ok(true),
            Some(RuleSpec::Flag(on)) => Ok(*on),
            Some(_) => Err(ConfigError::InvalidNativeToggle),
        }
    }

    /// Adds the rule implied by `kind` right after `required`, unless the
    /// set already configures it.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_input_kind(mut self, kind: InputKind) -> Self {
        let Some(rule) = kind.implied_rule() else {
            return self;
        };
        if self.entries.contains_key(rule) {
            return self;
        }
        let index = self
            .entries
            .get_index_of("required")
            .map_or(0, |required| required + 1);
        self.entries
            .shift_insert(index, rule.to_owned(), RuleSpec::Flag(true));
        self
    }
}

impl<N: Into<String>, S: Into<RuleSpec>> FromIterator<(N, S)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, spec)| (name.into(), spec.into()))
                .collect(),
        }
    }
}

// ============================================================================
// INPUT KIND
// ============================================================================

/// The kind of input a field holds, as declared in configuration or reported
/// by the host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text; implies nothing.
    #[default]
    Text,
    /// Implies `email`.
    Email,
    /// Implies `url`.
    Url,
    /// Implies `number`.
    Number,
    /// Implies `date`.
    Date,
    /// File picker; extensions come from `acceptFiles`.
    File,
    /// Validated by predicates only.
    Custom,
}

impl InputKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Email,
        Self::Url,
        Self::Number,
        Self::Date,
        Self::File,
        Self::Custom,
    ];

    /// Lowercase name, as hosts spell it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Number => "number",
            Self::Date => "date",
            Self::File => "file",
            Self::Custom => "custom",
        }
    }

    /// The library rule this kind implies.
    #[must_use]
    pub fn implied_rule(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("email"),
            Self::Url => Some("url"),
            Self::Number => Some("number"),
            Self::Date => Some("date"),
            Self::Text | Self::File | Self::Custom => None,
        }
    }

    /// The kind whose implied rule is `rule`.
    #[must_use]
    pub fn implying(rule: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.implied_rule() == Some(rule))
    }

    /// Maps a host element type to a kind; text-like types map to `Text`.
    #[must_use]
    pub fn from_host_type(host_type: &str) -> Self {
        match host_type.trim().to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "url" => Self::Url,
            "number" | "range" => Self::Number,
            "date" => Self::Date,
            "file" => Self::File,
            "custom" => Self::Custom,
            _ => Self::Text,
        }
    }

    /// Settles the effective kind from what was declared and what the host
    /// reports.
    ///
    /// The declared kind wins; without one the host type is used, and a field
    /// with neither falls back to `Custom` when it carries a predicate.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InconsistentInputKind`] when both are present and
    /// disagree, [`ConfigError::MissingField`] when no kind can be settled.
    pub fn resolve(
        declared: Option<Self>,
        host_type: Option<&str>,
        has_predicate: bool,
    ) -> ConfigResult<Self> {
        let host = host_type
            .filter(|t| !t.trim().is_empty())
            .map(|t| (t, Self::from_host_type(t)));
        match (declared, host) {
            (Some(declared), Some((raw, actual))) if declared != actual => {
                Err(ConfigError::InconsistentInputKind {
                    declared: declared.as_str().to_owned(),
                    actual: raw.to_owned(),
                })
            }
            (Some(declared), _) => Ok(declared),
            (None, Some((_, actual))) => Ok(actual),
            (None, None) if has_predicate => Ok(Self::Custom),
            (None, None) => Err(ConfigError::MissingField {
                field: "input_kind",
            }),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
