//! Built-in rules and the registry that dispatches to them
//!
//! # Categories
//!
//! - **Presence**: `required`
//! - **Numeric**: `min`, `max`, `range`, `step`
//! - **Length**: `minLength`, `maxLength`, `rangeLength`
//! - **Format**: `pattern`, `email`, `number`, `digits`, `alpha`, `alphanum`, `url`, `iri`
//! - **Temporal**: `date`
//! - **File**: `acceptFiles`
//! - **Cross-field**: `equalTo`
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::foundation::{RuleContext, RuleParam};
//! use fieldcheck_validator::rules::RuleLibrary;
//!
//! let library = RuleLibrary::global();
//! let ctx = RuleContext::new();
//! let five = RuleParam::Number(5.0);
//!
//! assert!(library.evaluate("min", "7", Some(&five), &ctx).unwrap());
//! assert!(!library.evaluate("min", "3", Some(&five), &ctx).unwrap());
//! assert!(library.evaluate("zipcode", "3", None, &ctx).is_err());
//! ```

pub mod content;
pub mod file;
pub mod length;
pub mod presence;
pub mod range;
pub mod reference;
pub mod temporal;

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use tracing::trace;

use crate::foundation::{ConfigError, ConfigResult, MessageParams, Rule, RuleContext, RuleParam};

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use content::{Alpha, Alphanum, Digits, Email, Iri, Number, Pattern, Url};
pub use file::AcceptFiles;
pub use length::{MaxLength, MinLength, RangeLength};
pub use presence::Required;
pub use range::{Max, Min, Range, Step};
pub use reference::EqualTo;
pub use temporal::Date;

static BUILTIN: LazyLock<RuleLibrary> = LazyLock::new(RuleLibrary::builtin);

// ============================================================================
// RULE LIBRARY
// ============================================================================

/// Name-keyed registry of rules.
///
/// The process-wide instance from [`RuleLibrary::global`] is immutable.
/// Hosts that need extra rules build their own library with
/// [`with_rule`](Self::with_rule) and hand it to an
/// [`Evaluator`](crate::evaluator::Evaluator).
pub struct RuleLibrary {
    rules: HashMap<&'static str, Box<dyn Rule>>,
}

impl RuleLibrary {
    /// The shared library of built-in rules.
    #[must_use]
    pub fn global() -> &'static Self {
        &BUILTIN
    }

    /// A fresh library holding every built-in rule.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_rule(Required)
            .with_rule(Min)
            .with_rule(Max)
            .with_rule(Range)
            .with_rule(Step)
            .with_rule(MinLength)
            .with_rule(MaxLength)
            .with_rule(RangeLength)
            .with_rule(Pattern)
            .with_rule(Email)
            .with_rule(Number)
            .with_rule(Digits)
            .with_rule(Alpha)
            .with_rule(Alphanum)
            .with_rule(Url)
            .with_rule(Iri)
            .with_rule(Date)
            .with_rule(AcceptFiles)
            .with_rule(EqualTo)
    }

    /// A library with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers `rule` under its own name, replacing any rule of that name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.insert(rule.name(), Box::new(rule));
        self
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| &**rule)
    }

    /// Whether a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.rules.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the library has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs the rule registered as `name` against `value`.
    ///
    /// The payload is checked against the rule's declared
    /// [`ParamKind`](crate::foundation::ParamKind) before the rule runs, so a
    /// misconfigured entry is reported even when the value is blank.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownRule`] for an unregistered name, or whatever
    /// configuration error the rule itself reports.
    pub fn evaluate(
        &self,
        name: &str,
        value: &str,
        param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool> {
        let rule = self.get(name).ok_or_else(|| ConfigError::unknown_rule(name))?;
        rule.param_kind().check(name, param)?;
        let passed = rule.check(value, param, ctx)?;
        trace!(rule = name, passed, "rule evaluated");
        Ok(passed)
    }

    /// Message arguments for `name`; empty for an unknown rule.
    #[must_use]
    pub fn message_params(&self, name: &str, param: Option<&RuleParam>) -> MessageParams {
        self.get(name)
            .map(|rule| rule.message_params(param))
            .unwrap_or_default()
    }
}

impl Default for RuleLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for RuleLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleLibrary")
            .field("rules", &self.names())
            .finish()
    }
}
