//! Validation evaluator
//!
//! One evaluation is a single pass through four phases:
//!
//! ```text
//! Idle -> NativeCheck -> RuleSweep -> Resolved
//! ```
//!
//! - **NativeCheck**: when the rule set leaves `native` on and the request
//!   carries a snapshot, every flagged native constraint becomes a failure.
//! - **RuleSweep**: configured entries run in order. A failure is recorded
//!   unless the same constraint already failed natively.
//! - **Resolved**: the field is valid iff nothing failed.
//!
//! A misconfigured entry aborts the evaluation with a [`ConfigError`]; no
//! partial result is ever returned.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::foundation::{
    ConfigError, ConfigResult, FieldLookup, MessageParams, MessageResolver, RuleContext,
};
use crate::message::{CatalogOverrides, DEFAULT_FIELD_LABEL, MessageCatalog, MessageFormatter};
use crate::native::{self, NativeConstraint, NativeConstraintSnapshot, canonical_name};
use crate::rules::RuleLibrary;
use crate::ruleset::{RuleSet, RuleSpec};

// ============================================================================
// REQUEST
// ============================================================================

/// Everything one evaluation needs.
///
/// Built with [`ValidationRequest::builder`]; `value` and `rules` are
/// mandatory, everything else is optional.
#[derive(Clone, Copy)]
pub struct ValidationRequest<'a> {
    value: &'a str,
    rules: &'a RuleSet,
    native_snapshot: Option<&'a NativeConstraintSnapshot>,
    message_resolver: Option<&'a dyn MessageResolver>,
    field_label: &'a str,
    catalog_overrides: Option<&'a CatalogOverrides>,
    field_lookup: Option<&'a dyn FieldLookup>,
}

impl<'a> ValidationRequest<'a> {
    /// A request with only the mandatory inputs.
    #[must_use]
    pub fn new(value: &'a str, rules: &'a RuleSet) -> Self {
        Self {
            value,
            rules,
            native_snapshot: None,
            message_resolver: None,
            field_label: DEFAULT_FIELD_LABEL,
            catalog_overrides: None,
            field_lookup: None,
        }
    }

    /// Starts building a request.
    #[must_use]
    pub fn builder() -> ValidationRequestBuilder<'a> {
        ValidationRequestBuilder::default()
    }

    /// The value under validation.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// The rule set to apply.
    #[must_use]
    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// The host's native constraint state, if supplied.
    #[must_use]
    pub fn native_snapshot(&self) -> Option<&'a NativeConstraintSnapshot> {
        self.native_snapshot
    }

    /// Label substituted for `{field}`.
    #[must_use]
    pub fn field_label(&self) -> &'a str {
        self.field_label
    }

    /// Per-call catalog overrides, if any.
    #[must_use]
    pub fn catalog_overrides(&self) -> Option<&'a CatalogOverrides> {
        self.catalog_overrides
    }
}

impl fmt::Debug for ValidationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRequest")
            .field("value", &self.value)
            .field("rules", &self.rules)
            .field("native_snapshot", &self.native_snapshot)
            .field("has_resolver", &self.message_resolver.is_some())
            .field("field_label", &self.field_label)
            .field("catalog_overrides", &self.catalog_overrides)
            .field("has_lookup", &self.field_lookup.is_some())
            .finish()
    }
}

/// Builder for [`ValidationRequest`].
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::prelude::*;
///
/// let rules = RuleSet::new().flag("required");
/// let request = ValidationRequest::builder()
///     .value("")
///     .rules(&rules)
///     .field_label("Email")
///     .build()
///     .unwrap();
///
/// let result = evaluate(&request).unwrap();
/// assert_eq!(result.first_message(), Some("Email is required."));
/// ```
#[derive(Default)]
#[must_use = "builders do nothing until built"]
pub struct ValidationRequestBuilder<'a> {
    value: Option<&'a str>,
    rules: Option<&'a RuleSet>,
    native_snapshot: Option<&'a NativeConstraintSnapshot>,
    message_resolver: Option<&'a dyn MessageResolver>,
    field_label: Option<&'a str>,
    catalog_overrides: Option<&'a CatalogOverrides>,
    field_lookup: Option<&'a dyn FieldLookup>,
}

impl<'a> ValidationRequestBuilder<'a> {
    /// The value to validate.
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    /// The rule set to apply.
    pub fn rules(mut self, rules: &'a RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// The host's native constraint state.
    pub fn native_snapshot(mut self, snapshot: &'a NativeConstraintSnapshot) -> Self {
        self.native_snapshot = Some(snapshot);
        self
    }

    /// A resolver whose non-empty answers replace catalog messages.
    pub fn message_resolver(mut self, resolver: &'a dyn MessageResolver) -> Self {
        self.message_resolver = Some(resolver);
        self
    }

    /// Label substituted for `{field}`; defaults to `"Field"`.
    pub fn field_label(mut self, label: &'a str) -> Self {
        self.field_label = Some(label);
        self
    }

    /// Templates merged over the default catalog for this call only.
    pub fn catalog_overrides(mut self, overrides: &'a CatalogOverrides) -> Self {
        self.catalog_overrides = Some(overrides);
        self
    }

    /// Read access to other fields, used by `equalTo`.
    pub fn field_lookup(mut self, lookup: &'a dyn FieldLookup) -> Self {
        self.field_lookup = Some(lookup);
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingField`] when `value` or `rules` was not set.
    pub fn build(self) -> ConfigResult<ValidationRequest<'a>> {
        let value = self.value.ok_or(ConfigError::MissingField { field: "value" })?;
        let rules = self.rules.ok_or(ConfigError::MissingField { field: "rules" })?;
        Ok(ValidationRequest {
            value,
            rules,
            native_snapshot: self.native_snapshot,
            message_resolver: self.message_resolver,
            field_label: self.field_label.unwrap_or(DEFAULT_FIELD_LABEL),
            catalog_overrides: self.catalog_overrides,
            field_lookup: self.field_lookup,
        })
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    messages: Vec<String>,
    failed_rules: Vec<String>,
}

impl ValidationResult {
    /// Whether every check passed.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Alias for [`valid`](Self::valid).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Messages in evaluation order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Names of failed checks in evaluation order; native failures use the
    /// host key.
    #[must_use]
    pub fn failed_rules(&self) -> &[String] {
        &self.failed_rules
    }

    /// Whether `name` failed, either directly or through its native
    /// equivalent (`has_failed("required")` after `valueMissing`).
    #[must_use]
    pub fn has_failed(&self, name: &str) -> bool {
        let wanted = canonical_name(name);
        self.failed_rules
            .iter()
            .any(|failed| failed == name || canonical_name(failed) == wanted)
    }

    /// The first message, which hosts usually display.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Evaluation phases, reported in trace events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    NativeCheck,
    RuleSweep,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::NativeCheck => "native_check",
            Self::RuleSweep => "rule_sweep",
            Self::Resolved => "resolved",
        })
    }
}

/// Failures collected so far, deduplicated by canonical name.
#[derive(Default)]
struct Failures<'r> {
    seen: HashSet<&'r str>,
    failed_rules: Vec<String>,
    messages: Vec<String>,
}

impl<'r> Failures<'r> {
    fn contains(&self, canonical: &str) -> bool {
        self.seen.contains(canonical)
    }

    fn record(&mut self, name: &str, canonical: &'r str, message: String) {
        trace!(rule = name, %message, "failure recorded");
        self.seen.insert(canonical);
        self.failed_rules.push(name.to_owned());
        self.messages.push(message);
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.failed_rules.is_empty(),
            messages: self.messages,
            failed_rules: self.failed_rules,
        }
    }
}

/// Runs requests against a rule library and a base message catalog.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'l> {
    library: &'l RuleLibrary,
    catalog: &'l MessageCatalog,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new(RuleLibrary::global(), MessageCatalog::defaults())
    }
}

impl<'l> Evaluator<'l> {
    /// An evaluator over a custom library and catalog.
    #[must_use]
    pub fn new(library: &'l RuleLibrary, catalog: &'l MessageCatalog) -> Self {
        Self { library, catalog }
    }

    /// Evaluates `request`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised by the rule set: an unknown rule, a payload
    /// of the wrong shape or value, or a non-boolean `native` entry.
    pub fn evaluate(&self, request: &ValidationRequest<'_>) -> ConfigResult<ValidationResult> {
        self.run(request).inspect_err(|err| {
            warn!(
                field = request.field_label,
                code = err.code(),
                error = %err,
                "validation configuration error"
            );
        })
    }

    fn run(&self, request: &ValidationRequest<'_>) -> ConfigResult<ValidationResult> {
        let rules = request.rules;
        let value = request.value;
        let mut phase = Phase::Idle;
        trace!(%phase, field = request.field_label, rules = rules.len(), "evaluation started");

        let native_enabled = rules.native_enabled()?;
        if let Some(name) = rules.disabled().find(|name| !self.library.contains(name)) {
            return Err(ConfigError::unknown_rule(name));
        }
        let formatter = MessageFormatter::new(self.catalog, request.field_label)
            .with_overrides(request.catalog_overrides)
            .with_resolver(request.message_resolver);
        let mut ctx = RuleContext::new().with_rules(rules);
        if let Some(lookup) = request.field_lookup {
            ctx = ctx.with_lookup(lookup);
        }
        let mut failures = Failures::default();

        phase = Phase::NativeCheck;
        trace!(%phase, native_enabled, has_snapshot = request.native_snapshot.is_some());
        if let Some(snapshot) = request.native_snapshot.filter(|_| native_enabled) {
            for constraint in native::reconcile(snapshot) {
                let equivalent = match constraint {
                    NativeConstraint::TypeMismatch => rules.type_rule(),
                    _ => constraint.equivalent_rule(),
                };
                let params = equivalent
                    .map(|rule| self.params_for(rule, rules.get(rule)))
                    .unwrap_or_default();
                let message = formatter.format_native_as(
                    constraint,
                    equivalent,
                    &snapshot.validation_message,
                    &params,
                );
                let canonical = equivalent.unwrap_or_else(|| constraint.name());
                failures.record(constraint.name(), canonical, message);
            }
        }

        phase = Phase::RuleSweep;
        trace!(%phase);
        for (name, spec) in rules.active() {
            let passed = match spec {
                RuleSpec::Flag(_) => self.library.evaluate(name, value, None, &ctx)?,
                RuleSpec::Parameterized(param) => {
                    self.library.evaluate(name, value, Some(param), &ctx)?
                }
                RuleSpec::Predicate(predicate) => {
                    let passed = predicate(value);
                    trace!(rule = name, passed, "predicate evaluated");
                    passed
                }
            };
            if passed {
                continue;
            }
            let canonical = canonical_name(name);
            if failures.contains(canonical) {
                trace!(rule = name, "already reported by a native constraint");
                continue;
            }
            let params = self.params_for(name, Some(spec));
            let message = formatter.format(name, &params);
            failures.record(name, canonical, message);
        }

        phase = Phase::Resolved;
        let result = failures.finish();
        trace!(%phase);
        debug!(
            field = request.field_label,
            valid = result.valid,
            failed = ?result.failed_rules,
            "field evaluated"
        );
        Ok(result)
    }

    fn params_for(&self, rule: &str, spec: Option<&RuleSpec>) -> MessageParams {
        match spec {
            Some(RuleSpec::Predicate(_)) => MessageParams::new(),
            Some(spec) => self.library.message_params(rule, spec.param()),
            None => MessageParams::new(),
        }
    }
}

/// Evaluates `request` with the built-in library and default catalog.
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
pub fn evaluate(request: &ValidationRequest<'_>) -> ConfigResult<ValidationResult> {
    Evaluator::default().evaluate(request)
}
