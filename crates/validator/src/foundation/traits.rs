//! Core traits for the validation engine.
//!
//! - [`Rule`]: a named predicate over a field value
//! - [`FieldLookup`]: the injected capability for reading other fields
//! - [`MessageResolver`]: per-evaluation message overrides

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::foundation::{ConfigResult, MessageParams, ParamKind, RuleContext, RuleParam};

// ============================================================================
// RULE
// ============================================================================

/// A named predicate that decides whether a value satisfies one constraint.
///
/// Rules are pure functions of their inputs: the value, the configured
/// parameter and whatever the [`RuleContext`] exposes. `Ok(false)` is an
/// ordinary validation failure; `Err` means the rule was misconfigured.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::foundation::{ConfigResult, Rule, RuleContext, RuleParam};
///
/// struct Uppercase;
///
/// impl Rule for Uppercase {
///     fn name(&self) -> &'static str {
///         "uppercase"
///     }
///
///     fn check(
///         &self,
///         value: &str,
///         _param: Option<&RuleParam>,
///         _ctx: &RuleContext<'_>,
///     ) -> ConfigResult<bool> {
///         Ok(value.chars().all(|c| !c.is_lowercase()))
///     }
/// }
///
/// let ctx = RuleContext::new();
/// assert!(Uppercase.check("ABC", None, &ctx).unwrap());
/// assert!(!Uppercase.check("abc", None, &ctx).unwrap());
/// ```
pub trait Rule: Send + Sync {
    /// The name the rule is registered and configured under.
    fn name(&self) -> &'static str;

    /// The payload shape this rule expects.
    fn param_kind(&self) -> ParamKind {
        ParamKind::None
    }

    /// Evaluates the rule against `value`.
    fn check(
        &self,
        value: &str,
        param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool>;

    /// Positional arguments for this rule's message template.
    fn message_params(&self, param: Option<&RuleParam>) -> MessageParams {
        param.map(RuleParam::message_args).unwrap_or_default()
    }
}

// ============================================================================
// FIELD LOOKUP
// ============================================================================

/// Reads the current value of another field, for rules such as `equalTo`.
///
/// Implemented for string maps and for closures, so a host can hand over a
/// snapshot of its form or a live accessor.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fieldcheck_validator::foundation::FieldLookup;
///
/// let mut form = HashMap::new();
/// form.insert("password".to_string(), "hunter2".to_string());
/// assert_eq!(form.field_value("password").as_deref(), Some("hunter2"));
///
/// let live = |name: &str| (name == "email").then(|| "a@b.co".to_string());
/// assert_eq!(live.field_value("email").as_deref(), Some("a@b.co"));
/// assert!(live.field_value("phone").is_none());
/// ```
pub trait FieldLookup {
    /// Returns the current value of `name`, or `None` if it does not exist.
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<F> FieldLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self(name).map(Cow::Owned)
    }
}

impl<S: BuildHasher> FieldLookup for HashMap<String, String, S> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl<S: BuildHasher> FieldLookup for IndexMap<String, String, S> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl FieldLookup for BTreeMap<String, String> {
    fn field_value(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

// ============================================================================
// MESSAGE RESOLVER
// ============================================================================

/// Supplies a caller-specific message for a failing rule.
///
/// A non-empty answer wins over every catalog template, including catalog
/// overrides. `None` or an empty string defers to the catalog.
pub trait MessageResolver {
    /// The message for `rule`, if the caller wants to override it.
    fn resolve(&self, rule: &str) -> Option<String>;
}

impl<F> MessageResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, rule: &str) -> Option<String> {
        self(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysPasses;

    impl Rule for AlwaysPasses {
        fn name(&self) -> &'static str {
            "always"
        }

        fn check(
            &self,
            _value: &str,
            _param: Option<&RuleParam>,
            _ctx: &RuleContext<'_>,
        ) -> ConfigResult<bool> {
            Ok(true)
        }
    }

    #[test]
    fn default_param_kind_is_none() {
        assert_eq!(AlwaysPasses.param_kind(), ParamKind::None);
        assert!(AlwaysPasses.message_params(None).is_empty());
    }

    #[test]
    fn default_message_params_come_from_payload() {
        let param = RuleParam::Number(8.0);
        assert_eq!(AlwaysPasses.message_params(Some(&param)).as_slice(), ["8"]);
    }

    #[test]
    fn btree_lookup() {
        let mut form = BTreeMap::new();
        form.insert("a".to_string(), "1".to_string());
        assert_eq!(form.field_value("a").as_deref(), Some("1"));
        assert!(form.field_value("b").is_none());
    }

    #[test]
    fn closure_resolver() {
        let resolver = |rule: &str| (rule == "required").then(|| "Needed!".to_string());
        assert_eq!(resolver.resolve("required").as_deref(), Some("Needed!"));
        assert!(resolver.resolve("email").is_none());
    }
}
