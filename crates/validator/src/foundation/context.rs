//! Evaluation context handed to every rule.
//!
//! Rules never reach for global state. Anything beyond the value and the
//! rule's own parameter (another field's value, a sibling rule's parameter)
//! comes through here, so each rule stays a pure function of its inputs.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{FieldLookup, RuleParam};
use crate::ruleset::{RuleSet, RuleSpec};

/// Read-only context for a single rule check.
#[derive(Clone, Copy, Default)]
pub struct RuleContext<'a> {
    lookup: Option<&'a dyn FieldLookup>,
    rules: Option<&'a RuleSet>,
}

impl<'a> RuleContext<'a> {
    /// An empty context: no field lookup, no sibling rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a field lookup capability.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_lookup(mut self, lookup: &'a dyn FieldLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Attaches the rule set being evaluated.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rules(mut self, rules: &'a RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Current value of another field.
    ///
    /// `None` when no lookup was injected or the field does not exist.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<Cow<'a, str>> {
        self.lookup.and_then(|lookup| lookup.field_value(name))
    }

    /// Parameter of another entry in the same rule set.
    #[must_use]
    pub fn sibling_param(&self, name: &str) -> Option<&'a RuleParam> {
        match self.rules?.get(name)? {
            RuleSpec::Parameterized(param) => Some(param),
            _ => None,
        }
    }
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("has_lookup", &self.lookup.is_some())
            .field("rules", &self.rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_context_resolves_nothing() {
        let ctx = RuleContext::new();
        assert!(ctx.field_value("password").is_none());
        assert!(ctx.sibling_param("min").is_none());
    }

    #[test]
    fn lookup_and_siblings() {
        let mut form = HashMap::new();
        form.insert("password".to_string(), "s3cret".to_string());
        let rules = RuleSet::new().param("min", 10).flag("required");

        let ctx = RuleContext::new().with_lookup(&form).with_rules(&rules);
        assert_eq!(ctx.field_value("password").as_deref(), Some("s3cret"));
        assert_eq!(ctx.sibling_param("min"), Some(&RuleParam::Number(10.0)));
        assert!(ctx.sibling_param("required").is_none());
    }
}
