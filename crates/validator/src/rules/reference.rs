//! Cross-field rule.

use tracing::trace;

use crate::foundation::{ConfigResult, FromParam, ParamKind, Rule, RuleContext, RuleParam, is_blank};

/// Value must equal the current value of another field.
///
/// The other field is read through the injected [`FieldLookup`]. A field that
/// cannot be resolved (no lookup, or the name is unknown) makes the rule fail
/// rather than raise: during partial form construction the target may simply
/// not exist yet.
///
/// [`FieldLookup`]: crate::foundation::FieldLookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EqualTo;

impl Rule for EqualTo {
    fn name(&self) -> &'static str {
        "equalTo"
    }

    fn param_kind(&self) -> ParamKind {
        ParamKind::Text
    }

    fn check(
        &self,
        value: &str,
        param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool> {
        let target = <&str>::from_param(self.name(), param)?;
        if is_blank(value) {
            return Ok(true);
        }
        match ctx.field_value(target) {
            Some(other) => Ok(other == value),
            None => {
                trace!(target_field = target, "equalTo target could not be resolved");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::foundation::ConfigError;

    fn form() -> HashMap<String, String> {
        HashMap::from([("password".to_string(), "hunter2".to_string())])
    }

    #[test]
    fn matches_other_field() {
        let form = form();
        let ctx = RuleContext::new().with_lookup(&form);
        let param = RuleParam::text("password");
        assert!(EqualTo.check("hunter2", Some(&param), &ctx).unwrap());
        assert!(!EqualTo.check("hunter3", Some(&param), &ctx).unwrap());
    }

    #[test]
    fn unresolvable_target_fails() {
        let form = form();
        let ctx = RuleContext::new().with_lookup(&form);
        let param = RuleParam::text("confirm");
        assert!(!EqualTo.check("hunter2", Some(&param), &ctx).unwrap());

        let no_lookup = RuleContext::new();
        let param = RuleParam::text("password");
        assert!(!EqualTo.check("hunter2", Some(&param), &no_lookup).unwrap());
    }

    #[test]
    fn closure_lookup() {
        let live = |name: &str| (name == "email").then(|| "a@b.co".to_string());
        let ctx = RuleContext::new().with_lookup(&live);
        let param = RuleParam::text("email");
        assert!(EqualTo.check("a@b.co", Some(&param), &ctx).unwrap());
    }

    #[test]
    fn needs_a_field_name() {
        let err = EqualTo
            .check("x", Some(&RuleParam::Number(1.0)), &RuleContext::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParam { .. }));
    }
}
