//! Presence rule.

use crate::foundation::{ConfigResult, ParamKind, Rule, RuleContext, RuleParam, is_blank};

/// Fails on a blank value; the only rule that does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(
        &self,
        value: &str,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool> {
        ParamKind::None.check(self.name(), param)?;
        Ok(!is_blank(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ConfigError;

    #[test]
    fn required() {
        let ctx = RuleContext::new();
        assert!(Required.check("abc", None, &ctx).unwrap());
        assert!(Required.check(" x ", None, &ctx).unwrap());
        assert!(!Required.check("", None, &ctx).unwrap());
        assert!(!Required.check("   ", None, &ctx).unwrap());
    }

    #[test]
    fn required_takes_no_parameter() {
        let ctx = RuleContext::new();
        let err = Required
            .check("abc", Some(&RuleParam::Number(1.0)), &ctx)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParam { .. }));
    }
}
