//! Numeric range rules.
//!
//! Values are parsed with the numeric literal grammar; a non-numeric value
//! can never satisfy a bound.

use crate::foundation::{
    ConfigError, ConfigResult, FromParam, ParamKind, Rule, RuleContext, RuleParam, format_number,
    is_blank, parse_number,
};

const STEP_TOLERANCE: f64 = 1e-9;

crate::rule! {
    /// Value must be at least the configured minimum.
    pub Min = "min", param Number;
    check(value, min: f64) { parse_number(value).is_some_and(|n| n >= min) }
}

crate::rule! {
    /// Value must not exceed the configured maximum.
    pub Max = "max", param Number;
    check(value, max: f64) { parse_number(value).is_some_and(|n| n <= max) }
}

crate::rule! {
    /// Value must lie within inclusive bounds.
    pub Range = "range", param Range;
    check(value, bounds: (f64, f64)) {
        parse_number(value).is_some_and(|n| n >= bounds.0 && n <= bounds.1)
    }
}

// ============================================================================
// STEP
// ============================================================================

/// Value must sit on the grid `base + k * step`.
///
/// The base is the `min` parameter of the same rule set when one is
/// configured, otherwise zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Step;

impl Rule for Step {
    fn name(&self) -> &'static str {
        "step"
    }

    fn param_kind(&self) -> ParamKind {
        ParamKind::Number
    }

    fn check(
        &self,
        value: &str,
        param: Option<&RuleParam>,
        ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool> {
        let step = f64::from_param(self.name(), param)?;
        if step <= 0.0 {
            return Err(ConfigError::invalid_param_value(
                self.name(),
                format!("step must be positive, got {}", format_number(step)),
            ));
        }
        if is_blank(value) {
            return Ok(true);
        }
        let Some(n) = parse_number(value) else {
            return Ok(false);
        };
        let base = ctx
            .sibling_param("min")
            .and_then(RuleParam::as_number)
            .unwrap_or(0.0);

        Ok(on_step_grid(n - base, step))
    }
}

/// Whether `offset` is a whole multiple of `step`.
///
/// The slack is a fraction of the step, widened only to the rounding error
/// `offset` itself can carry at its magnitude.
fn on_step_grid(offset: f64, step: f64) -> bool {
    let remainder = offset.rem_euclid(step);
    let distance = remainder.min(step - remainder);
    let tolerance = (STEP_TOLERANCE * step).max(4.0 * f64::EPSILON * offset.abs());
    distance <= tolerance
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::ruleset::RuleSet;

    fn check(rule: &dyn Rule, value: &str, param: RuleParam) -> bool {
        rule.check(value, Some(&param), &RuleContext::new()).unwrap()
    }

    #[rstest]
    #[case("", true)]
    #[case("3", true)]
    #[case("5", true)]
    #[case("7", false)]
    #[case("abc", false)]
    fn max_cases(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(check(&Max, value, RuleParam::Number(5.0)), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("7", true)]
    #[case("5", true)]
    #[case("4,9", false)]
    #[case("-1", false)]
    fn min_cases(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(check(&Min, value, RuleParam::Number(5.0)), expected);
    }

    #[test]
    fn min_accepts_numeric_text_param() {
        assert!(check(&Min, "10", RuleParam::text("5")));
    }

    #[test]
    fn range_is_inclusive() {
        let bounds = RuleParam::Range(1.0, 10.0);
        assert!(check(&Range, "1", bounds.clone()));
        assert!(check(&Range, "10", bounds.clone()));
        assert!(!check(&Range, "10.5", bounds.clone()));
        assert!(!check(&Range, "0", bounds));
    }

    #[test]
    fn step_without_min_uses_zero_base() {
        let step = RuleParam::Number(0.5);
        assert!(check(&Step, "1.5", step.clone()));
        assert!(check(&Step, "-2", step.clone()));
        assert!(!check(&Step, "1.25", step.clone()));
        assert!(check(&Step, "", step));
    }

    #[test]
    fn step_tolerates_float_noise() {
        assert!(check(&Step, "0.3", RuleParam::Number(0.1)));
        assert!(check(&Step, "1e3", RuleParam::Number(0.01)));
    }

    #[rstest]
    #[case("1000000000.5", 1.0)]
    #[case("3000000000.4", 1.0)]
    #[case("10000000.005", 0.01)]
    fn step_rejects_large_off_grid_values(#[case] value: &str, #[case] step: f64) {
        assert!(!check(&Step, value, RuleParam::Number(step)));
    }

    #[rstest]
    #[case("1000000000", 1.0)]
    #[case("10000000.01", 0.01)]
    #[case("-4000000000.5", 0.5)]
    fn step_accepts_large_multiples(#[case] value: &str, #[case] step: f64) {
        assert!(check(&Step, value, RuleParam::Number(step)));
    }

    #[test]
    fn step_offsets_from_min() {
        let rules = RuleSet::new().param("min", 1).param("step", 3);
        let ctx = RuleContext::new().with_rules(&rules);
        let step = RuleParam::Number(3.0);
        assert!(Step.check("7", Some(&step), &ctx).unwrap());
        assert!(!Step.check("6", Some(&step), &ctx).unwrap());
    }

    #[test]
    fn step_must_be_positive() {
        let err = Step
            .check("1", Some(&RuleParam::Number(0.0)), &RuleContext::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParamValue { .. }));
    }
}
