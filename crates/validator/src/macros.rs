//! Macros for defining library rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`]: create a complete rule (unit struct + `Rule` impl)
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldcheck_validator::rule;
//!
//! // Rule without a parameter
//! rule! {
//!     pub Digits = "digits";
//!     check(value) { value.chars().all(|c| c.is_ascii_digit()) }
//! }
//!
//! // Rule with a numeric parameter
//! rule! {
//!     pub MinLength = "minLength", param Number;
//!     check(value, min: f64) { value.chars().count() as f64 >= min }
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Creates a complete rule: a unit struct and its `Rule` implementation.
///
/// Every rule generated here passes blank values vacuously; presence is the
/// job of `required`, which is written by hand. The check body evaluates to
/// `bool`.
///
/// # Variants
///
/// **Flag rule** (no parameter):
/// ```rust,ignore
/// rule! {
///     pub Email = "email";
///     check(value) { EMAIL_REGEX.is_match(value) }
/// }
/// ```
///
/// **Parameterized rule** (payload extracted through `FromParam`):
/// ```rust,ignore
/// rule! {
///     pub Max = "max", param Number;
///     check(value, max: f64) { parse_number(value).is_some_and(|n| n <= max) }
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Variant 1: flag rule, no parameter ───────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal;
        check($inp:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &'static str {
                $key
            }

            fn check(
                &self,
                $inp: &str,
                param: ::std::option::Option<&$crate::foundation::RuleParam>,
                _ctx: &$crate::foundation::RuleContext<'_>,
            ) -> $crate::foundation::ConfigResult<bool> {
                $crate::foundation::ParamKind::None.check($key, param)?;
                if $crate::foundation::is_blank($inp) {
                    return Ok(true);
                }
                Ok($body)
            }
        }
    };

    // ── Variant 2: parameterized rule ────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal, param $kind:ident;
        check($inp:ident, $p:ident: $pty:ty) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &'static str {
                $key
            }

            fn param_kind(&self) -> $crate::foundation::ParamKind {
                $crate::foundation::ParamKind::$kind
            }

            fn check(
                &self,
                $inp: &str,
                param: ::std::option::Option<&$crate::foundation::RuleParam>,
                _ctx: &$crate::foundation::RuleContext<'_>,
            ) -> $crate::foundation::ConfigResult<bool> {
                let $p: $pty = $crate::foundation::FromParam::from_param($key, param)?;
                if $crate::foundation::is_blank($inp) {
                    return Ok(true);
                }
                Ok($body)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{ConfigError, ParamKind, Rule, RuleContext, RuleParam};

    crate::rule! {
        /// Test rule without a parameter.
        Shouty = "shouty";
        check(value) { value.chars().all(|c| !c.is_lowercase()) }
    }

    crate::rule! {
        /// Test rule with a numeric parameter.
        AtMostWords = "atMostWords", param Number;
        check(value, limit: f64) { value.split_whitespace().count() as f64 <= limit }
    }

    #[test]
    fn flag_rule() {
        let ctx = RuleContext::new();
        assert_eq!(Shouty.name(), "shouty");
        assert_eq!(Shouty.param_kind(), ParamKind::None);
        assert!(Shouty.check("HEY", None, &ctx).unwrap());
        assert!(!Shouty.check("hey", None, &ctx).unwrap());
        assert!(Shouty.check("", None, &ctx).unwrap());
    }

    #[test]
    fn flag_rule_rejects_payload() {
        let ctx = RuleContext::new();
        let err = Shouty
            .check("HEY", Some(&RuleParam::Number(1.0)), &ctx)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParam { .. }));
    }

    #[test]
    fn param_rule() {
        let ctx = RuleContext::new();
        let two = RuleParam::Number(2.0);
        assert_eq!(AtMostWords.param_kind(), ParamKind::Number);
        assert!(AtMostWords.check("one two", Some(&two), &ctx).unwrap());
        assert!(!AtMostWords.check("one two three", Some(&two), &ctx).unwrap());
        assert!(AtMostWords.check("  ", Some(&two), &ctx).unwrap());
    }

    #[test]
    fn param_rule_requires_payload_even_when_blank() {
        let ctx = RuleContext::new();
        let err = AtMostWords.check("", None, &ctx).unwrap_err();
        assert!(matches!(err, ConfigError::MissingParam { .. }));
    }
}
