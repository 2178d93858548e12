//! Text length rules
//!
//! Length is measured in Unicode scalar values (chars), so `"héllo"` is five
//! characters long even though it takes six bytes.

#[inline]
fn char_len(value: &str) -> f64 {
    value.chars().count() as f64
}

crate::rule! {
    /// Value must be at least the configured number of characters.
    pub MinLength = "minLength", param Number;
    check(value, min: f64) { char_len(value) >= min }
}

crate::rule! {
    /// Value must not exceed the configured number of characters.
    pub MaxLength = "maxLength", param Number;
    check(value, max: f64) { char_len(value) <= max }
}

crate::rule! {
    /// Value length must lie within inclusive bounds.
    pub RangeLength = "rangeLength", param Range;
    check(value, bounds: (f64, f64)) {
        let len = char_len(value);
        len >= bounds.0 && len <= bounds.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Rule, RuleContext, RuleParam};

    fn check(rule: &dyn Rule, value: &str, param: RuleParam) -> bool {
        rule.check(value, Some(&param), &RuleContext::new()).unwrap()
    }

    #[test]
    fn min_length() {
        let five = RuleParam::Number(5.0);
        assert!(check(&MinLength, "hello", five.clone()));
        assert!(check(&MinLength, "hello world", five.clone()));
        assert!(!check(&MinLength, "abc", five.clone()));
        assert!(check(&MinLength, "", five));
    }

    #[test]
    fn max_length() {
        let five = RuleParam::Number(5.0);
        assert!(check(&MaxLength, "hello", five.clone()));
        assert!(!check(&MaxLength, "hello!", five));
    }

    #[test]
    fn range_length() {
        let bounds = RuleParam::Range(2.0, 4.0);
        assert!(check(&RangeLength, "ab", bounds.clone()));
        assert!(check(&RangeLength, "abcd", bounds.clone()));
        assert!(!check(&RangeLength, "a", bounds.clone()));
        assert!(!check(&RangeLength, "abcde", bounds));
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!("h\u{e9}llo".len(), 6);
        assert!(check(&MaxLength, "h\u{e9}llo", RuleParam::Number(5.0)));
        assert!(!check(&MinLength, "\u{1f44b}\u{1f30d}", RuleParam::Number(3.0)));
    }
}
