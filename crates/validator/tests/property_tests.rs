//! Property-based tests for fieldcheck-validator.

use fieldcheck_validator::prelude::*;
use proptest::prelude::*;

const PARAMETERIZED: [(&str, f64); 4] =
    [("min", 5.0), ("max", 5.0), ("minLength", 3.0), ("maxLength", 3.0)];

const FLAGS: [&str; 9] = [
    "email", "number", "digits", "alpha", "alphanum", "url", "iri", "date", "required",
];

// ============================================================================
// IDEMPOTENCY: evaluate(x) == evaluate(x)
// ============================================================================

proptest! {
    #[test]
    fn evaluation_idempotent(s in ".{0,40}") {
        let rules = RuleSet::new()
            .flag("required")
            .param("minLength", 3)
            .param("maxLength", 20)
            .flag("email");
        let request = ValidationRequest::new(&s, &rules);
        let r1 = evaluate(&request).unwrap();
        let r2 = evaluate(&request).unwrap();
        prop_assert_eq!(r1, r2);
    }

    #[test]
    fn messages_match_failures(s in ".{0,20}") {
        let rules = RuleSet::new().flag("required").flag("digits").param("max", 100);
        let result = evaluate(&ValidationRequest::new(&s, &rules)).unwrap();
        prop_assert_eq!(result.messages().len(), result.failed_rules().len());
        prop_assert_eq!(result.valid(), result.failed_rules().is_empty());
    }
}

// ============================================================================
// VACUITY: every rule but `required` passes a blank value
// ============================================================================

proptest! {
    #[test]
    fn blank_values_pass_all_but_required(s in "[ \t\n]{0,5}") {
        let library = RuleLibrary::global();
        let ctx = RuleContext::new();

        for (name, limit) in PARAMETERIZED {
            let param = RuleParam::Number(limit);
            prop_assert!(library.evaluate(name, &s, Some(&param), &ctx).unwrap());
        }
        for name in FLAGS {
            let passed = library.evaluate(name, &s, None, &ctx).unwrap();
            prop_assert_eq!(passed, name != "required");
        }
    }
}

// ============================================================================
// RULE LAWS
// ============================================================================

proptest! {
    #[test]
    fn range_is_min_and_max(n in -1000i64..1000) {
        let library = RuleLibrary::global();
        let ctx = RuleContext::new();
        let value = n.to_string();

        let in_range = library
            .evaluate("range", &value, Some(&RuleParam::Range(-10.0, 10.0)), &ctx)
            .unwrap();
        let above_min = library
            .evaluate("min", &value, Some(&RuleParam::Number(-10.0)), &ctx)
            .unwrap();
        let below_max = library
            .evaluate("max", &value, Some(&RuleParam::Number(10.0)), &ctx)
            .unwrap();
        prop_assert_eq!(in_range, above_min && below_max);
    }

    #[test]
    fn integers_are_numbers(n in any::<i64>()) {
        let ctx = RuleContext::new();
        prop_assert!(RuleLibrary::global().evaluate("number", &n.to_string(), None, &ctx).unwrap());
    }

    #[test]
    fn step_accepts_its_multiples(k in -500i64..500) {
        let ctx = RuleContext::new();
        let value = (k * 3).to_string();
        let step = RuleParam::Number(3.0);
        prop_assert!(RuleLibrary::global().evaluate("step", &value, Some(&step), &ctx).unwrap());
    }

    #[test]
    fn template_render_never_panics(src in ".{0,40}", label in "[A-Za-z ]{0,10}") {
        let template = MessageTemplate::parse(src.clone());
        let _ = template.render(&["a", "b"], &label);
        prop_assert_eq!(template.source(), src.as_str());
    }
}
