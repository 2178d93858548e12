//! # fieldcheck-validator
//!
//! A declarative validation engine for single form fields.
//!
//! Given a value, an ordered [`RuleSet`](ruleset::RuleSet) and optionally the
//! host's native constraint state, it decides whether the field is valid and
//! produces the messages to show, in order.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let rules = RuleSet::new()
//!     .flag("required")
//!     .param("minLength", 5)
//!     .flag("email");
//!
//! let request = ValidationRequest::builder()
//!     .value("a@b")
//!     .rules(&rules)
//!     .field_label("Email")
//!     .build()?;
//!
//! let result = evaluate(&request)?;
//! assert!(!result.valid());
//! assert_eq!(result.failed_rules(), ["minLength"]);
//! assert_eq!(
//!     result.first_message(),
//!     Some("Please enter at least 5 characters in Email.")
//! );
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Writing Rules
//!
//! Use the [`rule!`] macro for simple predicates, or implement
//! [`Rule`](foundation::Rule) by hand when a rule needs the
//! [`RuleContext`](foundation::RuleContext). Register extra rules on a
//! [`RuleLibrary`](rules::RuleLibrary) and evaluate through an
//! [`Evaluator`](evaluator::Evaluator).
//!
//! ## Modules
//!
//! - [`rules`]: built-in rules and the registry
//! - [`ruleset`]: rule sets and input kinds
//! - [`native`]: native constraint reconciliation
//! - [`message`]: templates, catalog and formatter
//! - [`evaluator`]: requests, results and the evaluation pass
//! - [`config`]: JSON/TOML field configuration

pub mod config;
pub mod evaluator;
pub mod foundation;
mod macros;
pub mod message;
pub mod native;
pub mod prelude;
pub mod rules;
pub mod ruleset;
