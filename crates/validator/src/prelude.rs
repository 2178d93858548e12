//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldcheck_validator::prelude::*;` import that brings
//! in the request/result types, rule sets, native snapshots and the traits a
//! host implements.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let rules = RuleSet::new().flag("required").param("minLength", 5);
//! let result = evaluate(&ValidationRequest::new("abc", &rules)).unwrap();
//! assert_eq!(result.failed_rules(), ["minLength"]);
//! ```

// ============================================================================
// FOUNDATION: Core traits, parameters, errors
// ============================================================================

pub use crate::foundation::{
    ConfigError, ConfigResult, FieldLookup, MessageResolver, ParamKind, Rule, RuleContext,
    RuleParam,
};

// ============================================================================
// CONFIGURATION
// ============================================================================

pub use crate::config::{ConfigFormat, FieldConfig};
pub use crate::ruleset::{InputKind, RuleSet, RuleSpec};

// ============================================================================
// EVALUATION
// ============================================================================

pub use crate::evaluator::{
    Evaluator, ValidationRequest, ValidationRequestBuilder, ValidationResult, evaluate,
};
pub use crate::native::{NativeConstraint, NativeConstraintSnapshot, reconcile};
pub use crate::rules::RuleLibrary;

// ============================================================================
// MESSAGES
// ============================================================================

pub use crate::message::{CatalogOverrides, MessageCatalog, MessageFormatter, MessageTemplate};
