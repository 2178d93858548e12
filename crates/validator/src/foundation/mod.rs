//! Core validation types and traits
//!
//! This module contains the building blocks every other module leans on:
//!
//! - **Traits**: [`Rule`], [`FieldLookup`], [`MessageResolver`]
//! - **Parameters**: [`RuleParam`], [`ParamKind`], [`FromParam`]
//! - **Context**: [`RuleContext`]
//! - **Errors**: [`ConfigError`]
//!
//! # Architecture
//!
//! ## 1. Rules are pure
//!
//! A rule sees the value, its own parameter and a read-only context. Lookups
//! of other fields are injected through [`FieldLookup`] instead of reaching
//! into a global document.
//!
//! ## 2. Failing is not an error
//!
//! `Ok(false)` is a validation failure and ends up as a message.
//! `Err(ConfigError)` means the validation setup itself is broken.
//!
//! ```rust,ignore
//! use fieldcheck_validator::prelude::*;
//!
//! let rules = RuleSet::new().flag("required").param("minLength", 5);
//! let request = ValidationRequest::builder().value("abc").rules(&rules).build()?;
//! let result = evaluate(&request)?;
//! assert_eq!(result.failed_rules(), ["minLength"]);
//! ```

pub mod context;
pub mod error;
pub mod param;
pub mod traits;
pub mod value;

pub use context::RuleContext;
pub use error::ConfigError;
pub use param::{FromParam, MessageParams, ParamKind, RuleParam};
pub use traits::{FieldLookup, MessageResolver, Rule};
pub use value::{format_number, is_blank, parse_number};

/// Result of any operation that can hit a configuration error.
pub type ConfigResult<T> = Result<T, ConfigError>;
