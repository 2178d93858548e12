//! Rule parameters.
//!
//! A parameterized rule entry carries `{ value: P }`. The payload is one of a
//! number (`min`, `maxLength`, `step`), a piece of text (`pattern`,
//! `acceptFiles`, `equalTo`) or a pair of bounds (`range`, `rangeLength`).

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::value::{format_number, parse_number};
use crate::foundation::{ConfigError, ConfigResult};

/// Positional arguments substituted into a message template.
///
/// Typically 0-2 entries, so they stay inline.
pub type MessageParams = SmallVec<[String; 2]>;

// ============================================================================
// RULE PARAM
// ============================================================================

/// The payload of a parameterized rule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    /// A single numeric limit.
    Number(f64),
    /// Free text: a pattern, an extension list, a field name.
    Text(String),
    /// Inclusive lower and upper bounds.
    Range(f64, f64),
}

impl RuleParam {
    /// Creates a text parameter.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The shape of this payload.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Number(_) => ParamKind::Number,
            Self::Text(_) => ParamKind::Text,
            Self::Range(..) => ParamKind::Range,
        }
    }

    /// Numeric view; numeric text counts, as host attributes are strings.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_number(s),
            Self::Range(..) => None,
        }
    }

    /// Text view.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Bounds view.
    #[must_use]
    pub fn as_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Range(lo, hi) => Some((*lo, *hi)),
            _ => None,
        }
    }

    /// Renders the payload as positional message arguments.
    #[must_use]
    pub fn message_args(&self) -> MessageParams {
        let mut args = MessageParams::new();
        match self {
            Self::Number(n) => args.push(format_number(*n)),
            Self::Text(s) => args.push(s.clone()),
            Self::Range(lo, hi) => {
                args.push(format_number(*lo));
                args.push(format_number(*hi));
            }
        }
        args
    }
}

impl From<f64> for RuleParam {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RuleParam {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for RuleParam {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for RuleParam {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for RuleParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RuleParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<(f64, f64)> for RuleParam {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::Range(lo, hi)
    }
}

// ============================================================================
// PARAM KIND
// ============================================================================

/// The payload shape a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamKind {
    /// The rule runs as a bare flag.
    #[default]
    None,
    /// A numeric limit (numeric text accepted).
    Number,
    /// A text payload.
    Text,
    /// A pair of bounds.
    Range,
}

impl ParamKind {
    /// Whether `param` is an acceptable payload for this kind.
    #[must_use]
    pub fn accepts(self, param: &RuleParam) -> bool {
        match self {
            Self::None => false,
            Self::Number => param.as_number().is_some(),
            Self::Text => matches!(param, RuleParam::Text(_)),
            Self::Range => matches!(param, RuleParam::Range(..)),
        }
    }

    /// Checks `param` against this kind and reports the mismatch, if any.
    pub fn check(self, rule: &str, param: Option<&RuleParam>) -> ConfigResult<()> {
        match (self, param) {
            (Self::None, None) => Ok(()),
            (Self::None, Some(p)) => Err(ConfigError::InvalidParam {
                rule: rule.to_owned(),
                expected: self,
                found: p.kind(),
            }),
            (_, None) => Err(ConfigError::MissingParam {
                rule: rule.to_owned(),
                expected: self,
            }),
            (_, Some(p)) if self.accepts(p) => Ok(()),
            (_, Some(p)) => Err(ConfigError::InvalidParam {
                rule: rule.to_owned(),
                expected: self,
                found: p.kind(),
            }),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "no parameter",
            Self::Number => "a numeric parameter",
            Self::Text => "a text parameter",
            Self::Range => "a range parameter",
        })
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Typed extraction of a rule payload, used by [`rule!`](crate::rule).
pub trait FromParam<'a>: Sized {
    /// The payload shape this type is extracted from.
    const KIND: ParamKind;

    /// Extracts the payload or reports why it cannot be.
    fn from_param(rule: &str, param: Option<&'a RuleParam>) -> ConfigResult<Self>;
}

impl FromParam<'_> for f64 {
    const KIND: ParamKind = ParamKind::Number;

    fn from_param(rule: &str, param: Option<&RuleParam>) -> ConfigResult<Self> {
        Self::KIND.check(rule, param)?;
        param
            .and_then(RuleParam::as_number)
            .ok_or_else(|| ConfigError::MissingParam {
                rule: rule.to_owned(),
                expected: Self::KIND,
            })
    }
}

impl<'a> FromParam<'a> for &'a str {
    const KIND: ParamKind = ParamKind::Text;

    fn from_param(rule: &str, param: Option<&'a RuleParam>) -> ConfigResult<Self> {
        Self::KIND.check(rule, param)?;
        param
            .and_then(RuleParam::as_text)
            .ok_or_else(|| ConfigError::MissingParam {
                rule: rule.to_owned(),
                expected: Self::KIND,
            })
    }
}

impl FromParam<'_> for (f64, f64) {
    const KIND: ParamKind = ParamKind::Range;

    fn from_param(rule: &str, param: Option<&RuleParam>) -> ConfigResult<Self> {
        Self::KIND.check(rule, param)?;
        let (lo, hi) = param
            .and_then(RuleParam::as_range)
            .ok_or_else(|| ConfigError::MissingParam {
                rule: rule.to_owned(),
                expected: Self::KIND,
            })?;
        if lo > hi {
            return Err(ConfigError::invalid_param_value(
                rule,
                format!(
                    "lower bound {} exceeds upper bound {}",
                    format_number(lo),
                    format_number(hi)
                ),
            ));
        }
        Ok((lo, hi))
    }
}
