//! Configuration errors.
//!
//! A rule returning `false` is ordinary output and never reaches this type.
//! Everything here describes a defect in the validation *setup*: a rule name
//! nobody registered, a payload of the wrong shape, a request built without
//! its value, a config file that does not parse. These are always surfaced
//! to the caller.

use crate::foundation::ParamKind;

/// Error type for validation setup problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A flag or parameterized entry names a rule the library does not know.
    #[error("unknown rule `{rule}`")]
    UnknownRule { rule: String },

    /// The rule needs a parameter but was configured as a bare flag.
    #[error("rule `{rule}` requires {expected}")]
    MissingParam { rule: String, expected: ParamKind },

    /// The parameter payload has the wrong shape for the rule.
    #[error("rule `{rule}` expects {expected}, got {found}")]
    InvalidParam {
        rule: String,
        expected: ParamKind,
        found: ParamKind,
    },

    /// The parameter has the right shape but an unusable value.
    #[error("invalid parameter for `{rule}`: {reason}")]
    InvalidParamValue { rule: String, reason: String },

    /// The reserved `native` entry is not a boolean flag.
    #[error("`native` must be a boolean flag")]
    InvalidNativeToggle,

    /// A request was built without one of its mandatory inputs.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// The configured input kind disagrees with the host element type.
    #[error("input kind `{declared}` conflicts with element type `{actual}`")]
    InconsistentInputKind { declared: String, actual: String },

    /// A configuration document could not be deserialized.
    #[error("failed to parse {format} configuration: {reason}")]
    Parse { format: &'static str, reason: String },

    /// A configuration file could not be read.
    #[error("failed to read `{path}`: {reason}")]
    Io { path: String, reason: String },

    /// A configuration file has an extension no loader understands.
    #[error("unsupported configuration format `{extension}`")]
    UnsupportedFormat { extension: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::UnknownRule`].
    pub fn unknown_rule(rule: impl Into<String>) -> Self {
        Self::UnknownRule { rule: rule.into() }
    }

    /// Shorthand for [`ConfigError::InvalidParamValue`].
    pub fn invalid_param_value(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParamValue {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "lookup",
            Self::MissingParam { .. } => "payload",
            Self::InvalidParam { .. } => "payload",
            Self::InvalidParamValue { .. } => "payload",
            Self::InvalidNativeToggle => "payload",
            Self::MissingField { .. } => "request",
            Self::InconsistentInputKind { .. } => "request",
            Self::Parse { .. } => "source",
            Self::Io { .. } => "source",
            Self::UnsupportedFormat { .. } => "source",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRule { .. } => "RULE_UNKNOWN",
            Self::MissingParam { .. } => "RULE_MISSING_PARAM",
            Self::InvalidParam { .. } => "RULE_INVALID_PARAM",
            Self::InvalidParamValue { .. } => "RULE_INVALID_PARAM_VALUE",
            Self::InvalidNativeToggle => "RULE_INVALID_NATIVE",
            Self::MissingField { .. } => "REQUEST_MISSING_FIELD",
            Self::InconsistentInputKind { .. } => "REQUEST_INCONSISTENT_KIND",
            Self::Parse { .. } => "CONFIG_PARSE",
            Self::Io { .. } => "CONFIG_IO",
            Self::UnsupportedFormat { .. } => "CONFIG_FORMAT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ConfigError::unknown_rule("zipcode");
        assert_eq!(err.to_string(), "unknown rule `zipcode`");

        let err = ConfigError::MissingParam {
            rule: "min".into(),
            expected: ParamKind::Number,
        };
        assert_eq!(err.to_string(), "rule `min` requires a numeric parameter");

        let err = ConfigError::InvalidParam {
            rule: "required".into(),
            expected: ParamKind::None,
            found: ParamKind::Number,
        };
        assert_eq!(
            err.to_string(),
            "rule `required` expects no parameter, got a numeric parameter"
        );

        let err = ConfigError::MissingField { field: "value" };
        assert_eq!(err.to_string(), "missing required field `value`");
    }

    #[test]
    fn codes_and_categories() {
        let err = ConfigError::InvalidNativeToggle;
        assert_eq!(err.code(), "RULE_INVALID_NATIVE");
        assert_eq!(err.category(), "payload");

        let err = ConfigError::UnsupportedFormat {
            extension: "ini".into(),
        };
        assert_eq!(err.code(), "CONFIG_FORMAT");
        assert_eq!(err.category(), "source");
    }
}
