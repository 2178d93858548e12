//! Field configuration files
//!
//! A [`FieldConfig`] bundles everything a host declares about one field: its
//! label, rule set, message overrides and input kind. It loads from JSON or,
//! with the `toml` feature, from TOML:
//!
//! ```toml
//! label = "Username"
//! inputKind = "text"
//!
//! [rules]
//! required = true
//! minLength = { value = 3 }
//! pattern = { value = "[a-z0-9_]+" }
//!
//! [messages]
//! pattern = "{field} may only contain lowercase letters, digits and _."
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluator::{Evaluator, ValidationRequest, ValidationResult};
use crate::foundation::{ConfigError, ConfigResult, FieldLookup};
use crate::message::{CatalogOverrides, DEFAULT_FIELD_LABEL};
use crate::native::NativeConstraintSnapshot;
use crate::ruleset::{InputKind, RuleSet, RuleSpec};

// ============================================================================
// FORMAT
// ============================================================================

/// Configuration file format.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// TOML format
    Toml,
    /// Unknown format
    Unknown(String),
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => Self::Json,
            "toml" => Self::Toml,
            _ => Self::Unknown(ext.to_string()),
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or_else(|| Self::Unknown(String::new()), Self::from_extension)
    }

    /// File extension for this format
    pub fn extension(&self) -> &str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Unknown(ext) => ext,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
            Self::Unknown(ext) => write!(f, "Unknown ({ext})"),
        }
    }
}

// ============================================================================
// FIELD CONFIG
// ============================================================================

/// Declarative description of one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Label substituted for `{field}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: RuleSet,

    /// Message overrides keyed by rule name or `DEFAULT`.
    #[serde(default, skip_serializing_if = "CatalogOverrides::is_empty")]
    pub messages: CatalogOverrides,

    /// Declared input kind; adds the rule it implies.
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub input_kind: Option<InputKind>,
}

impl FieldConfig {
    /// A config with the given rules and nothing else.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the declared input kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_input_kind(mut self, kind: InputKind) -> Self {
        self.input_kind = Some(kind);
        self
    }

    /// Sets the message overrides.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_messages(mut self, messages: CatalogOverrides) -> Self {
        self.messages = messages;
        self
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        serde_json::from_str(source).map_err(|e| ConfigError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    /// Parses a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        toml::from_str(source).map_err(|e| ConfigError::Parse {
            format: "TOML",
            reason: e.to_string(),
        })
    }

    /// Parses a document in the given format.
    pub fn from_str_with_format(source: &str, format: &ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Json => Self::from_json_str(source),
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => Self::from_toml_str(source),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.extension().to_owned(),
            }),
        }
    }

    /// Loads a config file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path);
        if let ConfigFormat::Unknown(extension) = &format {
            return Err(ConfigError::UnsupportedFormat {
                extension: extension.clone(),
            });
        }
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_str_with_format(&source, &format)?;
        debug!(
            path = %path.display(),
            %format,
            rules = config.rules.len(),
            "field configuration loaded"
        );
        Ok(config)
    }

    /// Label to render, defaulting to `"Field"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_FIELD_LABEL)
    }

    /// The configured rules plus whatever the declared input kind implies.
    #[must_use]
    pub fn effective_rules(&self) -> RuleSet {
        self.effective_rules_for(self.input_kind)
    }

    /// The configured rules plus whatever `kind` implies.
    #[must_use]
    pub fn effective_rules_for(&self, kind: Option<InputKind>) -> RuleSet {
        match kind {
            Some(kind) => self.rules.clone().with_input_kind(kind),
            None => self.rules.clone(),
        }
    }

    /// Settles the input kind against the element type the host reports.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InconsistentInputKind`] when the declared kind and the
    /// host type disagree; [`ConfigError::MissingField`] when neither is known
    /// and no predicate rule is configured.
    pub fn check_host_type(&self, host_type: Option<&str>) -> ConfigResult<InputKind> {
        let has_predicate = self
            .rules
            .iter()
            .any(|(_, spec)| matches!(spec, RuleSpec::Predicate(_)));
        InputKind::resolve(self.input_kind, host_type, has_predicate)
    }

    /// Validates `value` with the built-in library and default catalog.
    pub fn validate(
        &self,
        value: &str,
        native: Option<&NativeConstraintSnapshot>,
        lookup: Option<&dyn FieldLookup>,
    ) -> ConfigResult<ValidationResult> {
        self.validate_with(&Evaluator::default(), value, native, lookup)
    }

    /// Validates `value` with a custom evaluator.
    pub fn validate_with(
        &self,
        evaluator: &Evaluator<'_>,
        value: &str,
        native: Option<&NativeConstraintSnapshot>,
        lookup: Option<&dyn FieldLookup>,
    ) -> ConfigResult<ValidationResult> {
        self.run(evaluator, &self.effective_rules(), value, native, lookup)
    }

    /// Validates `value` for a host element of type `host_type`.
    ///
    /// The input kind is settled with [`check_host_type`](Self::check_host_type),
    /// so a config without a declared kind still picks up the rule the host
    /// element implies (`type="email"` adds `email`).
    ///
    /// # Errors
    ///
    /// Everything [`check_host_type`](Self::check_host_type) and
    /// [`Evaluator::evaluate`] report.
    pub fn validate_on_host(
        &self,
        host_type: &str,
        value: &str,
        native: Option<&NativeConstraintSnapshot>,
        lookup: Option<&dyn FieldLookup>,
    ) -> ConfigResult<ValidationResult> {
        let kind = self.check_host_type(Some(host_type))?;
        let rules = self.effective_rules_for(Some(kind));
        self.run(&Evaluator::default(), &rules, value, native, lookup)
    }

    fn run(
        &self,
        evaluator: &Evaluator<'_>,
        rules: &RuleSet,
        value: &str,
        native: Option<&NativeConstraintSnapshot>,
        lookup: Option<&dyn FieldLookup>,
    ) -> ConfigResult<ValidationResult> {
        let mut builder = ValidationRequest::builder()
            .value(value)
            .rules(rules)
            .field_label(self.label())
            .catalog_overrides(&self.messages);
        if let Some(snapshot) = native {
            builder = builder.native_snapshot(snapshot);
        }
        if let Some(lookup) = lookup {
            builder = builder.field_lookup(lookup);
        }
        evaluator.evaluate(&builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::foundation::RuleParam;
    use crate::native::NativeConstraint;

    const USERNAME_JSON: &str = r#"{
        "label": "Username",
        "rules": {
            "required": true,
            "minLength": { "value": 3 },
            "pattern": { "value": "[a-z0-9_]+" }
        },
        "messages": { "pattern": "{field} may only contain a-z, 0-9 and _." }
    }"#;

    #[test]
    fn format_detection() {
        assert_eq!(ConfigFormat::from_extension("JSON"), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")), ConfigFormat::Toml);
        assert_eq!(
            ConfigFormat::from_path(Path::new("rules.yaml")),
            ConfigFormat::Unknown("yaml".into())
        );
        assert_eq!(ConfigFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn json_config_validates() {
        let config = FieldConfig::from_json_str(USERNAME_JSON).unwrap();
        assert_eq!(config.label(), "Username");

        let result = config.validate("Bad Name", None, None).unwrap();
        assert_eq!(result.failed_rules(), ["pattern"]);
        assert_eq!(result.messages(), ["Username may only contain a-z, 0-9 and _."]);

        assert!(config.validate("good_name", None, None).unwrap().valid());
    }

    #[test]
    fn parse_errors_name_the_format() {
        let err = FieldConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));

        let err = FieldConfig::from_json_str(r#"{ "rules": { "min": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_config() {
        let config = FieldConfig::from_toml_str(
            r#"
            label = "Age"
            inputKind = "number"

            [rules]
            required = true
            range = { value = [18, 99] }
            native = false
            "#,
        )
        .unwrap();

        let names: Vec<_> = config.effective_rules().iter().map(|(n, _)| n.to_owned()).collect();
        assert_eq!(names, ["required", "number", "range", "native"]);

        let result = config.validate("12", None, None).unwrap();
        assert_eq!(result.messages(), ["Please enter a value between 18 and 99 in Age."]);

        let result = config.validate("twelve", None, None).unwrap();
        assert_eq!(result.failed_rules(), ["number", "range"]);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_keeps_document_order() {
        let config = FieldConfig::from_toml_str(
            "[rules]\nrequired = true\nmaxLength = { value = 2 }\nemail = true",
        )
        .unwrap();

        let names: Vec<_> = config.rules.iter().map(|(n, _)| n.to_owned()).collect();
        assert_eq!(names, ["required", "maxLength", "email"]);

        let result = config.validate("abcd", None, None).unwrap();
        assert_eq!(result.failed_rules(), ["maxLength", "email"]);
    }

    #[test]
    fn host_type_implies_rule_without_declared_kind() {
        let config = FieldConfig::from_json_str(r#"{ "rules": { "required": true } }"#).unwrap();
        assert!(config.validate("nope", None, None).unwrap().valid());

        let result = config.validate_on_host("email", "nope", None, None).unwrap();
        assert_eq!(result.failed_rules(), ["email"]);
        assert!(config.validate_on_host("email", "a@b.co", None, None).unwrap().valid());

        let declared = config.clone().with_input_kind(InputKind::Url);
        let err = declared.validate_on_host("email", "nope", None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InconsistentInputKind { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(USERNAME_JSON.as_bytes()).unwrap();

        let config = FieldConfig::from_path(file.path()).unwrap();
        assert_eq!(
            config.rules.get("minLength").and_then(RuleSpec::param),
            Some(&RuleParam::Number(3.0))
        );
    }

    #[test]
    fn unsupported_and_missing_files() {
        let err = FieldConfig::from_path("field.ini").unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedFormat { extension: "ini".into() });

        let dir = tempfile::tempdir().unwrap();
        let err = FieldConfig::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn type_alias_and_host_consistency() {
        let config = FieldConfig::from_json_str(r#"{ "type": "email" }"#).unwrap();
        assert_eq!(config.input_kind, Some(InputKind::Email));
        assert_eq!(config.check_host_type(Some("email")), Ok(InputKind::Email));
        assert!(matches!(
            config.check_host_type(Some("url")),
            Err(ConfigError::InconsistentInputKind { .. })
        ));

        let custom = FieldConfig::new(RuleSet::new().predicate("even", |v| v.len() % 2 == 0));
        assert_eq!(custom.check_host_type(None), Ok(InputKind::Custom));
    }

    #[test]
    fn native_snapshot_through_config() {
        let config = FieldConfig::new(RuleSet::new().flag("required")).with_label("Name");
        let snapshot = NativeConstraintSnapshot::new().with(NativeConstraint::ValueMissing);
        let result = config.validate("", Some(&snapshot), None).unwrap();
        assert_eq!(result.failed_rules(), ["valueMissing"]);
        assert_eq!(result.messages(), ["Name is required."]);
    }
}
