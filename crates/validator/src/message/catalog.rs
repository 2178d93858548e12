//! Message catalog: rule name to template, with a `DEFAULT` fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::template::MessageTemplate;

/// Key of the fallback template, both in the catalog and in overrides.
pub const DEFAULT_KEY: &str = "DEFAULT";

const FALLBACK_TEMPLATE: &str = "Please fix {field}.";

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("acceptFiles", "Please enter a value with a valid extension ({0}) in {field}."),
    ("alpha", "Please enter only alpha characters in {field}."),
    ("alphanum", "Please enter only alphanumeric characters in {field}."),
    ("date", "Please enter a valid date in {field}."),
    ("digits", "Please enter only digits in {field}."),
    ("email", "Please enter a valid email address in {field}."),
    ("equalTo", "Please enter the same value again in {field}."),
    ("iri", "Please enter a valid IRI in {field}."),
    ("max", "Please enter a value less than or equal to {0} in {field}."),
    ("maxLength", "Please enter no more than {0} characters in {field}."),
    ("min", "Please enter a value greater than or equal to {0} in {field}."),
    ("minLength", "Please enter at least {0} characters in {field}."),
    ("number", "Please enter a valid number in {field}."),
    ("pattern", "Please match the requested format in {field}."),
    ("range", "Please enter a value between {0} and {1} in {field}."),
    ("rangeLength", "Please enter a value between {0} and {1} characters long in {field}."),
    ("required", "{field} is required."),
    ("step", "Please enter a multiple of {0} in {field}."),
    ("url", "Please enter a valid URL in {field}."),
];

static DEFAULTS: LazyLock<MessageCatalog> = LazyLock::new(|| {
    DEFAULT_TEMPLATES
        .iter()
        .fold(MessageCatalog::new(FALLBACK_TEMPLATE), |catalog, (key, text)| {
            catalog.with_template(*key, *text)
        })
});

// ============================================================================
// CATALOG
// ============================================================================

/// Immutable mapping from rule name to [`MessageTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    fallback: MessageTemplate,
    templates: HashMap<String, MessageTemplate>,
}

impl MessageCatalog {
    /// A catalog holding only a fallback template.
    pub fn new(fallback: impl Into<MessageTemplate>) -> Self {
        Self {
            fallback: fallback.into(),
            templates: HashMap::new(),
        }
    }

    /// The built-in English catalog shared by the whole process.
    #[must_use]
    pub fn defaults() -> &'static Self {
        &DEFAULTS
    }

    /// Adds or replaces a template; [`DEFAULT_KEY`] replaces the fallback.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_template(
        mut self,
        rule: impl Into<String>,
        template: impl Into<MessageTemplate>,
    ) -> Self {
        let rule = rule.into();
        if rule == DEFAULT_KEY {
            self.fallback = template.into();
        } else {
            self.templates.insert(rule, template.into());
        }
        self
    }

    /// The template registered for `rule`, without falling back.
    #[must_use]
    pub fn get(&self, rule: &str) -> Option<&MessageTemplate> {
        if rule == DEFAULT_KEY {
            return Some(&self.fallback);
        }
        self.templates.get(rule)
    }

    /// The template for `rule`, or the fallback when none is registered.
    #[must_use]
    pub fn template(&self, rule: &str) -> &MessageTemplate {
        self.templates.get(rule).unwrap_or(&self.fallback)
    }

    /// The fallback template.
    #[must_use]
    pub fn fallback(&self) -> &MessageTemplate {
        &self.fallback
    }

    /// Returns a new catalog with `overrides` applied on top of this one.
    ///
    /// `self` is left untouched; empty override texts are ignored.
    #[must_use]
    pub fn merge(&self, overrides: &CatalogOverrides) -> Self {
        overrides
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .fold(self.clone(), |catalog, (rule, text)| catalog.with_template(rule, text))
    }

    /// Number of rule templates, not counting the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether only the fallback is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        DEFAULTS.clone()
    }
}

// ============================================================================
// OVERRIDES
// ============================================================================

/// Per-call replacement templates keyed by rule name (or [`DEFAULT_KEY`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogOverrides(IndexMap<String, String>);

impl CatalogOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.0.insert(rule.into(), template.into());
        self
    }

    /// The override text for `rule`.
    #[must_use]
    pub fn get(&self, rule: &str) -> Option<&str> {
        self.0.get(rule).map(String::as_str)
    }

    /// Overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether there is nothing to override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CatalogOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
