//! Failure messages
//!
//! - [`MessageTemplate`]: parsed `{0}` / `{field}` templates
//! - [`MessageCatalog`]: rule name to template, with a `DEFAULT` fallback
//! - [`MessageFormatter`]: resolves the message for one failure
//!
//! # Resolution order
//!
//! 1. A non-empty answer from the caller's [`MessageResolver`], used verbatim
//! 2. The rule's template in the effective catalog (defaults plus overrides)
//! 3. The catalog's `DEFAULT` template

pub mod catalog;
pub mod template;

use std::borrow::Cow;
use std::fmt;

pub use catalog::{CatalogOverrides, DEFAULT_KEY, MessageCatalog};
pub use template::{MessageTemplate, TemplatePart};

use crate::foundation::MessageResolver;
use crate::native::NativeConstraint;

/// Label substituted for `{field}` when the caller gives none.
pub const DEFAULT_FIELD_LABEL: &str = "Field";

/// Turns rule failures into human-readable messages for one field.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::message::{CatalogOverrides, MessageCatalog, MessageFormatter};
///
/// let overrides = CatalogOverrides::new().with("min", "{field} must be {0} or more");
/// let formatter = MessageFormatter::new(MessageCatalog::defaults(), "Age")
///     .with_overrides(Some(&overrides));
///
/// assert_eq!(formatter.format("min", &["18".to_string()]), "Age must be 18 or more");
/// assert_eq!(formatter.format("required", &[] as &[String]), "Age is required.");
/// ```
pub struct MessageFormatter<'a> {
    catalog: Cow<'a, MessageCatalog>,
    resolver: Option<&'a dyn MessageResolver>,
    label: &'a str,
}

impl<'a> MessageFormatter<'a> {
    /// A formatter over `catalog` for the field called `label`.
    pub fn new(catalog: &'a MessageCatalog, label: &'a str) -> Self {
        Self {
            catalog: Cow::Borrowed(catalog),
            resolver: None,
            label,
        }
    }

    /// Merges per-call overrides into a private copy of the catalog.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_overrides(mut self, overrides: Option<&CatalogOverrides>) -> Self {
        if let Some(overrides) = overrides.filter(|o| !o.is_empty()) {
            self.catalog = Cow::Owned(self.catalog.merge(overrides));
        }
        self
    }

    /// Installs a caller resolver that outranks every template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_resolver(mut self, resolver: Option<&'a dyn MessageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// The effective catalog.
    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The field label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label
    }

    /// Message for a failed rule.
    #[must_use]
    pub fn format<S: AsRef<str>>(&self, rule: &str, params: &[S]) -> String {
        self.resolved(rule)
            .unwrap_or_else(|| self.catalog.template(rule).render(params, self.label))
    }

    /// Message for a native constraint violation.
    ///
    /// After the resolver, the host's own text wins; when the host gave none
    /// the template of the equivalent rule is used, rendered with `params`.
    #[must_use]
    pub fn format_native<S: AsRef<str>>(
        &self,
        constraint: NativeConstraint,
        host_text: &str,
        params: &[S],
    ) -> String {
        self.format_native_as(constraint, constraint.equivalent_rule(), host_text, params)
    }

    /// Like [`format_native`](Self::format_native), with the equivalent rule
    /// settled by the caller (`typeMismatch` borrows the field's type rule).
    #[must_use]
    pub fn format_native_as<S: AsRef<str>>(
        &self,
        constraint: NativeConstraint,
        equivalent: Option<&str>,
        host_text: &str,
        params: &[S],
    ) -> String {
        if let Some(message) = self.resolved(constraint.name()) {
            return message;
        }
        if !host_text.is_empty() {
            return host_text.to_owned();
        }
        let template = match equivalent {
            Some(rule) => self.catalog.template(rule),
            None => self.catalog.fallback(),
        };
        template.render(params, self.label)
    }

    fn resolved(&self, rule: &str) -> Option<String> {
        self.resolver
            .and_then(|resolver| resolver.resolve(rule))
            .filter(|message| !message.is_empty())
    }
}

impl fmt::Debug for MessageFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFormatter")
            .field("label", &self.label)
            .field("overridden", &matches!(self.catalog, Cow::Owned(_)))
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}
