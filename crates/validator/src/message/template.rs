//! Message templates with `{0}`-style and `{field}` placeholders
//!
//! A template is parsed once into [`TemplatePart`]s and rendered many times.
//! Parsing never fails: anything that is not a well-formed placeholder
//! (an unknown name, a lone brace) stays in the output as literal text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the placeholder replaced by the field label.
const FIELD_PLACEHOLDER: &str = "field";

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text.
    Static(String),
    /// Positional parameter `{n}`.
    Param(usize),
    /// The field label, `{field}`.
    Field,
}

/// A parsed message template.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::message::MessageTemplate;
///
/// let template = MessageTemplate::parse("Please enter at least {0} characters in {field}.");
/// assert_eq!(
///     template.render(&["5".to_string()], "Username"),
///     "Please enter at least 5 characters in Username."
/// );
///
/// // Missing parameters render empty, unknown placeholders stay literal.
/// let template = MessageTemplate::parse("{1}|{name}|{");
/// assert_eq!(template.render::<&str>(&[], "F"), "|{name}|{");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MessageTemplate {
    source: String,
    parts: Vec<TemplatePart>,
}

impl MessageTemplate {
    /// Parses `source` into parts.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let parts = parse_parts(&source);
        Self { source, parts }
    }

    /// The template text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed parts.
    #[must_use]
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Highest positional index referenced, if any.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Param(n) => Some(*n),
                _ => None,
            })
            .max()
    }

    /// Substitutes `params` positionally and `label` for `{field}`.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, params: &[S], label: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + label.len());
        for part in &self.parts {
            match part {
                TemplatePart::Static(text) => out.push_str(text),
                TemplatePart::Param(n) => {
                    if let Some(param) = params.get(*n) {
                        out.push_str(param.as_ref());
                    }
                }
                TemplatePart::Field => out.push_str(label),
            }
        }
        out
    }
}

fn parse_parts(source: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after.find('}').and_then(|close| {
            let name = &after[..close];
            let part = if name == FIELD_PLACEHOLDER {
                TemplatePart::Field
            } else if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                TemplatePart::Param(name.parse().ok()?)
            } else {
                return None;
            };
            Some((part, close))
        });

        match placeholder {
            Some((part, close)) => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Static(std::mem::take(&mut literal)));
                }
                parts.push(part);
                rest = &after[close + 1..];
            }
            None => {
                // Keep the brace and rescan right after it, so `{{0}` still
                // yields a placeholder.
                literal.push('{');
                rest = after;
            }
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(TemplatePart::Static(literal));
    }
    parts
}

impl From<&str> for MessageTemplate {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for MessageTemplate {
    fn from(source: String) -> Self {
        Self::parse(source)
    }
}

impl From<MessageTemplate> for String {
    fn from(template: MessageTemplate) -> Self {
        template.source
    }
}

impl fmt::Debug for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageTemplate").field(&self.source).finish()
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
