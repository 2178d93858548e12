//! Format rules: value must match a grammar.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::Mutex;
use regex::Regex;

use crate::foundation::value::NUMBER_REGEX;
use crate::foundation::{
    ConfigError, ConfigResult, FromParam, ParamKind, Rule, RuleContext, RuleParam, is_blank,
};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email grammar is a valid regex")
});

static DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits grammar is a valid regex"));

static ALPHA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]+$").expect("alpha grammar is a valid regex"));

static ALPHANUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("alphanum grammar is a valid regex"));

const WEB_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Upper bound on cached `pattern` regexes; the oldest entry goes first.
const MAX_PATTERN_CACHE_SIZE: usize = 128;

/// Anchored `pattern` regexes keyed by the configured source.
static PATTERN_CACHE: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

// ============================================================================
// PATTERN
// ============================================================================

/// Whole value must match a caller-supplied regular expression.
///
/// The pattern is anchored on both ends, so `[a-z]+` rejects `"abc1"`.
/// A pattern that does not compile is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pattern;

impl Rule for Pattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn param_kind(&self) -> ParamKind {
        ParamKind::Text
    }

    fn check(
        &self,
        value: &str,
        param: Option<&RuleParam>,
        _ctx: &RuleContext<'_>,
    ) -> ConfigResult<bool> {
        let source = <&str>::from_param(self.name(), param)?;
        let regex = anchored_pattern(self.name(), source)?;
        if is_blank(value) {
            return Ok(true);
        }
        Ok(regex.is_match(value))
    }
}

/// Compiles `source` as a whole-value match, reusing earlier compilations.
///
/// The source is compiled on its own before it is wrapped, so unbalanced
/// groups such as `a)|(b` are rejected instead of escaping the anchors.
fn anchored_pattern(rule: &str, source: &str) -> ConfigResult<Regex> {
    let mut cache = PATTERN_CACHE.lock();
    if let Some(regex) = cache.get(source) {
        return Ok(regex.clone());
    }

    let invalid = |e: regex::Error| ConfigError::invalid_param_value(rule, e.to_string());
    Regex::new(source).map_err(invalid)?;
    let regex = Regex::new(&format!("^(?:{source})$")).map_err(invalid)?;

    if cache.len() >= MAX_PATTERN_CACHE_SIZE {
        if let Some(key) = cache.keys().next().cloned() {
            cache.remove(&key);
        }
    }
    cache.insert(source.to_owned(), regex.clone());
    Ok(regex)
}

// ============================================================================
// GRAMMARS
// ============================================================================

crate::rule! {
    /// Value must be an e-mail address (RFC 5322 derived grammar).
    pub Email = "email";
    check(value) { EMAIL_REGEX.is_match(value) }
}

crate::rule! {
    /// Value must be a numeric literal.
    pub Number = "number";
    check(value) { NUMBER_REGEX.is_match(value.trim()) }
}

crate::rule! {
    /// Value must be ASCII digits only.
    pub Digits = "digits";
    check(value) { DIGITS_REGEX.is_match(value) }
}

crate::rule! {
    /// Value must be ASCII letters or underscores.
    pub Alpha = "alpha";
    check(value) { ALPHA_REGEX.is_match(value) }
}

crate::rule! {
    /// Value must be word characters.
    pub Alphanum = "alphanum";
    check(value) { ALPHANUM_REGEX.is_match(value) }
}

crate::rule! {
    /// Value must be an `http`, `https` or `ftp` URL written in ASCII.
    pub Url = "url";
    check(value) { value.is_ascii() && is_web_address(value) }
}

crate::rule! {
    /// Value must be an `http`, `https` or `ftp` IRI; non-ASCII text is allowed.
    pub Iri = "iri";
    check(value) { is_web_address(value) }
}

/// Absolute web address with an explicit `scheme://` and a host.
fn is_web_address(value: &str) -> bool {
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    if !WEB_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return false;
    }
    url::Url::parse(value).is_ok_and(|parsed| parsed.host_str().is_some_and(|h| !h.is_empty()))
}
