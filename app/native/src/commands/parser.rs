//! Command-protocol URI parsing.
//!
//! Grammar: `sidekick:[//]path[?query]`. The `//` is optional, a trailing
//! slash on the path is stripped, and query pairs may be separated by either
//! `&` or `;`. An explicit `method` (or `m`) parameter overrides the action
//! derived from the path.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::core::constants::URI_SCHEME;

/// Ordered query parameters with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self { Self(Vec::new()) }

    /// Appends a pair, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Returns the first value for `key` (case-insensitive), or `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map_or("", |(_, v)| v.as_str())
    }

    /// Returns the first non-empty value among `keys`, or `""`.
    #[must_use]
    pub fn get_any(&self, keys: &[&str]) -> &str {
        keys.iter()
            .map(|key| self.get(key))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    /// Whether a non-empty value exists for `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool { !self.get(key).is_empty() }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether no pairs were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// A parsed command: an action name plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Action to invoke. Matched case-insensitively by the dispatcher.
    pub action: String,
    /// Query parameters in document order.
    pub params: Params,
}

/// Parses a command-protocol URI.
///
/// Returns `None` when `uri` does not carry our scheme; all other inputs
/// produce a command (possibly with an empty action), leaving policy to the
/// dispatcher.
#[must_use]
pub fn parse(uri: &str) -> Option<ParsedCommand> {
    let rest = strip_scheme(uri.trim())?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };
    let path = path.strip_suffix('/').unwrap_or(path);

    let params = parse_query(query);
    let method = params.get_any(&["method", "m"]);
    let action = if method.is_empty() { path } else { method }.to_string();

    Some(ParsedCommand { action, params })
}

/// Strips `sidekick:` (case-insensitive) from the front of `uri`.
fn strip_scheme(uri: &str) -> Option<&str> {
    let scheme = uri.get(..URI_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(URI_SCHEME) {
        return None;
    }
    uri.get(URI_SCHEME.len()..)?.strip_prefix(':')
}

/// Splits a query string on `&` or `;` and percent-decodes each side.
fn parse_query(query: &str) -> Params {
    let mut params = Params::new();
    for pair in query.split(['&', ';']) {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        params.push(decode(key).into_owned(), decode(value).into_owned());
    }
    params
}

/// Decodes one query component: `+` means space, then percent-decoding.
fn decode(component: &str) -> Cow<'_, str> {
    if component.contains('+') {
        let spaced = component.replace('+', " ");
        Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
    } else {
        match percent_decode_str(component).decode_utf8_lossy() {
            Cow::Borrowed(_) => Cow::Borrowed(component),
            Cow::Owned(s) => Cow::Owned(s),
        }
    }
}
