//! Activation payloads carried over the cross-process channel.
//!
//! A secondary launch never shares memory with the primary: it encodes one of
//! these payloads into an owned buffer, writes it down the socket, and exits.
//! The wire form is a single newline-terminated text line.

use crate::core::constants::URI_SCHEME;

/// What a secondary process asks the primary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationPayload {
    /// Bring the existing window to the front.
    Activate,
    /// Navigate to a URL, then bring to front.
    NavigateUrl(String),
    /// Dispatch a raw command-protocol URI, then bring to front.
    RawCommand(String),
}

impl ActivationPayload {
    /// Builds the payload from launch arguments (binary name excluded).
    ///
    /// A single scheme-prefixed argument passes through verbatim; a
    /// `--url=<value>` argument becomes a navigation; anything else
    /// degrades to a plain activation.
    #[must_use]
    pub fn from_args(args: &[String]) -> Self {
        if args.len() == 1 {
            let lower = args[0].to_ascii_lowercase();
            if lower.starts_with(URI_SCHEME) {
                return Self::RawCommand(args[0].clone());
            }
        }
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if let Some(url) = arg.strip_prefix("--url=") {
                return Self::NavigateUrl(url.trim().to_string());
            }
            if arg == "--url"
                && let Some(url) = iter.next()
            {
                return Self::NavigateUrl(url.trim().to_string());
            }
        }
        Self::Activate
    }

    /// Encodes the payload into its wire text (without terminator).
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Activate => "ACTIVATE".to_string(),
            Self::NavigateUrl(url) => format!("URL|{url}"),
            Self::RawCommand(uri) => uri.clone(),
        }
    }

    /// Decodes a received line (terminator already trimmed).
    ///
    /// Blank input and unrecognized text both degrade to [`Self::Activate`]:
    /// an unknown message still means "someone tried to launch us".
    #[must_use]
    pub fn decode(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Activate;
        }
        if line.eq_ignore_ascii_case("ACTIVATE") {
            return Self::Activate;
        }
        if let Some(url) = strip_prefix_ignore_case(line, "URL|") {
            return Self::NavigateUrl(url.to_string());
        }
        let lower = line.to_ascii_lowercase();
        if lower.starts_with(&format!("{URI_SCHEME}:")) {
            return Self::RawCommand(line.to_string());
        }
        Self::Activate
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
