// SPDX-License-Identifier: MPL-2.0
//! Validated video source identifier.
//!
//! A [`SourceUrl`] can only be constructed from a syntactically valid URL, so
//! every source the coordinator hands to the media session is well-formed.
//! Rejecting bad input here is what lets `switch_source` fail fast without
//! touching the current session.

use std::fmt;

/// Schemes the media framework can bind.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "file", "rtsp", "rtmp"];

/// Reasons a source string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The input was empty or whitespace.
    Empty,
    /// The input has no `scheme://` separator.
    MissingScheme,
    /// The scheme is not one the media framework can bind.
    UnsupportedScheme(String),
    /// The part after the scheme is empty or contains whitespace.
    Malformed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Empty => write!(f, "source URL is empty"),
            SourceError::MissingScheme => write!(f, "source URL has no scheme"),
            SourceError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported URL scheme: {}", scheme)
            }
            SourceError::Malformed(input) => write!(f, "malformed source URL: {}", input),
        }
    }
}

/// A validated, immutable source URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Parses and validates a source string.
    ///
    /// Leading and trailing whitespace is trimmed. The input must have the
    /// form `scheme://rest` with an allowed scheme and a non-empty,
    /// whitespace-free remainder.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing why the input was rejected.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SourceError::Empty);
        }

        let (scheme, rest) = trimmed.split_once("://").ok_or(SourceError::MissingScheme)?;

        let scheme_lower = scheme.to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme_lower.as_str()) {
            return Err(SourceError::UnsupportedScheme(scheme.to_string()));
        }

        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return Err(SourceError::Malformed(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is a local file URL.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.0[..self.0.find("://").unwrap_or(0)].eq_ignore_ascii_case("file")
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
