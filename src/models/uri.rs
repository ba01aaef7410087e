use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    Empty,
    MissingScheme(String),
    InvalidScheme(String),
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriError::Empty => write!(f, "uri is empty"),
            UriError::MissingScheme(raw) => write!(f, "uri has no scheme: {}", raw),
            UriError::InvalidScheme(raw) => write!(f, "uri scheme is invalid: {}", raw),
        }
    }
}

impl std::error::Error for UriError {}

/// Resource identity. Two URIs are the same resource iff their string forms
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn parse(raw: &str) -> Result<Self, UriError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(UriError::Empty);
        }
        let Some((scheme, _)) = raw.split_once(SCHEME_SEPARATOR) else {
            return Err(UriError::MissingScheme(raw.to_string()));
        };
        let valid = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(UriError::InvalidScheme(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn from_path(path: &Path) -> Self {
        let path = path.to_string_lossy().replace('\\', "/");
        if path.starts_with('/') {
            Self(format!("file://{}", path))
        } else {
            Self(format!("file:///{}", path))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0
            .split_once(SCHEME_SEPARATOR)
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
    }

    /// Everything after the scheme separator, query and fragment included.
    pub fn path(&self) -> &str {
        self.0
            .split_once(SCHEME_SEPARATOR)
            .map(|(_, rest)| rest)
            .unwrap_or(&self.0)
    }

    pub fn file_name(&self) -> &str {
        let path = self.path();
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            None
        } else {
            Some(ext)
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self.scheme(), "http" | "https")
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/uri.rs"]
mod tests;
