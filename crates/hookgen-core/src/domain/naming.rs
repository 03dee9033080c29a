//! Project name normalization and identifier casing.

use std::fmt;

use crate::domain::{error::DomainError, path::TreePath};

/// A project name as typed by the user, plus its filesystem-safe form.
///
/// Invariant: `normalized` is non-empty, lowercase, and made of ASCII-safe
/// words joined by `-`. It is the only form used as a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName {
    raw: String,
    normalized: String,
}

impl ProjectName {
    /// Parse and normalize a user-supplied name.
    ///
    /// `"My App"` and `"myApp"` both normalize to `my-app`.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        let reject = |reason: &str| DomainError::InvalidProjectName {
            name: raw.clone(),
            reason: reason.into(),
        };

        if trimmed.is_empty() {
            return Err(reject("name cannot be empty"));
        }
        if trimmed.starts_with('.') {
            return Err(reject("name cannot start with '.'"));
        }
        if trimmed.contains('/') || trimmed.contains('\\') {
            return Err(reject("name cannot contain path separators"));
        }

        let normalized = to_kebab_case(trimmed);
        if normalized.is_empty() {
            return Err(reject("name has no letters or digits"));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            normalized,
        })
    }

    /// Normalized, path-safe form.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Name as the user typed it (trimmed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `/{name}`: the root every generated path lives under.
    pub fn root(&self) -> TreePath {
        TreePath::root().child(&self.normalized)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words.
///
/// ## Word Boundary Detection
///
/// 1. Any character that is not ASCII alphanumeric ends the current word
/// 2. camelCase transition: `aB` splits between `a` and `B`
/// 3. Acronym boundary: `HTTPServer` splits between `P` and `S`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_ascii_lowercase() && next.is_ascii_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_ascii_uppercase()
                && next.is_ascii_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_ascii_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
