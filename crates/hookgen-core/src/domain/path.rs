use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::DomainError;

/// A normalized, absolute, `/`-separated path inside a [`VirtualTree`].
///
/// Invariant: always starts with `/`, never ends with `/` (except the root
/// itself), and contains no empty, `.` or `..` segments.
///
/// [`VirtualTree`]: crate::domain::VirtualTree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreePath(String);

impl TreePath {
    /// The tree root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parse a path. Relative input is interpreted from the root.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        Self::root().join(input)
    }

    /// Append a relative path, normalizing `.` and empty segments.
    ///
    /// `..` is rejected: a joined path can never escape its base.
    pub fn join(&self, relative: impl AsRef<str>) -> Result<Self, DomainError> {
        let relative = relative.as_ref();
        let mut out = self.clone();
        for segment in relative.split(['/', '\\']) {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(DomainError::InvalidPath {
                        path: relative.to_string(),
                        reason: "parent segments ('..') are not allowed".into(),
                    });
                }
                name => out = out.child(name),
            }
        }
        Ok(out)
    }

    /// Append a single, already-validated segment.
    pub(crate) fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(format!("/{segment}"))
        } else {
            Self(format!("{}/{segment}", self.0))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Segment-aware prefix test: `/a/b` is under `/a` but not under `/a/` siblings
    /// like `/ab`. A path is under itself.
    pub fn starts_with(&self, base: &TreePath) -> bool {
        base.is_root()
            || self.0 == base.0
            || (self.0.starts_with(&base.0) && self.0.as_bytes().get(base.0.len()) == Some(&b'/'))
    }

    /// The part of `self` below `base`, without a leading `/`.
    ///
    /// Returns `Some("")` when `self == base`.
    pub fn strip_prefix(&self, base: &TreePath) -> Option<&str> {
        if !self.starts_with(base) {
            return None;
        }
        if base.is_root() {
            return Some(self.0.trim_start_matches('/'));
        }
        Some(self.0[base.0.len()..].trim_start_matches('/'))
    }

    /// Host-relative form, used when committing under an output directory.
    pub fn to_relative_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TreePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TreePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
