//! Template sets and their overlay onto a [`VirtualTree`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::Datelike;

use crate::domain::{
    error::DomainError,
    naming::{ProjectName, to_pascal_case, to_snake_case},
    path::TreePath,
    tree::VirtualTree,
};

// ============================================================================
// Render Context
// ============================================================================

/// Variables available to parameterized template content.
///
/// | Variable | Example Value |
/// |----------|---------------|
/// | `PROJECT_NAME` | "My App" |
/// | `PROJECT_NAME_KEBAB` | "my-app" |
/// | `PROJECT_NAME_SNAKE` | "my_app" |
/// | `PROJECT_NAME_PASCAL` | "MyApp" |
/// | `YEAR` | "2026" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(name: &ProjectName) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("PROJECT_NAME".to_string(), name.raw().to_string());
        vars.insert("PROJECT_NAME_KEBAB".to_string(), name.as_str().to_string());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(name.raw()));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(name.raw()));
        vars.insert("YEAR".to_string(), chrono::Utc::now().year().to_string());

        Self { variables: vars }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace `{{VARIABLE}}` placeholders in a single left-to-right pass.
    ///
    /// Substituted values are not scanned again. Unknown placeholders stay
    /// verbatim.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                rest = &rest[open..];
                break;
            };
            let key = &after[..close];
            if key.contains("{{") {
                out.push_str("{{");
                rest = after;
                continue;
            }
            match self.variables.get(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        out
    }
}

// ============================================================================
// Template Set
// ============================================================================

/// Identifier of a template set, e.g. `configuration` or `vscode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateSetId(String);

impl TemplateSetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateSetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// Copied byte for byte.
    Literal(String),
    /// Rendered through a [`RenderContext`] first.
    Parameterized(String),
    /// Non UTF-8 content such as images, never rendered.
    Binary(Vec<u8>),
}

impl TemplateContent {
    /// Literal unless the text contains a `{{` placeholder opener.
    pub fn detect(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains("{{") {
            Self::Parameterized(text)
        } else {
            Self::Literal(text)
        }
    }

    /// Text content goes through [`TemplateContent::detect`]; anything that
    /// is not UTF-8 is kept as bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::detect(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }

    fn render(&self, ctx: &RenderContext) -> Vec<u8> {
        match self {
            Self::Literal(text) => text.clone().into_bytes(),
            Self::Parameterized(text) => ctx.render(text).into_bytes(),
            Self::Binary(bytes) => bytes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the mount point.
    pub path: String,
    pub content: TemplateContent,
}

/// An ordered collection of template files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub id: TemplateSetId,
    pub description: String,
    entries: Vec<TemplateEntry>,
}

impl TemplateSet {
    pub fn new(id: impl Into<TemplateSetId>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_entry(mut self, path: impl Into<String>, content: TemplateContent) -> Self {
        self.push(path, content);
        self
    }

    pub fn push(&mut self, path: impl Into<String>, content: TemplateContent) {
        self.entries.push(TemplateEntry {
            path: path.into(),
            content,
        });
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate {
                id: self.id.to_string(),
                reason: "template set has no files".into(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.path.starts_with('/') || entry.path.starts_with('\\') {
                return Err(DomainError::InvalidTemplate {
                    id: self.id.to_string(),
                    reason: format!("absolute path not allowed: {}", entry.path),
                });
            }
            let normalized = TreePath::parse(&entry.path)?;
            if normalized.is_root() {
                return Err(DomainError::InvalidTemplate {
                    id: self.id.to_string(),
                    reason: "entry has an empty path".into(),
                });
            }
            if !seen.insert(normalized) {
                return Err(DomainError::DuplicatePath {
                    id: self.id.to_string(),
                    path: entry.path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render every entry into a fresh sub-tree mounted at `target`.
    pub fn render(&self, ctx: &RenderContext, target: &TreePath) -> Result<VirtualTree, DomainError> {
        self.validate()?;

        let mut tree = VirtualTree::new();
        for entry in &self.entries {
            tree.create(&target.join(&entry.path)?, entry.content.render(ctx))?;
        }
        Ok(tree)
    }

    /// Overlay this set onto `tree` at `target`.
    ///
    /// Existing files with identical content are left alone; differing
    /// content is a `PathConflict`.
    pub fn overlay_onto(
        &self,
        tree: &mut VirtualTree,
        target: &TreePath,
        ctx: &RenderContext,
    ) -> Result<(), DomainError> {
        tree.merge(self.render(ctx, target)?)
    }
}
