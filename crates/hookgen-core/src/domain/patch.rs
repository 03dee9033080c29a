//! Pure document patches: `(document, PatchSpec) -> document'`.

use serde_json::Value;

use crate::domain::{
    document::{JsonDocument, KeyPath},
    error::DomainError,
};

/// A single structured edit.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Deep-merge into the value at `path` (created when absent).
    Merge { path: KeyPath, value: Value },
    /// Replace the value at `path`.
    Set { path: KeyPath, value: Value },
    /// Delete the key at `path`; absent keys are ignored.
    Remove { path: KeyPath },
}

/// An ordered list of [`PatchOp`]s applied as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchSpec {
    ops: Vec<PatchOp>,
}

impl PatchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(mut self, path: KeyPath, value: Value) -> Self {
        self.ops.push(PatchOp::Merge { path, value });
        self
    }

    pub fn set(mut self, path: KeyPath, value: Value) -> Self {
        self.ops.push(PatchOp::Set { path, value });
        self
    }

    pub fn remove(mut self, path: KeyPath) -> Self {
        self.ops.push(PatchOp::Remove { path });
        self
    }

    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every op in order. The input is consumed; on error nothing is
    /// returned, so a half-patched document can never escape.
    pub fn apply(&self, mut doc: JsonDocument) -> Result<JsonDocument, DomainError> {
        for op in &self.ops {
            match op {
                PatchOp::Merge { path, value } => doc.merge(path, value.clone())?,
                PatchOp::Set { path, value } => doc.set(path, value.clone())?,
                PatchOp::Remove { path } => {
                    doc.remove(path);
                }
            }
        }
        Ok(doc)
    }
}
