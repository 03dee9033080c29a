//! In-memory overlay of the project being generated.
//!
//! Every rule reads and writes through a [`VirtualTree`]. Nothing here touches
//! real storage: the tree is handed to a `Filesystem` port only after the whole
//! pipeline has succeeded.

use std::collections::BTreeMap;

use crate::domain::{error::DomainError, path::TreePath};

/// One entry of the tree's operation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    Create { path: TreePath },
    Overwrite { path: TreePath },
    Move { from: TreePath, to: TreePath },
    Delete { path: TreePath },
}

/// A mapping from path to file content, plus the log of operations that
/// produced it.
///
/// Invariant: no file is stored under a path whose ancestor is itself a file.
#[derive(Debug, Clone, Default)]
pub struct VirtualTree {
    files: BTreeMap<TreePath, Vec<u8>>,
    actions: Vec<TreeAction>,
}

impl VirtualTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file.
    ///
    /// Re-creating a file with identical content is a no-op; different
    /// content is a `PathConflict`.
    pub fn create(
        &mut self,
        path: &TreePath,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), DomainError> {
        let content = content.into();

        if let Some(existing) = self.files.get(path) {
            if *existing == content {
                return Ok(());
            }
            return Err(DomainError::conflict(path, "file exists with different content"));
        }

        self.ensure_placeable(path)?;
        self.files.insert(path.clone(), content);
        self.actions.push(TreeAction::Create { path: path.clone() });
        Ok(())
    }

    /// Read a file's raw content.
    pub fn read(&self, path: &TreePath) -> Result<&[u8], DomainError> {
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| DomainError::not_found(path))
    }

    pub fn read_to_string(&self, path: &TreePath) -> Result<&str, DomainError> {
        std::str::from_utf8(self.read(path)?).map_err(|_| DomainError::InvalidEncoding {
            path: path.to_string(),
        })
    }

    /// Replace the content of an existing file.
    pub fn overwrite(
        &mut self,
        path: &TreePath,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), DomainError> {
        let slot = self
            .files
            .get_mut(path)
            .ok_or_else(|| DomainError::not_found(path))?;
        *slot = content.into();
        self.actions.push(TreeAction::Overwrite { path: path.clone() });
        Ok(())
    }

    pub fn delete(&mut self, path: &TreePath) -> Result<(), DomainError> {
        self.files
            .remove(path)
            .ok_or_else(|| DomainError::not_found(path))?;
        self.actions.push(TreeAction::Delete { path: path.clone() });
        Ok(())
    }

    /// Relocate every file under `from` to the same relative place under `to`.
    ///
    /// The move is all-or-nothing: a conflicting destination leaves the tree
    /// untouched.
    pub fn move_subtree(&mut self, from: &TreePath, to: &TreePath) -> Result<(), DomainError> {
        if from == to {
            return Ok(());
        }
        if to.starts_with(from) {
            return Err(DomainError::InvalidPath {
                path: to.to_string(),
                reason: format!("cannot move {from} into itself"),
            });
        }

        let moved: Vec<(TreePath, TreePath)> = self
            .files_under(from)
            .filter_map(|(p, _)| {
                let rest = p.strip_prefix(from)?;
                Some((p.clone(), to.join(rest).ok()?))
            })
            .collect();

        if moved.is_empty() {
            return Err(DomainError::not_found(from));
        }

        // Stage on a copy so a rejected destination leaves `self` untouched.
        let mut staged = self.files.clone();
        let contents: Vec<(TreePath, Vec<u8>)> = moved
            .into_iter()
            .filter_map(|(source, dest)| staged.remove(&source).map(|c| (dest, c)))
            .collect();

        for (dest, content) in contents {
            if let Some(existing) = staged.get(&dest) {
                if *existing != content {
                    return Err(DomainError::conflict(&dest, "move target already exists"));
                }
                continue;
            }
            check_placeable(&staged, &dest)?;
            staged.insert(dest, content);
        }

        self.files = staged;
        self.actions.push(TreeAction::Move {
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }

    /// Create every file of `other` in this tree, stopping at the first conflict.
    pub fn merge(&mut self, other: VirtualTree) -> Result<(), DomainError> {
        for (path, content) in other.files {
            self.create(&path, content)?;
        }
        Ok(())
    }

    pub fn exists(&self, path: &TreePath) -> bool {
        self.files.contains_key(path)
    }

    /// Files at or below `base`, in path order.
    pub fn files_under<'a>(
        &'a self,
        base: &'a TreePath,
    ) -> impl Iterator<Item = (&'a TreePath, &'a [u8])> + 'a {
        self.files
            .iter()
            .filter(move |(p, _)| p.starts_with(base))
            .map(|(p, c)| (p, c.as_slice()))
    }

    /// All files, in path order.
    pub fn files(&self) -> impl Iterator<Item = (&TreePath, &[u8])> {
        self.files.iter().map(|(p, c)| (p, c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn actions(&self) -> &[TreeAction] {
        &self.actions
    }

    /// True when both trees hold the same files with the same content.
    /// The operation logs are not compared.
    pub fn same_content(&self, other: &VirtualTree) -> bool {
        self.files == other.files
    }

    fn ensure_placeable(&self, path: &TreePath) -> Result<(), DomainError> {
        check_placeable(&self.files, path)
    }
}

/// A file may not sit below another file, nor where a directory already is.
fn check_placeable(files: &BTreeMap<TreePath, Vec<u8>>, path: &TreePath) -> Result<(), DomainError> {
    let mut ancestor = path.parent();
    while let Some(dir) = ancestor {
        if files.contains_key(&dir) {
            return Err(DomainError::conflict(
                path,
                format!("{dir} is a file, not a directory"),
            ));
        }
        ancestor = dir.parent();
    }

    if files.keys().any(|p| p != path && p.starts_with(path)) {
        return Err(DomainError::conflict(path, "a directory exists at this path"));
    }
    Ok(())
}
