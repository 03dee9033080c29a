//! In-memory template store with built-in template sets.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use hookgen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{TemplateSet, TemplateSetId},
    error::HookgenResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store, keyed by set id.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateSetId, TemplateSet>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in template sets loaded.
    pub fn with_builtin() -> HookgenResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load the built-in template sets.
    pub fn load_builtin(&self) -> HookgenResult<()> {
        for set in builtin_templates::all_template_sets()? {
            self.insert(set)?;
        }
        Ok(())
    }

    /// Get the number of sets.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateSetId) -> HookgenResult<TemplateSet> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateResolution {
                reason: format!("Template set not found: {}", id),
            }
            .into()
        })
    }

    fn list(&self) -> HookgenResult<Vec<TemplateSet>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, set: TemplateSet) -> HookgenResult<()> {
        // Validate before insertion
        set.validate()?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(set.id.clone(), set);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookgen_core::{domain::TemplateContent, error::HookgenError};

    fn set(id: &str) -> TemplateSet {
        TemplateSet::new(id).with_entry("a.txt", TemplateContent::Literal("a".into()))
    }

    #[test]
    fn insert_get_and_list_sorted() {
        let store = InMemoryStore::new();
        store.insert(set("vscode")).unwrap();
        store.insert(set("configuration")).unwrap();

        assert_eq!(store.get(&"vscode".into()).unwrap().id.as_str(), "vscode");
        let ids: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["configuration", "vscode"]);
    }

    #[test]
    fn insert_replaces_same_id() {
        let store = InMemoryStore::new();
        store.insert(set("x")).unwrap();
        store
            .insert(set("x").with_entry("b.txt", TemplateContent::Literal("b".into())))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"x".into()).unwrap().len(), 2);
    }

    #[test]
    fn invalid_set_is_rejected() {
        let store = InMemoryStore::new();
        let err = store.insert(TemplateSet::new("empty")).unwrap_err();
        assert!(matches!(err, HookgenError::Domain(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn missing_set_is_a_resolution_error() {
        let err = InMemoryStore::new().get(&"nope".into()).unwrap_err();
        assert!(matches!(
            err,
            HookgenError::Application(ApplicationError::TemplateResolution { .. })
        ));
    }

    #[test]
    fn builtin_store_has_preset_sets() {
        let store = InMemoryStore::new();
        for set in builtin_templates::compiled_in() {
            store.insert(set).unwrap();
        }
        assert!(store.get(&"configuration".into()).is_ok());
        assert!(store.get(&"vscode".into()).is_ok());
    }
}
