//! JSON documents with explicit key-path access.
//!
//! Generated configuration files have an open-ended shape. Rather than
//! mapping them onto structs (and silently dropping unknown keys), they stay a
//! [`serde_json::Value`] and are only touched through [`KeyPath`]s. With the
//! `preserve_order` feature, keys nobody touches keep both their value and
//! their position.

use std::fmt;

use serde_json::{Map, Value};

use crate::domain::{error::DomainError, path::TreePath};

/// A path of object keys, e.g. `projects` / `my-app` / `architect` / `lint`.
///
/// Segments are kept separate so that keys containing dots (like the
/// `*.{js,ts}` lint-staged pattern) need no escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The document itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Split a dotted path. Only suitable when no segment contains a `.`.
    pub fn dotted(path: &str) -> Self {
        Self::new(path.split('.').filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn split_last(&self) -> Option<(&[String], &String)> {
        self.0.split_last().map(|(last, parents)| (parents, last))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join("."))
    }
}

/// A parsed JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument(Value);

impl JsonDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse raw tree content. `path` is only used for error reporting.
    pub fn parse(path: &TreePath, bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(|e| DomainError::ManifestParse {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> String {
        // Serializing a `Value` cannot fail: all map keys are strings.
        let mut out = serde_json::to_string_pretty(&self.0).unwrap_or_default();
        out.push('\n');
        out
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.0, |node, key| node.as_object()?.get(key))
    }

    /// Replace the value at `path`, creating intermediate objects as needed.
    pub fn set(&mut self, path: &KeyPath, value: Value) -> Result<(), DomainError> {
        let Some((parents, last)) = path.split_last() else {
            self.0 = value;
            return Ok(());
        };
        let parent = descend_or_create(&mut self.0, parents, path)?;
        parent.insert(last.clone(), value);
        Ok(())
    }

    /// Deep-merge `value` into whatever lives at `path`.
    ///
    /// Objects merge key by key; anything else (including arrays) replaces the
    /// existing value. Applying the same merge twice is the same as applying
    /// it once.
    pub fn merge(&mut self, path: &KeyPath, value: Value) -> Result<(), DomainError> {
        match self.get_mut(path) {
            Some(existing) => {
                deep_merge(existing, value);
                Ok(())
            }
            None => self.set(path, value),
        }
    }

    /// Remove the value at `path`. Removing an absent key is not an error.
    pub fn remove(&mut self, path: &KeyPath) -> Option<Value> {
        let (parents, last) = path.split_last()?;
        let mut node = &mut self.0;
        for key in parents {
            node = node.as_object_mut()?.get_mut(key)?;
        }
        node.as_object_mut()?.shift_remove(last)
    }

    fn get_mut(&mut self, path: &KeyPath) -> Option<&mut Value> {
        let mut node = &mut self.0;
        for key in path.segments() {
            node = node.as_object_mut()?.get_mut(key)?;
        }
        Some(node)
    }
}

impl From<Value> for JsonDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn descend_or_create<'a>(
    root: &'a mut Value,
    keys: &[String],
    full: &KeyPath,
) -> Result<&'a mut Map<String, Value>, DomainError> {
    let mut node = root;
    for key in keys {
        let map = node.as_object_mut().ok_or_else(|| not_an_object(full))?;
        node = map
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    node.as_object_mut().ok_or_else(|| not_an_object(full))
}

fn not_an_object(path: &KeyPath) -> DomainError {
    DomainError::DocumentShape {
        key: path.to_string(),
        reason: "an intermediate value is not an object".into(),
    }
}

fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> JsonDocument {
        JsonDocument::new(v)
    }

    #[test]
    fn get_follows_key_path() {
        let d = doc(json!({"projects": {"my-app": {"root": ""}}}));
        assert_eq!(
            d.get(&KeyPath::new(["projects", "my-app", "root"])),
            Some(&json!(""))
        );
        assert_eq!(d.get(&KeyPath::dotted("projects.missing")), None);
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut d = doc(json!({"name": "x"}));
        d.set(&KeyPath::dotted("husky.hooks.pre-commit"), json!("cmd"))
            .unwrap();
        assert_eq!(d.as_value(), &json!({"name": "x", "husky": {"hooks": {"pre-commit": "cmd"}}}));
    }

    #[test]
    fn set_through_scalar_is_an_error() {
        let mut d = doc(json!({"scripts": "oops"}));
        let err = d.set(&KeyPath::dotted("scripts.lint"), json!("ng lint"));
        assert!(matches!(err, Err(DomainError::DocumentShape { .. })));
    }

    #[test]
    fn merge_keeps_untouched_keys_in_place() {
        let mut d = doc(json!({"scripts": {"start": "ng serve", "build": "ng build"}, "private": true}));
        d.merge(&KeyPath::dotted("scripts"), json!({"lint": "ng lint"}))
            .unwrap();

        let keys: Vec<_> = d.as_value()["scripts"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["start", "build", "lint"]);
        assert_eq!(d.as_value()["private"], json!(true));
    }

    #[test]
    fn merge_replaces_arrays_instead_of_appending() {
        let mut d = doc(json!({"lint-staged": {"*.ts": ["a"]}}));
        let patch = json!({"*.ts": ["eslint --fix"]});
        d.merge(&KeyPath::new(["lint-staged"]), patch.clone()).unwrap();
        d.merge(&KeyPath::new(["lint-staged"]), patch).unwrap();
        assert_eq!(d.as_value()["lint-staged"]["*.ts"], json!(["eslint --fix"]));
    }

    #[test]
    fn remove_absent_key_is_none() {
        let mut d = doc(json!({"a": {"b": 1}}));
        assert_eq!(d.remove(&KeyPath::dotted("a.c")), None);
        assert_eq!(d.remove(&KeyPath::dotted("x.y")), None);
        assert_eq!(d.remove(&KeyPath::dotted("a.b")), Some(json!(1)));
    }

    #[test]
    fn parse_error_names_the_path() {
        let path = TreePath::parse("/app/package.json").unwrap();
        match JsonDocument::parse(&path, b"{ not json") {
            Err(DomainError::ManifestParse { path, .. }) => assert_eq!(path, "/app/package.json"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pretty_output_is_two_space_with_newline() {
        let d = doc(json!({"a": [1]}));
        assert_eq!(d.to_pretty_string(), "{\n  \"a\": [\n    1\n  ]\n}\n");
    }
}
