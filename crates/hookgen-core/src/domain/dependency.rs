//! Dependency reconciliation for `package.json`-style manifests.
//!
//! A [`Reconciliation`] folds an ordered list of changes (all additions, then
//! all removals) into the manifest's name-keyed dependency sections.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    document::{JsonDocument, KeyPath},
    error::DomainError,
};

/// Every section a removal is applied to.
pub const DEPENDENCY_SECTIONS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Which manifest section an addition lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Runtime,
    Development,
}

impl DependencyKind {
    pub const fn section(&self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Development => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Runtime => "runtime",
            Self::Development => "development",
        })
    }
}

/// A named dependency to insert. Uniqueness key: `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
    /// Replace a version already declared in the target section.
    #[serde(default)]
    pub overwrite_existing: bool,
}

impl DependencyEntry {
    pub fn runtime(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind: DependencyKind::Runtime,
            overwrite_existing: false,
        }
    }

    pub fn development(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Development,
            ..Self::runtime(name, version)
        }
    }

    /// Replace an already-declared version instead of keeping it.
    pub fn overwriting(mut self) -> Self {
        self.overwrite_existing = true;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDependency {
            name: self.name.clone(),
            reason: reason.into(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("version cannot be empty"));
        }
        Ok(())
    }
}

/// What a reconciliation actually changed, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub written: Vec<String>,
    pub kept: Vec<String>,
    pub removed: Vec<String>,
}

enum Change<'a> {
    Add(&'a DependencyEntry),
    Remove(&'a str),
}

type Sections = BTreeMap<&'static str, BTreeMap<String, Value>>;

/// Additions (in caller order) followed by removals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    additions: Vec<DependencyEntry>,
    removals: BTreeSet<String>,
}

impl Reconciliation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, entry: DependencyEntry) -> Self {
        self.additions.push(entry);
        self
    }

    pub fn add_all(mut self, entries: impl IntoIterator<Item = DependencyEntry>) -> Self {
        self.additions.extend(entries);
        self
    }

    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.removals.insert(name.into());
        self
    }

    pub fn remove_all<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.removals.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn additions(&self) -> &[DependencyEntry] {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    /// Reconcile the dependency sections of `doc`.
    ///
    /// A section that an addition or removal changed is rewritten sorted by
    /// package name. Every other section is left exactly as it was.
    pub fn apply(&self, doc: &mut JsonDocument) -> Result<ReconcileReport, DomainError> {
        for entry in &self.additions {
            entry.validate()?;
        }

        let present = read_sections(doc)?;
        let mut report = ReconcileReport::default();

        let changes = self
            .additions
            .iter()
            .map(Change::Add)
            .chain(self.removals.iter().map(|n| Change::Remove(n)));

        let (sections, touched) = changes.fold(
            (present, BTreeSet::new()),
            |(mut sections, mut touched), change| {
                match change {
                    Change::Add(entry) => {
                        let name = entry.kind.section();
                        let section = sections.entry(name).or_default();
                        if section.contains_key(&entry.name) && !entry.overwrite_existing {
                            report.kept.push(entry.name.clone());
                        } else {
                            section.insert(entry.name.clone(), Value::String(entry.version.clone()));
                            report.written.push(entry.name.clone());
                            touched.insert(name);
                        }
                    }
                    Change::Remove(name) => {
                        let mut hit = false;
                        for (section_name, section) in sections.iter_mut() {
                            if section.remove(name).is_some() {
                                touched.insert(*section_name);
                                hit = true;
                            }
                        }
                        if hit {
                            report.removed.push(name.to_string());
                        }
                    }
                }
                (sections, touched)
            },
        );

        // Untouched sections keep their original text and order.
        for (name, entries) in sections {
            if !touched.contains(name) {
                continue;
            }
            let map: Map<String, Value> = entries.into_iter().collect();
            doc.set(&KeyPath::new([name]), Value::Object(map))?;
        }

        Ok(report)
    }
}

fn read_sections(doc: &JsonDocument) -> Result<Sections, DomainError> {
    let mut sections = Sections::new();
    for name in DEPENDENCY_SECTIONS {
        let Some(value) = doc.get(&KeyPath::new([name])) else {
            continue;
        };
        let object = value.as_object().ok_or_else(|| DomainError::DocumentShape {
            key: name.to_string(),
            reason: "dependency section is not an object".into(),
        })?;
        sections.insert(
            name,
            object.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        );
    }
    Ok(sections)
}
