//! Answers accumulated while resolving templates

use crate::domain::prompt::Prompter;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Map from tag name to the chosen value.
///
/// Only grows during a resolution run: once a name has a value it is never
/// asked again and never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
    values: BTreeMap<String, String>,
}

impl ResolvedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Record a value; an existing value for the name is kept
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .entry(name.to_string())
            .or_insert_with(|| value.into());
    }

    /// Set a value, replacing any previous one (for seeding, not resolution)
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Drop a seeded value (config editing only)
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Layer `other` on top of these values
    pub fn extend(&mut self, other: ResolvedOptions) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.values.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl From<BTreeMap<String, String>> for ResolvedOptions {
    fn from(values: BTreeMap<String, String>) -> Self {
        ResolvedOptions { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ResolvedOptions {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything a resolution pass needs, threaded through every unit
pub struct ResolveContext<'a> {
    pub options: &'a mut ResolvedOptions,
    pub use_defaults: bool,
    pub prompter: &'a mut dyn Prompter,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        options: &'a mut ResolvedOptions,
        use_defaults: bool,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        ResolveContext {
            options,
            use_defaults,
            prompter,
        }
    }
}
