//! Parsed inventory tables.

use std::collections::HashMap;
use url::Url;

/// A single documentation symbol: normalized search key and absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub url: Url,
}

/// Project information read from the inventory header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryMeta {
    pub project: String,
    pub version: String,
}

/// Mapping of search keys to URLs for one documentation site.
///
/// Iteration follows first-insertion order; re-inserting an existing key
/// replaces its URL in place. Tables are only handed out once fully built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryTable {
    meta: InventoryMeta,
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

impl InventoryTable {
    pub fn new(meta: InventoryMeta) -> Self {
        Self {
            meta,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn meta(&self) -> &InventoryMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Url> {
        self.positions.get(key).map(|&idx| &self.entries[idx].url)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Insert or overwrite an entry.
    pub(crate) fn insert(&mut self, key: String, url: Url) {
        if let Some(&idx) = self.positions.get(&key) {
            self.entries[idx].url = url;
            return;
        }

        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push(Entry { key, url });
    }
}

impl<'a> IntoIterator for &'a InventoryTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut table = InventoryTable::default();
        table.insert("a".into(), url("https://example.org/a"));
        table.insert("b".into(), url("https://example.org/b"));
        table.insert("a".into(), url("https://example.org/a2"));

        check!(table.len() == 2);
        let keys: Vec<_> = table.iter().map(|e| e.key.as_str()).collect();
        check!(keys == vec!["a", "b"]);
        check!(table.get("a") == Some(&url("https://example.org/a2")));
    }

    #[test]
    fn empty_table() {
        let table = InventoryTable::new(InventoryMeta::default());
        check!(table.is_empty());
        check!(!table.contains_key("anything"));
        check!(table.get("anything").is_none());
    }
}
