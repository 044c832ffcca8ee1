//! Registry dependency resolution.
//!
//! Expands a set of requested entry ids into the closure of everything
//! they need through `registryDependencies`. Each id appears once, in the
//! order it was first discovered (depth-first, following declaration order).

use std::collections::{HashMap, HashSet};

use crate::registry::index::{RegistryEntry, RegistryIndex};

/// The deduplicated set of entries a request needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTree {
    order: Vec<String>,
    entries: HashMap<String, RegistryEntry>,
}

impl ResolvedTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns `false` if the id was already present.
    pub fn insert(&mut self, id: &str, entry: RegistryEntry) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.order.push(id.to_string());
        self.entries.insert(id.to_string(), entry);
        true
    }

    /// Look up an entry.
    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Whether the tree contains an id.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Ids in discovery order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Iterate `(id, entry)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (id.as_str(), entry)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Resolve requested ids against an index.
///
/// Ids missing from the index are skipped without error. Cycles, including
/// an entry depending on itself, terminate because every id is visited at
/// most once.
pub fn resolve_tree<S: AsRef<str>>(index: &RegistryIndex, requested: &[S]) -> ResolvedTree {
    let mut tree = ResolvedTree::new();
    let mut visited = HashSet::new();

    for id in requested {
        visit(index, id.as_ref(), &mut visited, &mut tree);
    }

    tracing::debug!(
        "Resolved {} requested id(s) to {} entr(ies): {:?}",
        requested.len(),
        tree.len(),
        tree.ids()
    );

    tree
}

fn visit(
    index: &RegistryIndex,
    id: &str,
    visited: &mut HashSet<String>,
    tree: &mut ResolvedTree,
) {
    if visited.contains(id) {
        return;
    }

    let Some(entry) = index.get(id) else {
        tracing::debug!("Registry has no entry '{}', skipping", id);
        return;
    };

    visited.insert(id.to_string());
    tree.insert(id, entry.clone());

    for dep in &entry.registry_dependencies {
        visit(index, dep, visited, tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn index(entries: &[(&str, &[&str])]) -> RegistryIndex {
        let mut registry = BTreeMap::new();
        for (id, deps) in entries {
            registry.insert(
                id.to_string(),
                RegistryEntry::new(vec![format!("{}.txt", id)])
                    .with_registry_dependencies(deps.iter().map(|d| d.to_string()).collect()),
            );
        }
        RegistryIndex {
            version: "1.0.0".to_string(),
            base_url: "https://example.com".to_string(),
            base_path: String::new(),
            registry,
        }
    }

    #[test]
    fn pulls_in_registry_dependencies() {
        let idx = index(&[("a", &["b"]), ("b", &[])]);
        let tree = resolve_tree(&idx, &["a"]);
        assert_eq!(tree.ids(), ["a", "b"]);
    }

    #[test]
    fn self_reference_terminates() {
        let idx = index(&[("a", &["a"])]);
        let tree = resolve_tree(&idx, &["a"]);
        assert_eq!(tree.ids(), ["a"]);
    }

    #[test]
    fn mutual_cycle_terminates() {
        let idx = index(&[("a", &["b"]), ("b", &["a"])]);
        let tree = resolve_tree(&idx, &["a"]);
        assert_eq!(tree.ids(), ["a", "b"]);

        let tree = resolve_tree(&idx, &["b"]);
        assert_eq!(tree.ids(), ["b", "a"]);
    }

    #[test]
    fn longer_cycle_terminates() {
        let idx = index(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let tree = resolve_tree(&idx, &["c"]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn missing_ids_are_omitted() {
        let idx = index(&[("a", &["ghost"])]);
        let tree = resolve_tree(&idx, &["missing", "a"]);
        assert_eq!(tree.ids(), ["a"]);
        assert!(!tree.contains("missing"));
        assert!(!tree.contains("ghost"));
    }

    #[test]
    fn shared_dependency_appears_once() {
        let idx = index(&[("a", &["c"]), ("b", &["c"]), ("c", &[])]);
        let tree = resolve_tree(&idx, &["a", "b"]);
        assert_eq!(tree.ids(), ["a", "c", "b"]);
    }

    #[test]
    fn depth_first_in_declaration_order() {
        let idx = index(&[
            ("root", &["x", "y"]),
            ("x", &["x1"]),
            ("x1", &[]),
            ("y", &[]),
        ]);
        let tree = resolve_tree(&idx, &["root"]);
        assert_eq!(tree.ids(), ["root", "x", "x1", "y"]);
    }

    #[test]
    fn duplicate_requests_collapse() {
        let idx = index(&[("a", &[])]);
        let tree = resolve_tree(&idx, &["a", "a"]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn empty_request_yields_empty_tree() {
        let idx = index(&[("a", &[])]);
        let tree = resolve_tree::<&str>(&idx, &[]);
        assert!(tree.is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        let idx = index(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])]);
        let first = resolve_tree(&idx, &["b", "a"]);
        let second = resolve_tree(&idx, &["b", "a"]);
        assert_eq!(first, second);
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut tree = ResolvedTree::new();
        assert!(tree.insert("a", RegistryEntry::new(vec!["a".into()])));
        assert!(!tree.insert("a", RegistryEntry::new(vec!["other".into()])));
        assert_eq!(tree.get("a").unwrap().files, vec!["a"]);
    }

    #[test]
    fn iter_follows_discovery_order() {
        let idx = index(&[("z", &["a"]), ("a", &[])]);
        let tree = resolve_tree(&idx, &["z"]);
        let ids: Vec<&str> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }
}
