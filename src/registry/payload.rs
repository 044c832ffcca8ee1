//! Payload fetching.
//!
//! Downloads every file of every entry in a [`ResolvedTree`]. Entries are
//! fetched one at a time; the files within an entry go through the loader's
//! bounded worker pool, so each entry's contents end up index-aligned with
//! its `files` list.

use crate::error::Result;
use crate::registry::index::RegistryEntry;
use crate::registry::loader::RegistryLoader;
use crate::registry::resolver::ResolvedTree;

/// An entry together with the raw content of its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedEntry {
    /// Entry id.
    pub id: String,
    /// The entry as declared in the index.
    pub entry: RegistryEntry,
    /// `raw_files[i]` is the content of `entry.files[i]`.
    pub raw_files: Vec<String>,
}

impl FetchedEntry {
    /// Pair each declared path with its content.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entry
            .files
            .iter()
            .map(String::as_str)
            .zip(self.raw_files.iter().map(String::as_str))
    }
}

/// Fetched entries in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPayload {
    entries: Vec<FetchedEntry>,
}

impl FetchedPayload {
    /// Build a payload from already-fetched entries.
    pub fn from_entries(entries: Vec<FetchedEntry>) -> Self {
        Self { entries }
    }

    /// Entries in resolution order.
    pub fn entries(&self) -> &[FetchedEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&FetchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was fetched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch the files of every entry in `tree`, relative to `base_url`.
///
/// Fails with [`crate::error::BorrowrError::RegistryFetch`] if any file of any entry
/// cannot be retrieved; no partial payload is returned.
pub fn fetch_tree(
    loader: RegistryLoader<'_>,
    base_url: &str,
    tree: &ResolvedTree,
) -> Result<FetchedPayload> {
    let mut entries = Vec::with_capacity(tree.len());
    for (id, entry) in tree.iter() {
        let raw_files = loader.fetch_files(base_url, &entry.files)?;
        entries.push(FetchedEntry {
            id: id.to_string(),
            entry: entry.clone(),
            raw_files,
        });
    }

    tracing::debug!("Fetched {} entr(ies) from {}", entries.len(), base_url);

    Ok(FetchedPayload { entries })
}
