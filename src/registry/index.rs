//! Registry index documents.
//!
//! An index maps entry ids to the files an entry ships, the packages it
//! needs from the package manager, and the other entries it pulls in.
//! Documents are validated strictly here so the resolver only ever sees
//! well-formed, immutable values.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// SemVer 2.0 grammar (https://semver.org).
static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .unwrap()
});

/// Path prefix stripped from top-level repository files on install.
pub const TOP_LEVEL_BASE_PATH: &str = "cli/";

/// A single installable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryEntry {
    /// Relative file paths, in install order. Never empty.
    pub files: Vec<String>,

    /// Package names to hand to the package manager.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Ids of other entries this one needs.
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
}

impl RegistryEntry {
    /// Create an entry with files only.
    pub fn new(files: Vec<String>) -> Self {
        Self {
            files,
            dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
        }
    }

    /// Builder-style helper for package dependencies.
    pub fn with_dependencies(mut self, deps: Vec<String>) -> Self {
        self.dependencies = deps;
        self
    }

    /// Builder-style helper for registry dependencies.
    pub fn with_registry_dependencies(mut self, deps: Vec<String>) -> Self {
        self.registry_dependencies = deps;
        self
    }
}

/// Raw index document as served by a registry.
///
/// `baseUrl` and `basePath` are optional here because the top-level
/// repository index omits them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct IndexDocument {
    version: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    base_path: Option<String>,
    registry: BTreeMap<String, RegistryEntry>,
}

impl IndexDocument {
    fn parse(content: &str) -> Result<Self> {
        let doc: IndexDocument =
            serde_json::from_str(content).context("index is not a valid registry document")?;

        if !SEMVER_REGEX.is_match(&doc.version) {
            bail!("version '{}' is not a semantic version", doc.version);
        }

        for (id, entry) in &doc.registry {
            if entry.files.is_empty() {
                bail!("entry '{}' must declare at least one file", id);
            }
        }

        Ok(doc)
    }
}

/// A validated registry index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryIndex {
    /// Semantic version of the document.
    pub version: String,
    /// URL that entry files are relative to.
    pub base_url: String,
    /// Prefix stripped from file paths before they are written.
    pub base_path: String,
    /// Entries keyed by id.
    pub registry: BTreeMap<String, RegistryEntry>,
}

impl RegistryIndex {
    /// Parse a remote's index document.
    ///
    /// Remote documents must say where their files live.
    pub fn parse(content: &str) -> Result<Self> {
        let doc = IndexDocument::parse(content)?;

        let Some(base_url) = doc.base_url else {
            bail!("missing field `baseUrl`");
        };
        let Some(base_path) = doc.base_path else {
            bail!("missing field `basePath`");
        };

        Ok(Self {
            version: doc.version,
            base_url,
            base_path,
            registry: doc.registry,
        })
    }

    /// Parse a top-level repository index.
    ///
    /// Files are served relative to `repository_base` and installed with
    /// [`TOP_LEVEL_BASE_PATH`] stripped, unless the document says otherwise.
    pub fn parse_top_level(content: &str, repository_base: &str) -> Result<Self> {
        let doc = IndexDocument::parse(content)?;

        Ok(Self {
            version: doc.version,
            base_url: doc.base_url.unwrap_or_else(|| repository_base.to_string()),
            base_path: doc
                .base_path
                .unwrap_or_else(|| TOP_LEVEL_BASE_PATH.to_string()),
            registry: doc.registry,
        })
    }

    /// Look up an entry.
    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.registry.get(id)
    }

    /// Whether the index has an entry with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains_key(id)
    }

    /// All entry ids, in index order.
    pub fn ids(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Check a version string against the SemVer grammar.
pub fn is_semver(version: &str) -> bool {
    SEMVER_REGEX.is_match(version)
}
