//! Configuration schema definitions for borrowr.
//!
//! This module contains the structs that map to `.borrowrrc`. Unknown
//! fields are rejected so typos surface immediately.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{BorrowrError, Result};

/// Root configuration structure for `.borrowrrc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BorrowrConfig {
    /// JSON schema reference (editor support only)
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Repository serving the top-level index used by `add`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryConfig>,

    /// Named remotes used by `import`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remotes: Option<BTreeMap<String, RemoteConfig>>,
}

/// The project's own component repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// How the repository URL is turned into download URLs
    pub mode: RepositoryMode,

    /// Repository web URL
    pub url: String,
}

/// How a repository is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryMode {
    /// Files served from raw.githubusercontent.com
    #[serde(rename = "raw-github")]
    RawGithub,
}

/// A named remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Remote kind
    #[serde(rename = "type")]
    pub kind: RemoteKind,

    /// Repository web URL or direct index URL
    pub url: String,
}

/// Kinds of remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteKind {
    /// Index and files served from raw.githubusercontent.com
    #[serde(rename = "github-raw")]
    GithubRaw,
}

impl RemoteConfig {
    /// A `github-raw` remote.
    pub fn github_raw(url: impl Into<String>) -> Self {
        Self {
            kind: RemoteKind::GithubRaw,
            url: url.into(),
        }
    }
}

impl BorrowrConfig {
    /// The configured repository, required by `add`.
    pub fn require_repository(&self) -> Result<&RepositoryConfig> {
        self.repository
            .as_ref()
            .ok_or_else(|| BorrowrError::ConfigurationMissing {
                message: "No repository configured. Please run `borrowr init` first.".to_string(),
            })
    }

    /// The configured remotes, required by `import`.
    pub fn require_remotes(&self) -> Result<&BTreeMap<String, RemoteConfig>> {
        self.remotes
            .as_ref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| BorrowrError::ConfigurationMissing {
                message: "No remote repositories found. Please run `borrowr remote add <url>` to add one."
                    .to_string(),
            })
    }

    /// Look up a remote by name.
    pub fn remote(&self, name: &str) -> Result<&RemoteConfig> {
        self.require_remotes()?
            .get(name)
            .ok_or_else(|| BorrowrError::UnknownRemote {
                name: name.to_string(),
            })
    }

    /// Add or replace a remote.
    pub fn set_remote(&mut self, name: &str, remote: RemoteConfig) {
        self.remotes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), remote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "$schema": "https://borrowr.dev/schema.json",
            "repository": {"mode": "raw-github", "url": "https://github.com/acme/tool"},
            "remotes": {
                "ui": {"type": "github-raw", "url": "https://github.com/acme/ui"}
            }
        }"#;
        let config: BorrowrConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.repository.as_ref().unwrap().mode,
            RepositoryMode::RawGithub
        );
        assert_eq!(config.remote("ui").unwrap().kind, RemoteKind::GithubRaw);
    }

    #[test]
    fn empty_object_is_valid() {
        let config: BorrowrConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BorrowrConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(serde_json::from_str::<BorrowrConfig>(r#"{"registry": {}}"#).is_err());
    }

    #[test]
    fn rejects_unknown_mode() {
        let json = r#"{"repository": {"mode": "gitlab", "url": "x"}}"#;
        assert!(serde_json::from_str::<BorrowrConfig>(json).is_err());
    }

    #[test]
    fn rejects_unknown_remote_kind() {
        let json = r#"{"remotes": {"x": {"type": "raw-github", "url": "x"}}}"#;
        assert!(serde_json::from_str::<BorrowrConfig>(json).is_err());
    }

    #[test]
    fn missing_repository_is_configuration_missing() {
        let config = BorrowrConfig::default();
        assert!(matches!(
            config.require_repository(),
            Err(BorrowrError::ConfigurationMissing { .. })
        ));
    }

    #[test]
    fn missing_remotes_is_configuration_missing() {
        let config = BorrowrConfig::default();
        assert!(matches!(
            config.remote("ui"),
            Err(BorrowrError::ConfigurationMissing { .. })
        ));
    }

    #[test]
    fn unknown_remote_is_reported_by_name() {
        let mut config = BorrowrConfig::default();
        config.set_remote("ui", RemoteConfig::github_raw("https://github.com/acme/ui"));
        match config.remote("forms") {
            Err(BorrowrError::UnknownRemote { name }) => assert_eq!(name, "forms"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn serializes_without_empty_sections() {
        let mut config = BorrowrConfig::default();
        config.set_remote("ui", RemoteConfig::github_raw("https://github.com/acme/ui"));
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("repository").is_none());
        assert_eq!(json["remotes"]["ui"]["type"], "github-raw");
    }
}
