//! Configuration file discovery, loading and writing.
//!
//! Discovery walks from the working directory up to the filesystem root.
//! In each directory the first of [`SEARCH_PLACES`] that holds a borrowr
//! configuration wins; `package.json` only counts when it has a
//! `"borrowr"` key.

use crate::config::schema::BorrowrConfig;
use crate::error::{BorrowrError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File written by `init` and `remote add` when no config exists yet.
pub const DEFAULT_CONFIG_FILE: &str = ".borrowrrc";

/// Key holding borrowr configuration inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "borrowr";

/// File names checked in each directory, in priority order.
pub const SEARCH_PLACES: &[&str] = &[
    "package.json",
    ".borrowrrc",
    ".borrowrrc.json",
    ".borrowrrc.yaml",
    ".borrowrrc.yml",
    "borrowr.config.json",
];

/// A configuration together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// The parsed configuration.
    pub config: BorrowrConfig,
}

impl LoadedConfig {
    /// Whether the configuration lives inside `package.json`.
    pub fn is_package_json(&self) -> bool {
        self.path.file_name().is_some_and(|n| n == "package.json")
    }
}

/// Find and load the configuration that applies to `cwd`.
///
/// Returns `Ok(None)` when no configuration exists anywhere up the tree.
///
/// # Errors
///
/// Returns `ConfigurationInvalid` if the first configuration found does not
/// match the schema.
pub fn load_config(cwd: &Path) -> Result<Option<LoadedConfig>> {
    let mut current = Some(cwd);

    while let Some(dir) = current {
        for name in SEARCH_PLACES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }

            if let Some(config) = load_config_file(&path)? {
                tracing::debug!("Loaded configuration from {}", path.display());
                return Ok(Some(LoadedConfig { path, config }));
            }
        }
        current = dir.parent();
    }

    Ok(None)
}

/// Load a single configuration file.
///
/// Returns `Ok(None)` for a `package.json` without a borrowr section, or an
/// unreadable `package.json`.
pub fn load_config_file(path: &Path) -> Result<Option<BorrowrConfig>> {
    let content = fs::read_to_string(path)?;

    if path.file_name().is_some_and(|n| n == "package.json") {
        let Ok(package) = serde_json::from_str::<serde_json::Value>(&content) else {
            return Ok(None);
        };
        let Some(section) = package.get(PACKAGE_JSON_KEY) else {
            return Ok(None);
        };
        return serde_json::from_value(section.clone())
            .map(Some)
            .map_err(|e| invalid(path, e.to_string()));
    }

    parse_config(&content, path).map(Some)
}

/// Parse configuration content.
///
/// `.borrowrrc` may hold JSON or YAML; YAML parsing accepts both.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BorrowrConfig> {
    if content.trim().is_empty() {
        return Ok(BorrowrConfig::default());
    }

    if is_json_path(source_path) {
        serde_json::from_str(content).map_err(|e| invalid(source_path, e.to_string()))
    } else {
        serde_yaml::from_str(content).map_err(|e| invalid(source_path, e.to_string()))
    }
}

/// Where a modified configuration for `cwd` should be written.
///
/// Reuses a dedicated config file already present in `cwd`; otherwise
/// `<cwd>/.borrowrrc`.
pub fn config_write_path(cwd: &Path, loaded: Option<&LoadedConfig>) -> PathBuf {
    match loaded {
        Some(l) if !l.is_package_json() && l.path.parent() == Some(cwd) => l.path.clone(),
        _ => cwd.join(DEFAULT_CONFIG_FILE),
    }
}

/// Write a configuration file.
///
/// YAML files are written as YAML, everything else as pretty-printed JSON.
pub fn write_config(path: &Path, config: &BorrowrConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.is_dir() {
            return Err(BorrowrError::TargetDirectoryMissing {
                path: dir.to_path_buf(),
            });
        }
    }

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    let content = if is_yaml {
        serde_yaml::to_string(config).map_err(anyhow::Error::from)?
    } else {
        let mut json = serde_json::to_string_pretty(config).map_err(anyhow::Error::from)?;
        json.push('\n');
        json
    };

    fs::write(path, content)?;
    tracing::debug!("Wrote configuration to {}", path.display());
    Ok(())
}

/// Repository URL declared in `<cwd>/package.json`, if any.
///
/// Accepts both `"repository": "<url>"` and `"repository": {"url": "<url>"}`.
pub fn package_repository_url(cwd: &Path) -> Option<String> {
    let content = fs::read_to_string(cwd.join("package.json")).ok()?;
    let package: serde_json::Value = serde_json::from_str(&content).ok()?;
    let repository = package.get("repository")?;

    repository
        .as_str()
        .or_else(|| repository.get("url").and_then(|u| u.as_str()))
        .map(String::from)
}

fn is_json_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn invalid(path: &Path, message: String) -> BorrowrError {
    BorrowrError::ConfigurationInvalid {
        path: path.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RemoteConfig, RepositoryConfig, RepositoryMode};
    use tempfile::TempDir;

    const JSON_CONFIG: &str =
        r#"{"repository": {"mode": "raw-github", "url": "https://github.com/acme/tool"}}"#;

    #[test]
    fn no_config_returns_none() {
        let temp = TempDir::new().unwrap();
        // The walk continues above the temp dir, but none of the system
        // directories above it carry a borrowr config.
        let loaded = load_config(temp.path()).unwrap();
        if let Some(l) = loaded {
            assert!(!l.path.starts_with(temp.path()));
        }
    }

    #[test]
    fn loads_json_rc_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".borrowrrc"), JSON_CONFIG).unwrap();

        let loaded = load_config(temp.path()).unwrap().unwrap();

        assert_eq!(loaded.path, temp.path().join(".borrowrrc"));
        assert!(loaded.config.repository.is_some());
    }

    #[test]
    fn loads_yaml_rc_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".borrowrrc.yml"),
            "remotes:\n  ui:\n    type: github-raw\n    url: https://github.com/acme/ui\n",
        )
        .unwrap();

        let loaded = load_config(temp.path()).unwrap().unwrap();

        assert!(loaded.config.remote("ui").is_ok());
    }

    #[test]
    fn walks_up_to_parent_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".borrowrrc"), JSON_CONFIG).unwrap();
        let nested = temp.path().join("packages").join("app");
        fs::create_dir_all(&nested).unwrap();

        let loaded = load_config(&nested).unwrap().unwrap();

        assert_eq!(loaded.path, temp.path().join(".borrowrrc"));
    }

    #[test]
    fn package_json_section_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "app", "borrowr": {"remotes": {"ui": {"type": "github-raw", "url": "https://github.com/acme/ui"}}}}"#,
        )
        .unwrap();
        fs::write(temp.path().join(".borrowrrc"), JSON_CONFIG).unwrap();

        let loaded = load_config(temp.path()).unwrap().unwrap();

        assert!(loaded.is_package_json());
        assert!(loaded.config.repository.is_none());
    }

    #[test]
    fn package_json_without_section_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{"name": "app"}"#).unwrap();
        fs::write(temp.path().join(".borrowrrc"), JSON_CONFIG).unwrap();

        let loaded = load_config(temp.path()).unwrap().unwrap();

        assert_eq!(loaded.path, temp.path().join(".borrowrrc"));
    }

    #[test]
    fn invalid_config_names_the_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".borrowrrc"), r#"{"unknown": true}"#).unwrap();

        let err = load_config(temp.path()).unwrap_err();

        match err {
            BorrowrError::ConfigurationInvalid { path, .. } => {
                assert_eq!(path, temp.path().join(".borrowrrc"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_rc_file_is_default_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".borrowrrc"), "\n").unwrap();

        let loaded = load_config(temp.path()).unwrap().unwrap();

        assert_eq!(loaded.config, BorrowrConfig::default());
    }

    #[test]
    fn write_then_load_keeps_values() {
        let temp = TempDir::new().unwrap();
        let mut config = BorrowrConfig {
            repository: Some(RepositoryConfig {
                mode: RepositoryMode::RawGithub,
                url: "https://github.com/acme/tool".into(),
            }),
            ..Default::default()
        };
        config.set_remote("ui", RemoteConfig::github_raw("https://github.com/acme/ui"));

        let path = config_write_path(temp.path(), None);
        write_config(&path, &config).unwrap();

        assert_eq!(path, temp.path().join(DEFAULT_CONFIG_FILE));
        let loaded = load_config(temp.path()).unwrap().unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn write_path_reuses_yaml_file_in_cwd() {
        let temp = TempDir::new().unwrap();
        let loaded = LoadedConfig {
            path: temp.path().join(".borrowrrc.yaml"),
            config: BorrowrConfig::default(),
        };
        assert_eq!(
            config_write_path(temp.path(), Some(&loaded)),
            temp.path().join(".borrowrrc.yaml")
        );
    }

    #[test]
    fn write_path_ignores_parent_config() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("child");
        let loaded = LoadedConfig {
            path: temp.path().join(".borrowrrc"),
            config: BorrowrConfig::default(),
        };
        assert_eq!(
            config_write_path(&child, Some(&loaded)),
            child.join(DEFAULT_CONFIG_FILE)
        );
    }

    #[test]
    fn write_fails_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join(DEFAULT_CONFIG_FILE);
        let err = write_config(&path, &BorrowrConfig::default()).unwrap_err();
        assert!(matches!(err, BorrowrError::TargetDirectoryMissing { .. }));
    }

    #[test]
    fn package_repository_string() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"repository": "https://github.com/acme/tool"}"#,
        )
        .unwrap();
        assert_eq!(
            package_repository_url(temp.path()),
            Some("https://github.com/acme/tool".to_string())
        );
    }

    #[test]
    fn package_repository_object() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"repository": {"type": "git", "url": "https://github.com/acme/tool.git"}}"#,
        )
        .unwrap();
        assert_eq!(
            package_repository_url(temp.path()),
            Some("https://github.com/acme/tool.git".to_string())
        );
    }

    #[test]
    fn package_repository_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(package_repository_url(temp.path()), None);
    }
}
