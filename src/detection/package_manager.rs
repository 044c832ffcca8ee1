//! Package manager detection.

use std::fmt;
use std::path::Path;

/// JavaScript package managers borrowr can install dependencies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Executable name.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Subcommand that adds packages to the project.
    pub fn add_subcommand(&self) -> &'static str {
        match self {
            Self::Npm => "install",
            Self::Yarn | Self::Pnpm | Self::Bun => "add",
        }
    }

    /// Full argument list for installing `packages`.
    pub fn install_args(&self, packages: &[String]) -> Vec<String> {
        std::iter::once(self.add_subcommand().to_string())
            .chain(packages.iter().cloned())
            .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Detects the package manager a project uses from its lockfile.
pub struct PackageManagerDetector;

impl PackageManagerDetector {
    /// Detect the package manager for `project_root`, defaulting to npm.
    pub fn detect(project_root: &Path) -> PackageManager {
        let exists = |name: &str| project_root.join(name).is_file();

        if exists("bun.lockb") || exists("bun.lock") {
            PackageManager::Bun
        } else if exists("pnpm-lock.yaml") {
            PackageManager::Pnpm
        } else if exists("yarn.lock") {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }
}
