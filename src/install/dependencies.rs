//! Installing package dependencies declared by entries.
//!
//! Every installed entry with a non-empty `dependencies` list produces one
//! package-manager call carrying exactly that list. Overlap between entries
//! is left to the package manager, whose installs are idempotent.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::detection::{PackageManager, PackageManagerDetector};
use crate::error::{BorrowrError, Result};
use crate::registry::payload::FetchedPayload;
use crate::shell::command::{display_command, execute, CommandOptions};

/// Installs packages into a project.
pub trait PackageInstaller {
    /// Install `packages` in the project at `cwd`.
    fn install(&self, cwd: &Path, packages: &[String]) -> Result<()>;
}

/// Runs the project's real package manager.
#[derive(Debug, Default)]
pub struct SystemPackageInstaller;

impl SystemPackageInstaller {
    /// Create a system installer.
    pub fn new() -> Self {
        Self
    }
}

impl PackageInstaller for SystemPackageInstaller {
    fn install(&self, cwd: &Path, packages: &[String]) -> Result<()> {
        let manager = PackageManagerDetector::detect(cwd);
        let args = manager.install_args(packages);

        let options = CommandOptions {
            cwd: Some(cwd.to_path_buf()),
        };
        let result = execute(manager.program(), &args, &options)?;

        if !result.success {
            return Err(BorrowrError::InstallDependencies {
                command: display_command(manager.program(), &args),
                reason: result.failure_reason(),
            });
        }

        Ok(())
    }
}

/// Records install requests instead of running anything.
///
/// # Example
///
/// ```
/// use borrowr::install::{PackageInstaller, RecordingInstaller};
/// use std::path::Path;
///
/// let installer = RecordingInstaller::new();
/// installer.install(Path::new("/work"), &["left-pad".to_string()]).unwrap();
/// assert_eq!(installer.calls()[0].1, vec!["left-pad"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl RecordingInstaller {
    /// Create an installer with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far as `(cwd, packages)`.
    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, cwd: &Path, packages: &[String]) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((cwd.to_path_buf(), packages.to_vec()));
        }
        Ok(())
    }
}

/// Issue one install per entry in `entries` that declares dependencies.
///
/// `entries` are ids as reported by the installer; ids not present in the
/// payload are ignored. Returns the number of install calls made.
pub fn install_dependencies(
    payload: &FetchedPayload,
    entries: &[String],
    cwd: &Path,
    installer: &dyn PackageInstaller,
) -> Result<usize> {
    let mut calls = 0;

    for id in entries {
        let Some(fetched) = payload.get(id) else {
            continue;
        };
        let packages = &fetched.entry.dependencies;
        if packages.is_empty() {
            continue;
        }

        tracing::debug!("Installing dependencies of {}: {:?}", id, packages);
        installer.install(cwd, packages)?;
        calls += 1;
    }

    Ok(calls)
}

/// Package manager that would be used for `cwd`.
pub fn detected_package_manager(cwd: &Path) -> PackageManager {
    PackageManagerDetector::detect(cwd)
}
