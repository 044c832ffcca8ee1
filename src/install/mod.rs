//! Installing fetched entries into a project.
//!
//! - [`reconciler`] maps declared file paths to destinations and writes
//!   them, honoring the overwrite policy
//! - [`dependencies`] hands each entry's package dependencies to the
//!   package manager

pub mod dependencies;
pub mod reconciler;

pub use dependencies::{
    detected_package_manager, install_dependencies, PackageInstaller, RecordingInstaller,
    SystemPackageInstaller,
};
pub use reconciler::{InstallOptions, InstallReport, Installer};
