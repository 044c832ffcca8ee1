//! Project detection.
//!
//! Currently limited to figuring out which JavaScript package manager a
//! project uses, so declared dependencies are installed the way the
//! project expects.

pub mod package_manager;

pub use package_manager::{PackageManager, PackageManagerDetector};
