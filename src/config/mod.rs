//! Project configuration.
//!
//! Borrowr reads a small config file describing the project's own component
//! repository (used by `add`) and any named remotes (used by `import`).
//!
//! - [`schema`] defines the config structures
//! - [`loader`] discovers, parses and writes config files
//! - [`remote_url`] turns configured URLs into download URLs

pub mod loader;
pub mod remote_url;
pub mod schema;

pub use loader::{
    config_write_path, load_config, package_repository_url, write_config, LoadedConfig,
    DEFAULT_CONFIG_FILE,
};
pub use remote_url::{default_remote_name, raw_github_base, remote_index_url};
pub use schema::{BorrowrConfig, RemoteConfig, RemoteKind, RepositoryConfig, RepositoryMode};
