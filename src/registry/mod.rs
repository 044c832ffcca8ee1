//! Component registries.
//!
//! A registry is a versioned index of installable entries plus the files
//! those entries reference. This module covers everything from naming an
//! entry to holding its downloaded content:
//!
//! 1. [`block_spec`] parses `remote[:block]` references
//! 2. [`loader`] fetches and validates [`index`] documents
//! 3. [`resolver`] expands requested ids into their dependency closure
//! 4. [`payload`] downloads the files of every resolved entry
//!
//! # Example
//!
//! ```
//! use borrowr::registry::{fetch_tree, resolve_tree, MockTransport, RegistryLoader};
//!
//! let transport = MockTransport::new()
//!     .with(
//!         "https://x.dev/index.json",
//!         r#"{
//!             "version": "1.0.0",
//!             "baseUrl": "https://x.dev/files",
//!             "basePath": "",
//!             "registry": {
//!                 "a": {"files": ["a.txt"], "registryDependencies": ["b"]},
//!                 "b": {"files": ["b.txt"]}
//!             }
//!         }"#,
//!     )
//!     .with("https://x.dev/files/a.txt", "alpha")
//!     .with("https://x.dev/files/b.txt", "beta");
//!
//! let loader = RegistryLoader::new(&transport);
//! let index = loader.load_index("https://x.dev/index.json").unwrap();
//! let tree = resolve_tree(&index, &["a"]);
//! assert_eq!(tree.ids(), ["a", "b"]);
//!
//! let payload = fetch_tree(loader, &index.base_url, &tree).unwrap();
//! assert_eq!(payload.get("b").unwrap().raw_files, vec!["beta"]);
//! ```

pub mod block_spec;
pub mod fetch;
pub mod index;
pub mod loader;
pub mod payload;
pub mod resolver;

// Re-exports
pub use block_spec::BlockSpec;
pub use fetch::{HttpFetcher, MockTransport, RegistryTransport};
pub use index::{RegistryEntry, RegistryIndex};
pub use loader::{RegistryLoader, INDEX_FILE, MAX_CONCURRENT_FETCHES};
pub use payload::{fetch_tree, FetchedEntry, FetchedPayload};
pub use resolver::{resolve_tree, ResolvedTree};
