//! Borrowr - Pull source components from remote registries into your project.
//!
//! Borrowr reads a registry index, expands the requested entries into
//! everything they depend on, downloads their files and writes them into
//! the project. Package dependencies the entries declare are handed to the
//! project's package manager afterwards.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.borrowrrc` discovery, parsing and writing
//! - [`detection`] - Package manager detection
//! - [`error`] - Error types and result aliases
//! - [`install`] - Writing fetched files and installing dependencies
//! - [`registry`] - Block specs, indexes, resolution and fetching
//! - [`shell`] - Process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use borrowr::registry::BlockSpec;
//!
//! let spec = BlockSpec::parse("ui:button").unwrap();
//! assert_eq!(spec.remote_id, "ui");
//! assert_eq!(spec.block_id.as_deref(), Some("button"));
//!
//! assert!(BlockSpec::parse(":button").is_err());
//! ```
//!
//! For end-to-end installs, see the integration tests.

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod install;
pub mod registry;
pub mod shell;
pub mod ui;

pub use error::{BorrowrError, Result};
