//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. `add` and `import` share the
//! resolve, fetch and install steps in [`pipeline`]; they receive their
//! transport and package installer from the dispatcher so tests can swap
//! in [`MockTransport`](crate::registry::MockTransport) and
//! [`RecordingInstaller`](crate::install::RecordingInstaller).

pub mod add;
pub mod completions;
pub mod dispatcher;
pub mod import;
pub mod init;
pub mod pipeline;
pub mod remote;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
