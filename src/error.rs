//! Error types for borrowr operations.
//!
//! This module defines [`BorrowrError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `BorrowrError` for failures the user has to act on (bad input,
//!   missing configuration, unreachable registries, unwritable files)
//! - Use `anyhow::Error` (via `BorrowrError::Other`) inside collaborators
//!   and convert at the module boundary
//! - Every message names the resource at fault: a path, a URL or a remote

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for borrowr operations.
#[derive(Debug, Error)]
pub enum BorrowrError {
    /// A `remote[:block]` identifier could not be parsed.
    #[error("Invalid block-spec '{spec}': {message}")]
    InvalidBlockSpec { spec: String, message: String },

    /// No configuration, or a section required by the command is absent.
    #[error("Configuration missing: {message}")]
    ConfigurationMissing { message: String },

    /// Configuration file exists but does not match the schema.
    #[error("Invalid configuration found in {path}: {message}")]
    ConfigurationInvalid { path: PathBuf, message: String },

    /// A block-spec names a remote that is not configured.
    #[error("Remote '{name}' not found. Run `borrowr remote add <url> {name}` to add it.")]
    UnknownRemote { name: String },

    /// Working directory passed on the command line does not exist.
    #[error("The path {path} does not exist. Please try again.")]
    TargetDirectoryMissing { path: PathBuf },

    /// Index document or component file could not be retrieved.
    #[error("Failed to fetch registry from {url}: {message}")]
    RegistryFetch { url: String, message: String },

    /// Index document was retrieved but failed validation.
    #[error("Invalid registry index at {url}: {message}")]
    InvalidRegistryIndex { url: String, message: String },

    /// Writing a component file (or creating its directory) failed.
    #[error("Failed to install {path}: {source}")]
    Install {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The package manager could not install declared dependencies.
    #[error("Failed to install dependencies with `{command}`: {reason}")]
    InstallDependencies { command: String, reason: String },

    /// A prompt has no answer outside a terminal.
    #[error("Cannot prompt for '{key}' in non-interactive mode (no default value)")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for borrowr operations.
pub type Result<T> = std::result::Result<T, BorrowrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_block_spec_displays_spec_and_message() {
        let err = BorrowrError::InvalidBlockSpec {
            spec: ":button".into(),
            message: "Missing remote id".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains(":button"));
        assert!(msg.contains("Missing remote id"));
    }

    #[test]
    fn configuration_invalid_displays_path() {
        let err = BorrowrError::ConfigurationInvalid {
            path: PathBuf::from("/work/.borrowrrc"),
            message: "unknown field `extra`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/work/.borrowrrc"));
        assert!(msg.contains("unknown field"));
    }

    #[test]
    fn unknown_remote_displays_name() {
        let err = BorrowrError::UnknownRemote {
            name: "acme".into(),
        };
        assert!(err.to_string().contains("'acme'"));
    }

    #[test]
    fn registry_fetch_displays_url() {
        let err = BorrowrError::RegistryFetch {
            url: "https://example.com/registry".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/registry"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn install_error_displays_path() {
        let err = BorrowrError::Install {
            path: PathBuf::from("/work/src/button.tsx"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/work/src/button.tsx"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn install_dependencies_displays_command_and_reason() {
        let err = BorrowrError::InstallDependencies {
            command: "npm install left-pad".into(),
            reason: "could not start: No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("npm install left-pad"));
        assert!(msg.contains("could not start: No such file or directory"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BorrowrError = io_err.into();
        assert!(matches!(err, BorrowrError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: BorrowrError = anyhow::anyhow!("something odd").into();
        assert_eq!(err.to_string(), "something odd");
    }

    #[test]
    fn prompt_unavailable_names_key() {
        let err = BorrowrError::PromptUnavailable {
            key: "remote_name".into(),
        };
        assert!(err.to_string().contains("'remote_name'"));
    }
}
