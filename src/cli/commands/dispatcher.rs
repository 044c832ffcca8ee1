//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use clap::CommandFactory;

use crate::cli::args::{Cli, Commands};
use crate::error::{BorrowrError, Result};
use crate::install::SystemPackageInstaller;
use crate::registry::HttpFetcher;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Init(args)) => {
                let cmd = super::init::InitCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Add(args)) => {
                let transport = HttpFetcher::new().map_err(BorrowrError::Other)?;
                let packages = SystemPackageInstaller::new();
                let cmd = super::add::AddCommand::new(
                    &self.project_root,
                    args.clone(),
                    &transport,
                    &packages,
                );
                cmd.execute(ui)
            }
            Some(Commands::Import(args)) => {
                let transport = HttpFetcher::new().map_err(BorrowrError::Other)?;
                let packages = SystemPackageInstaller::new();
                let cmd = super::import::ImportCommand::new(
                    &self.project_root,
                    args.clone(),
                    &transport,
                    &packages,
                );
                cmd.execute(ui)
            }
            Some(Commands::Remote(args)) => {
                let cmd = super::remote::RemoteCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                Cli::command().print_help()?;
                Ok(CommandResult::success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn dispatches_remote_list() {
        let temp = tempfile::TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = Cli::parse_from(["borrowr", "remote", "list"]);
        let mut ui = crate::ui::MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No remotes configured"));
    }

    #[test]
    fn dispatches_remote_add() {
        let temp = tempfile::TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = Cli::parse_from([
            "borrowr",
            "remote",
            "add",
            "https://github.com/acme/ui",
            "ui",
        ]);
        let mut ui = crate::ui::MockUI::new();

        dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(temp.path().join(".borrowrrc").exists());
    }
}
