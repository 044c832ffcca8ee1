//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Borrowr - Pull components from remote registries into your project.
#[derive(Debug, Parser)]
#[command(name = "borrowr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configure the project's component repository
    Init(InitArgs),

    /// Add components from the project's repository
    Add(AddArgs),

    /// Import blocks from configured remotes
    #[command(visible_alias = "i")]
    Import(ImportArgs),

    /// Manage remote registries
    Remote(RemoteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Use the repository from package.json without prompting
    #[arg(short, long)]
    pub defaults: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Components to add
    #[arg(value_name = "COMPONENTS")]
    pub components: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Add all available components
    #[arg(short, long)]
    pub all: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Directory to add the components to, relative to the working directory
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ImportArgs {
    /// Blocks to import, as `remote` or `remote:block`
    #[arg(value_name = "BLOCK_SPECS", required = true)]
    pub specs: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Import every block of remotes named without a block
    #[arg(short, long)]
    pub all: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Directory blocks are imported into (defaults to src/blocks)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

/// Arguments for the `remote` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub command: Option<RemoteCommands>,
}

/// Remote subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RemoteCommands {
    /// Add a remote registry
    Add(RemoteAddArgs),

    /// List configured remotes
    #[command(visible_alias = "ls")]
    List(RemoteListArgs),
}

/// Arguments for `remote add`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoteAddArgs {
    /// Repository or index URL of the remote
    pub url: String,

    /// Name to refer to the remote by
    pub name: Option<String>,

    /// Working directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for `remote list`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoteListArgs {
    /// Working directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
