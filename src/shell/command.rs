//! Running external programs.
//!
//! Programs are spawned directly (no shell), so package names reach the
//! package manager unmodified. Standard streams are inherited.

use crate::error::{BorrowrError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Result of running a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Whether the program exited with status 0.
    pub success: bool,
}

impl CommandResult {
    /// Describe why an unsuccessful run failed.
    pub fn failure_reason(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by a signal".to_string(),
        }
    }
}

/// Options for running a program.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,
}

/// Render a program and its arguments as a single display string.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args` and wait for it to finish.
///
/// A program that cannot be spawned is reported as
/// [`BorrowrError::InstallDependencies`] carrying the spawn error; a
/// non-zero exit is returned as an unsuccessful [`CommandResult`].
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    tracing::debug!("Running `{}`", display_command(program, args));

    let status = cmd
        .status()
        .map_err(|e| BorrowrError::InstallDependencies {
            command: display_command(program, args),
            reason: format!("could not start: {}", e),
        })?;

    Ok(CommandResult {
        exit_code: status.code(),
        success: status.success(),
    })
}
