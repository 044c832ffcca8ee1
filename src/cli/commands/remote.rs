//! Remote command implementation.
//!
//! `borrowr remote add <url> [name]` registers a remote; `borrowr remote`
//! and `borrowr remote list` show what is configured.

use std::path::{Path, PathBuf};

use crate::cli::args::{RemoteAddArgs, RemoteArgs, RemoteCommands, RemoteListArgs};
use crate::config::{
    config_write_path, default_remote_name, load_config, remote_index_url, write_config,
    RemoteConfig,
};
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{config_or_default, resolve_cwd, warn_if_shadowed};

/// The remote command implementation.
pub struct RemoteCommand {
    project_root: PathBuf,
    args: RemoteArgs,
}

impl RemoteCommand {
    /// Create a new remote command.
    pub fn new(project_root: &Path, args: RemoteArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn add(&self, args: &RemoteAddArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cwd = resolve_cwd(&self.project_root, args.cwd.as_deref())?;
        // Reject URLs that could never be fetched before asking anything.
        remote_index_url(&args.url)?;

        let loaded = load_config(&cwd)?;

        let name = match &args.name {
            Some(name) => name.trim().to_string(),
            None => {
                let suggested = default_remote_name(&args.url);
                let prompt =
                    Prompt::input("remote_name", "Name for this remote", suggested.as_deref());
                ui.prompt(&prompt)?.as_string().trim().to_string()
            }
        };

        if name.is_empty() {
            ui.warning("No remote name given. Nothing to do.");
            return Ok(CommandResult::success());
        }

        let mut config = config_or_default(loaded.as_ref());
        if let Some(existing) = config.remotes.as_ref().and_then(|r| r.get(&name)) {
            ui.warning(&format!(
                "Replacing remote '{}' (was {})",
                name, existing.url
            ));
        }
        config.set_remote(&name, RemoteConfig::github_raw(args.url.clone()));

        let path = config_write_path(&cwd, loaded.as_ref());
        write_config(&path, &config)?;

        ui.success(&format!("Added remote '{}' ({})", name, args.url));
        warn_if_shadowed(loaded.as_ref(), &path, ui);
        ui.show_hint(&format!("Run `borrowr import {}` to pick blocks from it.", name));

        Ok(CommandResult::success())
    }

    fn list(&self, args: &RemoteListArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cwd = resolve_cwd(&self.project_root, args.cwd.as_deref())?;
        let remotes = load_config(&cwd)?
            .and_then(|l| l.config.remotes)
            .unwrap_or_default();

        if remotes.is_empty() {
            ui.message("No remotes configured.");
            ui.show_hint("Run `borrowr remote add <url>` to add one.");
            return Ok(CommandResult::success());
        }

        let width = remotes.keys().map(String::len).max().unwrap_or(0);
        for (name, remote) in &remotes {
            ui.message(&format!("{:<width$}  {}", name, remote.url, width = width));
        }

        Ok(CommandResult::success())
    }
}

impl Command for RemoteCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.command {
            Some(RemoteCommands::Add(args)) => self.add(args, ui),
            Some(RemoteCommands::List(args)) => self.list(args, ui),
            None => self.list(&RemoteListArgs::default(), ui),
        }
    }
}
