//! Init command implementation.
//!
//! `borrowr init` records the project's component repository in the
//! config file, keeping any remotes already configured.

use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{
    config_write_path, load_config, package_repository_url, raw_github_base, write_config,
    RepositoryConfig, RepositoryMode,
};
use crate::error::{BorrowrError, Result};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{config_or_default, resolve_cwd, warn_if_shadowed};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cwd = resolve_cwd(&self.project_root, self.args.cwd.as_deref())?;
        let loaded = load_config(&cwd)?;

        let suggested = package_repository_url(&cwd).or_else(|| {
            loaded
                .as_ref()
                .and_then(|l| l.config.repository.as_ref())
                .map(|r| r.url.clone())
        });

        let url = if self.args.defaults {
            suggested.ok_or_else(|| BorrowrError::ConfigurationMissing {
                message: format!(
                    "No repository found in {}. Run `borrowr init` without --defaults to enter one.",
                    cwd.join("package.json").display()
                ),
            })?
        } else {
            let prompt = Prompt::input(
                "repository_url",
                "Repository URL of your components",
                suggested.as_deref(),
            );
            ui.prompt(&prompt)?.as_string().trim().to_string()
        };

        if url.is_empty() {
            ui.warning("No repository URL given. Nothing to do.");
            return Ok(CommandResult::success());
        }

        let path = config_write_path(&cwd, loaded.as_ref());
        raw_github_base(&url).map_err(|e| BorrowrError::ConfigurationInvalid {
            path: path.clone(),
            message: format!("repository.url: {:#}", e),
        })?;

        let mut config = config_or_default(loaded.as_ref());
        config.repository = Some(RepositoryConfig {
            mode: RepositoryMode::RawGithub,
            url: url.clone(),
        });

        if !self.args.yes {
            let question = format!("Write configuration to {}?", path.display());
            if !ui.prompt(&Prompt::confirm("write_config", question, true))?.as_bool() {
                ui.message("Initialization cancelled.");
                return Ok(CommandResult::success());
            }
        }

        write_config(&path, &config)?;
        ui.success(&format!("Wrote {}", path.display()));
        warn_if_shadowed(loaded.as_ref(), &path, ui);
        ui.show_hint("Run `borrowr add` to pick components from your repository.");

        Ok(CommandResult::success())
    }
}
