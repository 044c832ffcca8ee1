//! Add command implementation.
//!
//! `borrowr add` installs components from the project's own repository,
//! described by the top-level `.borrowmeta` index.

use std::path::{Path, PathBuf};

use crate::cli::args::AddArgs;
use crate::config::raw_github_base;
use crate::error::{BorrowrError, Result};
use crate::install::{InstallOptions, PackageInstaller};
use crate::registry::{RegistryLoader, RegistryTransport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{
    confirm_plans, known_ids, prompt_selection, report_outcome, require_config, resolve_cwd,
    run_plan, InstallPlan,
};

/// The add command implementation.
pub struct AddCommand<'a> {
    project_root: PathBuf,
    args: AddArgs,
    transport: &'a dyn RegistryTransport,
    packages: &'a dyn PackageInstaller,
}

impl<'a> AddCommand<'a> {
    /// Create a new add command.
    pub fn new(
        project_root: &Path,
        args: AddArgs,
        transport: &'a dyn RegistryTransport,
        packages: &'a dyn PackageInstaller,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            transport,
            packages,
        }
    }
}

impl Command for AddCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cwd = resolve_cwd(&self.project_root, self.args.cwd.as_deref())?;
        let loaded = require_config(&cwd)?;
        let repository = loaded.config.require_repository()?;
        let base = raw_github_base(&repository.url).map_err(|e| {
            BorrowrError::ConfigurationInvalid {
                path: loaded.path.clone(),
                message: format!("repository.url: {:#}", e),
            }
        })?;

        let loader = RegistryLoader::new(self.transport);
        let mut spinner = ui.start_spinner("Fetching components");
        let index = match loader.load_top_level_index(&base) {
            Ok(index) => {
                spinner.finish_success(&format!("Found {} component(s)", index.len()));
                index
            }
            Err(e) => {
                spinner.finish_error("Could not fetch components");
                return Err(e);
            }
        };

        let selected = if self.args.all {
            index.ids()
        } else if !self.args.components.is_empty() {
            known_ids(&index, self.args.components.clone(), &repository.url, ui)
        } else {
            let question = "Which components would you like to add?";
            prompt_selection(&index, "components", question, ui)?
        };

        if selected.is_empty() {
            ui.warning("No components selected. Nothing to do.");
            return Ok(CommandResult::success());
        }

        let target = match &self.args.path {
            Some(path) => cwd.join(path),
            None => cwd.clone(),
        };
        let plan = InstallPlan {
            source: repository.url.clone(),
            options: InstallOptions::new(target)
                .overwrite(self.args.overwrite)
                .strip_prefix(index.base_path.clone())
                .requested(selected.iter().cloned()),
            index,
            selected,
        };

        if !self.args.yes && !confirm_plans(std::slice::from_ref(&plan), ui)? {
            ui.message("Installation cancelled.");
            return Ok(CommandResult::success());
        }

        let report = run_plan(&plan, loader, self.packages, &cwd, ui)?;
        report_outcome(&report, ui);

        Ok(CommandResult::success())
    }
}
