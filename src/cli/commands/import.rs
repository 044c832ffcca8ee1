//! Import command implementation.
//!
//! `borrowr import ui:button forms` pulls blocks from named remotes. Each
//! remote installs into its own directory under the target, so blocks
//! sharing an id across remotes never collide.

use std::path::{Path, PathBuf};

use crate::cli::args::ImportArgs;
use crate::config::{remote_index_url, RemoteConfig};
use crate::error::{BorrowrError, Result};
use crate::install::{InstallOptions, InstallReport, PackageInstaller};
use crate::registry::{BlockSpec, RegistryLoader, RegistryTransport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{
    confirm_plans, known_ids, prompt_selection, report_outcome, require_config, resolve_cwd,
    run_plan, InstallPlan,
};

/// Directory blocks go to when `--path` is not given.
pub const DEFAULT_BLOCKS_DIR: &str = "src/blocks";

/// Block specs grouped by remote, in first-mention order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// Remote name.
    pub remote: String,
    /// Whether a bare `remote` spec asked for the whole remote.
    pub whole_remote: bool,
    /// Block ids named explicitly.
    pub blocks: Vec<String>,
}

/// Parse every spec and group them by remote.
///
/// All specs are parsed before anything else happens, so one bad spec
/// fails the command without touching the network.
pub fn group_specs(specs: &[String]) -> Result<Vec<RemoteRequest>> {
    let mut requests: Vec<RemoteRequest> = Vec::new();

    for raw in specs {
        let spec = BlockSpec::parse(raw)?;
        let index = match requests.iter().position(|r| r.remote == spec.remote_id) {
            Some(i) => i,
            None => {
                requests.push(RemoteRequest {
                    remote: spec.remote_id.clone(),
                    whole_remote: false,
                    blocks: Vec::new(),
                });
                requests.len() - 1
            }
        };

        let request = &mut requests[index];
        match spec.block_id {
            Some(block) if !request.blocks.contains(&block) => request.blocks.push(block),
            Some(_) => {}
            None => request.whole_remote = true,
        }
    }

    Ok(requests)
}

/// The import command implementation.
pub struct ImportCommand<'a> {
    project_root: PathBuf,
    args: ImportArgs,
    transport: &'a dyn RegistryTransport,
    packages: &'a dyn PackageInstaller,
}

impl<'a> ImportCommand<'a> {
    /// Create a new import command.
    pub fn new(
        project_root: &Path,
        args: ImportArgs,
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

    fn target_root(&self, cwd: &Path) -> PathBuf {
        match &self.args.path {
            Some(path) => cwd.join(path),
            None => cwd.join(DEFAULT_BLOCKS_DIR),
        }
    }

    fn plan_remote(
        &self,
        request: &RemoteRequest,
        remote: &RemoteConfig,
        index_url: &str,
        cwd: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallPlan> {
        let loader = RegistryLoader::new(self.transport);
        let mut spinner = ui.start_spinner(&format!("Fetching index of {}", request.remote));
        let index = match loader.load_index(index_url) {
            Ok(index) => {
                spinner.finish_success(&format!(
                    "{}: {} block(s) available",
                    request.remote,
                    index.len()
                ));
                index
            }
            Err(e) => {
                spinner.finish_error(&format!("Could not fetch index of {}", request.remote));
                return Err(e);
            }
        };

        let mut selected = known_ids(&index, request.blocks.clone(), &request.remote, ui);
        if request.whole_remote {
            let whole = if self.args.all {
                index.ids()
            } else {
                let key = format!("blocks_{}", request.remote);
                let question = format!("Which blocks would you like from {}?", request.remote);
                prompt_selection(&index, &key, &question, ui)?
            };
            for id in whole {
                if !selected.contains(&id) {
                    selected.push(id);
                }
            }
        }

        tracing::debug!("Remote {} ({}): selected {:?}", request.remote, remote.url, selected);

        let options = InstallOptions::new(self.target_root(cwd))
            .overwrite(self.args.overwrite)
            .strip_prefix(index.base_path.clone())
            .prefix_segments([request.remote.as_str()])
            .requested(selected.iter().cloned());

        Ok(InstallPlan {
            source: request.remote.clone(),
            index,
            selected,
            options,
        })
    }
}

impl Command for ImportCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let requests = group_specs(&self.args.specs)?;
        let cwd = resolve_cwd(&self.project_root, self.args.cwd.as_deref())?;
        let loaded = require_config(&cwd)?;

        // Every remote must be known, and its URL usable, before any fetch.
        let mut remotes = Vec::with_capacity(requests.len());
        for request in &requests {
            let remote = loaded.config.remote(&request.remote)?;
            let index_url =
                remote_index_url(&remote.url).map_err(|e| BorrowrError::ConfigurationInvalid {
                    path: loaded.path.clone(),
                    message: format!("remotes.{}.url: {:#}", request.remote, e),
                })?;
            remotes.push((request, remote, index_url));
        }

        let mut plans = Vec::with_capacity(remotes.len());
        for (request, remote, index_url) in remotes {
            let plan = self.plan_remote(request, remote, &index_url, &cwd, ui)?;
            if !plan.selected.is_empty() {
                plans.push(plan);
            }
        }

        if plans.is_empty() {
            ui.warning("No blocks selected. Nothing to do.");
            return Ok(CommandResult::success());
        }

        if !self.args.yes && !confirm_plans(&plans, ui)? {
            ui.message("Installation cancelled.");
            return Ok(CommandResult::success());
        }

        let loader = RegistryLoader::new(self.transport);
        let mut report = InstallReport::default();
        for plan in &plans {
            report.merge(run_plan(plan, loader, self.packages, &cwd, ui)?);
        }
        report_outcome(&report, ui);

        Ok(CommandResult::success())
    }
}
