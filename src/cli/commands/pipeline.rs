//! Shared steps of the `add` and `import` commands.
//!
//! Both commands end the same way: resolve the selected entries against an
//! index, download everything the closure needs, write it under the target
//! directory and hand declared packages to the package manager.

use std::path::{Path, PathBuf};

use crate::config::{load_config, BorrowrConfig, LoadedConfig};
use crate::error::{BorrowrError, Result};
use crate::install::{
    detected_package_manager, install_dependencies, InstallOptions, InstallReport, Installer,
    PackageInstaller,
};
use crate::registry::{fetch_tree, resolve_tree, RegistryIndex, RegistryLoader};
use crate::ui::{Prompt, UserInterface};

/// Resolve the `--cwd` argument against the process working directory.
///
/// The directory has to exist.
pub fn resolve_cwd(project_root: &Path, cwd: Option<&Path>) -> Result<PathBuf> {
    let dir = match cwd {
        Some(dir) => project_root.join(dir),
        None => project_root.to_path_buf(),
    };

    if !dir.is_dir() {
        return Err(BorrowrError::TargetDirectoryMissing { path: dir });
    }

    Ok(dir)
}

/// Load the configuration for `cwd`, failing when there is none.
pub fn require_config(cwd: &Path) -> Result<LoadedConfig> {
    load_config(cwd)?.ok_or_else(|| BorrowrError::ConfigurationMissing {
        message: format!(
            "No borrowr configuration found in {} or its parents. Please run `borrowr init` first.",
            cwd.display()
        ),
    })
}

/// Entries to install from one index.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Label shown to the user (remote name or repository).
    pub source: String,
    /// The index the entries come from.
    pub index: RegistryIndex,
    /// Ids the user selected, in selection order.
    pub selected: Vec<String>,
    /// Where files go.
    pub options: InstallOptions,
}

/// Drop ids the index does not know, warning about each.
pub fn known_ids(
    index: &RegistryIndex,
    requested: Vec<String>,
    source: &str,
    ui: &mut dyn UserInterface,
) -> Vec<String> {
    let mut ids = Vec::with_capacity(requested.len());
    for id in requested {
        if !index.contains(&id) {
            ui.warning(&format!("'{}' was not found in {}, skipping", id, source));
        } else if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Ask which entries of `index` to install.
pub fn prompt_selection(
    index: &RegistryIndex,
    key: &str,
    question: &str,
    ui: &mut dyn UserInterface,
) -> Result<Vec<String>> {
    let prompt = Prompt::multi_select(key, question, &index.ids());
    Ok(ui.prompt(&prompt)?.into_strings())
}

/// List the plans and ask whether to go ahead.
pub fn confirm_plans(plans: &[InstallPlan], ui: &mut dyn UserInterface) -> Result<bool> {
    ui.show_header("The following will be installed");
    for plan in plans {
        ui.message(&format!("  {}", plan.source));
        for id in &plan.selected {
            ui.message(&format!("    - {}", id));
        }
    }

    let prompt = Prompt::confirm("proceed", "Ready to install. Proceed?", true);
    Ok(ui.prompt(&prompt)?.as_bool())
}

/// Resolve, fetch and write one plan, then install its packages.
pub fn run_plan(
    plan: &InstallPlan,
    loader: RegistryLoader<'_>,
    packages: &dyn PackageInstaller,
    package_root: &Path,
    ui: &mut dyn UserInterface,
) -> Result<InstallReport> {
    let tree = resolve_tree(&plan.index, &plan.selected);

    let mut spinner = ui.start_spinner(&format!(
        "Fetching {} block(s) from {}",
        tree.len(),
        plan.source
    ));
    let payload = match fetch_tree(loader, &plan.index.base_url, &tree) {
        Ok(payload) => {
            spinner.finish_success(&format!(
                "Fetched {} block(s) from {}",
                payload.len(),
                plan.source
            ));
            payload
        }
        Err(e) => {
            spinner.finish_error(&format!("Could not fetch blocks from {}", plan.source));
            return Err(e);
        }
    };

    let installer = Installer::new(plan.options.clone());
    let report = installer.install(&payload, &mut |path: &Path| -> Result<bool> {
        let question = format!("{} already exists. Overwrite?", path.display());
        Ok(ui.prompt(&Prompt::confirm("overwrite", question, false))?.as_bool())
    })?;

    if ui.output_mode().shows_details() {
        for path in &report.written {
            ui.message(&format!("  wrote {}", path.display()));
        }
    }
    for path in &report.skipped {
        ui.warning(&format!("Skipped existing {}", path.display()));
    }

    let wanted = payload
        .entries()
        .iter()
        .filter(|e| !e.entry.dependencies.is_empty())
        .count();
    if wanted > 0 {
        let mut spinner = ui.start_spinner("Detecting package manager");
        spinner.set_message(&format!(
            "Installing dependencies with {}",
            detected_package_manager(package_root)
        ));
        match install_dependencies(&payload, &report.entries, package_root, packages) {
            Ok(calls) => {
                spinner.finish_success(&format!("Installed dependencies of {} block(s)", calls))
            }
            Err(e) => {
                spinner.finish_error("Could not install dependencies");
                return Err(e);
            }
        }
    }

    Ok(report)
}

/// Print the outcome of a finished run.
pub fn report_outcome(report: &InstallReport, ui: &mut dyn UserInterface) {
    ui.success(&format!(
        "Installed {} block(s): {} file(s) written, {} skipped",
        report.entries.len(),
        report.written.len(),
        report.skipped.len()
    ));
}

/// Warn when `package.json` config will shadow a freshly written rc file.
pub fn warn_if_shadowed(
    loaded: Option<&LoadedConfig>,
    written: &Path,
    ui: &mut dyn UserInterface,
) {
    if let Some(l) = loaded {
        if l.is_package_json() && l.path.parent() == written.parent() {
            ui.warning(&format!(
                "{} has a \"borrowr\" section, which takes precedence over {}",
                l.path.display(),
                written.display()
            ));
        }
    }
}

/// The configuration to modify: the loaded one, or an empty one.
pub fn config_or_default(loaded: Option<&LoadedConfig>) -> BorrowrConfig {
    loaded.map(|l| l.config.clone()).unwrap_or_default()
}
