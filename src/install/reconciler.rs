//! Writing fetched entries to disk.
//!
//! Each declared file path is mapped to a destination under the target
//! root, checked against what is already there, and written verbatim.
//!
//! # Conflict policy
//!
//! When a destination already exists and overwriting is off:
//! - files of entries the user asked for go through the confirmation callback
//! - files of entries pulled in only as registry dependencies are skipped
//!   without asking
//!
//! Installation is not atomic. An interrupt or a failed write leaves the
//! files written so far in place.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{BorrowrError, Result};
use crate::registry::payload::FetchedPayload;

/// Where and how to install a payload.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Directory everything is written under.
    pub target_root: PathBuf,
    /// Replace existing files without asking.
    pub overwrite: bool,
    /// Leading prefix removed from declared paths (e.g. `cli/`).
    pub strip_prefix: String,
    /// Directories inserted between the root and the declared path,
    /// e.g. `["src", "blocks", "<remote>"]` to keep remotes apart.
    pub prefix_segments: Vec<String>,
    /// Entry ids the user selected explicitly.
    pub requested: HashSet<String>,
}

impl InstallOptions {
    /// Options installing into `target_root` with no prefix handling.
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper for the overwrite flag.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builder-style helper for the stripped prefix.
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }

    /// Builder-style helper for namespace segments.
    pub fn prefix_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper for the explicitly requested ids.
    pub fn requested<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Compute the destination of a declared file path.
    pub fn destination(&self, declared: &str) -> Result<PathBuf> {
        let relative = declared
            .strip_prefix(self.strip_prefix.as_str())
            .unwrap_or(declared);

        let segments: Vec<&str> = relative
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        let mut dest = self.target_root.clone();
        let all = self
            .prefix_segments
            .iter()
            .map(String::as_str)
            .chain(segments.iter().copied());

        for segment in all {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) => dest.push(part),
                _ => return Err(escape_error(&self.target_root, declared)),
            }
        }

        if segments.is_empty() {
            return Err(escape_error(&self.target_root, declared));
        }

        Ok(dest)
    }
}

fn escape_error(root: &Path, declared: &str) -> BorrowrError {
    BorrowrError::Install {
        path: root.join(declared),
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' does not name a file inside the target directory", declared),
        ),
    }
}

/// What an install run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Files left untouched because they already existed.
    pub skipped: Vec<PathBuf>,
    /// Ids of every entry processed, in payload order.
    pub entries: Vec<String>,
}

impl InstallReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: InstallReport) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.entries.extend(other.entries);
    }
}

/// Writes payloads to the filesystem.
#[derive(Debug, Clone)]
pub struct Installer {
    options: InstallOptions,
}

impl Installer {
    /// Create an installer.
    pub fn new(options: InstallOptions) -> Self {
        Self { options }
    }

    /// Get the install options.
    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Install every file of every entry in `payload`.
    ///
    /// `confirm_overwrite` is asked, in file order, whether an existing file
    /// of an explicitly requested entry may be replaced. Directory creation
    /// and write failures abort the run.
    pub fn install(
        &self,
        payload: &FetchedPayload,
        confirm_overwrite: &mut dyn FnMut(&Path) -> Result<bool>,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        for fetched in payload.entries() {
            let explicit = self.options.requested.contains(&fetched.id);

            for (declared, content) in fetched.files() {
                let dest = self.options.destination(declared)?;

                if let Some(dir) = dest.parent() {
                    fs::create_dir_all(dir).map_err(|source| BorrowrError::Install {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }

                if dest.exists() && !self.options.overwrite {
                    let replace = explicit && confirm_overwrite(&dest)?;
                    if !replace {
                        tracing::debug!(
                            "Skipping existing {} ({})",
                            dest.display(),
                            if explicit { "declined" } else { "registry dependency" }
                        );
                        report.skipped.push(dest);
                        continue;
                    }
                }

                tracing::debug!("Writing {} -> {}", declared, dest.display());
                fs::write(&dest, content).map_err(|source| BorrowrError::Install {
                    path: dest.clone(),
                    source,
                })?;
                report.written.push(dest);
            }

            report.entries.push(fetched.id.clone());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::index::RegistryEntry;
    use crate::registry::payload::FetchedEntry;
    use tempfile::TempDir;

    fn fetched(id: &str, files: &[(&str, &str)]) -> FetchedEntry {
        FetchedEntry {
            id: id.to_string(),
            entry: RegistryEntry::new(files.iter().map(|(p, _)| p.to_string()).collect()),
            raw_files: files.iter().map(|(_, c)| c.to_string()).collect(),
        }
    }

    fn never_asked(path: &Path) -> Result<bool> {
        panic!("unexpected overwrite prompt for {}", path.display())
    }

    #[test]
    fn destination_strips_prefix_and_nests() {
        let opts = InstallOptions::new("/work")
            .strip_prefix("cli/")
            .prefix_segments(["src", "blocks"]);
        assert_eq!(
            opts.destination("cli/commands/init.ts").unwrap(),
            PathBuf::from("/work/src/blocks/commands/init.ts")
        );
    }

    #[test]
    fn destination_ignores_absent_prefix() {
        let opts = InstallOptions::new("/work").strip_prefix("cli/");
        assert_eq!(
            opts.destination("lib/util.ts").unwrap(),
            PathBuf::from("/work/lib/util.ts")
        );
    }

    #[test]
    fn destination_drops_leading_slash_left_by_strip() {
        let opts = InstallOptions::new("/work").strip_prefix("registry");
        assert_eq!(
            opts.destination("registry/button/button.tsx").unwrap(),
            PathBuf::from("/work/button/button.tsx")
        );
    }

    #[test]
    fn destination_rejects_parent_segments() {
        let opts = InstallOptions::new("/work");
        assert!(matches!(
            opts.destination("../outside.txt"),
            Err(BorrowrError::Install { .. })
        ));
    }

    #[test]
    fn destination_rejects_empty_path() {
        let opts = InstallOptions::new("/work").strip_prefix("cli/");
        assert!(opts.destination("cli/").is_err());
    }

    #[test]
    fn writes_into_empty_directory() {
        let temp = TempDir::new().unwrap();
        let payload = FetchedPayload::from_entries(vec![fetched(
            "a",
            &[("nested/dir/a.txt", "alpha\n"), ("b.txt", "beta")],
        )]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        let report = installer.install(&payload, &mut never_asked).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.entries, vec!["a"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("nested/dir/a.txt")).unwrap(),
            "alpha\n"
        );
        assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "beta");
    }

    #[test]
    fn declined_prompt_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "mine").unwrap();
        let payload = FetchedPayload::from_entries(vec![fetched("a", &[("a.txt", "theirs")])]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        let mut asked = Vec::new();
        let report = installer
            .install(&payload, &mut |p: &Path| {
                asked.push(p.to_path_buf());
                Ok(false)
            })
            .unwrap();

        assert_eq!(asked, vec![temp.path().join("a.txt")]);
        assert_eq!(report.skipped, vec![temp.path().join("a.txt")]);
        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "mine");
    }

    #[test]
    fn accepted_prompt_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "mine").unwrap();
        let payload = FetchedPayload::from_entries(vec![fetched("a", &[("a.txt", "theirs")])]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        installer.install(&payload, &mut |_: &Path| Ok(true)).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "theirs");
    }

    #[test]
    fn overwrite_flag_skips_prompt() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "mine").unwrap();
        let payload = FetchedPayload::from_entries(vec![fetched("a", &[("a.txt", "theirs")])]);
        let installer = Installer::new(
            InstallOptions::new(temp.path())
                .overwrite(true)
                .requested(["a"]),
        );

        installer.install(&payload, &mut never_asked).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "theirs");
    }

    #[test]
    fn transitive_conflict_is_skipped_without_prompt() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "mine").unwrap();
        let payload = FetchedPayload::from_entries(vec![
            fetched("a", &[("a.txt", "alpha")]),
            fetched("b", &[("b.txt", "theirs")]),
        ]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        let report = installer.install(&payload, &mut never_asked).unwrap();

        assert_eq!(report.written, vec![temp.path().join("a.txt")]);
        assert_eq!(report.skipped, vec![temp.path().join("b.txt")]);
        assert_eq!(report.entries, vec!["a", "b"]);
        assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "mine");
    }

    #[test]
    fn prompts_follow_file_order() {
        let temp = TempDir::new().unwrap();
        for name in ["1.txt", "2.txt", "3.txt"] {
            fs::write(temp.path().join(name), "old").unwrap();
        }
        let payload = FetchedPayload::from_entries(vec![fetched(
            "a",
            &[("3.txt", "x"), ("1.txt", "y"), ("2.txt", "z")],
        )]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        let mut asked = Vec::new();
        installer
            .install(&payload, &mut |p: &Path| {
                asked.push(p.file_name().unwrap().to_string_lossy().to_string());
                Ok(false)
            })
            .unwrap();

        assert_eq!(asked, vec!["3.txt", "1.txt", "2.txt"]);
    }

    #[test]
    fn creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let payload =
            FetchedPayload::from_entries(vec![fetched("a", &[("fresh/dir/a.txt", "alpha")])]);
        let installer = Installer::new(InstallOptions::new(temp.path()).requested(["a"]));

        installer.install(&payload, &mut never_asked).unwrap();

        assert!(temp.path().join("fresh/dir").is_dir());
    }

    #[test]
    fn write_failure_names_the_path() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should go makes the write fail.
        fs::create_dir_all(temp.path().join("a.txt")).unwrap();
        let payload = FetchedPayload::from_entries(vec![fetched("a", &[("a.txt", "alpha")])]);
        let installer = Installer::new(
            InstallOptions::new(temp.path())
                .overwrite(true)
                .requested(["a"]),
        );

        let err = installer.install(&payload, &mut never_asked).unwrap_err();

        match err {
            BorrowrError::Install { path, .. } => assert_eq!(path, temp.path().join("a.txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn report_merge_concatenates() {
        let mut first = InstallReport {
            written: vec![PathBuf::from("a")],
            skipped: vec![],
            entries: vec!["a".into()],
        };
        first.merge(InstallReport {
            written: vec![PathBuf::from("b")],
            skipped: vec![PathBuf::from("c")],
            entries: vec!["b".into()],
        });
        assert_eq!(first.written.len(), 2);
        assert_eq!(first.skipped.len(), 1);
        assert_eq!(first.entries, vec!["a", "b"]);
    }
}
