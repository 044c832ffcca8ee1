//! Turning configured repository URLs into download URLs.

use anyhow::{anyhow, bail, Result};
use url::Url;

use crate::registry::{fetch::join_url, INDEX_FILE};

/// Host serving raw repository content.
pub const RAW_GITHUB_HOST: &str = "raw.githubusercontent.com";

/// Ref used when a GitHub URL does not name one.
pub const DEFAULT_REF: &str = "main";

/// Rewrite a GitHub repository URL to its raw content base.
///
/// `https://github.com/<owner>/<repo>[.git][/tree/<ref>][#<ref>]` becomes
/// `https://raw.githubusercontent.com/<owner>/<repo>/<ref>`. Everything after
/// `tree/` is the ref, so branch names containing `/` survive. Raw URLs pass
/// through with any trailing slash removed.
pub fn raw_github_base(url: &str) -> Result<String> {
    let parsed = parse(url)?;

    match parsed.host_str() {
        Some(RAW_GITHUB_HOST) => {
            let mut raw = parsed.clone();
            raw.set_fragment(None);
            Ok(raw.as_str().trim_end_matches('/').to_string())
        }
        Some(host) if is_github_host(host) => {
            let segments: Vec<&str> = parsed
                .path_segments()
                .map(|s| s.filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();

            let [owner, repo, rest @ ..] = segments.as_slice() else {
                bail!("'{}' does not name a GitHub repository", url);
            };
            let repo = repo.strip_suffix(".git").unwrap_or(repo);

            let git_ref = match (parsed.fragment(), rest) {
                (Some(fragment), _) if !fragment.is_empty() => fragment.to_string(),
                (_, ["tree", git_ref @ ..]) if !git_ref.is_empty() => git_ref.join("/"),
                _ => DEFAULT_REF.to_string(),
            };

            Ok(format!(
                "https://{}/{}/{}/{}",
                RAW_GITHUB_HOST, owner, repo, git_ref
            ))
        }
        _ => bail!("'{}' is not a GitHub repository URL", url),
    }
}

/// Index URL of a remote.
///
/// GitHub web URLs point at the repository's `.borrowmeta`; anything else
/// already addresses the index document.
pub fn remote_index_url(url: &str) -> Result<String> {
    let parsed = parse(url)?;

    match parsed.host_str() {
        Some(host) if is_github_host(host) => Ok(join_url(&raw_github_base(url)?, INDEX_FILE)),
        _ => Ok(url.to_string()),
    }
}

/// Name suggested for a remote added without one.
///
/// `https://github.com/acme/ui` gives `ui`.
pub fn default_remote_name(url: &str) -> Option<String> {
    let without_scheme = url
        .split_once("://")
        .map_or(url, |(_, rest)| rest)
        .split('#')
        .next()
        .unwrap_or_default();

    let segments: Vec<&str> = without_scheme.split('/').collect();

    segments
        .get(2)
        .filter(|s| !s.is_empty())
        .or_else(|| segments.iter().rev().find(|s| !s.is_empty()))
        .map(|s| s.strip_suffix(".git").unwrap_or(s).to_string())
        .filter(|s| !s.is_empty())
}

fn parse(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    let trimmed = trimmed.strip_prefix("git+").unwrap_or(trimmed);
    Url::parse(trimmed).map_err(|e| anyhow!("'{}' is not a valid URL: {}", url, e))
}

fn is_github_host(host: &str) -> bool {
    host == "github.com" || host == "www.github.com"
}
