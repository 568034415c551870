//! Remote release checking
//!
//! The fetch capability is injected so the checker is testable without the
//! network; the real implementation asks the GitHub releases API. The
//! startup check runs at most once per session and only ever logs.

use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

use crate::core::error::{AssignError, Result};
use crate::updater::manifest::PackageManifest;
use crate::updater::version::{is_newer, Version};

/// Injected capability for fetching the newest published release tag
pub trait ReleaseFetcher {
    fn latest_release_tag(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Fetcher backed by the GitHub releases API
pub struct GithubReleaseFetcher {
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ReleaseResponse {
    tag_name: String,
}

impl GithubReleaseFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for GithubReleaseFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseFetcher for GithubReleaseFetcher {
    async fn latest_release_tag(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/releases/latest",
            owner, repo
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "tagbind-updater")
            .send()
            .await
            .map_err(|e| AssignError::UpdateError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AssignError::UpdateError(format!(
                "Release lookup failed with status {}",
                response.status()
            )));
        }

        let release: ReleaseResponse = response
            .json()
            .await
            .map_err(|e| AssignError::UpdateError(e.to_string()))?;

        Ok(Some(release.tag_name))
    }
}

/// Extract `(owner, repo)` from a GitHub repository URL
pub fn parse_github_repo(url: &str) -> Option<(String, String)> {
    let rest = url.split("github.com/").nth(1)?;
    let mut parts = rest.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let repo_raw = parts.next().filter(|s| !s.is_empty())?;
    // Strip any ".git" suffix or fragment from the repo segment
    let repo = repo_raw.split(['.', '#']).next().filter(|s| !s.is_empty())?;
    Some((owner.to_string(), repo.to_string()))
}

/// A newer release was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStatus {
    pub current: Version,
    pub latest: Version,
}

/// Compares the manifest's version against the newest published release
pub struct UpdateChecker<F: ReleaseFetcher> {
    manifest: PackageManifest,
    fetcher: F,
}

impl<F: ReleaseFetcher> UpdateChecker<F> {
    pub fn new(manifest: PackageManifest, fetcher: F) -> Self {
        Self { manifest, fetcher }
    }

    /// `Ok(Some(status))` when a strictly newer release exists, `Ok(None)`
    /// when up to date or no release is published
    pub async fn check(&self) -> Result<Option<UpdateStatus>> {
        let url = self.manifest.repository_url().ok_or_else(|| {
            AssignError::UpdateError("Repository URL not found in package manifest".into())
        })?;
        let (owner, repo) = parse_github_repo(url)
            .ok_or_else(|| AssignError::UpdateError(format!("Invalid repository URL: {}", url)))?;

        let tag = match self.fetcher.latest_release_tag(&owner, &repo).await? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        let latest: Version = tag
            .parse()
            .map_err(AssignError::UpdateError)?;
        let current: Version = self
            .manifest
            .version
            .parse()
            .map_err(AssignError::UpdateError)?;

        if is_newer(&latest, &current) {
            Ok(Some(UpdateStatus { current, latest }))
        } else {
            Ok(None)
        }
    }
}

static STARTUP_CHECK: OnceLock<()> = OnceLock::new();

/// Silent once-per-session update check
///
/// Subsequent calls in the same process are no-ops. Failures are logged,
/// never surfaced; there is no teardown.
pub async fn run_startup_check(manifest_path: &Path) {
    if STARTUP_CHECK.set(()).is_err() {
        return;
    }

    let manifest = match PackageManifest::load(manifest_path) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Update check skipped, manifest unreadable: {}", e);
            return;
        }
    };

    let display_name = if manifest.display_name.is_empty() {
        manifest.name.clone()
    } else {
        manifest.display_name.clone()
    };

    let checker = UpdateChecker::new(manifest, GithubReleaseFetcher::new());
    match checker.check().await {
        Ok(Some(status)) => {
            tracing::info!(
                "A new version of {} is available: {} (current {})",
                display_name,
                status.latest,
                status.current
            );
        }
        Ok(None) => {
            tracing::debug!("{} is up to date", display_name);
        }
        Err(e) => {
            tracing::warn!("Update check failed: {}", e);
        }
    }
}
