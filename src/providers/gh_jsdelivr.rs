use serde::Deserialize;
use tracing::debug;

use super::{RepoCdn, non_blank};
use crate::error::{CdnError, Result};

const PROVIDER: &str = "gh-jsdelivr";
const JSDELIVR_GH_ROOT: &str = "https://cdn.jsdelivr.net/gh";

/// Options for [`create_gh_jsdelivr_cdn`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GhJsdelivrOptions {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Tag, branch or commit appended as `@ref`.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Directory inside the repository prepended to every path.
    pub base_path: Option<String>,
    /// Join with exactly one `/` between base and path. Defaults to `true`.
    pub normalize_slashes: Option<bool>,
}

impl GhJsdelivrOptions {
    /// Options for `owner/repo` at the default branch.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Self::default()
        }
    }

    /// Pin to a tag, branch or commit.
    pub fn git_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    /// Prepend `base_path` to every resolved path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }
}

/// Build a resolver serving GitHub repository files through jsDelivr.
///
/// Fails when `owner` or `repo` is blank.
pub fn create_gh_jsdelivr_cdn(options: &GhJsdelivrOptions) -> Result<RepoCdn> {
    let owner = non_blank(Some(options.owner.as_str())).ok_or(CdnError::MissingOwner {
        provider: PROVIDER,
    })?;
    let repo = non_blank(Some(options.repo.as_str())).ok_or(CdnError::MissingRepo {
        provider: PROVIDER,
    })?;

    let base = match non_blank(options.git_ref.as_deref()) {
        Some(git_ref) => format!("{JSDELIVR_GH_ROOT}/{owner}/{repo}@{git_ref}"),
        None => format!("{JSDELIVR_GH_ROOT}/{owner}/{repo}"),
    };

    let cdn = RepoCdn::new(base, options.base_path.as_deref(), options.normalize_slashes);
    debug!(base = cdn.base(), base_path = cdn.base_path(), "configured jsDelivr GitHub CDN");
    Ok(cdn)
}
