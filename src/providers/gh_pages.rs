use serde::Deserialize;
use tracing::debug;

use super::{RepoCdn, non_blank};
use crate::error::{CdnError, Result};
use crate::url::{join_url_parts, trim_slashes};

const PROVIDER: &str = "gh-pages";

/// Options for [`create_gh_pages_cdn`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GhPagesOptions {
    /// GitHub user or organisation serving `https://{owner}.github.io`.
    pub owner: String,
    /// Project repository; when set the site lives under `/{repo}`.
    pub repo: Option<String>,
    /// Directory inside the site prepended to every path.
    pub base_path: Option<String>,
    /// Join with exactly one `/` between base and path. Defaults to `true`.
    pub normalize_slashes: Option<bool>,
}

impl GhPagesOptions {
    /// Options for the user or organisation site of `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Self::default()
        }
    }

    /// Serve from the project site of `repo`.
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Prepend `base_path` to every resolved path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }
}

/// Build a resolver serving paths from GitHub Pages.
///
/// Fails with [`CdnError::MissingOwner`] when `owner` is blank.
pub fn create_gh_pages_cdn(options: &GhPagesOptions) -> Result<RepoCdn> {
    let owner = non_blank(Some(options.owner.as_str())).ok_or(CdnError::MissingOwner {
        provider: PROVIDER,
    })?;

    let root = format!("https://{owner}.github.io");
    let base = match non_blank(options.repo.as_deref()).map(trim_slashes) {
        Some(repo) => join_url_parts([root.as_str(), repo]),
        None => root,
    };

    let cdn = RepoCdn::new(base, options.base_path.as_deref(), options.normalize_slashes);
    debug!(base = cdn.base(), base_path = cdn.base_path(), "configured GitHub Pages CDN");
    Ok(cdn)
}
