//! Pre-built resolvers for GitHub-hosted content.
//!
//! Both providers compute a fixed base URL once, then share [`RepoCdn`] to slash-trim each path,
//! prepend the configured `basePath` and delegate to the generic [`crate::cdn`] join.

mod gh_jsdelivr;
mod gh_pages;

pub use gh_jsdelivr::{GhJsdelivrOptions, create_gh_jsdelivr_cdn};
pub use gh_pages::{GhPagesOptions, create_gh_pages_cdn};

use crate::cdn::{CdnOptions, CdnResolver, cdn};
use crate::url::{is_absolute_url, join_url_parts, trim_slashes};

/// Resolver rooted at a fixed repository base with an optional path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCdn {
    options: CdnOptions,
    base_path: String,
}

impl RepoCdn {
    fn new(base: String, base_path: Option<&str>, normalize_slashes: Option<bool>) -> Self {
        Self {
            options: CdnOptions {
                base: Some(base),
                normalize_slashes: Some(normalize_slashes.unwrap_or(true)),
            },
            base_path: base_path.map(trim_slashes).unwrap_or_default().to_string(),
        }
    }

    /// Base URL every relative path is joined onto.
    pub fn base(&self) -> &str {
        self.options.base.as_deref().unwrap_or_default()
    }

    /// Slash-trimmed path inside the base, empty when not configured.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl CdnResolver for RepoCdn {
    fn resolve(&self, path_or_url: &str) -> String {
        if path_or_url.is_empty() || is_absolute_url(path_or_url) {
            return path_or_url.to_string();
        }

        let relative = trim_slashes(path_or_url);
        if self.base_path.is_empty() {
            cdn(relative, &self.options)
        } else {
            cdn(&join_url_parts([self.base_path.as_str(), relative]), &self.options)
        }
    }
}

/// Trimmed value of an optional option, `None` when blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
