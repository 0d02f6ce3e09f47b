//! Generic base-URL resolver and the trait every resolver implements.

use serde::Deserialize;

use crate::url::{is_absolute_url, join_base};

/// Maps a relative path (or an absolute URL, which passes through) to a final URL.
///
/// Closures of shape `Fn(&str) -> String` implement this trait, so ad-hoc resolvers can be
/// handed to [`crate::resolve_asset`] next to the provider types.
pub trait CdnResolver {
    /// Resolve a single path or URL.
    fn resolve(&self, path_or_url: &str) -> String;
}

impl<F> CdnResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, path_or_url: &str) -> String {
        self(path_or_url)
    }
}

/// Options for the generic [`cdn`] resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CdnOptions {
    /// Absolute base URL. Without it paths are returned unchanged.
    pub base: Option<String>,
    /// Join with exactly one `/` between base and path. Defaults to `true`.
    pub normalize_slashes: Option<bool>,
}

impl CdnOptions {
    /// Options pointing at the provided base with slash normalisation enabled.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            normalize_slashes: None,
        }
    }
}

/// Resolve `path_or_url` against the configured base.
///
/// Empty input, absolute URLs and a missing base all return the input unchanged.
pub fn cdn(path_or_url: &str, options: &CdnOptions) -> String {
    if path_or_url.is_empty() || is_absolute_url(path_or_url) {
        return path_or_url.to_string();
    }

    match options.base.as_deref() {
        Some(base) if !base.is_empty() => join_base(
            base,
            path_or_url,
            options.normalize_slashes.unwrap_or(true),
        ),
        _ => path_or_url.to_string(),
    }
}

/// Local (no CDN) resolution: always returns the input unchanged.
pub fn cdn_local(path_or_url: &str) -> String {
    cdn(path_or_url, &CdnOptions::default())
}

/// [`CdnOptions`] captured as a reusable resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cdn {
    options: CdnOptions,
}

impl Cdn {
    /// Resolver applying the provided options to every path.
    pub fn new(options: CdnOptions) -> Self {
        Self { options }
    }

    /// Resolver that never rewrites anything.
    pub fn local() -> Self {
        Self::default()
    }

    /// Options backing this resolver.
    pub fn options(&self) -> &CdnOptions {
        &self.options
    }
}

impl CdnResolver for Cdn {
    fn resolve(&self, path_or_url: &str) -> String {
        cdn(path_or_url, &self.options)
    }
}
