//! Resolver configuration loaded from JSON.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::asset::{PresetMap, Query, ResolveAssetOptions};
use crate::cdn::{Cdn, CdnOptions, CdnResolver};
use crate::error::{CdnError, ConfigError};
use crate::presets::{DevCdnOptions, dev_cdn_preset};
use crate::providers::{
  GhJsdelivrOptions, GhPagesOptions, create_gh_jsdelivr_cdn, create_gh_pages_cdn,
};
use crate::resolver::AssetResolver;

/// File name looked up by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset-cdn.config.json";

/// Which CDN resolver to build, selected by the `provider` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "provider", rename_all = "kebab-case")]
pub enum CdnConfig {
  /// Paths are returned unchanged.
  #[default]
  Local,
  /// Generic resolver joining paths onto a configured base.
  Base(CdnOptions),
  /// GitHub Pages site.
  GhPages(GhPagesOptions),
  /// GitHub repository served through jsDelivr.
  GhJsdelivr(GhJsdelivrOptions),
}

impl CdnConfig {
  /// Build the configured resolver, validating provider options.
  pub fn build(&self) -> Result<Box<dyn CdnResolver + Send + Sync>, CdnError> {
    let cdn: Box<dyn CdnResolver + Send + Sync> = match self {
      Self::Local => Box::new(Cdn::local()),
      Self::Base(options) => Box::new(Cdn::new(options.clone())),
      Self::GhPages(options) => Box::new(create_gh_pages_cdn(options)?),
      Self::GhJsdelivr(options) => Box::new(create_gh_jsdelivr_cdn(options)?),
    };
    Ok(cdn)
  }
}

/// Configuration of a named dev CDN preset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevCdnPresetConfig {
  /// Project namespace.
  pub project: String,
  /// Folder inside the project namespace.
  pub assets_dir: Option<String>,
  /// Query parameters merged into every reference.
  pub query: Option<Query>,
}

/// Discoverable resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// CDN provider and its options.
  pub cdn: CdnConfig,
  /// Dev CDN presets keyed by preset name.
  pub presets: BTreeMap<String, DevCdnPresetConfig>,
  /// Options applied to every resolution.
  pub resolve: ResolveAssetOptions,
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing file yields the defaults (local passthrough, no presets). A file that cannot be
  /// read or parsed is logged and also falls back to defaults.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
        debug!(path = %candidate.display(), "no resolver configuration found, using defaults");
        Self::default()
      }
      Err(err) => {
        warn!(path = %candidate.display(), error = %err, "ignoring resolver configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Parse configuration from an in-memory JSON document.
  pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Build the configured presets.
  pub fn build_presets(&self) -> Result<PresetMap, CdnError> {
    let mut presets = PresetMap::new();
    for (name, preset) in &self.presets {
      let options = DevCdnOptions {
        assets_dir: preset.assets_dir.clone(),
        query: preset.query.clone(),
      };
      presets.insert(name.as_str(), dev_cdn_preset(&preset.project, options)?);
    }
    Ok(presets)
  }

  /// Build an [`AssetResolver`] from this configuration.
  pub fn build(&self) -> Result<AssetResolver, ConfigError> {
    let resolver = AssetResolver::from_boxed(self.cdn.build()?)
      .with_presets(self.build_presets()?)
      .with_options(self.resolve);
    debug!(presets = self.presets.len(), "built asset resolver from configuration");
    Ok(resolver)
  }
}
