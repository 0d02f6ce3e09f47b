use serde::Deserialize;
use tracing::debug;

use crate::asset::{AssetPreset, AssetRef, Query, merge_query};
use crate::error::{CdnError, Result};
use crate::url::trim_slashes;

const DEFAULT_ASSETS_DIR: &str = "assets";

/// Options for [`dev_cdn_preset`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevCdnOptions {
  /// Folder inside each project namespace. Defaults to `assets`.
  pub assets_dir: Option<String>,
  /// Extra query parameters, e.g. for cache busting.
  pub query: Option<Query>,
}

/// Preset namespacing assets as `{project}/{assets_dir}/{path}` on a shared dev CDN.
#[derive(Debug, Clone, PartialEq)]
pub struct DevCdnPreset {
  prefix: String,
  query: Option<Query>,
}

impl DevCdnPreset {
  /// Prefix written into every reference, always ending with `/`.
  pub fn prefix(&self) -> &str {
    &self.prefix
  }
}

impl AssetPreset for DevCdnPreset {
  fn apply(&self, asset: &AssetRef) -> AssetRef {
    // Preset query entries override the reference's own on collision.
    let query = merge_query(asset.query.as_ref(), self.query.as_ref()).unwrap_or_default();
    AssetRef {
      prefix: Some(self.prefix.clone()),
      query: Some(query),
      ..asset.clone()
    }
  }
}

/// Build the dev CDN preset for `project`.
///
/// `project` and the assets directory are rejected when empty after trimming whitespace. Stray
/// slashes around either are stripped afterwards when building the prefix.
pub fn dev_cdn_preset(project: &str, options: DevCdnOptions) -> Result<DevCdnPreset> {
  let project = project.trim();
  if project.is_empty() {
    return Err(CdnError::MissingProject);
  }

  let assets_dir = options.assets_dir.as_deref().unwrap_or(DEFAULT_ASSETS_DIR).trim();
  if assets_dir.is_empty() {
    return Err(CdnError::EmptyAssetsDir);
  }

  let prefix = format!("{}/{}/", trim_slashes(project), trim_slashes(assets_dir));
  debug!(%prefix, "configured dev CDN preset");
  Ok(DevCdnPreset {
    prefix,
    query: options.query,
  })
}
