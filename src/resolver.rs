//! Reusable bundle of a CDN resolver, named presets and resolution options.

use std::fmt;

use crate::asset::{
  AssetMeta, AssetPreset, AssetRef, PresetMap, ResolveAssetOptions, asset, resolve_asset,
};
use crate::cdn::{Cdn, CdnResolver};

type BoxedResolver = Box<dyn CdnResolver + Send + Sync>;

/// High-level helper resolving asset references with a fixed configuration.
pub struct AssetResolver {
  cdn: BoxedResolver,
  presets: PresetMap,
  options: ResolveAssetOptions,
}

impl AssetResolver {
  /// Create a resolver delegating to `cdn`, with no presets and default options.
  pub fn new<R>(cdn: R) -> Self
  where
    R: CdnResolver + Send + Sync + 'static,
  {
    Self::from_boxed(Box::new(cdn))
  }

  pub(crate) fn from_boxed(cdn: BoxedResolver) -> Self {
    Self {
      cdn,
      presets: PresetMap::new(),
      options: ResolveAssetOptions::default(),
    }
  }

  /// Register a named preset.
  pub fn with_preset<P>(mut self, name: impl Into<String>, preset: P) -> Self
  where
    P: AssetPreset + Send + Sync + 'static,
  {
    self.presets.insert(name, preset);
    self
  }

  /// Replace the whole preset map.
  pub fn with_presets(mut self, presets: PresetMap) -> Self {
    self.presets = presets;
    self
  }

  /// Replace the resolution options.
  pub fn with_options(mut self, options: ResolveAssetOptions) -> Self {
    self.options = options;
    self
  }

  /// Named presets consulted during resolution.
  pub fn presets(&self) -> &PresetMap {
    &self.presets
  }

  /// Options applied to every resolution.
  pub fn options(&self) -> ResolveAssetOptions {
    self.options
  }

  /// Resolve a structured reference.
  pub fn resolve(&self, asset: &AssetRef) -> String {
    resolve_asset(asset, self.cdn.as_ref(), Some(&self.presets), self.options)
  }

  /// Resolve a plain path or URL string.
  pub fn resolve_str(&self, input: &str) -> String {
    self.resolve(&asset(input, AssetMeta::default()))
  }
}

impl Default for AssetResolver {
  fn default() -> Self {
    Self::new(Cdn::local())
  }
}

impl fmt::Debug for AssetResolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AssetResolver")
      .field("presets", &self.presets)
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asset::query;
  use crate::providers::{GhPagesOptions, create_gh_pages_cdn};

  #[test]
  fn default_resolver_is_local_passthrough() {
    let resolver = AssetResolver::default();
    assert_eq!(resolver.resolve_str("/img/a.png"), "img/a.png");
    assert_eq!(resolver.resolve_str("https://x.com/a.png"), "https://x.com/a.png");
  }

  #[test]
  fn resolves_with_provider_and_preset() {
    let cdn = create_gh_pages_cdn(&GhPagesOptions::new("foo").repo("bar"))
      .expect("options should be valid");
    let resolver = AssetResolver::new(cdn).with_preset("versioned", |asset: &AssetRef| {
      asset.with_query(query([("v", 7)]))
    });

    let reference = asset("x/y.png", AssetMeta::preset("versioned")).with_hash("#top");
    assert_eq!(resolver.resolve(&reference), "https://foo.github.io/bar/x/y.png?v=7#top");
  }

  #[test]
  fn honours_custom_options() {
    let options = ResolveAssetOptions {
      normalize_path_slashes: false,
      normalize_hash: true,
    };
    let resolver = AssetResolver::new(|path: &str| format!("[{path}]")).with_options(options);
    assert_eq!(resolver.resolve_str("/a/"), "[/a/]");
    assert_eq!(resolver.options(), options);
  }

  #[test]
  fn debug_lists_preset_names() {
    let resolver = AssetResolver::default().with_preset("dev", |asset: &AssetRef| asset.clone());
    assert!(format!("{resolver:?}").contains(r#"presets: {"dev"}"#));
  }
}
