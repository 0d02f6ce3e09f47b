#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset;
pub mod cdn;
pub mod config;
pub mod error;
pub mod presets;
pub mod providers;
pub mod resolver;
pub mod url;

pub use asset::{
  AssetKind, AssetMeta, AssetPreset, AssetRef, PresetMap, Query, QueryValue, ResolveAssetOptions,
  apply_preset, apply_preset_by_name, asset, query, resolve_asset,
};
pub use cdn::{Cdn, CdnOptions, CdnResolver, cdn, cdn_local};
pub use config::{CdnConfig, ResolverConfig};
pub use error::{CdnError, ConfigError};
pub use presets::{DevCdnOptions, DevCdnPreset, dev_cdn_preset};
pub use providers::{
  GhJsdelivrOptions, GhPagesOptions, RepoCdn, create_gh_jsdelivr_cdn, create_gh_pages_cdn,
};
pub use resolver::AssetResolver;
