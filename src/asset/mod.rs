//! Asset references, presets and the resolution pipeline.
//!
//! A reference is built with [`asset`] (or directly as an [`AssetRef`]), optionally adjusted with
//! the `with_*` helpers, and finally handed to [`resolve_asset`] together with a
//! [`crate::CdnResolver`]. Named presets are looked up from a [`PresetMap`] during resolution.

mod preset;
mod reference;
mod resolve;

pub use preset::{AssetPreset, PresetMap, apply_preset, apply_preset_by_name};
pub use reference::{AssetKind, AssetMeta, AssetRef, Query, QueryValue, asset, query};
pub use resolve::{ResolveAssetOptions, resolve_asset};

pub(crate) use reference::merge_query;
