//! Reusable transformations applied to asset references before resolution.

use std::collections::BTreeMap;
use std::fmt;

use super::reference::AssetRef;

/// Pure transformation of an [`AssetRef`].
///
/// Closures of shape `Fn(&AssetRef) -> AssetRef` implement this trait.
pub trait AssetPreset {
  /// Produce the transformed reference.
  fn apply(&self, asset: &AssetRef) -> AssetRef;
}

impl<F> AssetPreset for F
where
  F: Fn(&AssetRef) -> AssetRef,
{
  fn apply(&self, asset: &AssetRef) -> AssetRef {
    self(asset)
  }
}

type BoxedPreset = Box<dyn AssetPreset + Send + Sync>;

/// Named presets looked up through [`AssetRef::preset`].
#[derive(Default)]
pub struct PresetMap {
  presets: BTreeMap<String, BoxedPreset>,
}

impl PresetMap {
  /// Empty preset map.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `preset` under `name`, returning the map for chaining.
  pub fn with<P>(mut self, name: impl Into<String>, preset: P) -> Self
  where
    P: AssetPreset + Send + Sync + 'static,
  {
    self.insert(name, preset);
    self
  }

  /// Register `preset` under `name`. Returns `true` when an earlier preset was replaced.
  pub fn insert<P>(&mut self, name: impl Into<String>, preset: P) -> bool
  where
    P: AssetPreset + Send + Sync + 'static,
  {
    self
      .presets
      .insert(name.into(), Box::new(preset))
      .is_some()
  }

  /// Preset registered under `name`.
  pub fn get(&self, name: &str) -> Option<&(dyn AssetPreset + Send + Sync)> {
    self.presets.get(name).map(|preset| preset.as_ref())
  }

  /// Whether a preset is registered under `name`.
  pub fn contains(&self, name: &str) -> bool {
    self.presets.contains_key(name)
  }

  /// Registered preset names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.presets.keys().map(String::as_str)
  }

  /// Number of registered presets.
  pub fn len(&self) -> usize {
    self.presets.len()
  }

  /// Whether no presets are registered.
  pub fn is_empty(&self) -> bool {
    self.presets.is_empty()
  }
}

impl fmt::Debug for PresetMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.names()).finish()
  }
}

/// Apply `preset` when provided, otherwise return an unchanged copy.
pub fn apply_preset<P>(asset: &AssetRef, preset: Option<&P>) -> AssetRef
where
  P: AssetPreset + ?Sized,
{
  match preset {
    Some(preset) => preset.apply(asset),
    None => asset.clone(),
  }
}

/// Apply the preset named by [`AssetRef::preset`] when both the name and the map entry exist.
pub fn apply_preset_by_name(asset: &AssetRef, presets: Option<&PresetMap>) -> AssetRef {
  let found = presets.zip(asset.preset.as_deref()).and_then(|(presets, name)| presets.get(name));
  apply_preset(asset, found)
}
