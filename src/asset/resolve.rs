//! Turning an [`AssetRef`] into a final URL string.

use serde::Deserialize;
use tracing::trace;

use super::preset::{PresetMap, apply_preset_by_name};
use super::reference::{AssetRef, Query};
use crate::cdn::CdnResolver;
use crate::url::trim_slashes;

/// Switches controlling how [`resolve_asset`] normalises its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveAssetOptions {
  /// Trim leading and trailing slashes from the assembled path so providers can join safely.
  pub normalize_path_slashes: bool,
  /// Strip one leading `#` from the fragment before appending it.
  pub normalize_hash: bool,
}

impl Default for ResolveAssetOptions {
  fn default() -> Self {
    Self {
      normalize_path_slashes: true,
      normalize_hash: true,
    }
  }
}

/// Resolve an asset reference into a URL.
///
/// Absolute references are returned verbatim. Otherwise the named preset is applied,
/// `prefix + path + suffix` is passed through `cdn`, and the query string and fragment are
/// appended. The function never fails.
pub fn resolve_asset<R>(
  asset: &AssetRef,
  cdn: &R,
  presets: Option<&PresetMap>,
  options: ResolveAssetOptions,
) -> String
where
  R: CdnResolver + ?Sized,
{
  if let Some(absolute) = asset.absolute.as_deref().filter(|value| !value.is_empty()) {
    return absolute.to_string();
  }

  let asset = apply_preset_by_name(asset, presets);

  let mut path = format!(
    "{}{}{}",
    asset.prefix.as_deref().unwrap_or_default(),
    asset.path,
    asset.suffix.as_deref().unwrap_or_default(),
  );
  if options.normalize_path_slashes {
    path = trim_slashes(&path).to_string();
  }

  let mut url = cdn.resolve(&path);

  if let Some(query) = &asset.query {
    let encoded = encode_query(query);
    if !encoded.is_empty() {
      url.push(if url.contains('?') { '&' } else { '?' });
      url.push_str(&encoded);
    }
  }

  if let Some(hash) = asset.hash.as_deref() {
    let hash = if options.normalize_hash {
      hash.strip_prefix('#').unwrap_or(hash)
    } else {
      hash
    };
    if !hash.is_empty() {
      url.push('#');
      url.push_str(hash);
    }
  }

  trace!(path = %asset.path, %url, "resolved asset");
  url
}

/// Encode a query as `application/x-www-form-urlencoded`, skipping null values.
pub(crate) fn encode_query(query: &Query) -> String {
  let mut serializer = ::url::form_urlencoded::Serializer::new(String::new());
  for (key, value) in query.iter().filter(|(_, value)| !value.is_null()) {
    serializer.append_pair(key, &value.to_string());
  }
  serializer.finish()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asset::reference::{AssetMeta, QueryValue, asset, query};
  use crate::cdn::{Cdn, CdnOptions, cdn_local};

  fn identity(path: &str) -> String {
    path.to_string()
  }

  fn example_cdn(path: &str) -> String {
    format!("https://cdn.example.com/{path}")
  }

  fn resolve(asset: &AssetRef) -> String {
    resolve_asset(asset, &identity, None, ResolveAssetOptions::default())
  }

  #[test]
  fn resolves_relative_path_through_resolver() {
    let resolved = resolve_asset(
      &AssetRef::from_path("img/a.png"),
      &example_cdn,
      None,
      ResolveAssetOptions::default(),
    );
    assert_eq!(resolved, "https://cdn.example.com/img/a.png");
  }

  #[test]
  fn absolute_reference_ignores_everything_else() {
    let presets = PresetMap::new().with("dev", |asset: &AssetRef| asset.with_prefix("dev/"));
    let reference = asset("https://x.com/a.png", AssetMeta::preset("dev"))
      .with_prefix("p/")
      .with_suffix(".webp")
      .with_query(query([("v", 1)]))
      .with_hash("top");

    for resolver in [example_cdn as fn(&str) -> String, identity] {
      let resolved =
        resolve_asset(&reference, &resolver, Some(&presets), ResolveAssetOptions::default());
      assert_eq!(resolved, "https://x.com/a.png");
    }
  }

  #[test]
  fn drops_null_query_values_and_normalises_hash() {
    let reference = AssetRef {
      query: Some(query([("a", QueryValue::from(1)), ("b", QueryValue::Null)])),
      hash: Some("#frag".into()),
      ..AssetRef::from_path("p")
    };
    assert_eq!(resolve(&reference), "p?a=1#frag");
  }

  #[test]
  fn keeps_hash_verbatim_without_normalisation() {
    let reference = AssetRef::from_path("p").with_hash("#frag");
    let options = ResolveAssetOptions {
      normalize_hash: false,
      ..ResolveAssetOptions::default()
    };
    assert_eq!(resolve_asset(&reference, &identity, None, options), "p##frag");
  }

  #[test]
  fn skips_empty_hash_and_query() {
    let reference = AssetRef::from_path("p")
      .with_hash("#")
      .with_query(query([("a", QueryValue::Null)]));
    assert_eq!(resolve(&reference), "p");
  }

  #[test]
  fn appends_to_existing_query_with_ampersand() {
    let reference = AssetRef::from_path("p").with_query(query([("v", 2)]));
    let resolver = |path: &str| format!("{path}?token=abc");
    let resolved = resolve_asset(&reference, &resolver, None, ResolveAssetOptions::default());
    assert_eq!(resolved, "p?token=abc&v=2");
  }

  #[test]
  fn encodes_query_like_form_data() {
    let reference = AssetRef::from_path("p").with_query(query([
      ("q", "a b&c=d"),
      ("path", "x/y"),
      ("ü", "é"),
    ]));
    assert_eq!(resolve(&reference), "p?q=a+b%26c%3Dd&path=x%2Fy&%C3%BC=%C3%A9");
  }

  #[test]
  fn encodes_query_in_insertion_order() {
    let reference = AssetRef::from_path("p").with_query(query([("v", 2), ("a", 1)]));
    let resolved = resolve_asset(&reference, &cdn_local, None, ResolveAssetOptions::default());
    assert_eq!(resolved, "p?v=2&a=1");

    let overridden = reference.with_query(query([("z", 0), ("v", 3)]));
    assert_eq!(resolve(&overridden), "p?v=3&a=1&z=0");
  }

  #[test]
  fn assembles_prefix_path_suffix_and_trims_slashes() {
    let reference = AssetRef::from_path("a").with_prefix("/img/").with_suffix(".png/");
    assert_eq!(resolve(&reference), "img/a.png");

    let options = ResolveAssetOptions {
      normalize_path_slashes: false,
      ..ResolveAssetOptions::default()
    };
    assert_eq!(resolve_asset(&reference, &identity, None, options), "/img/a.png/");
  }

  #[test]
  fn applies_named_preset_before_resolution() {
    let presets = PresetMap::new().with("thumbs", |asset: &AssetRef| {
      asset.with_prefix("thumbs/").with_query(query([("w", 64)]))
    });
    let reference = asset("cat.jpg", AssetMeta::preset("thumbs"));
    let cdn = Cdn::new(CdnOptions::with_base("https://cdn.example.com/"));

    let resolved = resolve_asset(&reference, &cdn, Some(&presets), ResolveAssetOptions::default());
    assert_eq!(resolved, "https://cdn.example.com/thumbs/cat.jpg?w=64");
  }

  #[test]
  fn empty_path_resolves_to_resolver_output() {
    assert_eq!(resolve(&AssetRef::default()), "");
  }

  #[test]
  fn options_deserialise_with_defaults() {
    let options: ResolveAssetOptions =
      serde_json::from_str(r#"{"normalizeHash": false}"#).expect("options should parse");
    assert!(options.normalize_path_slashes);
    assert!(!options.normalize_hash);
  }
}
