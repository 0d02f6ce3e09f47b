//! Asset reference model and its copy-on-write helpers.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::url::is_absolute_url;

/// Coarse asset category used as a routing hint by presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// Raster or vector image.
  Image,
  /// JSON document.
  Json,
  /// Web font.
  Font,
  /// Anything else.
  Other,
}

/// Value of a single query parameter.
///
/// [`QueryValue::Null`] entries are dropped when the query string is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
  /// Text value.
  String(String),
  /// Numeric value, rendered like a script `String(n)`: no trailing `.0` for whole numbers and
  /// exponent notation outside `1e-6..1e21`.
  Number(f64),
  /// Boolean value, rendered as `true`/`false`.
  Bool(bool),
  /// Missing value; the parameter is omitted.
  Null,
}

/// Query parameters attached to an asset reference, encoded in insertion order.
pub type Query = IndexMap<String, QueryValue>;

impl QueryValue {
  /// Whether the parameter is omitted from encoded query strings.
  pub fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }
}

impl fmt::Display for QueryValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(value) => f.write_str(value),
      Self::Number(value) => write_number(f, *value),
      Self::Bool(value) => write!(f, "{value}"),
      Self::Null => f.write_str("null"),
    }
  }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
  if value.is_nan() {
    f.write_str("NaN")
  } else if value.is_infinite() {
    f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
  } else if value == 0.0 {
    // -0 renders as 0
    f.write_str("0")
  } else if !(1e-6..1e21).contains(&value.abs()) {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
      Some((mantissa, exponent)) if !exponent.starts_with('-') => {
        write!(f, "{mantissa}e+{exponent}")
      }
      _ => f.write_str(&formatted),
    }
  } else {
    write!(f, "{value}")
  }
}

impl From<&str> for QueryValue {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}

impl From<String> for QueryValue {
  fn from(value: String) -> Self {
    Self::String(value)
  }
}

impl From<bool> for QueryValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<f64> for QueryValue {
  fn from(value: f64) -> Self {
    Self::Number(value)
  }
}

macro_rules! query_value_from_number {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for QueryValue {
        fn from(value: $ty) -> Self {
          Self::Number(f64::from(value))
        }
      }
    )*
  };
}

query_value_from_number!(i8, i16, i32, u8, u16, u32, f32);

macro_rules! query_value_from_wide_int {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for QueryValue {
        #[allow(clippy::cast_precision_loss)]
        fn from(value: $ty) -> Self {
          Self::Number(value as f64)
        }
      }
    )*
  };
}

query_value_from_wide_int!(i64, u64, isize, usize);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(Self::Null, Into::into)
  }
}

/// Build a [`Query`] from key/value pairs.
pub fn query<K, V, I>(pairs: I) -> Query
where
  I: IntoIterator<Item = (K, V)>,
  K: Into<String>,
  V: Into<QueryValue>,
{
  pairs
    .into_iter()
    .map(|(key, value)| (key.into(), value.into()))
    .collect()
}

/// Merge two optional queries; entries from `overrides` replace entries from `base`.
pub(crate) fn merge_query(base: Option<&Query>, overrides: Option<&Query>) -> Option<Query> {
  if base.is_none() && overrides.is_none() {
    return None;
  }

  let mut merged = base.cloned().unwrap_or_default();
  if let Some(overrides) = overrides {
    merged.extend(overrides.iter().map(|(key, value)| (key.clone(), value.clone())));
  }
  Some(merged)
}

/// Structured description of an asset before it is turned into a URL.
///
/// All `with_*` helpers return a modified copy and leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
  /// Original input, kept for diagnostics.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub input: Option<String>,
  /// Absolute URL returned verbatim by the resolver, ignoring every other field.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub absolute: Option<String>,
  /// Logical relative path without any CDN base. A leading `/` is allowed.
  #[serde(default)]
  pub path: String,
  /// Text placed before `path` at resolve time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prefix: Option<String>,
  /// Text placed after `path` at resolve time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suffix: Option<String>,
  /// Query parameters appended at resolve time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub query: Option<Query>,
  /// Fragment appended at resolve time, with or without a leading `#`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hash: Option<String>,
  /// Category hint.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<AssetKind>,
  /// Name of the preset to look up at resolve time.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub preset: Option<String>,
}

/// Optional hints attached by [`asset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMeta {
  /// Category hint.
  pub kind: Option<AssetKind>,
  /// Preset name.
  pub preset: Option<String>,
}

impl AssetMeta {
  /// Metadata naming only a preset.
  pub fn preset(name: impl Into<String>) -> Self {
    Self {
      kind: None,
      preset: Some(name.into()),
    }
  }

  /// Metadata naming only a kind.
  pub fn kind(kind: AssetKind) -> Self {
    Self {
      kind: Some(kind),
      preset: None,
    }
  }
}

/// Create an asset reference from a string.
///
/// Absolute URLs become `{ absolute: input, path: "" }`; anything else becomes
/// `{ path: input }`. An empty input carries no metadata.
pub fn asset(input: &str, meta: AssetMeta) -> AssetRef {
  if input.is_empty() {
    return AssetRef {
      input: Some(String::new()),
      ..AssetRef::default()
    };
  }

  let AssetMeta { kind, preset } = meta;
  if is_absolute_url(input) {
    return AssetRef {
      input: Some(input.to_string()),
      absolute: Some(input.to_string()),
      kind,
      preset,
      ..AssetRef::default()
    };
  }

  AssetRef {
    input: Some(input.to_string()),
    path: input.to_string(),
    kind,
    preset,
    ..AssetRef::default()
  }
}

impl From<&str> for AssetRef {
  fn from(input: &str) -> Self {
    asset(input, AssetMeta::default())
  }
}

impl AssetRef {
  /// Reference to a relative path with no other fields set.
  pub fn from_path(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      ..Self::default()
    }
  }

  /// Copy with `kind` replaced.
  pub fn with_kind(&self, kind: AssetKind) -> Self {
    Self {
      kind: Some(kind),
      ..self.clone()
    }
  }

  /// Copy with the preset name replaced.
  pub fn with_preset(&self, preset: impl Into<String>) -> Self {
    Self {
      preset: Some(preset.into()),
      ..self.clone()
    }
  }

  /// Copy with `prefix` replaced. Slashes are not normalised here.
  pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
    Self {
      prefix: Some(prefix.into()),
      ..self.clone()
    }
  }

  /// Copy with `suffix` replaced.
  pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
    Self {
      suffix: Some(suffix.into()),
      ..self.clone()
    }
  }

  /// Copy whose query is the existing query merged with `query`; new values win on collision.
  pub fn with_query(&self, query: Query) -> Self {
    Self {
      query: merge_query(self.query.as_ref(), Some(&query)),
      ..self.clone()
    }
  }

  /// Copy with the fragment replaced.
  pub fn with_hash(&self, hash: impl Into<String>) -> Self {
    Self {
      hash: Some(hash.into()),
      ..self.clone()
    }
  }

  /// Whether resolution short-circuits to [`AssetRef::absolute`].
  pub fn is_absolute(&self) -> bool {
    self.absolute.as_deref().is_some_and(|value| !value.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_input_produces_blank_reference() {
    let reference = asset("", AssetMeta::preset("dev"));
    assert_eq!(reference.input.as_deref(), Some(""));
    assert_eq!(reference.path, "");
    assert!(reference.preset.is_none());
    assert!(!reference.is_absolute());
  }

  #[test]
  fn absolute_input_keeps_url_and_clears_path() {
    let reference = asset("https://x.com/a.png", AssetMeta::kind(AssetKind::Image));
    assert_eq!(reference.absolute.as_deref(), Some("https://x.com/a.png"));
    assert_eq!(reference.input.as_deref(), Some("https://x.com/a.png"));
    assert_eq!(reference.path, "");
    assert_eq!(reference.kind, Some(AssetKind::Image));
  }

  #[test]
  fn relative_input_becomes_path() {
    let reference = AssetRef::from("/img/a.png");
    assert_eq!(reference.path, "/img/a.png");
    assert!(reference.absolute.is_none());
  }

  #[test]
  fn helpers_return_modified_copies() {
    let original = AssetRef::from_path("a.png");
    let updated = original
      .with_kind(AssetKind::Font)
      .with_preset("dev")
      .with_prefix("x/")
      .with_suffix("?raw")
      .with_hash("#top");

    assert_eq!(original, AssetRef::from_path("a.png"));
    assert_eq!(updated.kind, Some(AssetKind::Font));
    assert_eq!(updated.preset.as_deref(), Some("dev"));
    assert_eq!(updated.prefix.as_deref(), Some("x/"));
    assert_eq!(updated.suffix.as_deref(), Some("?raw"));
    assert_eq!(updated.hash.as_deref(), Some("#top"));
    assert_eq!(updated.path, "a.png");
  }

  #[test]
  fn later_query_wins_on_collision() {
    let reference = AssetRef::from_path("p")
      .with_query(query([("a", 1), ("b", 5)]))
      .with_query(query([("a", 2)]));

    let merged = reference.query.expect("query should be present");
    assert_eq!(merged.get("a"), Some(&QueryValue::Number(2.0)));
    assert_eq!(merged.get("b"), Some(&QueryValue::Number(5.0)));
  }

  #[test]
  fn merged_query_keeps_insertion_order() {
    let reference = AssetRef::from_path("p")
      .with_query(query([("v", 1), ("a", 1)]))
      .with_query(query([("b", 2), ("v", 2)]));

    let merged = reference.query.expect("query should be present");
    let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["v", "a", "b"]);
    assert_eq!(merged["v"], QueryValue::Number(2.0));
  }

  #[test]
  fn converts_wide_integers() {
    let count: usize = 42;
    assert_eq!(QueryValue::from(count), QueryValue::Number(42.0));
    assert_eq!(QueryValue::from(-7_i64).to_string(), "-7");
    assert_eq!(QueryValue::from(u64::from(u32::MAX)).to_string(), "4294967295");
  }

  #[test]
  fn merge_query_is_none_only_when_both_missing() {
    assert!(merge_query(None, None).is_none());
    assert_eq!(merge_query(None, Some(&Query::new())), Some(Query::new()));
  }

  #[test]
  fn numbers_render_like_script_strings() {
    assert_eq!(QueryValue::from(1).to_string(), "1");
    assert_eq!(QueryValue::from(1.5).to_string(), "1.5");
    assert_eq!(QueryValue::from(-0.0).to_string(), "0");
    assert_eq!(QueryValue::from(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(QueryValue::from(true).to_string(), "true");
    assert_eq!(QueryValue::from(1e21).to_string(), "1e+21");
    assert_eq!(QueryValue::from(-2.5e22).to_string(), "-2.5e+22");
    assert_eq!(QueryValue::from(1e-7).to_string(), "1e-7");
    assert_eq!(QueryValue::from(1e20).to_string(), "100000000000000000000");
    assert_eq!(QueryValue::from(0.000001).to_string(), "0.000001");
    assert!(QueryValue::from(None::<&str>).is_null());
  }

  #[test]
  fn serialises_without_absent_fields() {
    let reference = asset("img/a.png", AssetMeta::kind(AssetKind::Image));
    let json = serde_json::to_value(&reference).expect("reference should serialise");
    assert_eq!(
      json,
      serde_json::json!({ "input": "img/a.png", "path": "img/a.png", "kind": "image" })
    );
  }

  #[test]
  fn deserialises_query_values() {
    let reference: AssetRef =
      serde_json::from_str(r#"{"path": "p", "query": {"a": 1, "b": null, "c": "x", "d": true}}"#)
        .expect("reference should parse");
    let query = reference.query.expect("query should be present");
    assert_eq!(query["a"], QueryValue::Number(1.0));
    assert_eq!(query["b"], QueryValue::Null);
    assert_eq!(query["c"], QueryValue::from("x"));
    assert_eq!(query["d"], QueryValue::Bool(true));
  }
}
