//! String-level URL primitives shared by the resolvers and providers.

use regex::Regex;

fn absolute_url_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^(https?:)?//").expect("invalid http(s) regex"),
                Regex::new(r"(?i)^(data|blob):").expect("invalid data/blob URI regex"),
            ]
        })
        .as_slice()
}

/// Determine whether a value is already a fully resolved URL.
///
/// Scheme-relative (`//host`), `http(s)://`, `data:` and `blob:` values match, case-insensitively.
/// Anything matching here is never rewritten by a resolver.
pub fn is_absolute_url(value: &str) -> bool {
    absolute_url_patterns()
        .iter()
        .any(|pattern| pattern.is_match(value))
}

/// Remove every leading and trailing `/`, leaving inner separators untouched.
pub fn trim_slashes(value: &str) -> &str {
    value.trim_matches('/')
}

/// Join URL fragments with a single `/`.
///
/// Empty fragments are skipped before trimming, so a fragment made only of slashes still
/// contributes an empty segment.
pub fn join_url_parts<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|part| !part.as_ref().is_empty())
        .map(|part| trim_slashes(part.as_ref()).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append `path` to an absolute `base`.
///
/// With `normalize_slashes` one trailing `/` is dropped from the base and one leading `/` from
/// the path so exactly one separator sits between them. Without it the two are concatenated.
pub fn join_base(base: &str, path: &str, normalize_slashes: bool) -> String {
    if !normalize_slashes {
        return format!("{base}{path}");
    }

    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base}/{path}")
}
