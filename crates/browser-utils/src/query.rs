//! URL query-string parsing.
//!
//! Extracts `key=value` pairs from the part of a URL after its last `?`
//! and percent-decodes both sides the way `decodeURIComponent` does
//! (a `+` stays a `+`).

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^?&=]+)=([^?&=]*)").expect("valid regex"));

/// Parse the query parameters of `url` into a key/value map.
///
/// - Only text after the last `?` is scanned; a URL without `?` is scanned
///   whole.
/// - Segments without `=` are skipped.
/// - When a key repeats, the last occurrence wins.
///
/// # Examples
///
/// ```
/// use browser_utils::query_object;
///
/// let q = query_object("https://example.com/page?name=Ann%20Lee&id=7&id=8");
/// assert_eq!(q["name"], "Ann Lee");
/// assert_eq!(q["id"], "8");
/// ```
pub fn query_object(url: &str) -> BTreeMap<String, String> {
    let search = match url.rfind('?') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };

    let mut params = BTreeMap::new();
    for caps in PAIR_RE.captures_iter(search) {
        let key = decode_component(&caps[1]);
        let value = decode_component(&caps[2]);
        params.insert(key, value);
    }
    params
}

/// Percent-decode one URI component.
///
/// Malformed escapes are kept literally. If the decoded bytes are not valid
/// UTF-8 the raw component is returned unchanged.
pub fn decode_component(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}
