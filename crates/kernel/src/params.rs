//! Request query parameters.
//!
//! Query strings are parsed the way listing pages have always sent them:
//! `key=value` for scalar parameters and `key[]=value` (or `key[0]=value`)
//! for array parameters. Parsing never fails; anything it cannot make sense
//! of is simply absent, which the filters read as "no selection".

use std::collections::BTreeMap;
use std::collections::btree_map;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

/// Characters left readable in emitted query components.
///
/// The comma stays unescaped so delimited selections read as `color=red,blue`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',');

/// Value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `key=value`
    Single(String),
    /// `key[]=a&key[]=b`
    List(Vec<String>),
}

impl ParamValue {
    /// The scalar value, if this parameter is not array-shaped.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    /// The value as a sequence. A scalar reads as a one-element list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(s) => vec![s.as_str()],
            ParamValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Query parameters of one request (or of one link being built).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// `k[]` and `k[<n>]` entries collect into a list under `k`, ordered by
    /// index; `k[]` takes the next index after the highest seen so far. Any
    /// other bracketed key (`range[min]`) is an ordinary scalar key. Between
    /// a scalar and a list under the same name, the later one wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        let mut lists: BTreeMap<String, Vec<(u64, String)>> = BTreeMap::new();

        for (raw_key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();

            match classify_key(&raw_key) {
                KeyShape::Scalar(name) => {
                    if name.is_empty() {
                        continue;
                    }
                    lists.remove(name);
                    params.0.insert(name.to_string(), ParamValue::Single(value));
                }
                KeyShape::Append(name) => {
                    params.0.remove(name);
                    let items = lists.entry(name.to_string()).or_default();
                    let next = items.iter().map(|(i, _)| i.saturating_add(1)).max().unwrap_or(0);
                    items.push((next, value));
                }
                KeyShape::Indexed(name, index) => {
                    params.0.remove(name);
                    let items = lists.entry(name.to_string()).or_default();
                    match items.iter_mut().find(|(i, _)| *i == index) {
                        Some(slot) => slot.1 = value,
                        None => items.push((index, value)),
                    }
                }
            }
        }

        for (name, mut items) in lists {
            items.sort_by_key(|(index, _)| *index);
            let values = items.into_iter().map(|(_, value)| value).collect();
            params.0.insert(name, ParamValue::List(values));
        }

        params
    }

    /// Parse the query part of a URL or path. No `?` means no parameters.
    pub fn from_url(url: &str) -> Self {
        let query = match url.split_once('?') {
            Some((_, rest)) => rest,
            None => return Self::new(),
        };
        let query = query.split_once('#').map_or(query, |(q, _)| q);
        Self::parse(query)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Scalar value for `key`; array-shaped values read as absent.
    pub fn single(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_single)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Copy of these parameters without the given keys.
    pub fn without(&self, keys: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Overlay `other` on top of these parameters; `other` wins on conflicts.
    pub fn merged(mut self, other: QueryParams) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Serialize to a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();

        for (key, value) in &self.0 {
            let key = encode(key);
            match value {
                ParamValue::Single(v) => pairs.push(format!("{key}={}", encode(v))),
                ParamValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{key}%5B%5D={}", encode(item)));
                    }
                }
            }
        }

        pairs.join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// How a raw query key contributes to the parameter set.
enum KeyShape<'a> {
    /// `tag[]`
    Append(&'a str),
    /// `tag[3]`
    Indexed(&'a str, u64),
    /// Anything else, kept verbatim (`sort`, `range[min]`).
    Scalar(&'a str),
}

fn classify_key(key: &str) -> KeyShape<'_> {
    let Some(inner) = key.strip_suffix(']') else {
        return KeyShape::Scalar(key);
    };
    let Some((name, index)) = inner.split_once('[') else {
        return KeyShape::Scalar(key);
    };
    if name.is_empty() {
        return KeyShape::Scalar(key);
    }

    if index.is_empty() {
        KeyShape::Append(name)
    } else if index.bytes().all(|b| b.is_ascii_digit()) {
        match index.parse() {
            Ok(index) => KeyShape::Indexed(name, index),
            Err(_) => KeyShape::Scalar(key),
        }
    } else {
        KeyShape::Scalar(key)
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, QUERY_COMPONENT).to_string()
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_scalar_params() {
        let params = QueryParams::parse("color=red&page=2");
        assert_eq!(params.single("color"), Some("red"));
        assert_eq!(params.single("page"), Some("2"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn parse_array_params() {
        let params = QueryParams::parse("tag[]=a&tag[]=b&tag%5B%5D=c");
        assert_eq!(
            params.get("tag"),
            Some(&ParamValue::List(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        assert_eq!(params.single("tag"), None);
    }

    #[test]
    fn parse_indexed_array_params() {
        let params = QueryParams::parse("tag[0]=a&tag[1]=b");
        assert_eq!(params.get("tag").unwrap().as_list(), vec!["a", "b"]);
    }

    #[test]
    fn parse_orders_indexed_entries_by_index() {
        let params = QueryParams::parse("tag[1]=b&tag[0]=a&tag[]=c");
        assert_eq!(params.get("tag").unwrap().as_list(), vec!["a", "b", "c"]);

        let params = QueryParams::parse("tag[0]=a&tag[0]=z");
        assert_eq!(params.get("tag").unwrap().as_list(), vec!["z"]);
    }

    #[test]
    fn parse_keeps_associative_keys_verbatim() {
        let params = QueryParams::parse("range[min]=10&range%5Bmax%5D=50");
        assert_eq!(params.single("range[min]"), Some("10"));
        assert_eq!(params.single("range[max]"), Some("50"));
        assert_eq!(params.get("range"), None);

        let reparsed = QueryParams::parse(&params.to_query_string());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn parse_later_shape_wins() {
        assert_eq!(QueryParams::parse("tag=x&tag[]=a").get("tag").unwrap().as_list(), vec!["a"]);
        assert_eq!(QueryParams::parse("tag[]=a&tag=x").single("tag"), Some("x"));
    }

    #[test]
    fn parse_last_scalar_wins() {
        let params = QueryParams::parse("sort=new&sort=old");
        assert_eq!(params.single("sort"), Some("old"));
    }

    #[test]
    fn parse_decodes_values() {
        let params = QueryParams::parse("q=hello+world&color=red%2Cblue");
        assert_eq!(params.single("q"), Some("hello world"));
        assert_eq!(params.single("color"), Some("red,blue"));
    }

    #[test]
    fn parse_ignores_empty_keys_and_leading_question_mark() {
        let params = QueryParams::parse("?=x&&color=red");
        assert_eq!(params.len(), 1);
        assert_eq!(params.single("color"), Some("red"));
    }

    #[test]
    fn from_url_without_query_is_empty() {
        assert!(QueryParams::from_url("/products").is_empty());
        assert!(QueryParams::from_url("").is_empty());
    }

    #[test]
    fn from_url_strips_fragment() {
        let params = QueryParams::from_url("/products?color=red#top");
        assert_eq!(params.single("color"), Some("red"));
    }

    #[test]
    fn query_string_keeps_commas_readable() {
        let params: QueryParams = [("color", "red,blue")].into_iter().collect();
        assert_eq!(params.to_query_string(), "color=red,blue");
    }

    #[test]
    fn query_string_encodes_lists_and_reserved_chars() {
        let mut params = QueryParams::new();
        params.set("tag", vec!["a b", "c&d"]);
        assert_eq!(params.to_query_string(), "tag%5B%5D=a%20b&tag%5B%5D=c%26d");

        let reparsed = QueryParams::parse(&params.to_query_string());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn without_drops_only_named_keys() {
        let params = QueryParams::parse("page=3&color=red&size=m");
        let kept = params.without(&["page", "color"]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.single("size"), Some("m"));
    }

    #[test]
    fn merged_overlays_other() {
        let base = QueryParams::parse("color=red&size=m");
        let overlay: QueryParams = [("color", "blue")].into_iter().collect();
        let merged = base.merged(overlay);
        assert_eq!(merged.single("color"), Some("blue"));
        assert_eq!(merged.single("size"), Some("m"));
    }
}
