//! Faceted test utilities.
//!
//! Helpers for integration testing: a sample site file, a query string
//! builder, and helpers for picking apart generated URLs and JSON views.

use serde_json::Value as JsonValue;

/// A site with one listing exercising every filter kind.
///
/// - `color`: multi-select, comma-delimited
/// - `tag`: multi-select, array parameter, rendered as checkboxes
/// - `brand`: single-select
/// - `sort`: single-select, used as the sorter
/// - `ghost`: referenced by the section but never declared
pub const SAMPLE_SITE_YAML: &str = r#"
routes:
  products: /products
  articles: /articles
filters:
  - id: color
    parameter: color
    label: Color
    selection: { type: multi }
    values:
      - { key: red, label: Red }
      - { key: blue, label: Blue }
      - { key: green, label: Green }
  - id: tag
    parameter: tag
    label: Tags
    selection: { type: multi, encoding: array, checkbox: true }
    values:
      - { key: sale, label: On sale }
      - { key: new, label: New arrival }
  - id: brand
    parameter: brand
    label: Brand
    values:
      - { key: acme, label: Acme }
      - { key: globex, label: Globex }
  - id: sort
    parameter: sort
    label: Sort by
    values:
      - { key: new, label: Newest }
      - { key: old, label: Oldest }
sections:
  - name: products
    route: products
    label: Products
    filters: [color, tag, ghost, brand]
    sorter: sort
  - name: articles
    route: articles
    filters: [brand]
translations:
  Color: Colour
"#;

/// Build a raw query string; array values use `key[]=value` pairs.
pub fn query() -> QueryBuilder {
    QueryBuilder::default()
}

/// Raw query string builder.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Add a scalar parameter.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add an array parameter.
    pub fn list(mut self, key: &str, values: &[&str]) -> Self {
        for value in values {
            self.pairs.push((format!("{key}[]"), (*value).to_string()));
        }
        self
    }

    /// Encoded query string without the leading `?`.
    pub fn build(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }
}

/// Path part of a generated URL.
pub fn path_of(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Decoded query pairs of a generated URL, in order.
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map_or("", |(_, query)| query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Decoded value of `key` in a generated URL.
pub fn query_value(url: &str, key: &str) -> Option<String> {
    query_pairs(url)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Values of the active links in a JSON array of links.
pub fn active_values(links: &JsonValue) -> Vec<String> {
    links
        .as_array()
        .map(|links| {
            links
                .iter()
                .filter(|link| link["active"].as_bool().unwrap_or(false))
                .filter_map(|link| link["value"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
