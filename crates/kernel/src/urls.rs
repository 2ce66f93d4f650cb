//! Named-route URL building.
//!
//! Filters never format URLs themselves; they hand a route name and the
//! parameters for the link to a [`UrlBuilder`]. Hosts with their own router
//! implement the trait; [`RouteTable`] is the built-in implementation used by
//! the listing server.

use std::collections::HashMap;

use crate::error::{FacetError, FacetResult};
use crate::params::QueryParams;

/// Resolves a named route plus query parameters into a URL.
///
/// Keys missing from `params` must be absent from the resulting query
/// string; they are never emitted as empty values.
pub trait UrlBuilder: Send + Sync {
    fn build_url(&self, route: &str, params: &QueryParams) -> FacetResult<String>;
}

/// Whether `path` can be mounted as a listing page.
///
/// Listing pages are plain static paths: no `{param}` captures and no
/// segments starting with `:` or `*`.
pub fn is_servable_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with([':', '*']))
}

/// Route name → path table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Prepended to every path (e.g. "https://shop.example"); empty for relative URLs.
    base_url: String,
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Create an empty route table producing relative URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every generated URL with `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Register a route. Paths are normalized to start with `/`.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self.routes.insert(name.into(), path);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(name, path);
        self
    }

    pub fn path(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// All (name, path) pairs, sorted by name.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .routes
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl UrlBuilder for RouteTable {
    fn build_url(&self, route: &str, params: &QueryParams) -> FacetResult<String> {
        let path = self
            .routes
            .get(route)
            .ok_or_else(|| FacetError::UnknownRoute(route.to_string()))?;

        let query = params.to_query_string();
        if query.is_empty() {
            Ok(format!("{}{path}", self.base_url))
        } else {
            Ok(format!("{}{path}?{query}", self.base_url))
        }
    }
}
