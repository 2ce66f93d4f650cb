//! Filter definitions and the filter-link engine.
//!
//! A [`FilterDefinition`] supplies the domain data of one filter (its query
//! parameter, title, and option list). Binding a definition to a section's
//! route yields a [`Filter`], which computes the [`LinkItem`]s a listing page
//! renders:
//! - single-select filters keep at most one value in their parameter
//! - multi-select filters keep a set, either delimited in one string
//!   (`color=red,blue`) or as an array parameter (`tag[]=a&tag[]=b`)

mod declared;
mod link;
mod multi;
mod single;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FacetResult;
use crate::params::QueryParams;
use crate::translate::{IdentityTranslator, Translator};
use crate::urls::UrlBuilder;

pub use declared::{DeclaredFilter, EncodingDeclaration, FilterDeclaration, SelectionDeclaration};
pub use link::{LinkItem, build_route};

/// Pagination parameter dropped from every filter link.
pub const PAGE_PARAMETER: &str = "page";

/// Default separator for delimited multi-select parameters.
pub const DEFAULT_SEPARATOR: &str = ",";

/// One selectable value of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value written to the query string.
    #[serde(deserialize_with = "deserialize_key")]
    pub key: String,
    /// Translatable display label.
    pub label: String,
}

impl FilterOption {
    pub fn new(key: impl ToString, label: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.into(),
        }
    }
}

/// Option keys may be written as numbers or booleans in YAML; they are
/// compared as strings.
fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match RawKey::deserialize(deserializer)? {
        RawKey::Str(s) => s,
        RawKey::Int(i) => i.to_string(),
        RawKey::Float(f) => f.to_string(),
        RawKey::Bool(b) => b.to_string(),
    })
}

/// How a multi-select filter stores its selection in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// All selected keys joined into one value: `color=red,blue`.
    Delimited(String),
    /// One array entry per selected key: `tag[]=a&tag[]=b`.
    ArrayParam,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Delimited(DEFAULT_SEPARATOR.to_string())
    }
}

/// Multi-select settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiSelect {
    pub encoding: Encoding,
    /// Advisory rendering hint copied onto each link.
    pub display_as_checkbox: bool,
}

impl MultiSelect {
    pub fn delimited(separator: impl Into<String>) -> Self {
        Self {
            encoding: Encoding::Delimited(separator.into()),
            display_as_checkbox: false,
        }
    }

    pub fn array() -> Self {
        Self {
            encoding: Encoding::ArrayParam,
            display_as_checkbox: false,
        }
    }

    pub fn checkbox(mut self) -> Self {
        self.display_as_checkbox = true;
        self
    }
}

/// Selection semantics of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Exactly one value at a time (also used by sorters).
    #[default]
    Single,
    /// Any number of values at a time.
    Multi(MultiSelect),
}

/// Domain data of one filter, supplied by the host application.
///
/// Implementations are usually unit structs returning constants, or
/// [`DeclaredFilter`]s loaded from the site file.
pub trait FilterDefinition: Send + Sync {
    /// Query-string key this filter reads and writes.
    fn parameter(&self) -> &str;

    /// Untranslated title of the filter.
    fn label(&self) -> &str;

    /// Options in display order.
    fn values(&self) -> Vec<FilterOption> {
        Vec::new()
    }

    fn selection(&self) -> Selection {
        Selection::Single
    }
}

/// Collaborators for one request.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    /// Current request's query parameters.
    pub params: &'a QueryParams,
    pub urls: &'a dyn UrlBuilder,
    pub translator: &'a dyn Translator,
}

impl<'a> RequestContext<'a> {
    /// Context with untranslated labels.
    pub fn new(params: &'a QueryParams, urls: &'a dyn UrlBuilder) -> Self {
        Self {
            params,
            urls,
            translator: &IdentityTranslator,
        }
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = translator;
        self
    }
}

/// A filter definition bound to the route of the listing it belongs to.
#[derive(Clone)]
pub struct Filter {
    definition: Arc<dyn FilterDefinition>,
    route: String,
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("parameter", &self.definition.parameter())
            .field("route", &self.route)
            .field("selection", &self.definition.selection())
            .finish()
    }
}

impl Filter {
    pub fn new(definition: Arc<dyn FilterDefinition>, route: impl Into<String>) -> Self {
        Self {
            definition,
            route: route.into(),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn parameter(&self) -> &str {
        self.definition.parameter()
    }

    /// Translated filter title.
    pub fn label(&self, ctx: &RequestContext<'_>) -> String {
        ctx.translator.translate(self.definition.label())
    }

    pub fn values(&self) -> Vec<FilterOption> {
        self.definition.values()
    }

    pub fn selection(&self) -> Selection {
        self.definition.selection()
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self.selection(), Selection::Multi(_))
    }

    /// One link per option, in option order.
    pub fn links(&self, ctx: &RequestContext<'_>) -> FacetResult<Vec<LinkItem>> {
        match self.selection() {
            Selection::Single => single::links(self, ctx),
            Selection::Multi(multi) => multi::links(self, &multi, ctx),
        }
    }

    /// Label of the active option, or of the first option when none is active.
    ///
    /// Fails with [`FacetError::EmptyOptions`](crate::error::FacetError) when
    /// the filter has no options.
    pub fn active_label(&self, ctx: &RequestContext<'_>) -> FacetResult<String> {
        let links = self.links(ctx)?;
        single::active_label(links, self.parameter())
    }

    /// URL of this filter's route with the current parameters (minus `page`
    /// and this filter's parameter) overlaid with `delta`.
    pub fn build_route(&self, ctx: &RequestContext<'_>, delta: QueryParams) -> FacetResult<String> {
        build_route(ctx, &self.route, self.parameter(), delta)
    }

    /// URL of this filter's route with no query parameters at all.
    pub fn root_url(&self, ctx: &RequestContext<'_>) -> FacetResult<String> {
        ctx.urls.build_url(&self.route, &QueryParams::new())
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::urls::RouteTable;

    struct Bare;

    impl FilterDefinition for Bare {
        fn parameter(&self) -> &str {
            "bare"
        }

        fn label(&self) -> &str {
            "Bare"
        }
    }

    #[test]
    fn definition_defaults() {
        assert!(Bare.values().is_empty());
        assert_eq!(Bare.selection(), Selection::Single);
    }

    #[test]
    fn default_encoding_is_comma_delimited() {
        assert_eq!(Encoding::default(), Encoding::Delimited(",".to_string()));
        assert!(!MultiSelect::default().display_as_checkbox);
        assert!(MultiSelect::array().checkbox().display_as_checkbox);
    }

    #[test]
    fn option_keys_are_stringified() {
        let option = FilterOption::new(42, "Forty-two");
        assert_eq!(option.key, "42");
    }

    #[test]
    fn option_deserializes_numeric_keys() {
        let option: FilterOption = serde_json::from_str(r#"{"key": 10, "label": "Ten"}"#).unwrap();
        assert_eq!(option.key, "10");
    }

    #[test]
    fn build_route_drops_page_and_own_parameter() {
        let routes = RouteTable::new().route("list", "/list");
        let params = QueryParams::parse("page=4&bare=x&q=shoes");
        let ctx = RequestContext::new(&params, &routes);
        let filter = Filter::new(Arc::new(Bare), "list");

        let url = filter.build_route(&ctx, QueryParams::new()).unwrap();
        assert_eq!(url, "/list?q=shoes");
        assert_eq!(filter.root_url(&ctx).unwrap(), "/list");
    }

    #[test]
    fn active_label_of_empty_filter_is_an_error() {
        let routes = RouteTable::new().route("list", "/list");
        let params = QueryParams::new();
        let ctx = RequestContext::new(&params, &routes);
        let filter = Filter::new(Arc::new(Bare), "list");

        assert!(filter.links(&ctx).unwrap().is_empty());
        assert!(matches!(
            filter.active_label(&ctx),
            Err(crate::error::FacetError::EmptyOptions { .. })
        ));
    }
}
