//! Link items and the URL plumbing shared by every filter kind.

use serde::Serialize;

use super::{PAGE_PARAMETER, RequestContext};
use crate::error::FacetResult;
use crate::params::QueryParams;

/// One rendered filter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkItem {
    /// Translated option label.
    pub label: String,
    /// The option key as written to the query string.
    pub value: String,
    /// Whether the option is part of the current selection.
    pub active: bool,
    /// URL that toggles this option.
    pub url: String,
    /// URL of the route with no parameters at all (multi-select only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    /// Rendering hint (multi-select only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_checkbox: Option<bool>,
}

/// Build the URL for `route` from the current parameters, minus `page` and
/// `parameter`, overlaid with `delta`.
///
/// Builder errors are returned as-is.
pub fn build_route(
    ctx: &RequestContext<'_>,
    route: &str,
    parameter: &str,
    delta: QueryParams,
) -> FacetResult<String> {
    let params = ctx
        .params
        .without(&[PAGE_PARAMETER, parameter])
        .merged(delta);
    ctx.urls.build_url(route, &params)
}
