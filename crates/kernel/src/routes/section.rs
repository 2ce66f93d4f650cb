//! Section listing routes.
//!
//! Every section is served twice: as JSON under `/api/sections/{name}` and
//! as an HTML page at its own route path. Both share [`build_listing`].

use std::collections::HashSet;

use axum::extract::{Path, RawQuery, State};
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, FacetResult};
use crate::filter::LinkItem;
use crate::params::QueryParams;
use crate::section::Section;
use crate::state::AppState;
use crate::urls::{UrlBuilder, is_servable_path};

/// Paths owned by the server itself; sections may not be mounted over them.
const RESERVED_PATHS: &[&str] = &["/health", "/api"];

/// Create the section API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sections", get(list_sections))
        .route("/api/sections/{name}", get(get_section))
}

/// Mount one HTML listing page per distinct section route path.
pub fn listing_router(state: &AppState) -> Router<AppState> {
    let mut router = Router::new();
    let mut mounted = HashSet::new();

    for section in &state.site().sections {
        let Some(path) = state.routes().path(&section.route) else {
            warn!(section = %section.name, route = %section.route, "section route has no path; not mounted");
            continue;
        };

        if !is_servable_path(path) {
            warn!(section = %section.name, %path, "section path has captures or wildcards; not mounted");
            continue;
        }
        if is_reserved(path) {
            warn!(section = %section.name, %path, "section path collides with a server route; not mounted");
            continue;
        }
        if !mounted.insert(path.to_string()) {
            debug!(section = %section.name, %path, "path already serves another section");
            continue;
        }

        let name = section.name.clone();
        router = router.route(
            path,
            get(move |State(state): State<AppState>, RawQuery(query): RawQuery| {
                let name = name.clone();
                async move { render_listing(state, &name, query) }
            }),
        );
        debug!(section = %section.name, %path, "listing mounted");
    }

    router
}

fn is_reserved(path: &str) -> bool {
    RESERVED_PATHS
        .iter()
        .any(|reserved| path == *reserved || path.starts_with(&format!("{reserved}/")))
}

// -------------------------------------------------------------------------
// Response types
// -------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub name: String,
    pub label: String,
    pub route: String,
    /// Unfiltered listing URL; absent when the route is not declared.
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FilterView {
    pub label: String,
    pub parameter: String,
    pub multiple: bool,
    pub links: Vec<LinkItem>,
}

#[derive(Debug, Serialize)]
pub struct SorterView {
    pub label: String,
    pub parameter: String,
    /// Label of the selected ordering; absent when the sorter has no values.
    pub active_label: Option<String>,
    pub links: Vec<LinkItem>,
}

/// Everything a listing page needs to render its filter UI.
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub section: SectionSummary,
    pub filters: Vec<FilterView>,
    pub sorter: Option<SorterView>,
    pub active_filters: Vec<LinkItem>,
}

// -------------------------------------------------------------------------
// View building
// -------------------------------------------------------------------------

fn summarize(state: &AppState, section: &Section) -> SectionSummary {
    let url = state
        .routes()
        .build_url(&section.route, &QueryParams::new())
        .ok();

    SectionSummary {
        name: section.name.clone(),
        label: section.label().to_string(),
        route: section.route.clone(),
        url,
    }
}

/// Compute the filter links of `section` for the current query.
pub fn build_listing(
    state: &AppState,
    section: &Section,
    params: &QueryParams,
) -> FacetResult<ListingView> {
    let registry = state.registry();
    let ctx = state.request_context(params);

    let mut filters = Vec::new();
    for filter in section.filters(registry) {
        filters.push(FilterView {
            label: filter.label(&ctx),
            parameter: filter.parameter().to_string(),
            multiple: filter.is_multiple(),
            links: filter.links(&ctx)?,
        });
    }

    let sorter = match section.sorter(registry) {
        Some(sorter) => {
            let links = sorter.links(&ctx)?;
            let active_label = if links.is_empty() {
                None
            } else {
                Some(sorter.active_label(&ctx)?)
            };
            Some(SorterView {
                label: sorter.label(&ctx),
                parameter: sorter.parameter().to_string(),
                active_label,
                links,
            })
        }
        None => None,
    };

    Ok(ListingView {
        section: summarize(state, section),
        filters,
        sorter,
        active_filters: section.active_filters(registry, &ctx)?,
    })
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn list_sections(State(state): State<AppState>) -> Json<Vec<SectionSummary>> {
    Json(
        state
            .site()
            .sections
            .iter()
            .map(|section| summarize(&state, section))
            .collect(),
    )
}

async fn get_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<ListingView>> {
    let section = state.site().section(&name).ok_or(AppError::NotFound)?;
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    Ok(Json(build_listing(&state, section, &params)?))
}

fn render_listing(state: AppState, name: &str, query: Option<String>) -> AppResult<Html<String>> {
    let section = state.site().section(name).ok_or(AppError::NotFound)?;
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    let view = build_listing(&state, section, &params)?;
    let context = tera::Context::from_serialize(&view)?;
    let html = state.theme().render_section(&section.name, &context)?;

    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_paths() {
        assert!(is_reserved("/health"));
        assert!(is_reserved("/api"));
        assert!(is_reserved("/api/sections"));
        assert!(!is_reserved("/apiary"));
        assert!(!is_reserved("/products"));
    }
}
