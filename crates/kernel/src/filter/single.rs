//! Single-select link computation.

use super::{Filter, LinkItem, RequestContext};
use crate::error::{FacetError, FacetResult};
use crate::params::QueryParams;

pub(super) fn links(filter: &Filter, ctx: &RequestContext<'_>) -> FacetResult<Vec<LinkItem>> {
    let parameter = filter.parameter();
    // Array-shaped input never matches a scalar key.
    let current = ctx.params.single(parameter);

    filter
        .values()
        .into_iter()
        .map(|option| -> FacetResult<LinkItem> {
            let active = current == Some(option.key.as_str());

            let mut delta = QueryParams::new();
            if !active {
                delta.set(parameter, option.key.as_str());
            }

            Ok(LinkItem {
                label: ctx.translator.translate(&option.label),
                url: filter.build_route(ctx, delta)?,
                value: option.key,
                active,
                root_url: None,
                is_checkbox: None,
            })
        })
        .collect()
}

pub(super) fn active_label(links: Vec<LinkItem>, parameter: &str) -> FacetResult<String> {
    let fallback = links.first().map(|link| link.label.clone());

    links
        .into_iter()
        .find(|link| link.active)
        .map(|link| link.label)
        .or(fallback)
        .ok_or_else(|| FacetError::EmptyOptions {
            parameter: parameter.to_string(),
        })
}
