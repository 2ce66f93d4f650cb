//! Multi-select link computation.
//!
//! Every link toggles one key: an active key is removed from the current
//! selection, an inactive key is appended to it. Newly appended keys go to
//! the end so the query string keeps the order the user picked values in.

use super::{Encoding, Filter, LinkItem, MultiSelect, RequestContext};
use crate::error::FacetResult;
use crate::params::{ParamValue, QueryParams};

pub(super) fn links(
    filter: &Filter,
    multi: &MultiSelect,
    ctx: &RequestContext<'_>,
) -> FacetResult<Vec<LinkItem>> {
    let parameter = filter.parameter();
    let selected = decode_selection(ctx.params.get(parameter), &multi.encoding);
    let root_url = filter.root_url(ctx)?;

    filter
        .values()
        .into_iter()
        .map(|option| -> FacetResult<LinkItem> {
            let (active, toggled) = toggle(&selected, &option.key);
            let delta = encode_selection(parameter, toggled, &multi.encoding);

            Ok(LinkItem {
                label: ctx.translator.translate(&option.label),
                url: filter.build_route(ctx, delta)?,
                value: option.key,
                active,
                root_url: Some(root_url.clone()),
                is_checkbox: Some(multi.display_as_checkbox),
            })
        })
        .collect()
}

/// Read the current selection. Missing or mis-shaped input is no selection.
pub(super) fn decode_selection(value: Option<&ParamValue>, encoding: &Encoding) -> Vec<String> {
    let raw: Vec<&str> = match (encoding, value) {
        (_, None) => Vec::new(),
        (Encoding::Delimited(separator), Some(ParamValue::Single(s))) => {
            if separator.is_empty() {
                vec![s.as_str()]
            } else {
                s.split(separator.as_str()).collect()
            }
        }
        (Encoding::Delimited(_), Some(ParamValue::List(_))) => Vec::new(),
        (Encoding::ArrayParam, Some(value)) => value.as_list(),
    };

    raw.into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Selection after toggling `key`, and whether `key` was selected.
pub(super) fn toggle(selected: &[String], key: &str) -> (bool, Vec<String>) {
    let mut toggled = selected.to_vec();

    let active = match toggled.iter().position(|s| s == key) {
        Some(index) => {
            toggled.remove(index);
            true
        }
        None => {
            toggled.push(key.to_string());
            false
        }
    };

    toggled.retain(|s| !s.is_empty());
    (active, toggled)
}

/// Parameters for a selection; an empty selection omits the parameter.
pub(super) fn encode_selection(
    parameter: &str,
    selection: Vec<String>,
    encoding: &Encoding,
) -> QueryParams {
    let mut delta = QueryParams::new();
    if selection.is_empty() {
        return delta;
    }

    match encoding {
        Encoding::Delimited(separator) => delta.set(parameter, selection.join(separator.as_str())),
        Encoding::ArrayParam => delta.set(parameter, selection),
    }
    delta
}
