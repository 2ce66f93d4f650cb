//! Sections: one listing endpoint with its filters and sorter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FacetResult;
use crate::filter::{Filter, LinkItem, RequestContext};
use crate::registry::FilterRegistry;

/// Static description of a listing endpoint.
///
/// Filters and the sorter are referenced by registry identifier and
/// instantiated afresh on every call, bound to the section's route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Machine name, used in API paths and template suggestions.
    pub name: String,
    /// Route name every filter link points at.
    pub route: String,
    /// Display title; defaults to the name.
    #[serde(default)]
    pub label: Option<String>,
    /// Filter identifiers in display order.
    #[serde(default)]
    pub filters: Vec<String>,
    /// Sorter identifier.
    #[serde(default)]
    pub sorter: Option<String>,
}

impl Section {
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            label: None,
            filters: Vec::new(),
            sorter: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_filter(mut self, id: impl Into<String>) -> Self {
        self.filters.push(id.into());
        self
    }

    pub fn with_sorter(mut self, id: impl Into<String>) -> Self {
        self.sorter = Some(id.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Instantiate the configured filters. Identifiers the registry does not
    /// know are skipped.
    pub fn filters(&self, registry: &FilterRegistry) -> Vec<Filter> {
        self.filters
            .iter()
            .filter_map(|id| self.instantiate(registry, id))
            .collect()
    }

    /// Instantiate the sorter, if one is configured and registered.
    pub fn sorter(&self, registry: &FilterRegistry) -> Option<Filter> {
        let id = self.sorter.as_deref()?;
        self.instantiate(registry, id)
    }

    /// Active links of every filter, in filter order then option order.
    pub fn active_filters(
        &self,
        registry: &FilterRegistry,
        ctx: &RequestContext<'_>,
    ) -> FacetResult<Vec<LinkItem>> {
        let mut active = Vec::new();

        for filter in self.filters(registry) {
            active.extend(filter.links(ctx)?.into_iter().filter(|link| link.active));
        }

        Ok(active)
    }

    fn instantiate(&self, registry: &FilterRegistry, id: &str) -> Option<Filter> {
        match registry.resolve(id) {
            Some(definition) => Some(Filter::new(definition, self.route.clone())),
            None => {
                debug!(section = %self.name, filter = %id, "skipping unregistered filter");
                None
            }
        }
    }
}
