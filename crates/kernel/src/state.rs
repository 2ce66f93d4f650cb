//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::filter::RequestContext;
use crate::params::QueryParams;
use crate::registry::FilterRegistry;
use crate::site::Site;
use crate::theme::ThemeEngine;
use crate::urls::RouteTable;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Everything inside is
/// immutable after startup; requests only ever read it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Routes, filters, sections, and translations.
    site: Site,

    /// Listing page templates.
    theme: ThemeEngine,
}

impl AppState {
    /// Load the site file and templates named by `config`.
    ///
    /// `registry` carries any code-defined filters; declarations from the
    /// site file are applied on top of it.
    pub fn new(config: &Config, registry: FilterRegistry) -> Result<Self> {
        let mut site = Site::load(&config.site_file, registry)?;

        if let Some(base_url) = &config.base_url {
            site.routes = std::mem::take(&mut site.routes).with_base_url(base_url.as_str());
        }

        let theme = ThemeEngine::new(config.templates_dir.as_deref())
            .context("failed to initialize theme engine")?;

        info!(
            sections = site.sections.len(),
            filters = site.registry.len(),
            "application state ready"
        );

        Ok(Self::from_parts(site, theme))
    }

    /// Assemble state from an already-built site and theme.
    pub fn from_parts(site: Site, theme: ThemeEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner { site, theme }),
        }
    }

    pub fn site(&self) -> &Site {
        &self.inner.site
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.inner.site.registry
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.site.routes
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Collaborators for evaluating filters against `params`.
    pub fn request_context<'a>(&'a self, params: &'a QueryParams) -> RequestContext<'a> {
        RequestContext::new(params, &self.inner.site.routes)
            .with_translator(&self.inner.site.catalog)
    }
}
