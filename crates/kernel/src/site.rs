//! Site file loading.
//!
//! A site file is a YAML document declaring everything the listing server
//! needs: named routes, filters, sections, and label translations.
//!
//! ```yaml
//! routes:
//!   products: /products
//! filters:
//!   - id: color
//!     parameter: color
//!     label: Color
//!     selection: { type: multi, separator: "," }
//!     values:
//!       - { key: red, label: Red }
//! sections:
//!   - name: products
//!     route: products
//!     filters: [color]
//! translations:
//!   Color: Colour
//! ```
//!
//! Loading is lenient: problems that only affect one filter or section are
//! collected as warnings and the rest of the site still loads.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::filter::FilterDeclaration;
use crate::registry::FilterRegistry;
use crate::section::Section;
use crate::translate::Catalog;
use crate::urls::{RouteTable, is_servable_path};

/// Maximum site file size (1 MB).
const MAX_SITE_FILE_SIZE: u64 = 1024 * 1024;

/// Raw site file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteFile {
    /// Prefix for generated URLs (e.g. "https://shop.example").
    #[serde(default)]
    pub base_url: Option<String>,
    /// Route name → path.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
    #[serde(default)]
    pub filters: Vec<FilterDeclaration>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Label → translated label.
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

/// Everything built from a site file.
pub struct Site {
    pub registry: FilterRegistry,
    pub routes: RouteTable,
    pub catalog: Catalog,
    pub sections: Vec<Section>,
    /// Problems found while loading.
    pub warnings: Vec<String>,
}

impl Site {
    /// Load and build a site file from disk.
    pub fn load(path: &Path, registry: FilterRegistry) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("failed to stat site file {}", path.display()))?;
        if metadata.len() > MAX_SITE_FILE_SIZE {
            anyhow::bail!(
                "site file {} is larger than {MAX_SITE_FILE_SIZE} bytes",
                path.display()
            );
        }

        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read site file {}", path.display()))?;
        let site = Self::from_yaml(&yaml, registry)
            .with_context(|| format!("failed to parse site file {}", path.display()))?;

        info!(
            path = %path.display(),
            filters = site.registry.len(),
            sections = site.sections.len(),
            routes = site.routes.entries().len(),
            "site loaded"
        );
        for warning in &site.warnings {
            warn!(path = %path.display(), "{warning}");
        }

        Ok(site)
    }

    /// Parse and build a site from YAML text.
    pub fn from_yaml(yaml: &str, registry: FilterRegistry) -> Result<Self> {
        let file: SiteFile = serde_yml::from_str(yaml).context("invalid site YAML")?;
        Ok(Self::build(file, registry))
    }

    /// Build a site on top of `registry` (which may already hold code-defined
    /// filters).
    pub fn build(file: SiteFile, mut registry: FilterRegistry) -> Self {
        let mut warnings = registry.apply_declarations(&file.filters);

        let mut routes = RouteTable::new();
        if let Some(base_url) = &file.base_url {
            routes = routes.with_base_url(base_url.as_str());
        }
        for (name, path) in &file.routes {
            routes.insert(name.as_str(), path.as_str());
            if let Some(normalized) = routes.path(name)
                && !is_servable_path(normalized)
            {
                warnings.push(format!(
                    "route '{name}' has path '{normalized}' which cannot be served as a listing page"
                ));
            }
        }

        let mut sections = Vec::with_capacity(file.sections.len());
        let mut seen = HashSet::new();
        for section in file.sections {
            if !seen.insert(section.name.clone()) {
                warnings.push(format!(
                    "section '{}' is declared more than once; keeping the first",
                    section.name
                ));
                continue;
            }
            if !routes.contains(&section.route) {
                warnings.push(format!(
                    "section '{}' uses undeclared route '{}'",
                    section.name, section.route
                ));
            }
            for id in section.filters.iter().chain(section.sorter.iter()) {
                if !registry.contains(id) {
                    warnings.push(format!(
                        "section '{}' refers to unregistered filter '{id}'; it will be skipped",
                        section.name
                    ));
                }
            }
            sections.push(section);
        }

        Self {
            registry,
            routes,
            catalog: Catalog::new(file.translations),
            sections,
            warnings,
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}
