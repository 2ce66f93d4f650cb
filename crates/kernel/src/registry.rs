//! Filter registry: stable identifiers → filter factories.
//!
//! Sections refer to their filters and sorter by identifier. Code-defined
//! filters are registered with [`FilterRegistry::register`]; filters declared
//! in the site file go through [`FilterRegistry::apply_declarations`], which
//! validates them and reports problems as warnings instead of failing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::filter::{DeclaredFilter, FilterDeclaration, FilterDefinition};

/// Produces a fresh filter definition.
pub type FilterFactory = Arc<dyn Fn() -> Arc<dyn FilterDefinition> + Send + Sync>;

/// Validate an identifier: must be non-empty, alphanumeric/underscore/hyphen,
/// start with a letter or underscore, max 64 chars.
pub fn is_valid_filter_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && id.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
}

/// Registry of filter factories, keyed by identifier.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    factories: HashMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `id`, replacing any previous registration.
    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn() -> Arc<dyn FilterDefinition> + Send + Sync + 'static,
    {
        self.factories.insert(id.to_string(), Arc::new(factory));
    }

    /// Register a stateless definition type (usually a unit struct).
    pub fn register_default<T>(&mut self, id: &str)
    where
        T: FilterDefinition + Default + 'static,
    {
        self.register(id, || Arc::new(T::default()) as Arc<dyn FilterDefinition>);
    }

    /// Apply site-file declarations, returning a warning per skipped or
    /// overwritten declaration.
    pub fn apply_declarations(&mut self, declarations: &[FilterDeclaration]) -> Vec<String> {
        let mut warnings = Vec::new();

        for decl in declarations {
            if !is_valid_filter_id(&decl.id) {
                warnings.push(format!(
                    "filter id '{}' is invalid (must be alphanumeric/underscore/hyphen, start with letter or underscore)",
                    decl.id
                ));
                continue;
            }
            if let Some(problem) = decl.problem() {
                warnings.push(format!("filter '{}': {problem}", decl.id));
                continue;
            }
            if self.factories.contains_key(&decl.id) {
                warnings.push(format!("filter '{}' overwrites existing registration", decl.id));
            }

            let definition: Arc<dyn FilterDefinition> = Arc::new(DeclaredFilter::from(decl));
            self.factories
                .insert(decl.id.clone(), Arc::new(move || Arc::clone(&definition)));
            debug!(id = %decl.id, parameter = %decl.parameter, "registered declared filter");
        }

        warnings
    }

    /// Instantiate the filter registered under `id`.
    pub fn resolve(&self, id: &str) -> Option<Arc<dyn FilterDefinition>> {
        self.factories.get(id).map(|factory| factory())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// All registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
