//! Listing page rendering with Tera templates and suggestion resolution.

use std::path::Path;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

/// Name the built-in listing template is registered under.
const BUILTIN_SECTION_TEMPLATE: &str = "builtin/section.html";

/// Theme engine for rendering listing pages.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine, loading overrides from `template_dir` when given.
    pub fn new(template_dir: Option<&Path>) -> Result<Self> {
        let mut tera = match template_dir {
            Some(dir) => {
                let pattern = dir.join("**/*.html");
                let pattern_str = pattern
                    .to_str()
                    .context("invalid template directory path")?;
                Tera::new(pattern_str).context("failed to initialize Tera templates")?
            }
            None => Tera::default(),
        };

        tera.add_raw_template(
            BUILTIN_SECTION_TEMPLATE,
            include_str!("../templates/section.html"),
        )
        .context("failed to register built-in section template")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// First suggestion that names a loaded template.
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        suggestions
            .iter()
            .find(|name| self.tera.get_template(name).is_ok())
            .map(|name| (*name).to_string())
    }

    /// Render the listing page of `section_name`.
    ///
    /// Lookup order: `section--{name}.html`, `section.html`, built-in.
    pub fn render_section(
        &self,
        section_name: &str,
        context: &tera::Context,
    ) -> Result<String, tera::Error> {
        let specific = format!("section--{section_name}.html");
        let template = self
            .resolve_template(&[specific.as_str(), "section.html"])
            .unwrap_or_else(|| BUILTIN_SECTION_TEMPLATE.to_string());

        self.tera.render(&template, context)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn listing_context() -> tera::Context {
        let mut context = tera::Context::new();
        context.insert(
            "section",
            &serde_json::json!({"name": "products", "label": "Products", "url": "/products"}),
        );
        context.insert(
            "filters",
            &serde_json::json!([{
                "label": "Color",
                "parameter": "color",
                "multiple": true,
                "links": [
                    {"label": "Red", "value": "red", "active": true, "url": "/products", "root_url": "/products", "is_checkbox": true},
                    {"label": "Blue", "value": "blue", "active": false, "url": "/products?color=red,blue", "root_url": "/products", "is_checkbox": true}
                ]
            }]),
        );
        context.insert("sorter", &serde_json::Value::Null);
        context.insert(
            "active_filters",
            &serde_json::json!([{"label": "Red", "value": "red", "active": true, "url": "/products"}]),
        );
        context
    }

    #[test]
    fn builtin_template_renders_links() {
        let theme = ThemeEngine::new(None).unwrap();
        let html = theme.render_section("products", &listing_context()).unwrap();

        assert!(html.contains("Products"));
        // Tera escapes `/` in URLs; the query part survives verbatim.
        assert!(html.contains("color=red,blue"));
        assert!(html.contains("Blue"));
    }

    #[test]
    fn resolve_template_misses_without_theme() {
        let theme = ThemeEngine::new(None).unwrap();
        assert!(theme.resolve_template(&["section.html"]).is_none());
        assert_eq!(
            theme.resolve_template(&[BUILTIN_SECTION_TEMPLATE]).as_deref(),
            Some(BUILTIN_SECTION_TEMPLATE)
        );
    }

    #[test]
    fn theme_directory_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("section--products.html"),
            "custom {{ section.label }}",
        )
        .unwrap();

        let theme = ThemeEngine::new(Some(dir.path())).unwrap();
        let html = theme.render_section("products", &listing_context()).unwrap();
        assert_eq!(html, "custom Products");

        let other = theme.render_section("articles", &listing_context()).unwrap();
        assert!(other.contains("<html"));
    }
}
