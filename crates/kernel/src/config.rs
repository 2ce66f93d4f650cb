//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Site file declaring routes, filters, and sections (default: ./facets.yml).
    pub site_file: PathBuf,

    /// Application root the scaffolding commands write into (default: .).
    pub app_dir: PathBuf,

    /// Optional directory of Tera templates overriding the built-in listing page.
    pub templates_dir: Option<PathBuf>,

    /// Prefix for generated URLs; overrides the site file's `base_url`.
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let site_file = env::var("FACETS_SITE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./facets.yml"));

        let app_dir = env::var("FACETS_APP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let templates_dir = env::var("FACETS_TEMPLATES_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let base_url = env::var("FACETS_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            site_file,
            app_dir,
            templates_dir,
            base_url,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            site_file: PathBuf::from("./facets.yml"),
            app_dir: PathBuf::from("."),
            templates_dir: None,
            base_url: None,
        }
    }
}
