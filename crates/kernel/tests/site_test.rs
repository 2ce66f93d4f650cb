#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Site file loading and application state tests.

use std::fs;

use faceted_kernel::config::Config;
use faceted_kernel::params::QueryParams;
use faceted_kernel::registry::FilterRegistry;
use faceted_kernel::site::Site;
use faceted_kernel::state::AppState;
use faceted_kernel::urls::UrlBuilder;
use faceted_test_utils::SAMPLE_SITE_YAML;

fn write_site(dir: &tempfile::TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("facets.yml");
    fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn loads_site_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_site(&dir, SAMPLE_SITE_YAML);

    let site = Site::load(&path, FilterRegistry::new()).unwrap();
    assert_eq!(site.registry.ids(), vec!["brand", "color", "sort", "tag"]);
    assert_eq!(site.sections.len(), 2);
    // `ghost` is referenced but never declared
    assert_eq!(site.warnings.len(), 1);
    assert!(site.warnings[0].contains("ghost"));
}

#[test]
fn missing_site_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Site::load(&dir.path().join("absent.yml"), FilterRegistry::new())
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("absent.yml"));
}

#[test]
fn invalid_declarations_are_skipped_with_warnings() {
    let yaml = r#"
filters:
  - { id: "9lives", parameter: lives }
  - { id: empty_param, parameter: "" }
  - id: bad_separator
    parameter: size
    selection: { type: multi, separator: "" }
  - { id: good, parameter: good }
"#;
    let site = Site::from_yaml(yaml, FilterRegistry::new()).unwrap();
    assert_eq!(site.registry.ids(), vec!["good"]);
    assert_eq!(site.warnings.len(), 3);
}

#[test]
fn numeric_option_keys_compare_as_strings() {
    let yaml = r#"
routes:
  shop: /shop
filters:
  - id: rating
    parameter: rating
    selection: { type: multi }
    values:
      - { key: 4, label: "4 stars" }
      - { key: 5, label: "5 stars" }
sections:
  - { name: shop, route: shop, filters: [rating] }
"#;
    let site = Site::from_yaml(yaml, FilterRegistry::new()).unwrap();
    let params = QueryParams::parse("rating=5");
    let ctx = faceted_kernel::filter::RequestContext::new(&params, &site.routes);
    let active = site
        .section("shop")
        .unwrap()
        .active_filters(&site.registry, &ctx)
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].value, "5");
}

#[test]
fn base_url_prefixes_generated_urls() {
    let yaml = "base_url: https://shop.example/\nroutes:\n  products: products\n";
    let site = Site::from_yaml(yaml, FilterRegistry::new()).unwrap();
    let url = site
        .routes
        .build_url("products", &QueryParams::parse("sort=new"))
        .unwrap();
    assert_eq!(url, "https://shop.example/products?sort=new");
}

#[test]
fn state_applies_configured_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        site_file: write_site(&dir, SAMPLE_SITE_YAML),
        base_url: Some("http://localhost:8080".to_string()),
        ..Config::default()
    };

    let state = AppState::new(&config, FilterRegistry::new()).unwrap();
    let url = state.routes().build_url("products", &QueryParams::new()).unwrap();
    assert_eq!(url, "http://localhost:8080/products");
}

#[test]
fn state_uses_catalog_for_labels() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        site_file: write_site(&dir, SAMPLE_SITE_YAML),
        ..Config::default()
    };

    let state = AppState::new(&config, FilterRegistry::new()).unwrap();
    let params = QueryParams::new();
    let ctx = state.request_context(&params);
    let color = state.registry().resolve("color").unwrap();
    let filter = faceted_kernel::filter::Filter::new(color, "products");
    assert_eq!(filter.label(&ctx), "Colour");
}
