//! Source scaffolding for filters and sections.
//!
//! `make:filter` and `make:section` write a stub into the application's
//! `src/facets/` tree and regenerate that directory's `mod.rs` so the new
//! module is compiled in. These commands never start the server.

pub mod naming;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use self::naming::{singular_studly, snake_case};

const FILTER_STUB: &str = include_str!("../../stubs/filter.rs.stub");
const SECTION_STUB: &str = include_str!("../../stubs/section.rs.stub");

/// Directory of generated filter definitions, relative to the app root.
pub const FILTER_DIR: &str = "src/facets/definitions";

/// Directory of generated sections, relative to the app root.
pub const SECTION_DIR: &str = "src/facets/sections";

/// Header of every generated module index.
const INDEX_HEADER: &str = "//! Generated by `faceted make:*`. Rewritten on every run.\n";

/// Generate a filter definition stub. Returns the written file.
pub fn cmd_make_filter(app_dir: &Path, name: &str) -> Result<PathBuf> {
    let class_name = class_name(name)?;
    let file_stem = snake_case(&class_name);

    let mut context = tera::Context::new();
    context.insert("class_name", &class_name);
    context.insert("filter_id", &file_stem);
    context.insert("filter_parameter", &format!("filter_{file_stem}"));

    let path = write_stub(&app_dir.join(FILTER_DIR), &file_stem, FILTER_STUB, &context)?;

    println!("Filter {class_name} created: {}", path.display());
    Ok(path)
}

/// Generate a section stub. Without `route` the section serves the route
/// named after itself.
pub fn cmd_make_section(app_dir: &Path, name: &str, route: Option<&str>) -> Result<PathBuf> {
    let class_name = class_name(name)?;
    let file_stem = snake_case(&class_name);
    let route_name = match route {
        Some(route) if !route.trim().is_empty() => route_name(route)?,
        _ => file_stem.clone(),
    };

    let mut context = tera::Context::new();
    context.insert("class_name", &class_name);
    context.insert("section_name", &file_stem);
    context.insert("route_name", &route_name);

    let path = write_stub(&app_dir.join(SECTION_DIR), &file_stem, SECTION_STUB, &context)?;

    println!("Section {class_name} created: {}", path.display());
    Ok(path)
}

fn class_name(name: &str) -> Result<String> {
    let class_name = singular_studly(name);
    if class_name.is_empty() {
        bail!("'{name}' does not contain any letters or digits to build a name from");
    }
    if class_name.starts_with(|c: char| c.is_ascii_digit()) {
        bail!("'{name}' would produce an identifier starting with a digit");
    }
    Ok(class_name)
}

/// Lowercased route name; only ASCII letters, digits, `_`, `-` and `.` are
/// accepted since the name is written into a string literal.
fn route_name(route: &str) -> Result<String> {
    let route = route.trim().to_lowercase();
    if !route
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        bail!("route '{route}' may only contain letters, digits, '_', '-' and '.'");
    }
    Ok(route)
}

fn write_stub(dir: &Path, file_stem: &str, stub: &str, context: &tera::Context) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let source = tera::Tera::one_off(stub, context, false).context("failed to render stub")?;
    let path = dir.join(format!("{file_stem}.rs"));
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;

    refresh_module_index(dir)?;
    info!(path = %path.display(), "stub written");

    Ok(path)
}

/// Rewrite `dir/mod.rs` to declare every sibling `*.rs` file, sorted.
pub fn refresh_module_index(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    let mut modules = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "rs")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            && stem != "mod"
        {
            modules.push(stem.to_string());
        }
    }
    modules.sort();

    let mut index = String::from(INDEX_HEADER);
    if !modules.is_empty() {
        index.push('\n');
    }
    for module in &modules {
        index.push_str(&format!("pub mod {module};\n"));
    }

    let index_path = dir.join("mod.rs");
    fs::write(&index_path, index)
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    Ok(())
}
