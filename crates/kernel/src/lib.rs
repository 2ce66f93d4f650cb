//! Faceted Kernel Library
//!
//! Filter-link engine for faceted listing pages, plus the listing server
//! and scaffolding commands built on it. The `faceted` binary is a thin
//! wrapper around this crate; hosts with code-defined filters register them
//! on a [`FilterRegistry`] and build [`AppState`] themselves.

pub mod config;
pub mod error;
pub mod filter;
pub mod params;
pub mod registry;
pub mod routes;
pub mod scaffold;
pub mod section;
pub mod site;
pub mod state;
pub mod theme;
pub mod translate;
pub mod urls;

pub use error::{AppError, FacetError, FacetResult};
pub use filter::{
    Encoding, Filter, FilterDefinition, FilterOption, LinkItem, MultiSelect, RequestContext,
    Selection,
};
pub use params::{ParamValue, QueryParams};
pub use registry::FilterRegistry;
pub use section::Section;
pub use site::Site;
pub use state::AppState;
pub use translate::{Catalog, IdentityTranslator, Translator};
pub use urls::{RouteTable, UrlBuilder};
