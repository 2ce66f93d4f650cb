//! Faceted
//!
//! Listing server and scaffolding commands.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use faceted_kernel::config::Config;
use faceted_kernel::registry::FilterRegistry;
use faceted_kernel::state::AppState;
use faceted_kernel::{routes, scaffold};

#[derive(Parser, Debug)]
#[command(name = "faceted", version, about = "Faceted listing server")]
struct Cli {
    /// Site file (overrides FACETS_SITE)
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    /// Application root for generated files (overrides FACETS_APP_DIR)
    #[arg(long, global = true)]
    app_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the listing server (default)
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate a filter definition stub
    #[command(name = "make:filter")]
    MakeFilter {
        /// Filter name, singular or plural
        name: String,
    },

    /// Generate a section stub
    #[command(name = "make:section")]
    MakeSection {
        /// Section name, singular or plural
        name: String,

        /// Route the section serves; defaults to the section name
        route: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(site) = cli.site {
        config.site_file = site;
    }
    if let Some(app_dir) = cli.app_dir {
        config.app_dir = app_dir;
    }

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Command::MakeFilter { name } => {
            scaffold::cmd_make_filter(&config.app_dir, &name)?;
            Ok(())
        }
        Command::MakeSection { name, route } => {
            scaffold::cmd_make_section(&config.app_dir, &name, route.as_deref())?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(port = config.port, site = %config.site_file.display(), "Starting faceted listing server");

    let state = AppState::new(&config, FilterRegistry::new())
        .context("failed to initialize application state")?;

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
