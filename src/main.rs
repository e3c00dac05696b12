//! subdomainify demo server.
//!
//! Serves a configured set of resourceful routes behind the subdomain
//! rewrite layer. Every recognized request is answered with a JSON
//! description of the matched route and its canonical link.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request (Host: foo.example.com, /articles/1)
//!         │
//!         ▼
//!     ┌──────────────────┐   RouteTable   ┌──────────────────┐
//!     │  rewrite layer   │◀──────────────▶│ routing (table,  │
//!     │ /blogs/foo/...   │                │  realm, pattern) │
//!     └────────┬─────────┘                └────────┬─────────┘
//!              ▼                                   ▼
//!     ┌──────────────────┐                ┌──────────────────┐
//!     │   http server    │───────────────▶│     compose      │
//!     │ dispatch handler │   self link    │  (UrlComposer)   │
//!     └──────────────────┘                └──────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use subdomainify::config::{load_config, AppConfig};
use subdomainify::http::AppServer;
use subdomainify::lifecycle::{signals, Shutdown};
use subdomainify::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "subdomainify")]
#[command(about = "Serve resourceful routes addressed by subdomain", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("subdomainify v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        resources = config.resources.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = AppServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
