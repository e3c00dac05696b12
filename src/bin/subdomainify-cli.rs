use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

use subdomainify::compose::{UrlComposer, UrlOptions};
use subdomainify::config::{load_config, AppConfig};
use subdomainify::rewrite::PathRewriter;
use subdomainify::routing::{realm_of, RouteTable};

#[derive(Parser)]
#[command(name = "subdomainify-cli")]
#[command(about = "Inspect subdomain rewriting and link composition offline", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how an inbound request path is rewritten
    Rewrite {
        /// Host the request is addressed to
        #[arg(long)]
        host: String,
        /// Request path
        path: String,
    },
    /// Compose a link from JSON link options
    UrlFor {
        /// Link options, e.g. '{"resource":"articles","action":"show","id":"1"}'
        options: String,
    },
    /// List the compiled route table
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let table = Arc::new(config.route_table());

    let output = match cli.command {
        Commands::Rewrite { host, path } => {
            let rewriter = PathRewriter::new(table, config.rewrite.clone());
            let rewrite = rewriter.evaluate(&host, &path);
            json!({
                "host": host,
                "path": path,
                "rewritten": rewrite.path,
                "outcome": rewrite.outcome.as_str(),
            })
        }
        Commands::UrlFor { options } => {
            let options: UrlOptions = serde_json::from_str(&options)?;
            let composer = UrlComposer::from_config(table, &config);
            match composer.compose(&options) {
                Ok(url) => json!({ "url": url, "subdomain": composer.needs_subdomain(&options) }),
                Err(e) => json!({ "error": e.to_string(), "kind": e.as_str() }),
            }
        }
        Commands::Routes => routes(&table),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn routes(table: &RouteTable) -> Value {
    let routes: Vec<Value> = table
        .routes()
        .iter()
        .map(|route| {
            json!({
                "method": route.method().as_str(),
                "path": route.pattern().to_string(),
                "target": route.key().to_string(),
                "name": route.name(),
                "realm": realm_of(Some(route.key()), table).as_str(),
                "subdomain": route.is_subdomain(),
            })
        })
        .collect();

    json!({
        "routes": routes,
        "anchor": table.topmost_subdomain_route().map(|r| r.pattern().to_string()),
    })
}
