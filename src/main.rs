//! `ws-router`: inspect and watch WebSocket routing files.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use clap::{Parser, Subcommand};

use ws_router::config::{build_routes, load_config, ConfigWatcher};
use ws_router::controller::ControllerRegistry;
use ws_router::lifecycle::shutdown_signal;
use ws_router::observability::init_logging;
use ws_router::routing::{MatcherFactory, PatternMatcherFactory, Route, RouteCollection, SharedRoutes};

#[derive(Parser)]
#[command(name = "ws-router")]
#[command(about = "Validate, query and watch WebSocket route tables", long_about = None)]
struct Cli {
    /// Routing file (TOML)
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every route and print the route table
    Check,
    /// Print the route a request would be dispatched to
    Resolve {
        /// Request path, optionally with a query string
        path: String,

        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Value of the Host header
        #[arg(long)]
        host: Option<String>,
    },
    /// Rebuild the routes whenever the routing file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            tracing::error!(path = %cli.config.display(), error = %e, "Failed to load routing file");
            return Err(e.into());
        }
    };
    init_logging(&config.logging.level);

    let matcher_factory: Arc<dyn MatcherFactory> = Arc::new(PatternMatcherFactory::new());
    let controllers = ControllerRegistry::with_builtins();
    let routes = build_routes(&config, matcher_factory.clone(), &controllers)?;

    tracing::info!(
        path = %cli.config.display(),
        routes = routes.len(),
        default_sub_protocols = ?routes.server_params().sub_protocols,
        "Routes loaded"
    );

    match cli.command {
        Commands::Check => {
            print_table(&routes);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { path, method, host } => {
            let mut builder = Request::builder().method(method.as_str()).uri(path.as_str());
            if let Some(host) = host {
                builder = builder.header("host", host);
            }
            let request = builder.body(Body::empty())?;

            match routes.match_request(&request) {
                Some(route) => {
                    print_route(route);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("No route matches {} {}", method, path);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Watch => {
            let shared = SharedRoutes::new(routes);
            let (watcher, mut updates) = ConfigWatcher::new(&cli.config, matcher_factory, controllers);
            let _watcher = watcher.run()?;

            let stop = shutdown_signal();
            tokio::pin!(stop);

            loop {
                tokio::select! {
                    Some(routes) = updates.recv() => {
                        shared.replace(routes);
                        print_table(&shared.load());
                    }
                    res = &mut stop => {
                        if let Err(e) = res {
                            tracing::error!(error = %e, "Failed to listen for shutdown signal");
                        }
                        break;
                    }
                }
            }

            tracing::info!("Watcher stopped");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_table(routes: &RouteCollection) {
    if routes.is_empty() {
        println!("(no routes)");
        return;
    }
    for (position, route) in routes.iter().enumerate() {
        print!("{:>3}  ", position);
        print_route(route);
    }
}

fn print_route(route: &Route) {
    println!(
        "{:<32} controller={:?} sub_protocols={:?}",
        route.pattern(),
        route.controller(),
        route.sub_protocols()
    );
}
