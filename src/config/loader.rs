//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RoutingConfig;
use crate::controller::ControllerRegistry;
use crate::routing::{ConfigurationError, MatcherFactory, RouteCollection, RouteOptions};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid route at routes[{index}]: {source}")]
    Route {
        index: usize,
        #[source]
        source: ConfigurationError,
    },
}

/// Load a routing file without building its routes.
pub fn load_config(path: &Path) -> Result<RoutingConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<RoutingConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build every route of `config`, in file order.
///
/// Stops at the first invalid route.
pub fn build_routes(
    config: &RoutingConfig,
    matcher_factory: Arc<dyn MatcherFactory>,
    controllers: &ControllerRegistry,
) -> Result<RouteCollection, ConfigError> {
    let mut routes = RouteCollection::new(config.server.clone(), matcher_factory)
        .with_controllers(controllers.clone());

    for (index, entry) in config.routes.iter().enumerate() {
        let route = RouteOptions::from_value(entry.clone())
            .and_then(|options| routes.create(options))
            .map_err(|source| ConfigError::Route { index, source })?;
        routes.add(route);
    }

    Ok(routes)
}

/// Load a routing file and build its route collection.
pub fn load_routes(
    path: &Path,
    matcher_factory: Arc<dyn MatcherFactory>,
    controllers: &ControllerRegistry,
) -> Result<RouteCollection, ConfigError> {
    let config = load_config(path)?;
    let routes = build_routes(&config, matcher_factory, controllers)?;

    tracing::info!(
        path = %path.display(),
        routes = routes.len(),
        "Routes loaded"
    );
    Ok(routes)
}
