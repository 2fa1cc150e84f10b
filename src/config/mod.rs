//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routing file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → RoutingConfig { logging, server, routes[] }
//!     → loader.rs build_routes (each entry through RouteCollection::create)
//!     → RouteCollection (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → RouteReloader: loader.rs rebuilds the collection
//!     → valid collection sent to the owner
//!     → owner swaps it into SharedRoutes
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Route entries stay untyped until the route builder validates them
//! - A reload that fails to build leaves the current routes in place

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::{build_routes, load_config, load_routes, parse_config, ConfigError};
pub use schema::{LoggingConfig, RoutingConfig, ServerParams};
pub use watcher::{ConfigWatcher, RouteReloader};
