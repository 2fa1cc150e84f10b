//! WebSocket request router.
//!
//! Maps an incoming upgrade request to a route: a controller plus the
//! sub-protocols that route accepts. Routes are checked in registration
//! order and the first match wins.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ws_router::config::ServerParams;
//! use ws_router::controller::{ControllerRegistry, EchoController};
//! use ws_router::routing::{RouteCollection, RouteOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut routes = RouteCollection::with_defaults(ServerParams::default())
//!     .with_controllers(ControllerRegistry::with_builtins());
//!
//! let chat = routes.create(
//!     RouteOptions::new()
//!         .with_match("GET /chat/*")
//!         .with_sub_protocols(["chat.v2", "chat.v1"])
//!         .with_controller(Arc::new(EchoController)),
//! )?;
//! routes.add(chat);
//! routes.add(routes.create(RouteOptions::new().with_controller_name("discard"))?);
//! # Ok(())
//! # }
//! ```

// Core subsystems
pub mod config;
pub mod controller;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{RoutingConfig, ServerParams};
pub use controller::{Controller, ControllerRegistry};
pub use routing::{Route, RouteCollection, RouteOptions, SharedRoutes};
