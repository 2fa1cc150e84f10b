//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Construction (at startup):
//!     route options { match, sub_protocols, controller }
//!     → collection.rs create (validate in order)
//!         → factory.rs (compile pattern into matcher.rs predicates)
//!         → controller registry (resolve dispatch target)
//!     → Route (immutable)
//!     → collection.rs add (append, order preserved)
//!
//! Incoming Request (method, host, path)
//!     → collection.rs match_request (linear scan)
//!     → route.rs matches → matcher.rs
//!     → Return: first matching Route or None
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)
//! - Replacing the route set goes through shared.rs (snapshot swap)

pub mod collection;
pub mod error;
pub mod factory;
pub mod matcher;
pub mod options;
pub mod route;
pub mod shared;

pub use collection::RouteCollection;
pub use error::{ConfigurationError, PatternError, PatternErrorReason};
pub use factory::{MatcherFactory, PatternMatcherFactory, MATCH_ALL};
pub use matcher::Matcher;
pub use options::{ControllerOption, RouteOptions};
pub use route::Route;
pub use shared::SharedRoutes;
