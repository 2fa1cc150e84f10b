//! Controllers: the dispatch targets of routes.
//!
//! # Data Flow
//! ```text
//! route options "controller"
//!     → identifier  → registry.rs (zero-argument factory) → Arc<dyn Controller>
//!     → handle      → used as-is (checked at compile time)
//!     → opaque value → single runtime capability check
//! ```
//!
//! # Design Decisions
//! - No runtime type-name resolution: identifiers map to caller-registered factories
//! - Controllers are shared (`Arc`) between the route and every connection it serves
//! - Lifecycle hooks are invoked by the connection layer, never by the router

pub mod builtin;
pub mod registry;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use builtin::{DiscardController, EchoController};
pub use registry::{ControllerError, ControllerRegistry};

/// Shared handle to a controller.
pub type SharedController = Arc<dyn Controller>;

/// A WebSocket application message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(String),
    Binary(Vec<u8>),
}

/// What the connection layer knows about an upgraded connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub path: String,
    /// Sub-protocol agreed during the upgrade, if any.
    pub sub_protocol: Option<String>,
}

/// Handler invoked for connections on a matched route.
pub trait Controller: Send + Sync + fmt::Debug {
    fn on_open(&self, _conn: &ConnectionInfo) {}

    /// Handle one inbound message, optionally producing a reply.
    fn on_message(&self, conn: &ConnectionInfo, message: Message) -> Option<Message>;

    fn on_close(&self, _conn: &ConnectionInfo) {}
}

/// An already constructed value of unknown type offered as a controller.
///
/// Conformance is checked once, when the route is built: only a value that
/// is a [`SharedController`] passes.
pub struct OpaqueController {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl OpaqueController {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Concrete type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Recover the controller handle, or give the value back untouched.
    pub fn into_controller(self) -> Result<SharedController, Self> {
        match self.value.downcast::<SharedController>() {
            Ok(controller) => Ok(*controller),
            Err(value) => Err(Self {
                type_name: self.type_name,
                value,
            }),
        }
    }
}

impl fmt::Debug for OpaqueController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueController")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
