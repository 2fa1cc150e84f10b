//! Per-route configuration options.
//!
//! Options are kept loosely typed until [`RouteCollection::create`] validates
//! them, so that a route table read from a config file reports the same
//! errors as one assembled in code.
//!
//! [`RouteCollection::create`]: crate::routing::RouteCollection::create

use std::any::Any;

use serde_json::Value;

use crate::controller::{OpaqueController, SharedController};
use crate::routing::error::{value_type, ConfigurationError};

pub const MATCH_KEY: &str = "match";
pub const SUB_PROTOCOLS_KEY: &str = "sub_protocols";
pub const CONTROLLER_KEY: &str = "controller";

/// Value given for the `controller` option.
#[derive(Debug)]
pub enum ControllerOption {
    /// A dynamic value: a string names a registered controller, null means
    /// absent, anything else is rejected.
    Value(Value),
    /// A controller handle.
    Handle(SharedController),
    /// A value of unknown type that must turn out to be a controller.
    Opaque(OpaqueController),
}

/// The recognised options of one route: `match`, `sub_protocols`, `controller`.
#[derive(Debug, Default)]
pub struct RouteOptions {
    pub(crate) match_pattern: Option<Value>,
    pub(crate) sub_protocols: Option<Value>,
    pub(crate) controller: Option<ControllerOption>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from a map such as a `[[routes]]` table.
    ///
    /// Unrecognised keys are ignored.
    pub fn from_value(value: Value) -> Result<Self, ConfigurationError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConfigurationError::InvalidOptions {
                    found: value_type(&other),
                })
            }
        };

        let mut options = Self::new();
        for (key, value) in map {
            match key.as_str() {
                MATCH_KEY => options.match_pattern = Some(value),
                SUB_PROTOCOLS_KEY => options.sub_protocols = Some(value),
                CONTROLLER_KEY => options.controller = Some(ControllerOption::Value(value)),
                _ => tracing::debug!(option = %key, "Ignoring unknown route option"),
            }
        }
        Ok(options)
    }

    #[must_use]
    pub fn with_match(self, pattern: impl Into<String>) -> Self {
        self.with_match_value(Value::String(pattern.into()))
    }

    #[must_use]
    pub fn with_match_value(mut self, value: Value) -> Self {
        self.match_pattern = Some(value);
        self
    }

    #[must_use]
    pub fn with_sub_protocols<I, S>(self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = protocols
            .into_iter()
            .map(|p| Value::String(p.into()))
            .collect();
        self.with_sub_protocols_value(Value::Array(list))
    }

    #[must_use]
    pub fn with_sub_protocols_value(mut self, value: Value) -> Self {
        self.sub_protocols = Some(value);
        self
    }

    /// Name a controller registered in the collection's registry.
    #[must_use]
    pub fn with_controller_name(self, name: impl Into<String>) -> Self {
        self.with_controller_value(Value::String(name.into()))
    }

    #[must_use]
    pub fn with_controller_value(mut self, value: Value) -> Self {
        self.controller = Some(ControllerOption::Value(value));
        self
    }

    #[must_use]
    pub fn with_controller(mut self, controller: SharedController) -> Self {
        self.controller = Some(ControllerOption::Handle(controller));
        self
    }

    /// Offer an arbitrary value as the controller; checked when the route is
    /// created.
    #[must_use]
    pub fn with_opaque_controller<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.controller = Some(ControllerOption::Opaque(OpaqueController::new(value)));
        self
    }
}
