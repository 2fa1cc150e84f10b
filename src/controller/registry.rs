//! Controller lookup by identifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::controller::{Controller, DiscardController, EchoController, SharedController};

/// Boxed error returned by a failing controller constructor.
pub type ConstructionError = Box<dyn std::error::Error + Send + Sync>;

type Factory = Arc<dyn Fn() -> Result<SharedController, ConstructionError> + Send + Sync>;

/// Failure to produce a controller from an identifier.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no controller is registered under \"{0}\"")]
    NotRegistered(String),

    #[error("constructor failed: {0}")]
    Construction(#[source] ConstructionError),
}

/// Maps controller identifiers to zero-argument constructors.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, Factory>,
}

impl ControllerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in controllers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("echo", || EchoController);
        registry.register("discard", || DiscardController);
        registry
    }

    /// Register an infallible constructor. Replaces any previous entry.
    pub fn register<C, F>(&mut self, name: impl Into<String>, factory: F)
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.factories.insert(
            name.into(),
            Arc::new(move || Ok(Arc::new(factory()) as SharedController)),
        );
    }

    /// Register a constructor that may fail.
    pub fn register_fallible<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<SharedController, ConstructionError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Construct a fresh controller registered under `name`.
    pub fn instantiate(&self, name: &str) -> Result<SharedController, ControllerError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ControllerError::NotRegistered(name.to_string()))?;
        factory().map_err(ControllerError::Construction)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &names)
            .finish()
    }
}
