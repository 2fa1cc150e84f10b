//! Configuration schema definitions.
//!
//! This module defines the structure of a routing file.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root configuration: server defaults plus the ordered route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutingConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Server-wide defaults inherited by routes.
    pub server: ServerParams,

    /// Route option maps, in match order.
    ///
    /// Kept untyped so that every entry goes through the same validation
    /// as routes assembled in code.
    pub routes: Vec<Value>,
}

/// Server-wide parameters.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServerParams {
    /// Sub-protocols for routes that do not list their own.
    pub sub_protocols: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error, or an EnvFilter
    /// expression). `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
