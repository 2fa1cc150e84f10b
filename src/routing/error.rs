//! Error types for route construction.
//!
//! Every error here is raised while routes are being built. Matching a
//! request never fails: no matching route is an ordinary `None`.

use serde_json::Value;
use thiserror::Error;

use crate::controller::ControllerError;

/// A pattern string that the matcher factory refused to compile.
#[derive(Debug, Error)]
#[error("pattern \"{pattern}\" is invalid: {reason}")]
pub struct PatternError {
    pattern: String,
    reason: PatternErrorReason,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, reason: PatternErrorReason) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason,
        }
    }

    /// The rejected pattern, as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Why the pattern was rejected.
    pub fn reason(&self) -> &PatternErrorReason {
        &self.reason
    }
}

/// Syntax problems detected while compiling a pattern.
#[derive(Debug, Error)]
pub enum PatternErrorReason {
    #[error("pattern is empty")]
    Empty,

    #[error("expected at most a method list and a target, found {0} parts")]
    TooManyParts(usize),

    #[error("method list contains an empty entry")]
    EmptyMethod,

    #[error("unknown method \"{0}\"")]
    UnknownMethod(String),

    #[error("method \"{0}\" has no target, write \"{0} *\" to match any path")]
    MissingTarget(String),

    #[error("invalid host \"{0}\" (a path must start with \"/\")")]
    InvalidHost(String),

    #[error("unterminated character class")]
    UnterminatedClass,

    #[error("empty character class")]
    EmptyClass,

    #[error("invalid character range {0}-{1}")]
    InvalidRange(char, char),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// A route options map that cannot be turned into a route.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Route options must be a map, got {found}.")]
    InvalidOptions { found: &'static str },

    #[error("Invalid option \"match\": {0}")]
    InvalidMatch(#[source] PatternError),

    #[error("Invalid value for option \"match\". Expected string or null, got {found}.")]
    InvalidMatchType { found: &'static str },

    #[error(
        "Option \"sub_protocols\" must be an array of strings or null, got {found}. \
         Null inherits \"sub_protocols\" from server parameters."
    )]
    InvalidSubProtocols { found: &'static str },

    #[error("Unable to instantiate controller {name}: {source}")]
    ControllerInstantiation {
        name: String,
        #[source]
        source: ControllerError,
    },

    #[error("Instance of {type_name} provided for option \"controller\" does not implement Controller.")]
    NotAController { type_name: &'static str },

    #[error("Invalid value for option \"controller\". Expected string or Controller, got {found}.")]
    InvalidControllerType { found: &'static str },

    #[error(
        "Missing controller. You have to provide either an implementation or a registered \
         name of a Controller as the option \"controller\"."
    )]
    MissingController,
}

/// Name of a dynamic value's type, as reported in error messages.
pub(crate) fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
