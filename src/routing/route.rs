//! A single resolved route.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::controller::SharedController;
use crate::routing::matcher::Matcher;

/// Immutable binding of a matcher to a controller and its accepted
/// sub-protocols.
///
/// Cloning is cheap: matcher and controller are shared handles.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    matcher: Arc<dyn Matcher>,
    controller: SharedController,
    sub_protocols: Vec<String>,
}

impl Route {
    /// Bind `matcher` to `controller`.
    ///
    /// `pattern` is the source the matcher was built from and is only used
    /// for diagnostics.
    pub fn new(
        pattern: impl Into<String>,
        matcher: Arc<dyn Matcher>,
        controller: SharedController,
        sub_protocols: Vec<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            matcher,
            controller,
            sub_protocols,
        }
    }

    /// Returns true if the request matches this route.
    pub fn matches(&self, req: &Request<Body>) -> bool {
        self.matcher.matches(req)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    /// Sub-protocols this route accepts, in preference order.
    pub fn sub_protocols(&self) -> &[String] {
        &self.sub_protocols
    }

    pub fn accepts_sub_protocol(&self, name: &str) -> bool {
        self.sub_protocols.iter().any(|p| p == name)
    }
}
