//! Request predicates.
//!
//! # Responsibilities
//! - Match any request (catch-all)
//! - Match the request method against an allowed set
//! - Match host header (exact match, case-insensitive)
//! - Match the request path against a compiled glob
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec)
//! - Path matching is case-sensitive and ignores the query string
//! - Matchers are pure: no interior mutability, safe to share across threads

use axum::body::Body;
use axum::http::{Method, Request};
use regex::Regex;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyMatcher;

impl Matcher for AnyMatcher {
    fn matches(&self, _req: &Request<Body>) -> bool {
        true
    }
}

/// Matches requests whose method is one of an allowed set.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    methods: Vec<Method>,
}

impl MethodMatcher {
    pub fn new(methods: Vec<Method>) -> Self {
        Self { methods }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.methods.contains(req.method())
    }
}

/// Matches the Host header.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    expected_host: String,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            expected_host: host.into().to_lowercase(),
        }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        // HTTP/2 requests carry the authority in the URI instead of a Host header.
        req.headers()
            .get("host")
            .and_then(|h| h.to_str().ok())
            .or_else(|| req.uri().authority().map(|a| a.as_str()))
            .map(|h| h.to_lowercase() == self.expected_host)
            .unwrap_or(false)
    }
}

/// Matches the request path against a compiled glob.
#[derive(Debug, Clone)]
pub struct PathGlobMatcher {
    glob: String,
    regex: Regex,
}

impl PathGlobMatcher {
    /// Wrap an anchored regex compiled from `glob`.
    pub(crate) fn new(glob: impl Into<String>, regex: Regex) -> Self {
        Self {
            glob: glob.into(),
            regex,
        }
    }

    /// The glob this matcher was compiled from.
    pub fn glob(&self) -> &str {
        &self.glob
    }
}

impl Matcher for PathGlobMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.regex.is_match(req.uri().path())
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
