//! Route set that can be replaced while requests are being matched.
//!
//! A published [`RouteCollection`] is never mutated. Updates build a new
//! collection and swap it in atomically; requests in flight keep the
//! snapshot they loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;

use crate::routing::collection::RouteCollection;
use crate::routing::route::Route;

/// Lock-free handle to the current route collection.
#[derive(Debug)]
pub struct SharedRoutes {
    current: ArcSwap<RouteCollection>,
}

impl SharedRoutes {
    pub fn new(routes: RouteCollection) -> Self {
        Self {
            current: ArcSwap::from_pointee(routes),
        }
    }

    /// Snapshot of the current collection.
    pub fn load(&self) -> Arc<RouteCollection> {
        self.current.load_full()
    }

    /// Match against the current snapshot.
    pub fn match_request(&self, req: &Request<Body>) -> Option<Route> {
        self.current.load().match_request(req).cloned()
    }

    /// Publish a new collection, returning the one it replaced.
    pub fn replace(&self, routes: RouteCollection) -> Arc<RouteCollection> {
        let count = routes.len();
        let previous = self.current.swap(Arc::new(routes));
        tracing::info!(
            routes = count,
            previous_routes = previous.len(),
            "Route table replaced"
        );
        previous
    }
}
