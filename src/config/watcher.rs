//! Routing file watcher for hot reload.
//!
//! A file event only triggers a rebuild; whoever owns the receiving end
//! decides when to publish it. Files that fail to build are logged and
//! never reach the channel, so the route table in use stays in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_routes, ConfigError};
use crate::controller::ControllerRegistry;
use crate::routing::{MatcherFactory, RouteCollection};

/// Rebuilds the route collection from a routing file and forwards it.
#[derive(Debug, Clone)]
pub struct RouteReloader {
    path: PathBuf,
    matcher_factory: Arc<dyn MatcherFactory>,
    controllers: ControllerRegistry,
    update_tx: mpsc::UnboundedSender<RouteCollection>,
}

impl RouteReloader {
    pub fn new(
        path: &Path,
        matcher_factory: Arc<dyn MatcherFactory>,
        controllers: ControllerRegistry,
        update_tx: mpsc::UnboundedSender<RouteCollection>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            matcher_factory,
            controllers,
            update_tx,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild from disk and send the result.
    ///
    /// Nothing is sent when the file cannot be loaded or a route is invalid.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let routes = load_routes(&self.path, self.matcher_factory.clone(), &self.controllers)
            .inspect_err(|e| {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reload routes, keeping current route table"
                );
            })?;

        if self.update_tx.send(routes).is_err() {
            tracing::warn!(path = %self.path.display(), "Route table receiver dropped");
        }
        Ok(())
    }

    fn handle_event(&self, res: notify::Result<Event>) {
        match res {
            Ok(event) if triggers_reload(&event.kind) => {
                tracing::info!(path = %self.path.display(), "Routing file changed");
                // Failures are already logged.
                let _ = self.reload();
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Routing file watch error"),
        }
    }
}

/// Writes and re-creations (editors that save via rename) trigger a rebuild.
fn triggers_reload(kind: &EventKind) -> bool {
    kind.is_modify() || kind.is_create()
}

/// Watches the routing file and feeds a [`RouteReloader`].
pub struct ConfigWatcher {
    reloader: RouteReloader,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiver for rebuilt collections.
    pub fn new(
        path: &Path,
        matcher_factory: Arc<dyn MatcherFactory>,
        controllers: ControllerRegistry,
    ) -> (Self, mpsc::UnboundedReceiver<RouteCollection>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let reloader = RouteReloader::new(path, matcher_factory, controllers, update_tx);
        (Self { reloader }, update_rx)
    }

    /// Start watching on notify's background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.reloader.path().to_path_buf();
        let reloader = self.reloader;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| reloader.handle_event(res),
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Routing file watcher started");
        Ok(watcher)
    }
}
