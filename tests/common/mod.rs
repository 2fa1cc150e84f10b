//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use ws_router::config::ServerParams;
use ws_router::controller::{ConnectionInfo, Controller, ControllerRegistry, Message};
use ws_router::routing::RouteCollection;

/// Build a request with an optional Host header.
pub fn request(method: Method, uri: &str, host: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(host) = host {
        builder = builder.header("host", host);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    request(Method::GET, uri, None)
}

/// Controller that counts the messages it handled and replies with its tag.
#[derive(Debug, Default)]
pub struct CountingController {
    pub tag: &'static str,
    pub handled: AtomicUsize,
}

impl CountingController {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            handled: AtomicUsize::new(0),
        }
    }
}

impl Controller for CountingController {
    fn on_message(&self, _conn: &ConnectionInfo, _message: Message) -> Option<Message> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        Some(Message::Text(self.tag.to_string()))
    }
}

/// Registry with the built-ins plus `"counting"`, and a collection using it.
pub fn collection(default_sub_protocols: &[&str]) -> RouteCollection {
    let mut registry = ControllerRegistry::with_builtins();
    registry.register("counting", || CountingController::new("counting"));

    RouteCollection::with_defaults(ServerParams {
        sub_protocols: default_sub_protocols.iter().map(|s| s.to_string()).collect(),
    })
    .with_controllers(registry)
}

/// Tag of the controller behind a route, by sending it a message.
pub fn reply_of(controller: &Arc<dyn Controller>) -> Option<Message> {
    let conn = ConnectionInfo {
        path: "/".into(),
        sub_protocol: None,
    };
    controller.on_message(&conn, Message::Text(String::new()))
}
