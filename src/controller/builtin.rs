//! Built-in controllers available by name from
//! [`ControllerRegistry::with_builtins`](super::ControllerRegistry::with_builtins).

use crate::controller::{ConnectionInfo, Controller, Message};

/// Replies with every message it receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoController;

impl Controller for EchoController {
    fn on_message(&self, conn: &ConnectionInfo, message: Message) -> Option<Message> {
        tracing::trace!(path = %conn.path, "Echoing message");
        Some(message)
    }
}

/// Accepts connections and drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardController;

impl Controller for DiscardController {
    fn on_message(&self, _conn: &ConnectionInfo, _message: Message) -> Option<Message> {
        None
    }
}
