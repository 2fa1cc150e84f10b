//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → long-running commands stop
//! ```

pub mod signals;

pub use signals::shutdown_signal;
