//! Connection dispatching.
//!
//! [`Server`] owns the listening socket and spawns one task per accepted
//! connection. Handlers plug in through the [`Handler`] trait.

pub mod handler;
pub mod listener;

pub use handler::{Handler, HandlerError};
pub use listener::Server;
