//! rawhttp - HTTP/1.1 from raw byte streams
//!
//! An incremental request parser, a response writer and a task-per-connection
//! server built directly on TCP sockets.

pub mod config;
pub mod http;
pub mod server;
