//! HTTP/1.1 protocol implementation.
//!
//! Requests are parsed incrementally from a byte stream: reads may split any
//! token, so the parser keeps partial input buffered and resumes where it
//! left off once more bytes arrive.
//!
//! - **`buffer`**: growable read buffer holding unconsumed bytes
//! - **`headers`**: case-insensitive header map and the header line parser
//! - **`request`**: request, request line and parse state types
//! - **`parser`**: the request parsing state machine
//! - **`response`**: status codes and the default response headers
//! - **`writer`**: writes a response onto a stream in wire order
//! - **`connection`**: reads one request, runs the handler, writes the reply
//!
//! # Parse State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │   Initialized    │ ← Wait for the request line
//!        └──────┬───────────┘
//!               │ METHOD SP TARGET SP HTTP/1.1 CRLF
//!               ▼
//!        ┌──────────────────┐
//!        │  ParsingHeaders  │ ← One header line per step
//!        └──────┬───────────┘
//!               │ blank line
//!               ▼
//!        ┌──────────────────┐
//!        │   ParsingBody    │ ← Collect bytes up to Content-Length
//!        └──────┬───────────┘       (no Content-Length → Done)
//!               │ end of stream
//!               ▼
//!        ┌───────────────────────┐
//!        │ ParsingBodyValidation │ ← Body length must equal Content-Length
//!        └──────┬────────────────┘
//!               ▼
//!             Done
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rawhttp::http::parser::request_from_reader;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!     let (mut socket, _addr) = listener.accept().await?;
//!     let req = request_from_reader(&mut socket).await?;
//!     println!("{} {}", req.method(), req.target());
//!     Ok(())
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
