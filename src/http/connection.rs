use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::parser::request_from_reader;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::write_response;
use crate::server::handler::Handler;

/// One client connection, carrying exactly one request and one response.
pub struct Connection<S, H> {
    stream: S,
    handler: Arc<H>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Response),
    Closed,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: Handler,
{
    pub fn new(stream: S, handler: Arc<H>) -> Self {
        Self {
            stream,
            handler,
            state: ConnectionState::Reading,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection to completion.
    ///
    /// A request that fails to parse aborts the connection without a
    /// response. The stream is closed when the connection is dropped.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let req = request_from_reader(&mut self.stream)
                        .await
                        .context("HTTP parse error")?;

                    tracing::info!(
                        method = req.method(),
                        target = req.target(),
                        body_len = req.body.len(),
                        "Request parsed"
                    );
                    self.state = ConnectionState::Processing(req);
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(&req);
                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    write_response(&mut self.stream, &response)
                        .await
                        .context("failed to write response")?;
                    self.stream.shutdown().await.ok();

                    tracing::debug!(status = response.status.as_u16(), "Response sent");
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Runs the handler against an in-memory body, so the Content-Length
    /// always matches what the handler wrote.
    fn handle_request(&self, req: &Request) -> Response {
        let mut body = Vec::new();
        let status = match self.handler.call(&mut body, req) {
            Ok(()) => StatusCode::Ok,
            Err(e) => {
                tracing::debug!(status = e.status.as_u16(), "Handler returned an error status");
                e.status
            }
        };

        Response::new(status, body)
    }
}
