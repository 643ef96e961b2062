use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{Instrument, error, info, warn};

use crate::http::connection::Connection;
use crate::server::handler::Handler;

/// A running HTTP server.
///
/// Accepts connections in a background task and handles each one in its own
/// task. Dropping the handle without calling [`Server::close`] also stops
/// the accept loop, but nothing waits for in-flight connections.
pub struct Server {
    local_addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Binds `addr` and starts accepting connections.
    pub async fn serve<H: Handler>(addr: &str, handler: H) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local_addr = listener.local_addr()?;
        info!(address = %local_addr, "Listening");

        let (shutdown, rx) = watch::channel(false);
        let accept_task = tokio::spawn(accept_loop(listener, Arc::new(handler), rx));

        Ok(Self {
            local_addr,
            shutdown,
            accept_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting, closes the listening socket and waits for every
    /// in-flight connection to finish.
    pub async fn close(self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(true);
        self.accept_task.await.context("accept loop panicked")?;
        info!(address = %self.local_addr, "Server closed");
        Ok(())
    }
}

async fn accept_loop<H: Handler>(
    listener: TcpListener,
    handler: Arc<H>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,

            res = listener.accept() => match res {
                Ok((socket, peer)) => {
                    info!(peer = %peer, "Accepted connection");

                    let handler = handler.clone();
                    connections.spawn(
                        async move {
                            let mut conn = Connection::new(socket, handler);
                            if let Err(e) = conn.run().await {
                                warn!("Connection aborted: {e:#}");
                            }
                        }
                        .instrument(tracing::info_span!("connection", peer = %peer)),
                    );
                }
                Err(e) => error!(error = %e, "Error accepting connection"),
            },

            Some(res) = connections.join_next(), if !connections.is_empty() => {
                reap(res);
            }
        }
    }

    drop(listener);
    info!(in_flight = connections.len(), "Listener closed, draining connections");

    while let Some(res) = connections.join_next().await {
        reap(res);
    }
}

fn reap(res: Result<(), tokio::task::JoinError>) {
    if let Err(e) = res {
        error!(error = %e, "Connection task panicked");
    }
}
