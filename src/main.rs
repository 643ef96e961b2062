use std::io::Write;

use rawhttp::config::Config;
use rawhttp::http::request::Request;
use rawhttp::http::response::StatusCode;
use rawhttp::server::{HandlerError, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    // Both overrides are optional; with neither, the server binds DEFAULT_PORT.
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };

    let server = Server::serve(&cfg.listen_addr, handle).await?;
    tracing::info!("Server started on {}", server.local_addr());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.close().await
}

fn handle(w: &mut dyn Write, req: &Request) -> Result<(), HandlerError> {
    let (status, body) = match req.target() {
        "/yourproblem" => {
            tracing::info!("Client says they have a problem");
            (StatusCode::BadRequest, "Your problem is not my problem\n")
        }
        "/myproblem" => {
            tracing::info!("Client says I have a problem");
            (StatusCode::InternalServerError, "Woopsie, my bad\n")
        }
        _ => {
            tracing::info!("Client says all is good");
            (StatusCode::Ok, "All good, frfr\n")
        }
    };

    w.write_all(body.as_bytes())
        .map_err(|_| HandlerError::new(StatusCode::InternalServerError))?;

    match status {
        StatusCode::Ok => Ok(()),
        status => Err(HandlerError::new(status)),
    }
}
