//! Accepts TCP connections and prints each parsed request.

use rawhttp::config::Config;
use rawhttp::http::parser::request_from_reader;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();
    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    tracing::info!("Listening on {}", cfg.listen_addr);

    loop {
        let (mut socket, peer) = listener.accept().await?;
        tracing::info!("Accepted connection from {}", peer);

        let req = match request_from_reader(&mut socket).await {
            Ok(req) => req,
            Err(e) => {
                tracing::error!("Failed to parse request from {}: {}", peer, e);
                continue;
            }
        };

        println!("Request line:");
        println!("- Method: {}", req.request_line.method);
        println!("- Target: {}", req.request_line.target);
        println!("- Version: {}", req.request_line.http_version);
        println!("Headers:");
        for (name, value) in req.headers.iter() {
            println!("- {}: {}", name, value);
        }
        println!("Body:");
        println!("{}", String::from_utf8_lossy(&req.body));
    }
}
