//! Sends each line typed on stdin as a UDP datagram.

use rawhttp::config::DEFAULT_PORT;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UdpSocket;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let target =
        std::env::var("LISTEN").unwrap_or_else(|_| format!("127.0.0.1:{DEFAULT_PORT}"));

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(target.as_str()).await?;
    tracing::info!("Sending lines to {}", target);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b">").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if let Err(e) = socket.send(format!("{line}\n").as_bytes()).await {
            tracing::error!("Failed to send datagram: {}", e);
        }
    }

    Ok(())
}
