use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Writes `HTTP/1.1 <code> <reason>\r\n`.
pub async fn write_status_line<W>(w: &mut W, status: StatusCode) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    w.write_all(status_line.as_bytes()).await
}

/// Writes every header as `Name: value\r\n`, then the blank line.
pub async fn write_headers<W>(w: &mut W, headers: &Headers) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    for (k, v) in headers.iter() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    w.write_all(&buf).await
}

pub async fn write_body<W>(w: &mut W, body: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    w.write_all(body).await
}

/// Writes status line, headers and body in wire order, then flushes.
pub async fn write_response<W>(w: &mut W, resp: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_status_line(w, resp.status).await?;
    write_headers(w, &resp.headers).await?;
    write_body(w, &resp.body).await?;
    w.flush().await
}
