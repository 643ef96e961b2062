//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// Hands out its data at most `chunk_size` bytes per read, like a socket
/// delivering a request in small segments.
pub struct ChunkReader {
    data: Vec<u8>,
    chunk_size: usize,
    pos: usize,
}

impl ChunkReader {
    pub fn new(data: impl AsRef<[u8]>, chunk_size: usize) -> Self {
        Self {
            data: data.as_ref().to_vec(),
            chunk_size: chunk_size.max(1),
            pos: 0,
        }
    }
}

impl AsyncRead for ChunkReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let end = (this.pos + this.chunk_size).min(this.data.len());
        let n = (end - this.pos).min(buf.remaining());

        buf.put_slice(&this.data[this.pos..this.pos + n]);
        this.pos += n;

        Poll::Ready(Ok(()))
    }
}
