use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Default starting size of a connection's read buffer.
pub const INITIAL_BUFFER_SIZE: usize = 1024;

/// Accumulates bytes read from a stream for incremental parsing.
///
/// Bytes before `filled` are valid and not yet consumed by the parser. When a
/// read would start with no free space left, the storage doubles in size, so
/// a grammatical unit longer than the current capacity never stalls the
/// parser.
pub struct ReadBuffer {
    data: BytesMut,
    filled: usize,
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = BytesMut::with_capacity(capacity.max(1));
        data.resize(capacity.max(1), 0);
        Self { data, filled: 0 }
    }

    /// Reads once from `reader`, appending to the unconsumed bytes.
    ///
    /// Returns the number of bytes read; `0` means the stream is at its end.
    pub async fn fill_from<R>(&mut self, reader: &mut R) -> std::io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        if self.filled >= self.data.len() {
            self.grow();
        }

        let n = reader.read(&mut self.data[self.filled..]).await?;
        self.filled += n;
        Ok(n)
    }

    /// The bytes read but not yet consumed.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Drops the first `n` bytes and shifts the rest to the front.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.filled);
        self.data.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    fn grow(&mut self) {
        let doubled = self.data.len() * 2;
        self.data.resize(doubled, 0);
        tracing::trace!(capacity = doubled, "Read buffer grown");
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}
