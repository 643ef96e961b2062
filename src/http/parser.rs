use thiserror::Error;
use tokio::io::AsyncRead;

use crate::http::buffer::ReadBuffer;
use crate::http::headers::{CRLF, find_crlf};
use crate::http::request::{ParseState, Request, RequestLine};

const SUPPORTED_VERSION: &str = "1.1";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid request line")]
    InvalidRequestLine,
    #[error("invalid method")]
    InvalidMethod,
    #[error("invalid request target")]
    InvalidTarget,
    #[error("invalid HTTP version")]
    InvalidVersion,
    #[error("invalid header line")]
    InvalidHeaderLine,
    #[error("invalid header name")]
    InvalidHeaderName,
    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),
    #[error("body length exceeds Content-Length")]
    BodyTooLong,
    #[error("body length less than Content-Length")]
    BodyTooShort,
    #[error("request line or header is not valid UTF-8")]
    InvalidEncoding,
    #[error("stream ended before the request was complete")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads and parses one full request from `reader`.
///
/// Bytes are pulled in as they become available; any token may be split
/// across reads. Returns once the request is complete, or with the first
/// grammar or I/O error. A request with a Content-Length body completes
/// only when the peer half-closes the stream.
pub async fn request_from_reader<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    request_from_reader_with(reader, ReadBuffer::new()).await
}

/// Like [`request_from_reader`], starting from the given buffer.
pub async fn request_from_reader_with<R>(
    reader: &mut R,
    mut buf: ReadBuffer,
) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut request = Request::new();

    loop {
        let n = buf.fill_from(reader).await?;
        if n == 0 {
            request.end_of_stream()?;
        }

        request.parse_buffered(&mut buf)?;

        if request.is_done() {
            return Ok(request);
        }
        if n == 0 {
            return Err(ParseError::UnexpectedEof);
        }
    }
}

/// Parses the request line at the front of `data`.
///
/// `Ok(None)` means no complete line is buffered yet. On success, returns
/// the line together with the bytes consumed, CRLF included.
pub fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..idx]).map_err(|_| ParseError::InvalidEncoding)?;
    let parts: Vec<&str> = line.split(' ').collect();
    let &[method, target, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequestLine);
    };

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ParseError::InvalidMethod);
    }

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget);
    }

    match version.split_once('/') {
        Some(("HTTP", SUPPORTED_VERSION)) => {}
        _ => return Err(ParseError::InvalidVersion),
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        http_version: SUPPORTED_VERSION.to_string(),
    };

    Ok(Some((request_line, idx + CRLF.len())))
}

impl Request {
    /// Runs one parse step against the unconsumed bytes in `data`.
    ///
    /// Returns how many bytes were consumed. Zero with no state change means
    /// more input is needed.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Initialized => match parse_request_line(data)? {
                Some((request_line, n)) => {
                    self.request_line = request_line;
                    self.advance(ParseState::ParsingHeaders);
                    Ok(n)
                }
                None => Ok(0),
            },
            ParseState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.advance(ParseState::ParsingBody);
                }
                Ok(n)
            }
            ParseState::ParsingBody => {
                if !matches!(self.declared_length()?, Some(len) if len > 0) {
                    self.advance(ParseState::Done);
                    return Ok(0);
                }

                // Length is checked once the stream has ended.
                self.body.extend_from_slice(data);
                Ok(data.len())
            }
            ParseState::ParsingBodyValidation => {
                let declared = self.declared_length()?.unwrap_or(0);
                if self.body.len() > declared {
                    return Err(ParseError::BodyTooLong);
                }
                if self.body.len() < declared {
                    return Err(ParseError::BodyTooShort);
                }
                self.advance(ParseState::Done);
                Ok(0)
            }
            ParseState::Done => Ok(0),
        }
    }

    /// Applies parse steps until the buffered bytes yield no further progress.
    pub fn parse_buffered(&mut self, buf: &mut ReadBuffer) -> Result<(), ParseError> {
        loop {
            let before = self.state;
            let n = self.parse(buf.filled())?;
            buf.consume(n);

            if self.is_done() || (n == 0 && self.state == before) {
                return Ok(());
            }
        }
    }

    /// Handles a clean end of stream.
    ///
    /// A declared body is only complete once the peer stops sending, so the
    /// end of stream moves the parse to validation. Ending anywhere earlier
    /// is an error.
    pub fn end_of_stream(&mut self) -> Result<(), ParseError> {
        match self.state {
            ParseState::Initialized | ParseState::ParsingHeaders => Err(ParseError::UnexpectedEof),
            ParseState::ParsingBody => {
                self.advance(ParseState::ParsingBodyValidation);
                Ok(())
            }
            ParseState::ParsingBodyValidation | ParseState::Done => Ok(()),
        }
    }

    /// The Content-Length header as a byte count, if one was sent.
    fn declared_length(&self) -> Result<Option<usize>, ParseError> {
        match self.headers.get("content-length") {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseError::InvalidContentLength(value.to_string())),
        }
    }

    fn advance(&mut self, next: ParseState) {
        debug_assert!(next > self.state, "parse state moved backwards");
        tracing::trace!(from = ?self.state, to = ?next, "Parse state advanced");
        self.state = next;
    }
}
