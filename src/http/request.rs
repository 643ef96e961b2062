use crate::http::headers::Headers;

/// Progress of an incremental request parse.
///
/// The variants are ordered; a parse only ever moves forward through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseState {
    /// Waiting for the request line.
    Initialized,
    /// Request line seen, reading header lines.
    ParsingHeaders,
    /// Header block complete, collecting body bytes.
    ParsingBody,
    /// No more body bytes expected, checking them against Content-Length.
    ParsingBodyValidation,
    Done,
}

/// The first line of a request: `METHOD TARGET HTTP/1.1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    /// Uppercase method token, e.g. `GET`
    pub method: String,
    /// Request target, always starting with `/`
    pub target: String,
    /// Version number without the `HTTP/` prefix; always `1.1`
    pub http_version: String,
}

/// An HTTP request, filled in as bytes arrive from a connection.
///
/// Header names are stored lowercased. The body holds exactly the bytes
/// declared by Content-Length once `state` reaches [`ParseState::Done`].
#[derive(Debug, Clone)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub(crate) state: ParseState,
}

impl Request {
    pub fn new() -> Self {
        Self {
            request_line: RequestLine::default(),
            headers: Headers::new(),
            body: Vec::new(),
            state: ParseState::Initialized,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    pub fn target(&self) -> &str {
        &self.request_line.target
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
