use std::io::Write;

use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::StatusCode;

/// A deliberate non-200 outcome chosen by a handler.
///
/// The status goes straight onto the status line; whatever the handler wrote
/// before returning is still sent as the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("handler returned status {status}")]
pub struct HandlerError {
    pub status: StatusCode,
}

impl HandlerError {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }

    /// Builds an error from a raw numeric code.
    pub fn from_code(code: u16) -> Self {
        Self::new(StatusCode::from_u16(code))
    }
}

/// Produces the body of a response for a fully parsed request.
///
/// Implemented for any closure of the shape
/// `Fn(&mut dyn Write, &Request) -> Result<(), HandlerError>`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, w: &mut dyn Write, req: &Request) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&mut dyn Write, &Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn call(&self, w: &mut dyn Write, req: &Request) -> Result<(), HandlerError> {
        self(w, req)
    }
}
