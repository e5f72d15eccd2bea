//! Error taxonomy.
//!
//! Configuration errors (`InvalidUrl`, `InvalidMethod`) surface eagerly at
//! the call that introduced them. `HttpError` and `DecodeError` surface at
//! trigger time and keep the raw response attached. Transport failures pass
//! through this layer unclassified.

use crate::types::Response;

/// Failure produced by a transport implementation. This layer does not
/// classify transport errors further; they propagate unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid HTTP method: {method:?}")]
    InvalidMethod { method: String },

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("Body serialization error: {0}")]
    Body(#[from] serde_json::Error),
}

/// The transport completed but the response status was outside the ok range
/// and no recovery function claimed it.
#[derive(thiserror::Error, Debug, Clone)]
#[error("HTTP error: {} {}", .response.status, .response.status_text)]
pub struct HttpError {
    response: Response,
}

impl HttpError {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn status_text(&self) -> &str {
        &self.response.status_text
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub(crate) fn info(&self) -> HttpErrorInfo<'_> {
        HttpErrorInfo {
            status: self.response.status,
            status_text: &self.response.status_text,
            response: &self.response,
        }
    }
}

/// The response payload could not be interpreted by the configured parser.
/// Never subject to recovery; recovery intercepts HTTP status failures only.
#[derive(thiserror::Error, Debug, Clone)]
#[error("Decode error: {message}")]
pub struct DecodeError {
    response: Response,
    message: String,
}

impl DecodeError {
    pub fn new(response: &Response, message: impl Into<String>) -> Self {
        Self {
            response: response.clone(),
            message: message.into(),
        }
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only view of an HTTP status failure, handed to a recovery function.
#[derive(Debug, Clone, Copy)]
pub struct HttpErrorInfo<'a> {
    status: u16,
    status_text: &'a str,
    response: &'a Response,
}

impl<'a> HttpErrorInfo<'a> {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &'a str {
        self.status_text
    }

    /// The raw response, including any error payload the server sent.
    pub fn response(&self) -> &'a Response {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response(status: u16, status_text: &str) -> Response {
        Response {
            status,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: Bytes::from_static(b"oops"),
        }
    }

    #[test]
    fn http_error_display_includes_status_line() {
        let err = HttpError::new(response(503, "Service Unavailable"));
        assert_eq!(err.to_string(), "HTTP error: 503 Service Unavailable");
        assert_eq!(err.status(), 503);
    }

    #[test]
    fn decode_error_keeps_response_and_message() {
        let err = DecodeError::new(&response(200, "OK"), "expected value at line 1");
        assert!(err.to_string().contains("expected value"));
        assert_eq!(err.response().status, 200);
    }

    #[test]
    fn info_view_borrows_the_response() {
        let err = HttpError::new(response(404, "Not Found"));
        let info = err.info();
        assert_eq!(info.status(), 404);
        assert_eq!(info.status_text(), "Not Found");
        assert_eq!(info.response().body.as_ref(), b"oops");
    }

    #[test]
    fn invalid_url_display() {
        let source = url::Url::parse("users/123").unwrap_err();
        let err = Error::InvalidUrl {
            url: "users/123".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "Invalid URL: users/123");
    }
}
