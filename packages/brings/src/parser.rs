//! Response parsers.
//!
//! A `ResponseParser<T>` decodes a buffered response payload into a `T`.
//! Parsers compose through [`ResponseParser::map`] and never look at the
//! status code; status handling belongs to the executor.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::types::Response;

type DecodeFn<T> = dyn Fn(&Response) -> Result<T, DecodeError> + Send + Sync;

/// Decodes a raw response payload into a value of type `T`.
pub struct ResponseParser<T> {
    decode: Arc<DecodeFn<T>>,
}

impl<T> ResponseParser<T> {
    pub fn new(decode: impl Fn(&Response) -> Result<T, DecodeError> + Send + Sync + 'static) -> Self {
        Self {
            decode: Arc::new(decode),
        }
    }

    /// Decode `response`'s payload, or fail with a [`DecodeError`].
    pub fn decode(&self, response: &Response) -> Result<T, DecodeError> {
        (self.decode)(response)
    }
}

impl<T: 'static> ResponseParser<T> {
    /// Compose a transform over this parser's output.
    ///
    /// `p.map(f).decode(r)` equals `p.decode(r).map(f)`: when the underlying
    /// decode fails, the error propagates and `f` is never invoked.
    pub fn map<U>(&self, f: impl Fn(T) -> U + Send + Sync + 'static) -> ResponseParser<U> {
        let decode = Arc::clone(&self.decode);
        ResponseParser::new(move |response| decode(response).map(&f))
    }
}

impl<T> Clone for ResponseParser<T> {
    fn clone(&self) -> Self {
        Self {
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for ResponseParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseParser").finish_non_exhaustive()
    }
}

/// The response payload as a binary blob. This is the default parser.
pub fn blob() -> ResponseParser<Bytes> {
    ResponseParser::new(|response| Ok(response.body.clone()))
}

/// The response payload as a plain byte buffer.
pub fn raw() -> ResponseParser<Vec<u8>> {
    ResponseParser::new(|response| Ok(response.body.to_vec()))
}

/// The response payload as UTF-8 text.
pub fn text() -> ResponseParser<String> {
    ResponseParser::new(|response| {
        std::str::from_utf8(&response.body)
            .map(str::to_string)
            .map_err(|e| DecodeError::new(response, e.to_string()))
    })
}

/// The response payload deserialized from JSON.
pub fn json<T: DeserializeOwned>() -> ResponseParser<T> {
    ResponseParser::new(|response| {
        serde_json::from_slice(&response.body)
            .map_err(|e| DecodeError::new(response, e.to_string()))
    })
}

/// The response payload as `application/x-www-form-urlencoded` fields,
/// in payload order.
pub fn form() -> ResponseParser<Vec<(String, String)>> {
    ResponseParser::new(|response| {
        Ok(url::form_urlencoded::parse(&response.body)
            .into_owned()
            .collect())
    })
}
