//! Plain-data request and response values.
//!
//! `RequestConfig` is an immutable snapshot of everything needed to put a
//! request on the wire. Every `with_*` method takes `&self` and returns a
//! fresh value, so a config (and any builder holding one) can be kept around
//! and reused for independent requests.

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::Error;

/// Header name checked when merging a body's declared content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// An immutable request payload with its declared content type.
#[derive(Debug, Clone)]
pub struct RequestBody {
    content_type: String,
    payload: Bytes,
}

impl RequestBody {
    pub fn new(content_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }

    /// JSON-serialize `data` into an `application/json` body.
    pub fn json(data: &impl Serialize) -> Result<Self, Error> {
        let payload = serde_json::to_vec(data)?;
        Ok(Self::new("application/json", payload))
    }

    /// A `text/plain` body.
    pub fn text(data: impl Into<String>) -> Self {
        Self::new("text/plain", data.into().into_bytes())
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// An immutable snapshot of a request: URL, method, headers, optional body.
///
/// The URL is validated eagerly; a relative or malformed string is rejected
/// at the point of assignment, never at trigger time. Headers are an ordered
/// list with the caller's spelling preserved; setting a header whose name
/// matches an existing one (ASCII-case-insensitively) overwrites it in place.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    url: Url,
    method: String,
    headers: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl RequestConfig {
    /// A GET request for the given absolute URL.
    pub fn new(url: &str) -> Result<Self, Error> {
        Ok(Self {
            url: parse_url(url)?,
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn get(url: &str) -> Result<Self, Error> {
        Self::new(url)
    }

    pub fn post(url: &str) -> Result<Self, Error> {
        Ok(Self {
            method: "POST".to_string(),
            ..Self::new(url)?
        })
    }

    pub fn put(url: &str) -> Result<Self, Error> {
        Ok(Self {
            method: "PUT".to_string(),
            ..Self::new(url)?
        })
    }

    pub fn delete(url: &str) -> Result<Self, Error> {
        Ok(Self {
            method: "DELETE".to_string(),
            ..Self::new(url)?
        })
    }

    /// Replace the target URL. Fails eagerly if `url` is not absolute.
    pub fn with_url(&self, url: &str) -> Result<Self, Error> {
        let mut next = self.clone();
        next.url = parse_url(url)?;
        Ok(next)
    }

    /// Replace the HTTP method. Any non-empty verb is accepted; the
    /// transport decides what it can actually send.
    pub fn with_method(&self, method: impl Into<String>) -> Result<Self, Error> {
        let method = method.into();
        if method.is_empty() {
            return Err(Error::InvalidMethod { method });
        }
        let mut next = self.clone();
        next.method = method;
        Ok(next)
    }

    /// Set a single header, overwriting any existing value for the same name.
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let mut next = self.clone();
        match next
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => next.headers.push((name, value)),
        }
        next
    }

    /// Append a query parameter. Repeated names accumulate, never overwrite.
    pub fn with_param(&self, name: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.url.query_pairs_mut().append_pair(name, value);
        next
    }

    /// Replace the request body.
    pub fn with_body(&self, body: RequestBody) -> Self {
        let mut next = self.clone();
        next.body = Some(body);
        next
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Look up a header value, matching the name ASCII-case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The wire-ready config: if a body is present and no `Content-Type`
    /// header was set explicitly, the body's declared content type is merged
    /// in. An explicit header always wins.
    pub(crate) fn resolved(&self) -> Self {
        let mut resolved = self.clone();
        let fallback = match &resolved.body {
            Some(body) if resolved.header(CONTENT_TYPE).is_none() => {
                Some(body.content_type().to_string())
            }
            _ => None,
        };
        if let Some(content_type) = fallback {
            resolved
                .headers
                .push((CONTENT_TYPE.to_string(), content_type));
        }
        resolved
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// The raw response handed back by a transport: status line, headers, and
/// the fully buffered payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers, in wire order.
    pub headers: Vec<(String, String)>,

    /// Response payload.
    pub body: Bytes,
}

impl Response {
    /// Whether the status is in the ok range (2xx/3xx). The executor decodes
    /// the body only for ok responses.
    pub fn is_ok(&self) -> bool {
        (200..400).contains(&self.status)
    }

    /// Check if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Look up a header value, matching the name ASCII-case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
