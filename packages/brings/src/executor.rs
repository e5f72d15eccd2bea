//! Request execution: the pluggable transport and the trigger pipeline.
//!
//! The transport is a collaborator injected behind a trait so the pipeline
//! can be exercised without a network. [`execute`] performs exactly one
//! round-trip per invocation: build the wire request, send it, check the
//! status, then either recover, raise, or decode.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{ExecutionConfig, Recovery};
use crate::error::{Error, HttpError, TransportError};
use crate::result::Triggered;
use crate::types::{RequestConfig, Response};

/// Performs the network round-trip for a wire-ready request.
///
/// Implementations may fail with any error; this layer propagates transport
/// failures unchanged instead of classifying them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestConfig) -> Result<Response, TransportError>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, TransportError> {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestConfig) -> Result<Response, TransportError> {
        let method = reqwest::Method::from_bytes(request.method().as_bytes())?;

        let mut headers = HeaderMap::new();
        for (name, value) in request.headers() {
            let name = HeaderName::try_from(name.as_str())?;
            let value = HeaderValue::try_from(value.as_str())?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(method, request.url().clone())
            .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(body.payload().clone());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let mut resp_headers = Vec::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                resp_headers.push((name.to_string(), value.to_string()));
            }
        }
        let body = response.bytes().await?;

        Ok(Response {
            status,
            status_text,
            headers: resp_headers,
            body,
        })
    }
}

/// Execute one configured request against `transport`.
///
/// The status check always precedes decoding: a non-ok status either
/// short-circuits into a recovered error (body never decoded) or raises
/// [`HttpError`]; only ok responses reach the parser.
pub async fn execute<TData, TError>(
    config: &ExecutionConfig<TData, TError>,
    transport: &dyn Transport,
) -> Result<Triggered<TData, TError>, Error> {
    let request = config.request().resolved();

    tracing::debug!("sending {} request to {}", request.method(), request.url());
    let response = transport
        .send(&request)
        .await
        .map_err(Error::Transport)?;
    tracing::debug!("response: {} {}", response.status, request.url());

    if !response.is_ok() {
        let error = HttpError::new(response);
        if let Some(recover) = config.recover() {
            return match recover(error.info()) {
                Recovery::Recovered(caught) => {
                    tracing::debug!("HTTP {} recovered by caller", error.status());
                    Ok(Triggered::Caught(caught))
                }
                Recovery::Unrecognized => Err(error.into()),
            };
        }
        return Err(error.into());
    }

    let data = config.parser().decode(&response)?;
    Ok(Triggered::Data(data))
}

/// Canned-response transport for tests.
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use super::*;

    /// Returns a predefined response and records each wire-ready request.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        response: Arc<Mutex<Option<Response>>>,
        failure: Arc<Mutex<Option<String>>>,
        recorded: Arc<Mutex<Vec<RequestConfig>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to every request with `response`.
        pub fn respond_with(self, response: Response) -> Self {
            *self.response.lock().unwrap() = Some(response);
            self
        }

        /// Fail every request with a transport-level error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *self.failure.lock().unwrap() = Some(message.into());
            self
        }

        /// Requests seen so far, as resolved by the executor.
        pub fn recorded(&self) -> Vec<RequestConfig> {
            self.recorded.lock().unwrap().clone()
        }

        /// Build a response with the given status and body.
        pub fn response(status: u16, body: impl Into<Bytes>) -> Response {
            Response {
                status,
                status_text: String::new(),
                headers: Vec::new(),
                body: body.into(),
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: &RequestConfig) -> Result<Response, TransportError> {
            self.recorded.lock().unwrap().push(request.clone());
            if let Some(message) = self.failure.lock().unwrap().clone() {
                return Err(message.into());
            }
            Ok(self
                .response
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Self::response(200, "")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use crate::parser;
    use crate::types::RequestBody;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        payload: String,
    }

    fn config_for<T>(parser: parser::ResponseParser<T>) -> ExecutionConfig<T> {
        ExecutionConfig::new(RequestConfig::new("http://brings.test").unwrap(), parser)
    }

    #[tokio::test]
    async fn success_decodes_the_body() {
        let transport =
            MockTransport::new().respond_with(MockTransport::response(200, r#"{"payload":"ok"}"#));
        let config = config_for(parser::json::<Payload>());

        let outcome = execute(&config, &transport).await.unwrap();
        assert_eq!(
            outcome.data().unwrap(),
            Payload {
                payload: "ok".to_string()
            }
        );
    }

    #[tokio::test]
    async fn redirect_range_counts_as_ok() {
        let transport = MockTransport::new().respond_with(MockTransport::response(304, ""));
        let config = config_for(parser::blob());

        let outcome = execute(&config, &transport).await.unwrap();
        assert!(outcome.data().is_some());
    }

    #[tokio::test]
    async fn http_error_without_recovery_raises() {
        let transport = MockTransport::new().respond_with(MockTransport::response(500, "boom"));
        let config = config_for(parser::blob());

        let err = execute(&config, &transport).await.unwrap_err();
        match err {
            Error::Http(http) => {
                assert_eq!(http.status(), 500);
                assert_eq!(http.response().body.as_ref(), b"boom");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn recovery_claiming_the_error_short_circuits() {
        let transport = MockTransport::new().respond_with(MockTransport::response(500, "boom"));
        let config = config_for(parser::blob()).with_recovery(|info| {
            if info.status() == 500 {
                Recovery::Recovered("server down")
            } else {
                Recovery::Unrecognized
            }
        });

        let outcome = execute(&config, &transport).await.unwrap();
        assert_eq!(outcome, Triggered::Caught("server down"));
    }

    #[tokio::test]
    async fn recovered_error_never_decodes_the_body() {
        // the JSON parser would fail on this body; recovery must win first
        let transport = MockTransport::new().respond_with(MockTransport::response(500, "not json"));
        let config = config_for(parser::json::<Payload>())
            .with_recovery(|_| Recovery::Recovered("caught"));

        let outcome = execute(&config, &transport).await.unwrap();
        assert_eq!(outcome, Triggered::Caught("caught"));
    }

    #[tokio::test]
    async fn unrecognized_recovery_raises_the_original_error() {
        let transport = MockTransport::new().respond_with(MockTransport::response(503, ""));
        let config = config_for(parser::blob()).with_recovery(|info| {
            if info.status() == 404 {
                Recovery::Recovered("missing")
            } else {
                Recovery::Unrecognized
            }
        });

        let err = execute(&config, &transport).await.unwrap_err();
        assert!(matches!(err, Error::Http(http) if http.status() == 503));
    }

    #[tokio::test]
    async fn decode_error_bypasses_recovery() {
        let transport = MockTransport::new().respond_with(MockTransport::response(200, "not json"));
        let config = config_for(parser::json::<Payload>())
            .with_recovery(|_| Recovery::Recovered("must not run"));

        let err = execute(&config, &transport).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn transport_failure_propagates_unclassified() {
        let transport = MockTransport::new().fail_with("connection refused");
        let config = config_for(parser::blob());

        let err = execute(&config, &transport).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn body_content_type_is_merged_on_the_wire() {
        let transport = MockTransport::new();
        let request = RequestConfig::post("http://brings.test")
            .unwrap()
            .with_body(RequestBody::json(&serde_json::json!({"a": 1})).unwrap());
        let config = ExecutionConfig::new(request, parser::blob());

        execute(&config, &transport).await.unwrap();

        let recorded = transport.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn explicit_content_type_wins_on_the_wire() {
        let transport = MockTransport::new();
        let request = RequestConfig::post("http://brings.test")
            .unwrap()
            .with_header("Content-Type", "application/problem+json")
            .with_body(RequestBody::json(&serde_json::json!({"a": 1})).unwrap());
        let config = ExecutionConfig::new(request, parser::blob());

        execute(&config, &transport).await.unwrap();

        let recorded = transport.recorded();
        assert_eq!(
            recorded[0].header("content-type"),
            Some("application/problem+json")
        );
    }

    #[test]
    fn reqwest_transport_creation() {
        assert!(ReqwestTransport::with_default_timeout().is_ok());
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }
}
