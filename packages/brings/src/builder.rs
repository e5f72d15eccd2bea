//! The chainable builder surface.
//!
//! A builder is an immutable value: every configuration call returns a new
//! builder and leaves the original untouched, so one builder can be kept
//! and triggered any number of times. The chain progresses linearly:
//! [`from_url`] yields a [`RequestBuilder`] (request configuration), and
//! [`RequestBuilder::parse`] yields a [`ResponseBuilder`] (response
//! configuration). Nothing touches the network until a terminal
//! `trigger()` or `bring()` call.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::config::{ExecutionConfig, Recovery};
use crate::error::{Error, HttpErrorInfo};
use crate::executor::{execute, ReqwestTransport, Transport};
use crate::parser::{self, ResponseParser};
use crate::result::{BringsResult, Triggered};
use crate::types::{RequestBody, RequestConfig};

/// Create a builder for the given absolute URL.
///
/// Defaults: method GET, no headers, no body, blob parser, no recovery,
/// reqwest transport with a 30 second timeout.
pub fn from_url(url: impl AsRef<str>) -> Result<RequestBuilder, Error> {
    let request = RequestConfig::new(url.as_ref())?;
    Ok(RequestBuilder {
        request,
        transport: default_transport()?,
    })
}

/// Wrap a prebuilt [`ExecutionConfig`] into a directly-triggerable builder.
pub fn from_config<TData, TError>(
    config: ExecutionConfig<TData, TError>,
) -> Result<ResponseBuilder<TData, TError>, Error> {
    Ok(ResponseBuilder {
        config,
        transport: default_transport()?,
    })
}

fn default_transport() -> Result<Arc<dyn Transport>, Error> {
    let transport = ReqwestTransport::with_default_timeout().map_err(Error::Transport)?;
    Ok(Arc::new(transport))
}

/// Request-configuration phase: accumulates URL, method, headers, query
/// params, and body. Triggerable as-is with the default blob parser.
#[derive(Clone)]
pub struct RequestBuilder {
    request: RequestConfig,
    transport: Arc<dyn Transport>,
}

impl RequestBuilder {
    /// Replace the target URL. Fails eagerly if `url` is not absolute.
    pub fn with_url(&self, url: &str) -> Result<Self, Error> {
        Ok(self.replace(self.request.with_url(url)?))
    }

    /// Replace the HTTP method. Any non-empty verb is accepted.
    pub fn with_method(&self, method: impl Into<String>) -> Result<Self, Error> {
        Ok(self.replace(self.request.with_method(method)?))
    }

    /// Set a single header, overwriting any existing value for the name.
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace(self.request.with_header(name, value))
    }

    /// Append a query parameter. Repeated names accumulate.
    pub fn with_param(&self, name: &str, value: &str) -> Self {
        self.replace(self.request.with_param(name, value))
    }

    /// Replace the request body. Its content type is merged into the headers
    /// at trigger time unless a `Content-Type` header was set explicitly.
    pub fn with_body(&self, body: RequestBody) -> Self {
        self.replace(self.request.with_body(body))
    }

    /// Replace the transport used at trigger time.
    pub fn with_transport(&self, transport: impl Transport + 'static) -> Self {
        Self {
            request: self.request.clone(),
            transport: Arc::new(transport),
        }
    }

    /// The accumulated request snapshot.
    pub fn request(&self) -> &RequestConfig {
        &self.request
    }

    /// Move to the response-configuration phase with an explicit parser.
    pub fn parse<TData>(&self, parser: ResponseParser<TData>) -> ResponseBuilder<TData> {
        ResponseBuilder {
            config: ExecutionConfig::new(self.request.clone(), parser),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Execute the request and decode the payload as a binary blob.
    pub async fn trigger(&self) -> Result<Bytes, Error> {
        let config = ExecutionConfig::new(self.request.clone(), parser::blob());
        Ok(execute(&config, self.transport.as_ref()).await?.into_data())
    }

    /// Execute the request, wrapping the outcome in a [`BringsResult`].
    /// With no recovery attached the error channel is uninhabited.
    pub async fn bring(&self) -> Result<BringsResult<Bytes, Infallible>, Error> {
        Ok(BringsResult::Ok(self.trigger().await?))
    }

    fn replace(&self, request: RequestConfig) -> Self {
        Self {
            request,
            transport: Arc::clone(&self.transport),
        }
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Response-configuration phase: carries the parser and, optionally, an
/// HTTP-error recovery function.
pub struct ResponseBuilder<TData, TError = Infallible> {
    config: ExecutionConfig<TData, TError>,
    transport: Arc<dyn Transport>,
}

impl<TData, TError> ResponseBuilder<TData, TError> {
    /// Attach or replace the HTTP-error recovery function; the last call
    /// wins. Recovery sees HTTP status failures only; decode and transport
    /// errors always propagate.
    pub fn catch_http<E>(
        &self,
        recover: impl Fn(HttpErrorInfo<'_>) -> Recovery<E> + Send + Sync + 'static,
    ) -> ResponseBuilder<TData, E> {
        ResponseBuilder {
            config: self.config.with_recovery(recover),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Replace the transport used at trigger time.
    pub fn with_transport(&self, transport: impl Transport + 'static) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::new(transport),
        }
    }

    /// The accumulated execution snapshot.
    pub fn config(&self) -> &ExecutionConfig<TData, TError> {
        &self.config
    }

    /// Execute the request. Resolves to the decoded data, or to a recovered
    /// error; unrecognized HTTP errors, decode errors, and transport
    /// failures surface as `Err`.
    pub async fn trigger(&self) -> Result<Triggered<TData, TError>, Error> {
        execute(&self.config, self.transport.as_ref()).await
    }

    /// Execute the request, wrapping the declared error channel in a
    /// [`BringsResult`] for exhaustive handling. Everything outside that
    /// channel still surfaces as `Err`.
    pub async fn bring(&self) -> Result<BringsResult<TData, TError>, Error> {
        Ok(match self.trigger().await? {
            Triggered::Data(data) => BringsResult::Ok(data),
            Triggered::Caught(error) => BringsResult::Error(error),
        })
    }
}

impl<TData, TError> Clone for ResponseBuilder<TData, TError> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<TData, TError> fmt::Debug for ResponseBuilder<TData, TError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
