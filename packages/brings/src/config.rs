//! Execution configuration.
//!
//! An `ExecutionConfig` is the complete, immutable description of one
//! request: what to send, how to decode the payload, and whether HTTP
//! status failures may be recovered into a typed error. The parser and the
//! recovery function are `Arc`-backed, so cloning a config is cheap and no
//! clone can observe mutation through another.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::error::HttpErrorInfo;
use crate::parser::ResponseParser;
use crate::types::RequestConfig;

/// What a recovery function decided about an HTTP status failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery<TError> {
    /// The caller claims the failure and supplies a typed error value.
    Recovered(TError),
    /// The failure is not recognized; the original HTTP error propagates.
    Unrecognized,
}

pub(crate) type RecoverFn<TError> = dyn Fn(HttpErrorInfo<'_>) -> Recovery<TError> + Send + Sync;

/// Immutable snapshot combining a request, a response parser, and an
/// optional HTTP-error recovery function.
pub struct ExecutionConfig<TData, TError = Infallible> {
    request: RequestConfig,
    parser: ResponseParser<TData>,
    recover: Option<Arc<RecoverFn<TError>>>,
}

impl<TData> ExecutionConfig<TData> {
    /// A config with no recovery attached; the declared error channel stays
    /// uninhabited until [`ExecutionConfig::with_recovery`] is called.
    pub fn new(request: RequestConfig, parser: ResponseParser<TData>) -> Self {
        Self {
            request,
            parser,
            recover: None,
        }
    }
}

impl<TData, TError> ExecutionConfig<TData, TError> {
    pub fn request(&self) -> &RequestConfig {
        &self.request
    }

    pub fn parser(&self) -> &ResponseParser<TData> {
        &self.parser
    }

    pub fn has_recovery(&self) -> bool {
        self.recover.is_some()
    }

    pub(crate) fn recover(&self) -> Option<&RecoverFn<TError>> {
        self.recover.as_deref()
    }

    /// Replace the request half, keeping parser and recovery.
    pub fn with_request(&self, request: RequestConfig) -> Self {
        Self {
            request,
            parser: self.parser.clone(),
            recover: self.recover.clone(),
        }
    }

    /// Attach or replace the recovery function. The last attached function
    /// wins; the declared error type follows it.
    pub fn with_recovery<E>(
        &self,
        recover: impl Fn(HttpErrorInfo<'_>) -> Recovery<E> + Send + Sync + 'static,
    ) -> ExecutionConfig<TData, E> {
        ExecutionConfig {
            request: self.request.clone(),
            parser: self.parser.clone(),
            recover: Some(Arc::new(recover)),
        }
    }
}

impl<TData, TError> Clone for ExecutionConfig<TData, TError> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            parser: self.parser.clone(),
            recover: self.recover.clone(),
        }
    }
}

impl<TData, TError> fmt::Debug for ExecutionConfig<TData, TError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionConfig")
            .field("request", &self.request)
            .field("has_recovery", &self.recover.is_some())
            .finish_non_exhaustive()
    }
}
