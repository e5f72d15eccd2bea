//! # brings
//!
//! A fluent, immutable HTTP request builder with a pluggable transport,
//! composable response parsers, and typed HTTP-error recovery.
//!
//! A builder accumulates request configuration, then executes exactly one
//! network call when a terminal method is invoked. Every configuration call
//! returns a new value and builders never mutate in place, so one builder
//! can be reused for any number of independent requests.
//!
//! ## Fetching and decoding
//!
//! ```ignore
//! use brings::{from_url, parser};
//!
//! #[derive(serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! let user = from_url("https://api.example.com/users/123")?
//!     .with_header("Accept", "application/json")
//!     .parse(parser::json::<User>())
//!     .trigger()
//!     .await?
//!     .into_data();
//! ```
//!
//! ## Recovering HTTP errors into a typed channel
//!
//! Attaching a recovery function with `catch_http` turns recognized HTTP
//! status failures into a value of the declared error type. `trigger()`
//! resolves to the data-or-error union; `bring()` wraps the same outcome in
//! a [`BringsResult`] for exhaustive matching. Decode failures and
//! unrecognized statuses always propagate as errors.
//!
//! ```ignore
//! use brings::{from_url, parser, Recovery};
//!
//! enum ApiError { NotFound, Unavailable }
//!
//! let result = from_url("https://api.example.com/users/123")?
//!     .parse(parser::json::<User>())
//!     .catch_http(|info| match info.status() {
//!         404 => Recovery::Recovered(ApiError::NotFound),
//!         503 => Recovery::Recovered(ApiError::Unavailable),
//!         _ => Recovery::Unrecognized,
//!     })
//!     .bring()
//!     .await?;
//!
//! match result {
//!     brings::BringsResult::Ok(user) => println!("{}", user.name),
//!     brings::BringsResult::Error(ApiError::NotFound) => println!("no such user"),
//!     brings::BringsResult::Error(ApiError::Unavailable) => println!("try later"),
//! }
//! ```
//!
//! ## Sending a body
//!
//! ```ignore
//! use brings::{from_url, parser, RequestBody};
//!
//! let created = from_url("https://api.example.com/users")?
//!     .with_method("POST")?
//!     .with_body(RequestBody::json(&new_user)?)
//!     .parse(parser::json::<User>())
//!     .trigger()
//!     .await?;
//! ```
//!
//! The transport is injected behind the [`Transport`] trait; tests swap in
//! a canned transport and production uses [`ReqwestTransport`].

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod parser;
pub mod result;
pub mod types;

pub use builder::{from_config, from_url, RequestBuilder, ResponseBuilder};
pub use config::{ExecutionConfig, Recovery};
pub use error::{DecodeError, Error, HttpError, HttpErrorInfo, TransportError};
pub use executor::{execute, ReqwestTransport, Transport};
pub use parser::ResponseParser;
pub use result::{BringsResult, Triggered};
pub use types::{RequestBody, RequestConfig, Response};
