//! Terminal result shapes.
//!
//! `trigger()` and `bring()` run the same pipeline and differ only in how
//! they hand back the declared error channel: `trigger` returns the minimal
//! union [`Triggered`], `bring` the status-tagged [`BringsResult`] for
//! exhaustive handling. Unrecognized HTTP errors, decode errors, and
//! transport failures never appear in either; they surface as the outer
//! `Err(Error)` of the terminal call.

use std::convert::Infallible;

/// Outcome of `bring()`: success data or a recovered, typed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringsResult<TData, TError> {
    Ok(TData),
    Error(TError),
}

impl<TData, TError> BringsResult<TData, TError> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(self) -> Option<TData> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn error(self) -> Option<TError> {
        match self {
            Self::Ok(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Convert into a plain `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<TData, TError> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Error(error) => Err(error),
        }
    }
}

/// Outcome of `trigger()`: success data or a recovered error, as a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triggered<TData, TError> {
    Data(TData),
    Caught(TError),
}

impl<TData, TError> Triggered<TData, TError> {
    pub fn data(self) -> Option<TData> {
        match self {
            Self::Data(data) => Some(data),
            Self::Caught(_) => None,
        }
    }

    pub fn caught(self) -> Option<TError> {
        match self {
            Self::Data(_) => None,
            Self::Caught(error) => Some(error),
        }
    }

    /// Collapse both sides into the data type, for callers whose recovered
    /// error converts into it.
    pub fn merge(self) -> TData
    where
        TError: Into<TData>,
    {
        match self {
            Self::Data(data) => data,
            Self::Caught(error) => error.into(),
        }
    }
}

impl<TData> Triggered<TData, Infallible> {
    /// With no recovery attached the error channel is uninhabited; the data
    /// can be taken out directly.
    pub fn into_data(self) -> TData {
        match self {
            Self::Data(data) => data,
            Self::Caught(never) => match never {},
        }
    }
}
