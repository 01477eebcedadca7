use std::fmt;

use thiserror::Error;

use crate::engine::ExternalError;
use crate::method::CcdMethod;

/// Why a method could not be dispatched even though its tag is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledCause {
    /// The family's cargo feature was off when the crate was built.
    BuildFeature,
    /// The family was removed from the handle with [`Ccd::restrict`](crate::Ccd::restrict).
    Restricted,
    /// The family is compiled in but no engine was linked for it.
    NoEngine,
}

impl fmt::Display for DisabledCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BuildFeature => "disabled at build time",
            Self::Restricted => "restricted on this handle",
            Self::NoEngine => "no engine linked",
        })
    }
}

/// Top-level error type for CCD queries.
#[derive(Debug, Error)]
pub enum CcdError {
    #[error("CCD method is not enabled ({cause})")]
    MethodNotEnabled {
        method: CcdMethod,
        cause: DisabledCause,
    },

    #[error("invalid CCD method: {0}")]
    InvalidMethod(String),

    #[error("time of impact {toi} is out of range [0, 1]")]
    NumericInconsistency { method: CcdMethod, toi: f64 },

    #[error("parameter {parameter} = {value} is invalid")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("engine reported an error: {source}")]
    External {
        method: CcdMethod,
        #[source]
        source: ExternalError,
    },

    #[error("engine panicked: {message}")]
    Panicked { method: CcdMethod, message: String },
}

impl CcdError {
    /// Classifies the error into the failure taxonomy reported by diagnostics.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MethodNotEnabled { .. } => FailureKind::MethodNotEnabled,
            Self::InvalidMethod(_) => FailureKind::InvalidMethod,
            Self::NumericInconsistency { .. } => FailureKind::NumericInconsistency,
            Self::InvalidParameter { .. } => FailureKind::InvalidParameter,
            Self::External { .. } | Self::Panicked { .. } => {
                FailureKind::UnspecifiedExternalFailure
            }
        }
    }
}

/// Coarse failure classes, one per diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MethodNotEnabled,
    InvalidMethod,
    NumericInconsistency,
    InvalidParameter,
    UnspecifiedExternalFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MethodNotEnabled => "MethodNotEnabled",
            Self::InvalidMethod => "InvalidMethod",
            Self::NumericInconsistency => "NumericInconsistency",
            Self::InvalidParameter => "InvalidParameter",
            Self::UnspecifiedExternalFailure => "UnspecifiedExternalFailure",
        })
    }
}

/// Convenience type alias for results using [`CcdError`].
pub type Result<T> = std::result::Result<T, CcdError>;
