//! Conservative fallback applied at the query boundary.
//!
//! A missed collision lets geometry interpenetrate; a spurious one only costs
//! an unneeded response. Any failure therefore becomes a `true` verdict.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::error::{CcdError, FailureKind, Result};
use crate::math::Real;
use crate::method::CcdMethod;
use crate::query::{Impact, QueryKind};

/// One-line report of a query that fell back to the conservative verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub query: QueryKind,
    pub method: CcdMethod,
    pub kind: FailureKind,
    pub reason: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(query: QueryKind, method: CcdMethod, err: &CcdError) -> Self {
        Self {
            query,
            method,
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} CCD failed because \"{}\" ({}) for {}",
            self.query, self.reason, self.kind, self.method
        )
    }
}

/// Runs `dispatch`, turning a panic into [`CcdError::Panicked`].
///
/// # Errors
///
/// Returns the error of `dispatch`, or [`CcdError::Panicked`] if it panics.
pub fn guard<T, F>(method: CcdMethod, dispatch: F) -> Result<Impact<T>>
where
    T: Real,
    F: FnOnce() -> Result<Impact<T>>,
{
    catch_unwind(AssertUnwindSafe(dispatch)).unwrap_or_else(|payload| {
        Err(CcdError::Panicked {
            method,
            message: panic_message(payload.as_ref()),
        })
    })
}

/// Reduces a query outcome to a verdict, reporting `true` on any failure.
///
/// Failures are logged at `warn` with the query, method and failure kind.
pub fn conservative<T: Real>(query: QueryKind, method: CcdMethod, outcome: Result<Impact<T>>) -> bool {
    match outcome {
        Ok(impact) => impact.hit,
        Err(err) => {
            let diagnostic = Diagnostic::new(query, method, &err);
            warn!(
                query = %diagnostic.query,
                method = %diagnostic.method,
                kind = %diagnostic.kind,
                "{diagnostic}"
            );
            true
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown reason".to_owned()
    }
}
