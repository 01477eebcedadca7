mod api;
mod trajectory;

pub use api::Ccd;
pub use trajectory::{EdgeEdgeTrajectory, VertexFaceTrajectory};

use std::fmt;

use crate::error::{CcdError, Result};
use crate::math::{lit, widen, Real, Vector3};

/// Default convergence tolerance for iterative methods.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration budget for iterative methods.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;

/// Default separation for minimum-separation queries.
pub const DEFAULT_MINIMUM_DISTANCE: f64 = 1e-8;

/// Which primitive pair a query tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    VertexFace,
    EdgeEdge,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VertexFace => "Vertex-face",
            Self::EdgeEdge => "Edge-edge",
        })
    }
}

/// Floating-point error bound used by inclusion-based methods.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RoundingError<T: Real> {
    /// Let the engine derive the bound from the query.
    #[default]
    Computed,
    /// Use this per-axis bound.
    Fixed(Vector3<T>),
}

impl<T: Real> RoundingError<T> {
    /// Encodes the bound the way engines expect it, where a negative first
    /// component means "compute it yourself".
    #[must_use]
    pub fn to_native(self) -> Vector3<T> {
        match self {
            Self::Computed => Vector3::new(-T::one(), T::zero(), T::zero()),
            Self::Fixed(err) => err,
        }
    }

    /// Decodes an engine-style bound.
    #[must_use]
    pub fn from_native(err: Vector3<T>) -> Self {
        if err.x < T::zero() {
            Self::Computed
        } else {
            Self::Fixed(err)
        }
    }

    /// Folds a fixed bound carrying the `(-1, 0, 0)` sentinel into
    /// [`RoundingError::Computed`].
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Fixed(err) => Self::from_native(err),
            Self::Computed => Self::Computed,
        }
    }
}

/// Per-call parameters shared by every method.
///
/// Methods ignore the fields they have no use for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryParams<T: Real> {
    /// Convergence tolerance.
    pub tolerance: T,
    /// Iteration budget.
    pub max_iterations: u64,
    /// Floating-point error bound.
    pub rounding_error: RoundingError<T>,
    /// Separation used by the minimum separation queries when the caller
    /// passes `None`.
    pub minimum_distance: T,
}

impl<T: Real> Default for QueryParams<T> {
    fn default() -> Self {
        Self {
            tolerance: lit(DEFAULT_TOLERANCE),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rounding_error: RoundingError::Computed,
            minimum_distance: lit(DEFAULT_MINIMUM_DISTANCE),
        }
    }
}

impl<T: Real> QueryParams<T> {
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_rounding_error(mut self, rounding_error: RoundingError<T>) -> Self {
        self.rounding_error = rounding_error.normalized();
        self
    }

    #[must_use]
    pub fn with_minimum_distance(mut self, minimum_distance: T) -> Self {
        self.minimum_distance = minimum_distance;
        self
    }

    /// Checks the parameters before any engine sees them.
    ///
    /// # Errors
    ///
    /// Returns [`CcdError::InvalidParameter`] for a non-finite or
    /// non-positive tolerance, a zero iteration budget, or a fixed rounding
    /// error with a non-finite or negative component. A fixed bound whose
    /// first component is negative is the "compute it" sentinel; only its
    /// finiteness is checked.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= T::zero() {
            return Err(CcdError::InvalidParameter {
                parameter: "tolerance",
                value: widen(self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(CcdError::InvalidParameter {
                parameter: "max_iterations",
                value: 0.0,
            });
        }
        if let RoundingError::Fixed(err) = self.rounding_error {
            let sentinel = RoundingError::from_native(err) == RoundingError::Computed;
            if let Some(bad) = err
                .iter()
                .find(|c| !c.is_finite() || (!sentinel && **c < T::zero()))
            {
                return Err(CcdError::InvalidParameter {
                    parameter: "rounding_error",
                    value: widen(*bad),
                });
            }
        }
        Ok(())
    }
}

/// Checks a minimum separation distance.
///
/// # Errors
///
/// Returns [`CcdError::InvalidParameter`] if `minimum_distance` is negative
/// or not finite.
pub fn validate_minimum_distance<T: Real>(minimum_distance: T) -> Result<()> {
    if minimum_distance.is_finite() && minimum_distance >= T::zero() {
        Ok(())
    } else {
        Err(CcdError::InvalidParameter {
            parameter: "minimum_distance",
            value: widen(minimum_distance),
        })
    }
}

/// Verdict of a query, with the time of impact when the engine computed one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact<T: Real> {
    pub hit: bool,
    /// First contact time in `[0, 1]`. Always `None` when `hit` is false.
    pub toi: Option<T>,
}

impl<T: Real> Impact<T> {
    /// A verdict with no time of impact.
    #[must_use]
    pub fn verdict(hit: bool) -> Self {
        Self { hit, toi: None }
    }

    /// A hit at `toi`, or a miss.
    #[must_use]
    pub fn from_toi(toi: Option<T>) -> Self {
        Self {
            hit: toi.is_some(),
            toi,
        }
    }
}
