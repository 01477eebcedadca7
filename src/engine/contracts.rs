//! Native call shapes of the external CCD engines.
//!
//! Each trait mirrors how its family of algorithms expects to be called:
//! argument order, extra inputs and what comes back. Adapting the uniform
//! query to these shapes is the dispatcher's job, not the engine's.

use crate::math::{Real, Vector3};
use crate::query::{EdgeEdgeTrajectory, VertexFaceTrajectory};

use super::ExternalError;

/// Result of an engine call.
pub type EngineResult<T> = std::result::Result<T, ExternalError>;

/// Floating-point cubic root finder (Vouga et al.).
///
/// Returns the time of impact when the primitives come within `eta`.
pub trait RootFinder<T: Real>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the engine cannot classify the motion.
    fn vertex_face(&self, query: &VertexFaceTrajectory<T>, eta: T) -> EngineResult<Option<T>>;

    /// # Errors
    ///
    /// Returns an error if the engine cannot classify the motion.
    fn edge_edge(&self, query: &EdgeEdgeTrajectory<T>, eta: T) -> EngineResult<Option<T>>;
}

/// Minimum separation root finder (Harmon et al.).
pub trait MinSeparationRootFinder<T: Real>: Send + Sync {
    /// Returns the first time the distance drops to `minimum_distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot classify the motion.
    fn vertex_face(
        &self,
        query: &VertexFaceTrajectory<T>,
        minimum_distance: T,
    ) -> EngineResult<Option<T>>;

    /// Returns the first time the distance drops to `minimum_distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot classify the motion.
    fn edge_edge(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        minimum_distance: T,
    ) -> EngineResult<Option<T>>;
}

/// Root parity test of Brochu et al.
///
/// For a vertex-face test the points are the vertex, then the face vertices
/// in order (1, 0, 2), first at start and then at end. For an edge-edge test
/// they are the four edge endpoints at start, then at end.
pub trait RootParityTest<T: Real>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the parity count is undefined.
    fn run(&self, points: [&Vector3<T>; 8], is_edge_edge: bool) -> EngineResult<bool>;
}

/// Boolean predicate taking the corners in query order.
///
/// Shared by the rational root parity, the fixed floating-point root parity
/// and the fixed rational root parity families.
pub trait ExactPredicate<T: Real>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the predicate cannot be evaluated.
    fn vertex_face(&self, query: &VertexFaceTrajectory<T>) -> EngineResult<bool>;

    /// # Errors
    ///
    /// Returns an error if the predicate cannot be evaluated.
    fn edge_edge(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<bool>;
}

/// Bernstein sign classification, shared by BSC and TightCCD.
pub trait SignClassifier<T: Real>: Send + Sync {
    /// Tests a triangle against a point; the triangle comes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the classification is undefined.
    fn intersect_vf(
        &self,
        face_start: [&Vector3<T>; 3],
        vertex_start: &Vector3<T>,
        face_end: [&Vector3<T>; 3],
        vertex_end: &Vector3<T>,
    ) -> EngineResult<bool>;

    /// Tests two edges given as four endpoints at start, then at end.
    ///
    /// # Errors
    ///
    /// Returns an error if the classification is undefined.
    fn intersect_ee(&self, points: [&Vector3<T>; 8]) -> EngineResult<bool>;
}

/// SafeCCD, which needs a coefficient bound computed before the test.
///
/// Corners are interleaved: each primitive corner at start followed by the
/// same corner at end.
pub trait SafeCcd<T: Real>: Send + Sync {
    /// Bound on the magnitude of the polynomial coefficients.
    fn bound(&self, points: [&Vector3<T>; 8], is_edge_edge: bool) -> T;

    /// # Errors
    ///
    /// Returns an error if the bound is too small for the motion.
    fn vertex_triangle(&self, bound: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>>;

    /// # Errors
    ///
    /// Returns an error if the bound is too small for the motion.
    fn edge_edge(&self, bound: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>>;
}

/// Interval root finders of Redon et al.
pub trait IntervalRootFinder<T: Real>: Send + Sync {
    /// Univariate solve over time only.
    ///
    /// # Errors
    ///
    /// Returns an error if interval refinement fails.
    fn vertex_face_univariate(&self, query: &VertexFaceTrajectory<T>) -> EngineResult<Option<T>>;

    /// Multivariate solve over time and barycentric coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if interval refinement fails.
    fn vertex_face_multivariate(&self, query: &VertexFaceTrajectory<T>)
        -> EngineResult<Option<T>>;

    /// # Errors
    ///
    /// Returns an error if interval refinement fails.
    fn edge_edge_univariate(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>>;

    /// # Errors
    ///
    /// Returns an error if interval refinement fails.
    fn edge_edge_multivariate(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>>;
}

/// Inputs of a tight inclusion call.
///
/// The search covers `[0, t_max]` and stops after `max_iterations` even if
/// `tolerance` was not reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclusionRequest<T: Real> {
    /// Floating-point error bound; `(-1, 0, 0)` asks the engine to compute it.
    pub rounding_error: Vector3<T>,
    pub minimum_distance: T,
    /// Target width of the time interval.
    pub tolerance: T,
    pub t_max: T,
    pub max_iterations: u64,
}

/// Outputs of a tight inclusion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclusionOutcome<T: Real> {
    pub hit: bool,
    /// Conservative time of impact; meaningful only when `hit` is set.
    pub toi: T,
    /// Interval width actually reached.
    pub output_tolerance: T,
}

/// Inclusion-based CCD of Wang et al.
pub trait TightInclusion<T: Real>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the search cannot bound the motion.
    fn vertex_face(
        &self,
        query: &VertexFaceTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>>;

    /// # Errors
    ///
    /// Returns an error if the search cannot bound the motion.
    fn edge_edge(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>>;
}
