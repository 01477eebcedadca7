use crate::dispatch::Dispatcher;
use crate::engine::Engines;
use crate::error::{CcdError, Result};
use crate::math::{widen, Real, Vector3};
use crate::method::{CcdMethod, FamilySet};
use crate::policy::{conservative, guard};

use super::{
    validate_minimum_distance, EdgeEdgeTrajectory, Impact, QueryKind, QueryParams,
    VertexFaceTrajectory,
};

/// Query handle over a set of linked engines.
///
/// The boolean entry points never fail: any error is reported through
/// `tracing` and answered with `true`. The `try_` variants return the error
/// and the time of impact instead.
///
/// Diagnostics are `tracing` events at `warn` level. Nothing is printed
/// unless the host installs a subscriber, for example
/// `tracing_subscriber::fmt().with_writer(std::io::stderr).init()`.
///
/// The handle holds no per-query state; cloning it shares the engines.
#[derive(Debug, Clone)]
pub struct Ccd<T: Real> {
    engines: Engines<T>,
    enabled: FamilySet,
}

impl<T: Real> Default for Ccd<T> {
    fn default() -> Self {
        Self::new(Engines::new())
    }
}

impl<T: Real> Ccd<T> {
    /// Creates a handle routing to every compiled family.
    #[must_use]
    pub fn new(engines: Engines<T>) -> Self {
        Self {
            engines,
            enabled: FamilySet::COMPILED,
        }
    }

    /// Narrows the handle to `families`. Families outside the set behave as
    /// if their cargo feature were off.
    #[must_use]
    pub fn restrict(mut self, families: FamilySet) -> Self {
        self.enabled = self.enabled.intersection(families);
        self
    }

    /// Families the handle routes to.
    #[must_use]
    pub fn enabled(&self) -> FamilySet {
        self.enabled
    }

    /// Returns whether `method` is compiled in, not restricted, and linked.
    #[must_use]
    pub fn is_available(&self, method: CcdMethod) -> bool {
        self.dispatcher().is_available(method)
    }

    fn dispatcher(&self) -> Dispatcher<'_, T> {
        Dispatcher::new(&self.engines, self.enabled)
    }

    /// Detects a collision between a moving point and a moving triangle.
    ///
    /// Returns `true` if they touch at any time in `[0, 1]`, or if the query
    /// failed.
    #[must_use]
    pub fn vertex_face_ccd(
        &self,
        query: &VertexFaceTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> bool {
        conservative(
            QueryKind::VertexFace,
            method,
            self.try_vertex_face_ccd(query, method, params),
        )
    }

    /// Detects a collision between two moving edges.
    ///
    /// Returns `true` if they touch at any time in `[0, 1]`, or if the query
    /// failed.
    #[must_use]
    pub fn edge_edge_ccd(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> bool {
        conservative(
            QueryKind::EdgeEdge,
            method,
            self.try_edge_edge_ccd(query, method, params),
        )
    }

    /// Detects a point and triangle coming within `minimum_distance`, or
    /// within [`QueryParams::minimum_distance`] when it is `None`.
    ///
    /// Only [minimum separation methods](CcdMethod::is_minimum_separation_method)
    /// are accepted; any other method fails and so returns `true`.
    #[must_use]
    pub fn vertex_face_msccd(
        &self,
        query: &VertexFaceTrajectory<T>,
        minimum_distance: Option<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> bool {
        conservative(
            QueryKind::VertexFace,
            method,
            self.try_vertex_face_msccd(query, minimum_distance, method, params),
        )
    }

    /// Detects two edges coming within `minimum_distance`, or within
    /// [`QueryParams::minimum_distance`] when it is `None`.
    ///
    /// Only [minimum separation methods](CcdMethod::is_minimum_separation_method)
    /// are accepted; any other method fails and so returns `true`.
    #[must_use]
    pub fn edge_edge_msccd(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        minimum_distance: Option<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> bool {
        conservative(
            QueryKind::EdgeEdge,
            method,
            self.try_edge_edge_msccd(query, minimum_distance, method, params),
        )
    }

    /// Like [`Ccd::vertex_face_ccd`], without the conservative fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the method is not
    /// available, or the engine fails or panics.
    pub fn try_vertex_face_ccd(
        &self,
        query: &VertexFaceTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        guard(method, || {
            params.validate()?;
            check_finite(query.is_finite(), query.corners())?;
            self.dispatcher().vertex_face(query, method, params)
        })
    }

    /// Like [`Ccd::edge_edge_ccd`], without the conservative fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the method is not
    /// available, or the engine fails or panics.
    pub fn try_edge_edge_ccd(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        guard(method, || {
            params.validate()?;
            check_finite(query.is_finite(), query.corners())?;
            self.dispatcher().edge_edge(query, method, params)
        })
    }

    /// Like [`Ccd::vertex_face_msccd`], without the conservative fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the method has no
    /// minimum separation support or is not available, or the engine fails
    /// or panics.
    pub fn try_vertex_face_msccd(
        &self,
        query: &VertexFaceTrajectory<T>,
        minimum_distance: Option<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        guard(method, || {
            params.validate()?;
            let minimum_distance = minimum_distance.unwrap_or(params.minimum_distance);
            validate_minimum_distance(minimum_distance)?;
            check_finite(query.is_finite(), query.corners())?;
            self.dispatcher()
                .vertex_face_ms(query, minimum_distance, method, params)
        })
    }

    /// Like [`Ccd::edge_edge_msccd`], without the conservative fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the method has no
    /// minimum separation support or is not available, or the engine fails
    /// or panics.
    pub fn try_edge_edge_msccd(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        minimum_distance: Option<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        guard(method, || {
            params.validate()?;
            let minimum_distance = minimum_distance.unwrap_or(params.minimum_distance);
            validate_minimum_distance(minimum_distance)?;
            check_finite(query.is_finite(), query.corners())?;
            self.dispatcher()
                .edge_edge_ms(query, minimum_distance, method, params)
        })
    }
}

/// Rejects a trajectory with a non-finite corner, naming the first bad
/// coordinate.
fn check_finite<T: Real>(finite: bool, corners: [&Vector3<T>; 8]) -> Result<()> {
    if finite {
        return Ok(());
    }
    let value = corners
        .iter()
        .flat_map(|c| c.iter())
        .find(|x| !x.is_finite())
        .map_or(f64::NAN, |bad| widen(*bad));
    Err(CcdError::InvalidParameter {
        parameter: "position",
        value,
    })
}
