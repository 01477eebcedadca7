use tracing::trace;

use crate::engine::InclusionRequest;
use crate::error::Result;
use crate::math::Real;
use crate::method::CcdMethod;
use crate::query::{Impact, QueryParams, VertexFaceTrajectory};

use super::{
    checked_toi, external, not_minimum_separation, root_finder_min_distance, t_max, Dispatcher,
};

impl<T: Real> Dispatcher<'_, T> {
    /// Tests a point against a triangle with `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the method is unavailable, the engine fails, or
    /// the engine reports a time of impact outside `[0, 1]`.
    pub fn vertex_face(
        &self,
        query: &VertexFaceTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        trace!(%method, "dispatching vertex-face query");
        let engines = self.engines;
        match method {
            CcdMethod::FloatingPointRootFinder => {
                let engine = self.engine(method, engines.root_finder())?;
                let toi = engine
                    .vertex_face(query, T::zero())
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::MinSeparationRootFinder => {
                self.vertex_face_ms(query, root_finder_min_distance(), method, params)
            }
            CcdMethod::RootParity => {
                let engine = self.engine(method, engines.root_parity())?;
                let [f0s, f1s, f2s] = &query.face_start;
                let [f0e, f1e, f2e] = &query.face_end;
                let points = [
                    &query.vertex_start,
                    f1s,
                    f0s,
                    f2s,
                    &query.vertex_end,
                    f1e,
                    f0e,
                    f2e,
                ];
                let hit = engine.run(points, false).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::RationalRootParity => {
                let engine = self.engine(method, engines.rational_root_parity())?;
                let hit = engine.vertex_face(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::FloatingPointRootParity => {
                let engine = self.engine(method, engines.floating_point_root_parity())?;
                let hit = engine.vertex_face(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::RationalFixedRootParity => {
                let engine = self.engine(method, engines.rational_fixed_root_parity())?;
                let hit = engine.vertex_face(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::TightInclusion => self.vertex_face_ms(query, T::zero(), method, params),
            CcdMethod::Bsc | CcdMethod::TightCcd => {
                let slot = if method == CcdMethod::Bsc {
                    engines.bsc()
                } else {
                    engines.tight_ccd()
                };
                let engine = self.engine(method, slot)?;
                let [f0s, f1s, f2s] = &query.face_start;
                let [f0e, f1e, f2e] = &query.face_end;
                let hit = engine
                    .intersect_vf(
                        [f0s, f1s, f2s],
                        &query.vertex_start,
                        [f0e, f1e, f2e],
                        &query.vertex_end,
                    )
                    .map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::SafeCcd => {
                let engine = self.engine(method, engines.safe_ccd())?;
                let bound = engine.bound(query.corners(), false);
                let [f0s, f1s, f2s] = &query.face_start;
                let [f0e, f1e, f2e] = &query.face_end;
                let interleaved = [
                    &query.vertex_start,
                    &query.vertex_end,
                    f0s,
                    f0e,
                    f1s,
                    f1e,
                    f2s,
                    f2e,
                ];
                let toi = engine
                    .vertex_triangle(bound, interleaved)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::UnivariateIntervalRootFinder => {
                let engine = self.engine(method, engines.interval())?;
                let toi = engine
                    .vertex_face_univariate(query)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::MultivariateIntervalRootFinder => {
                let engine = self.engine(method, engines.interval())?;
                let toi = engine
                    .vertex_face_multivariate(query)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
        }
    }

    /// Tests a point against a triangle with a separation floor.
    ///
    /// # Errors
    ///
    /// Returns [`CcdError::InvalidMethod`](crate::CcdError::InvalidMethod)
    /// if `method` has no minimum separation support, and otherwise the
    /// same errors as [`Dispatcher::vertex_face`].
    pub fn vertex_face_ms(
        &self,
        query: &VertexFaceTrajectory<T>,
        minimum_distance: T,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        trace!(%method, "dispatching vertex-face minimum separation query");
        let engines = self.engines;
        match method {
            CcdMethod::MinSeparationRootFinder => {
                let engine = self.engine(method, engines.min_separation())?;
                let toi = engine
                    .vertex_face(query, minimum_distance)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::TightInclusion => {
                let engine = self.engine(method, engines.tight_inclusion())?;
                let request = inclusion_request(minimum_distance, params);
                let outcome = engine
                    .vertex_face(query, &request)
                    .map_err(external(method))?;
                checked_toi(method, outcome.hit.then_some(outcome.toi), request.t_max)
            }
            _ => Err(not_minimum_separation(method)),
        }
    }
}

pub(super) fn inclusion_request<T: Real>(
    minimum_distance: T,
    params: &QueryParams<T>,
) -> InclusionRequest<T> {
    InclusionRequest {
        rounding_error: params.rounding_error.to_native(),
        minimum_distance,
        tolerance: params.tolerance,
        t_max: t_max(),
        max_iterations: params.max_iterations,
    }
}
