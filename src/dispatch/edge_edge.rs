use tracing::trace;

use crate::error::Result;
use crate::math::Real;
use crate::method::CcdMethod;
use crate::query::{EdgeEdgeTrajectory, Impact, QueryParams};

use super::vertex_face::inclusion_request;
use super::{checked_toi, external, not_minimum_separation, root_finder_min_distance, Dispatcher};

impl<T: Real> Dispatcher<'_, T> {
    /// Tests two moving edges with `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if the method is unavailable, the engine fails, or
    /// the engine reports a time of impact outside `[0, 1]`.
    pub fn edge_edge(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        trace!(%method, "dispatching edge-edge query");
        let engines = self.engines;
        match method {
            CcdMethod::FloatingPointRootFinder => {
                let engine = self.engine(method, engines.root_finder())?;
                let toi = engine
                    .edge_edge(query, T::zero())
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::MinSeparationRootFinder => {
                self.edge_edge_ms(query, root_finder_min_distance(), method, params)
            }
            CcdMethod::RootParity => {
                let engine = self.engine(method, engines.root_parity())?;
                let hit = engine
                    .run(query.corners(), true)
                    .map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::RationalRootParity => {
                let engine = self.engine(method, engines.rational_root_parity())?;
                let hit = engine.edge_edge(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::FloatingPointRootParity => {
                let engine = self.engine(method, engines.floating_point_root_parity())?;
                let hit = engine.edge_edge(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::RationalFixedRootParity => {
                let engine = self.engine(method, engines.rational_fixed_root_parity())?;
                let hit = engine.edge_edge(query).map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::TightInclusion => self.edge_edge_ms(query, T::zero(), method, params),
            CcdMethod::Bsc | CcdMethod::TightCcd => {
                let slot = if method == CcdMethod::Bsc {
                    engines.bsc()
                } else {
                    engines.tight_ccd()
                };
                let engine = self.engine(method, slot)?;
                let hit = engine
                    .intersect_ee(query.corners())
                    .map_err(external(method))?;
                Ok(Impact::verdict(hit))
            }
            CcdMethod::SafeCcd => {
                let engine = self.engine(method, engines.safe_ccd())?;
                let bound = engine.bound(query.corners(), true);
                let [a0s, a1s] = &query.edge0_start;
                let [b0s, b1s] = &query.edge1_start;
                let [a0e, a1e] = &query.edge0_end;
                let [b0e, b1e] = &query.edge1_end;
                let toi = engine
                    .edge_edge(bound, [a0s, a0e, a1s, a1e, b0s, b0e, b1s, b1e])
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::UnivariateIntervalRootFinder => {
                let engine = self.engine(method, engines.interval())?;
                let toi = engine
                    .edge_edge_univariate(query)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::MultivariateIntervalRootFinder => {
                let engine = self.engine(method, engines.interval())?;
                let toi = engine
                    .edge_edge_multivariate(query)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
        }
    }

    /// Tests two moving edges with a separation floor.
    ///
    /// # Errors
    ///
    /// Returns [`CcdError::InvalidMethod`](crate::CcdError::InvalidMethod)
    /// if `method` has no minimum separation support, and otherwise the
    /// same errors as [`Dispatcher::edge_edge`].
    pub fn edge_edge_ms(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        minimum_distance: T,
        method: CcdMethod,
        params: &QueryParams<T>,
    ) -> Result<Impact<T>> {
        trace!(%method, "dispatching edge-edge minimum separation query");
        let engines = self.engines;
        match method {
            CcdMethod::MinSeparationRootFinder => {
                let engine = self.engine(method, engines.min_separation())?;
                let toi = engine
                    .edge_edge(query, minimum_distance)
                    .map_err(external(method))?;
                checked_toi(method, toi, T::one())
            }
            CcdMethod::TightInclusion => {
                let engine = self.engine(method, engines.tight_inclusion())?;
                let request = inclusion_request(minimum_distance, params);
                let outcome = engine
                    .edge_edge(query, &request)
                    .map_err(external(method))?;
                checked_toi(method, outcome.hit.then_some(outcome.toi), request.t_max)
            }
            _ => Err(not_minimum_separation(method)),
        }
    }
}
