//! Routes a query to the engine of the chosen method.
//!
//! Every method has one arm per query kind, in `vertex_face.rs` and
//! `edge_edge.rs`. An arm checks that its family is available, adapts the
//! uniform query to the engine's native call, and turns the engine's answer
//! into an [`Impact`]. Nothing here catches panics or applies the fallback
//! verdict; that happens in [`crate::policy`].

mod edge_edge;
mod vertex_face;

use crate::engine::{Engines, ExternalError};
use crate::error::{CcdError, DisabledCause, Result};
use crate::math::{in_unit_range, lit, widen, Real};
use crate::method::{CcdMethod, FamilySet};
use crate::query::Impact;

/// Separation passed to the minimum separation root finder by the standard
/// queries. Exactly zero makes its root isolation degenerate.
pub const ROOT_FINDER_MIN_DISTANCE: f64 = 1e-30;

/// End of the time interval searched by inclusion-based methods.
const T_MAX: f64 = 1.0;

/// Stateless router over a borrowed engine set.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a, T: Real> {
    engines: &'a Engines<T>,
    enabled: FamilySet,
}

impl<'a, T: Real> Dispatcher<'a, T> {
    /// Creates a dispatcher that only routes to families in `enabled`.
    ///
    /// Families missing from [`FamilySet::COMPILED`] stay disabled whatever
    /// `enabled` says.
    #[must_use]
    pub fn new(engines: &'a Engines<T>, enabled: FamilySet) -> Self {
        Self {
            engines,
            enabled: enabled.intersection(FamilySet::COMPILED),
        }
    }

    /// Families this dispatcher will route to, linked or not.
    #[must_use]
    pub fn enabled(&self) -> FamilySet {
        self.enabled
    }

    /// Returns whether `method` can reach an engine.
    #[must_use]
    pub fn is_available(&self, method: CcdMethod) -> bool {
        self.availability(method).is_ok()
    }

    fn availability(&self, method: CcdMethod) -> Result<()> {
        let family = method.family();
        let cause = if !FamilySet::COMPILED.contains(family) {
            DisabledCause::BuildFeature
        } else if !self.enabled.contains(family) {
            DisabledCause::Restricted
        } else if !self.engines.is_linked(family) {
            DisabledCause::NoEngine
        } else {
            return Ok(());
        };
        Err(CcdError::MethodNotEnabled { method, cause })
    }

    /// Resolves the engine slot of `method` after the availability checks.
    fn engine<E: ?Sized>(&self, method: CcdMethod, slot: Option<&'a E>) -> Result<&'a E> {
        self.availability(method)?;
        slot.ok_or(CcdError::MethodNotEnabled {
            method,
            cause: DisabledCause::NoEngine,
        })
    }
}

fn not_minimum_separation(method: CcdMethod) -> CcdError {
    CcdError::InvalidMethod(format!("{method} is not a minimum separation method"))
}

fn external(method: CcdMethod) -> impl FnOnce(ExternalError) -> CcdError {
    move |source| CcdError::External { method, source }
}

/// Accepts a reported time of impact only inside `[0, t_max]`.
fn checked_toi<T: Real>(method: CcdMethod, toi: Option<T>, t_max: T) -> Result<Impact<T>> {
    match toi {
        Some(t) if !in_unit_range(t, t_max) => Err(CcdError::NumericInconsistency {
            method,
            toi: widen(t),
        }),
        toi => Ok(Impact::from_toi(toi)),
    }
}

fn root_finder_min_distance<T: Real>() -> T {
    lit(ROOT_FINDER_MIN_DISTANCE)
}

fn t_max<T: Real>() -> T {
    lit(T_MAX)
}

#[cfg(test)]
pub(crate) mod testing;
