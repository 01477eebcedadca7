pub mod contracts;

pub use contracts::{
    EngineResult, ExactPredicate, InclusionOutcome, InclusionRequest,
    IntervalRootFinder, MinSeparationRootFinder, RootFinder, RootParityTest, SafeCcd,
    SignClassifier, TightInclusion,
};

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::math::Real;
use crate::method::{FamilySet, MethodFamily};

/// Error reported by an engine through its return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExternalError {
    message: String,
}

impl ExternalError {
    /// Creates an error with the engine's own description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The engine's description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Engines linked into a [`Ccd`](crate::Ccd) handle, one slot per family.
///
/// The sign classification and exact predicate contracts are shared by
/// several families; each family still gets its own slot.
pub struct Engines<T: Real> {
    root_finder: Option<Arc<dyn RootFinder<T>>>,
    min_separation: Option<Arc<dyn MinSeparationRootFinder<T>>>,
    root_parity: Option<Arc<dyn RootParityTest<T>>>,
    rational_root_parity: Option<Arc<dyn ExactPredicate<T>>>,
    floating_point_root_parity: Option<Arc<dyn ExactPredicate<T>>>,
    rational_fixed_root_parity: Option<Arc<dyn ExactPredicate<T>>>,
    tight_inclusion: Option<Arc<dyn TightInclusion<T>>>,
    bsc: Option<Arc<dyn SignClassifier<T>>>,
    tight_ccd: Option<Arc<dyn SignClassifier<T>>>,
    safe_ccd: Option<Arc<dyn SafeCcd<T>>>,
    interval: Option<Arc<dyn IntervalRootFinder<T>>>,
}

impl<T: Real> Engines<T> {
    /// An empty set; every method fails with `MethodNotEnabled`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_finder: None,
            min_separation: None,
            root_parity: None,
            rational_root_parity: None,
            floating_point_root_parity: None,
            rational_fixed_root_parity: None,
            tight_inclusion: None,
            bsc: None,
            tight_ccd: None,
            safe_ccd: None,
            interval: None,
        }
    }

    /// Links one engine that implements every contract into every slot.
    #[must_use]
    pub fn uniform<E>(engine: &Arc<E>) -> Self
    where
        E: RootFinder<T>
            + MinSeparationRootFinder<T>
            + RootParityTest<T>
            + ExactPredicate<T>
            + TightInclusion<T>
            + SignClassifier<T>
            + SafeCcd<T>
            + IntervalRootFinder<T>
            + 'static,
    {
        Self::new()
            .with_root_finder(engine.clone())
            .with_min_separation_root_finder(engine.clone())
            .with_root_parity(engine.clone())
            .with_rational_root_parity(engine.clone())
            .with_floating_point_root_parity(engine.clone())
            .with_rational_fixed_root_parity(engine.clone())
            .with_tight_inclusion(engine.clone())
            .with_bsc(engine.clone())
            .with_tight_ccd(engine.clone())
            .with_safe_ccd(engine.clone())
            .with_interval(engine.clone())
    }

    #[must_use]
    pub fn with_root_finder(mut self, engine: Arc<dyn RootFinder<T>>) -> Self {
        self.root_finder = Some(engine);
        self
    }

    #[must_use]
    pub fn with_min_separation_root_finder(
        mut self,
        engine: Arc<dyn MinSeparationRootFinder<T>>,
    ) -> Self {
        self.min_separation = Some(engine);
        self
    }

    #[must_use]
    pub fn with_root_parity(mut self, engine: Arc<dyn RootParityTest<T>>) -> Self {
        self.root_parity = Some(engine);
        self
    }

    #[must_use]
    pub fn with_rational_root_parity(mut self, engine: Arc<dyn ExactPredicate<T>>) -> Self {
        self.rational_root_parity = Some(engine);
        self
    }

    #[must_use]
    pub fn with_floating_point_root_parity(mut self, engine: Arc<dyn ExactPredicate<T>>) -> Self {
        self.floating_point_root_parity = Some(engine);
        self
    }

    #[must_use]
    pub fn with_rational_fixed_root_parity(mut self, engine: Arc<dyn ExactPredicate<T>>) -> Self {
        self.rational_fixed_root_parity = Some(engine);
        self
    }

    #[must_use]
    pub fn with_tight_inclusion(mut self, engine: Arc<dyn TightInclusion<T>>) -> Self {
        self.tight_inclusion = Some(engine);
        self
    }

    #[must_use]
    pub fn with_bsc(mut self, engine: Arc<dyn SignClassifier<T>>) -> Self {
        self.bsc = Some(engine);
        self
    }

    #[must_use]
    pub fn with_tight_ccd(mut self, engine: Arc<dyn SignClassifier<T>>) -> Self {
        self.tight_ccd = Some(engine);
        self
    }

    #[must_use]
    pub fn with_safe_ccd(mut self, engine: Arc<dyn SafeCcd<T>>) -> Self {
        self.safe_ccd = Some(engine);
        self
    }

    #[must_use]
    pub fn with_interval(mut self, engine: Arc<dyn IntervalRootFinder<T>>) -> Self {
        self.interval = Some(engine);
        self
    }

    /// Families that have an engine linked.
    #[must_use]
    pub fn linked(&self) -> FamilySet {
        MethodFamily::ALL
            .into_iter()
            .filter(|f| self.is_linked(*f))
            .collect()
    }

    /// Returns whether `family` has an engine linked.
    #[must_use]
    pub fn is_linked(&self, family: MethodFamily) -> bool {
        match family {
            MethodFamily::FloatingPointRootFinder => self.root_finder.is_some(),
            MethodFamily::MinSeparationRootFinder => self.min_separation.is_some(),
            MethodFamily::RootParity => self.root_parity.is_some(),
            MethodFamily::RationalRootParity => self.rational_root_parity.is_some(),
            MethodFamily::FloatingPointRootParity => self.floating_point_root_parity.is_some(),
            MethodFamily::RationalFixedRootParity => self.rational_fixed_root_parity.is_some(),
            MethodFamily::TightInclusion => self.tight_inclusion.is_some(),
            MethodFamily::Bsc => self.bsc.is_some(),
            MethodFamily::TightCcd => self.tight_ccd.is_some(),
            MethodFamily::SafeCcd => self.safe_ccd.is_some(),
            MethodFamily::Interval => self.interval.is_some(),
        }
    }

    pub(crate) fn root_finder(&self) -> Option<&dyn RootFinder<T>> {
        self.root_finder.as_deref()
    }

    pub(crate) fn min_separation(&self) -> Option<&dyn MinSeparationRootFinder<T>> {
        self.min_separation.as_deref()
    }

    pub(crate) fn root_parity(&self) -> Option<&dyn RootParityTest<T>> {
        self.root_parity.as_deref()
    }

    pub(crate) fn rational_root_parity(&self) -> Option<&dyn ExactPredicate<T>> {
        self.rational_root_parity.as_deref()
    }

    pub(crate) fn floating_point_root_parity(&self) -> Option<&dyn ExactPredicate<T>> {
        self.floating_point_root_parity.as_deref()
    }

    pub(crate) fn rational_fixed_root_parity(&self) -> Option<&dyn ExactPredicate<T>> {
        self.rational_fixed_root_parity.as_deref()
    }

    pub(crate) fn tight_inclusion(&self) -> Option<&dyn TightInclusion<T>> {
        self.tight_inclusion.as_deref()
    }

    pub(crate) fn bsc(&self) -> Option<&dyn SignClassifier<T>> {
        self.bsc.as_deref()
    }

    pub(crate) fn tight_ccd(&self) -> Option<&dyn SignClassifier<T>> {
        self.tight_ccd.as_deref()
    }

    pub(crate) fn safe_ccd(&self) -> Option<&dyn SafeCcd<T>> {
        self.safe_ccd.as_deref()
    }

    pub(crate) fn interval(&self) -> Option<&dyn IntervalRootFinder<T>> {
        self.interval.as_deref()
    }
}

impl<T: Real> Default for Engines<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> Clone for Engines<T> {
    fn clone(&self) -> Self {
        Self {
            root_finder: self.root_finder.clone(),
            min_separation: self.min_separation.clone(),
            root_parity: self.root_parity.clone(),
            rational_root_parity: self.rational_root_parity.clone(),
            floating_point_root_parity: self.floating_point_root_parity.clone(),
            rational_fixed_root_parity: self.rational_fixed_root_parity.clone(),
            tight_inclusion: self.tight_inclusion.clone(),
            bsc: self.bsc.clone(),
            tight_ccd: self.tight_ccd.clone(),
            safe_ccd: self.safe_ccd.clone(),
            interval: self.interval.clone(),
        }
    }
}

impl<T: Real> fmt::Debug for Engines<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engines")
            .field("linked", &self.linked())
            .finish()
    }
}
