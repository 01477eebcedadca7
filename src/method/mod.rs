mod capability;

pub use capability::{Capabilities, FamilySet, MethodFamily};

use std::fmt;
use std::str::FromStr;

use crate::error::CcdError;

/// Methods of continuous collision detection.
///
/// The order is stable: [`CcdMethod::index`] and `TryFrom<usize>` use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CcdMethod {
    /// Floating-point root finder of Vouga et al.
    FloatingPointRootFinder,
    /// Minimum separation root finder of Harmon et al. \[2011\].
    MinSeparationRootFinder,
    /// Root parity method of Brochu et al. \[2012\].
    RootParity,
    /// Rational reimplementation of root parity.
    RationalRootParity,
    /// Floating-point root parity with fixes for degenerate cases.
    FloatingPointRootParity,
    /// Rational root parity with fixes for degenerate cases.
    RationalFixedRootParity,
    /// Inclusion-based CCD of Wang et al. \[2020\].
    TightInclusion,
    /// Bernstein sign classification of Tang et al. \[2014\].
    Bsc,
    /// TightCCD of Wang et al. \[2015\].
    TightCcd,
    /// SafeCCD with a precomputed coefficient bound.
    SafeCcd,
    /// Univariate interval root finder of Redon et al. \[2002\].
    UnivariateIntervalRootFinder,
    /// Multivariate interval root finder solved with Snyder \[1992\].
    MultivariateIntervalRootFinder,
}

impl CcdMethod {
    /// Number of methods.
    pub const COUNT: usize = 12;

    /// Every method, in ordinal order.
    pub const ALL: [CcdMethod; Self::COUNT] = [
        Self::FloatingPointRootFinder,
        Self::MinSeparationRootFinder,
        Self::RootParity,
        Self::RationalRootParity,
        Self::FloatingPointRootParity,
        Self::RationalFixedRootParity,
        Self::TightInclusion,
        Self::Bsc,
        Self::TightCcd,
        Self::SafeCcd,
        Self::UnivariateIntervalRootFinder,
        Self::MultivariateIntervalRootFinder,
    ];

    const NAMES: [&'static str; Self::COUNT] = [
        "FloatingPointRootFinder",
        "MinSeparationRootFinder",
        "RootParity",
        "RationalRootParity",
        "FloatingPointRootParity",
        "RationalFixedRootParity",
        "TightInclusion",
        "BSC",
        "TightCCD",
        "SafeCCD",
        "UnivariateIntervalRootFinder",
        "MultivariateIntervalRootFinder",
    ];

    /// Position of the method in [`CcdMethod::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Static capability row of the method.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        Capabilities::of(self)
    }

    /// Engine family the method belongs to.
    #[must_use]
    pub const fn family(self) -> MethodFamily {
        self.capabilities().family
    }

    /// Whether the method's family was compiled into this build.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        FamilySet::COMPILED.contains(self.family())
    }

    /// Whether the method accepts a minimum separation distance.
    #[must_use]
    pub const fn is_minimum_separation_method(self) -> bool {
        self.capabilities().supports_minimum_separation
    }

    /// Whether the method never reports a false negative.
    #[must_use]
    pub const fn is_conservative_method(self) -> bool {
        self.capabilities().is_conservative
    }

    /// Whether the engine computes a time of impact alongside the verdict.
    #[must_use]
    pub const fn computes_time_of_impact(self) -> bool {
        self.capabilities().computes_time_of_impact
    }

    /// Methods whose family is compiled into this build.
    pub fn enabled() -> impl Iterator<Item = CcdMethod> {
        Self::ALL.into_iter().filter(|m| m.is_enabled())
    }
}

impl fmt::Display for CcdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CcdMethod {
    type Err = CcdError;

    /// Parses a method from its name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CcdError::InvalidMethod(format!("unknown method name {s:?}")))
    }
}

impl TryFrom<usize> for CcdMethod {
    type Error = CcdError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            CcdError::InvalidMethod(format!(
                "ordinal {index} is outside 0..{}",
                Self::COUNT
            ))
        })
    }
}
