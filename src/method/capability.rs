use std::fmt;

use super::CcdMethod;

/// Build unit of an engine. Each family has one cargo feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodFamily {
    /// `fprf`
    FloatingPointRootFinder,
    /// `msrf`
    MinSeparationRootFinder,
    /// `rp`
    RootParity,
    /// `rrp`
    RationalRootParity,
    /// `fprp`
    FloatingPointRootParity,
    /// `rfrp`
    RationalFixedRootParity,
    /// `tight-inclusion`
    TightInclusion,
    /// `bsc`
    Bsc,
    /// `tight-ccd`
    TightCcd,
    /// `safe-ccd`
    SafeCcd,
    /// `interval`, shared by both interval root finders.
    Interval,
}

impl MethodFamily {
    /// Every family.
    pub const ALL: [MethodFamily; 11] = [
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
        Self::Interval,
    ];

    /// Name of the cargo feature that compiles the family in.
    #[must_use]
    pub const fn feature(self) -> &'static str {
        match self {
            Self::FloatingPointRootFinder => "fprf",
            Self::MinSeparationRootFinder => "msrf",
            Self::RootParity => "rp",
            Self::RationalRootParity => "rrp",
            Self::FloatingPointRootParity => "fprp",
            Self::RationalFixedRootParity => "rfrp",
            Self::TightInclusion => "tight-inclusion",
            Self::Bsc => "bsc",
            Self::TightCcd => "tight-ccd",
            Self::SafeCcd => "safe-ccd",
            Self::Interval => "interval",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for MethodFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feature())
    }
}

/// A set of method families.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FamilySet(u16);

impl FamilySet {
    /// No family.
    pub const EMPTY: Self = Self(0);

    /// Families whose cargo feature is on in this build.
    pub const COMPILED: Self = Self::EMPTY
        .with_if(cfg!(feature = "fprf"), MethodFamily::FloatingPointRootFinder)
        .with_if(cfg!(feature = "msrf"), MethodFamily::MinSeparationRootFinder)
        .with_if(cfg!(feature = "rp"), MethodFamily::RootParity)
        .with_if(cfg!(feature = "rrp"), MethodFamily::RationalRootParity)
        .with_if(cfg!(feature = "fprp"), MethodFamily::FloatingPointRootParity)
        .with_if(cfg!(feature = "rfrp"), MethodFamily::RationalFixedRootParity)
        .with_if(cfg!(feature = "tight-inclusion"), MethodFamily::TightInclusion)
        .with_if(cfg!(feature = "bsc"), MethodFamily::Bsc)
        .with_if(cfg!(feature = "tight-ccd"), MethodFamily::TightCcd)
        .with_if(cfg!(feature = "safe-ccd"), MethodFamily::SafeCcd)
        .with_if(cfg!(feature = "interval"), MethodFamily::Interval);

    /// Returns whether `family` is in the set.
    #[must_use]
    pub const fn contains(self, family: MethodFamily) -> bool {
        self.0 & family.bit() != 0
    }

    /// Returns the set with `family` added.
    #[must_use]
    pub const fn with(self, family: MethodFamily) -> Self {
        Self(self.0 | family.bit())
    }

    /// Returns the set with `family` removed.
    #[must_use]
    pub const fn without(self, family: MethodFamily) -> Self {
        Self(self.0 & !family.bit())
    }

    /// Families present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the families in the set.
    pub fn iter(self) -> impl Iterator<Item = MethodFamily> {
        MethodFamily::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    const fn with_if(self, on: bool, family: MethodFamily) -> Self {
        if on {
            self.with(family)
        } else {
            self
        }
    }
}

impl FromIterator<MethodFamily> for FamilySet {
    fn from_iter<I: IntoIterator<Item = MethodFamily>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for FamilySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Static facts about one CCD method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Engine family implementing the method.
    pub family: MethodFamily,
    /// Accepts a minimum separation distance.
    pub supports_minimum_separation: bool,
    /// Never reports a false negative; false positives are allowed.
    pub is_conservative: bool,
    /// The engine computes a time of impact along with the verdict.
    pub computes_time_of_impact: bool,
}

impl Capabilities {
    const fn row(
        family: MethodFamily,
        supports_minimum_separation: bool,
        is_conservative: bool,
        computes_time_of_impact: bool,
    ) -> Self {
        Self {
            family,
            supports_minimum_separation,
            is_conservative,
            computes_time_of_impact,
        }
    }

    /// Capability row of `method`.
    #[must_use]
    pub const fn of(method: CcdMethod) -> Self {
        use MethodFamily as F;
        match method {
            CcdMethod::FloatingPointRootFinder => {
                Self::row(F::FloatingPointRootFinder, false, false, true)
            }
            CcdMethod::MinSeparationRootFinder => {
                Self::row(F::MinSeparationRootFinder, true, false, true)
            }
            CcdMethod::RootParity => Self::row(F::RootParity, false, false, false),
            CcdMethod::RationalRootParity => Self::row(F::RationalRootParity, false, false, false),
            CcdMethod::FloatingPointRootParity => {
                Self::row(F::FloatingPointRootParity, false, false, false)
            }
            CcdMethod::RationalFixedRootParity => {
                Self::row(F::RationalFixedRootParity, false, true, false)
            }
            CcdMethod::TightInclusion => Self::row(F::TightInclusion, true, true, true),
            CcdMethod::Bsc => Self::row(F::Bsc, false, false, false),
            CcdMethod::TightCcd => Self::row(F::TightCcd, false, true, false),
            CcdMethod::SafeCcd => Self::row(F::SafeCcd, false, false, true),
            CcdMethod::UnivariateIntervalRootFinder | CcdMethod::MultivariateIntervalRootFinder => {
                Self::row(F::Interval, false, true, true)
            }
        }
    }
}
