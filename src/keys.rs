//! Enums and small key types used to label classification outcomes.
use std::fmt::{self, Display};
use strum_macros::EnumIter;

/// Why a profile was classified as having no low-level jet.
///
/// This is a normal outcome of the analysis, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash, PartialOrd, Ord)]
pub enum NoJetReason {
    /// The profile does not reach down to the lower-atmosphere search window.
    InsufficientVerticalExtent,
    /// The fastest wind in the search window is below the minimum core speed.
    CoreTooWeak,
    /// The wind does not weaken enough above the core to satisfy any criterion.
    InsufficientDecay,
}

impl Display for NoJetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::NoJetReason::*;

        let name = match self {
            InsufficientVerticalExtent => "insufficient vertical extent",
            CoreTooWeak => "core too weak",
            InsufficientDecay => "insufficient decay",
        };

        write!(f, "{}", name)
    }
}

/// The threshold tier a jet satisfied. Tiers are numbered from 1, the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Criterion(pub u8);

impl Criterion {
    /// The tier number, 1 being the strongest.
    #[inline]
    pub fn tier(self) -> u8 {
        self.0
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
