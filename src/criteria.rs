//! Threshold tiers that decide how strong a jet is, and the policy trait the classifier uses to
//! apply them.
use crate::{
    error::{AnalysisError, Result},
    keys::Criterion,
};
use itertools::Itertools;
use std::convert::TryFrom;
use metfor::{MetersPSec, Quantity};

/// A strategy for assigning a criterion tier given the core speed of a candidate jet and the
/// decrease in speed above it.
///
/// Returning `None` means the candidate does not qualify as a jet.
pub trait ClassificationPolicy {
    /// Assign a criterion to a candidate jet, if it qualifies.
    fn criterion(&self, core_speed: MetersPSec, decrease: MetersPSec) -> Option<Criterion>;
}

/// A single (core speed, decrease) threshold pair. Both must be met or exceeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionThreshold {
    /// Minimum speed at the jet core.
    pub core_speed: MetersPSec,
    /// Minimum decrease in speed from the core to the weakest wind above it.
    pub decrease: MetersPSec,
}

impl CriterionThreshold {
    /// Create a new threshold pair.
    pub fn new(core_speed: MetersPSec, decrease: MetersPSec) -> Self {
        CriterionThreshold {
            core_speed,
            decrease,
        }
    }

    /// Does a candidate with these values satisfy this threshold?
    #[inline]
    pub fn is_met(&self, core_speed: MetersPSec, decrease: MetersPSec) -> bool {
        core_speed >= self.core_speed && decrease >= self.decrease
    }
}

/// An ordered list of thresholds, strongest first. The first tier met wins, and its 1-based
/// position in the list is the criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaTiers {
    tiers: Vec<CriterionThreshold>,
}

impl CriteriaTiers {
    /// Build a list of tiers, strongest first.
    ///
    /// Nothing is checked here, use `validate` before classifying with them.
    pub fn new(tiers: Vec<CriterionThreshold>) -> Self {
        CriteriaTiers { tiers }
    }

    /// The Bonner style defaults: 20/10, 16/8, and 10/5 m/s.
    pub fn bonner() -> Self {
        CriteriaTiers::new(vec![
            CriterionThreshold::new(MetersPSec(20.0), MetersPSec(10.0)),
            CriterionThreshold::new(MetersPSec(16.0), MetersPSec(8.0)),
            CriterionThreshold::new(MetersPSec(10.0), MetersPSec(5.0)),
        ])
    }

    /// The tiers, strongest first.
    pub fn tiers(&self) -> &[CriterionThreshold] {
        &self.tiers
    }

    /// Check the tiers are usable.
    ///
    /// There must be at least one tier, all thresholds must be finite and positive, and each tier
    /// must require strictly less core speed and strictly less decrease than the tier before it.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(AnalysisError::InvalidConfiguration(
                "at least one criterion is required".to_owned(),
            ));
        }

        if self.tiers.len() > usize::from(u8::MAX) {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "too many criteria: {}",
                self.tiers.len()
            )));
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            let spd = tier.core_speed.unpack();
            let dec = tier.decrease.unpack();
            if !spd.is_finite() || !dec.is_finite() || spd <= 0.0 || dec <= 0.0 {
                return Err(AnalysisError::InvalidConfiguration(format!(
                    "criterion {} thresholds must be positive, found ({}, {})",
                    i + 1,
                    spd,
                    dec
                )));
            }
        }

        let ordered = self
            .tiers
            .iter()
            .tuple_windows::<(_, _)>()
            .all(|(stronger, weaker)| {
                weaker.core_speed < stronger.core_speed && weaker.decrease < stronger.decrease
            });

        if ordered {
            Ok(())
        } else {
            Err(AnalysisError::InvalidConfiguration(
                "criteria are not strictly ordered from strongest to weakest".to_owned(),
            ))
        }
    }
}

impl Default for CriteriaTiers {
    fn default() -> Self {
        CriteriaTiers::bonner()
    }
}

impl ClassificationPolicy for CriteriaTiers {
    fn criterion(&self, core_speed: MetersPSec, decrease: MetersPSec) -> Option<Criterion> {
        self.tiers
            .iter()
            .position(|tier| tier.is_met(core_speed, decrease))
            // Tiers past u8::MAX have no criterion number
            .and_then(|idx| u8::try_from(idx + 1).ok())
            .map(Criterion)
    }
}
