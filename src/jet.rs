//! Classify a single vertical profile as having a low-level jet, or not.
//!
//! The analysis goes in stages:
//!   - find the fastest wind at or below the pressure floor, this is the candidate core,
//!   - check the core is fast enough,
//!   - find the weakest wind in a window above the core and check the wind decreases enough
//!     above the core to satisfy one of the criteria tiers.
//!
//! Classification is a pure function of the profile and the configuration.
use crate::{
    config::JetConfig,
    criteria::ClassificationPolicy,
    keys::{Criterion, NoJetReason},
    profile::WindProfile,
};
use metfor::{HectoPascal, MetersPSec, Quantity};
use optional::{none, some, Optioned};

/// The outcome of classifying a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    /// A low-level jet was found.
    Jet(LowLevelJet),
    /// There is no low-level jet, and this is why.
    NoJet(NoJetReason),
}

impl Classification {
    /// Get the jet, if there is one.
    #[inline]
    pub fn jet(&self) -> Option<&LowLevelJet> {
        match self {
            Classification::Jet(jet) => Some(jet),
            Classification::NoJet(_) => None,
        }
    }

    /// Get the reason there is no jet, if there isn't one.
    #[inline]
    pub fn no_jet_reason(&self) -> Option<NoJetReason> {
        match self {
            Classification::Jet(_) => None,
            Classification::NoJet(reason) => Some(*reason),
        }
    }
}

/// The defining parameters of a low-level jet in a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowLevelJet {
    core_level: HectoPascal,
    core_speed: MetersPSec,
    decrease_above_core: MetersPSec,
    criterion: Criterion,
}

impl LowLevelJet {
    /// Pressure at the jet core.
    #[inline]
    pub fn core_level(&self) -> HectoPascal {
        self.core_level
    }

    /// Wind speed at the jet core.
    #[inline]
    pub fn core_speed(&self) -> MetersPSec {
        self.core_speed
    }

    /// Drop in speed from the core to the weakest wind in the window above it.
    #[inline]
    pub fn decrease_above_core(&self) -> MetersPSec {
        self.decrease_above_core
    }

    /// The criterion tier the jet satisfied.
    #[inline]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }
}

/// The fastest wind in the lower-atmosphere search window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JetCandidate {
    /// Index of the level in the profile.
    pub index: usize,
    /// Pressure at the candidate core.
    pub pressure: HectoPascal,
    /// Speed at the candidate core.
    pub speed: MetersPSec,
}

/// Classify a profile using the criteria tiers in the configuration.
///
/// # Examples
///
/// ```rust
/// use llj_analysis::{classify, Classification, JetConfig, NoJetReason, WindProfile};
/// use metfor::{HectoPascal, MetersPSec};
///
/// let config = JetConfig::default();
///
/// let profile = WindProfile::from_pairs(
///     &[(1000.0, 5.0), (925.0, 12.0), (850.0, 22.0), (700.0, 18.0), (500.0, 6.0)],
/// ).unwrap();
/// let jet = *classify(&profile, &config).jet().unwrap();
/// assert_eq!(jet.core_level(), HectoPascal(850.0));
/// assert_eq!(jet.decrease_above_core(), MetersPSec(16.0));
/// assert_eq!(jet.criterion().tier(), 1);
///
/// let weak = WindProfile::from_pairs(&[(1000.0, 4.0), (925.0, 9.0), (850.0, 9.5)]).unwrap();
/// assert_eq!(classify(&weak, &config), Classification::NoJet(NoJetReason::CoreTooWeak));
/// ```
#[inline]
pub fn classify(profile: &WindProfile, config: &JetConfig) -> Classification {
    classify_with_policy(profile, config, config.criteria())
}

/// Classify a profile, using `policy` instead of the configured tiers to assign the criterion.
///
/// The windows and the minimum core speed still come from `config`.
pub fn classify_with_policy<P>(
    profile: &WindProfile,
    config: &JetConfig,
    policy: &P,
) -> Classification
where
    P: ClassificationPolicy + ?Sized,
{
    let candidate = match lower_window_core(profile, config.pressure_floor()) {
        Some(candidate) => candidate,
        None => return Classification::NoJet(NoJetReason::InsufficientVerticalExtent),
    };

    if candidate.speed < config.min_core_speed() {
        return Classification::NoJet(NoJetReason::CoreTooWeak);
    }

    let weakest = weakest_wind_above(profile, candidate.index, config.decay_window());

    // Nothing above the core, so no decrease can be measured.
    let decrease = weakest
        .into_option()
        .map(|min_speed| candidate.speed - min_speed)
        .unwrap_or(MetersPSec(0.0));

    match policy.criterion(candidate.speed, decrease) {
        Some(criterion) => Classification::Jet(LowLevelJet {
            core_level: candidate.pressure,
            core_speed: candidate.speed,
            decrease_above_core: decrease,
            criterion,
        }),
        None => Classification::NoJet(NoJetReason::InsufficientDecay),
    }
}

/// Find the fastest wind at or below `floor`. Ties go to the lowest level.
///
/// Returns `None` if the profile does not reach down to `floor`.
pub fn lower_window_core(profile: &WindProfile, floor: HectoPascal) -> Option<JetCandidate> {
    profile
        .bottom_up()
        .enumerate()
        // Profiles run surface up, so stop at the first level above the floor
        .take_while(|&(_, (p, _))| p >= floor)
        .fold(None, |max_info: Option<JetCandidate>, (index, (pressure, speed))| {
            match max_info {
                Some(max) if speed <= max.speed => max_info,
                _ => Some(JetCandidate {
                    index,
                    pressure,
                    speed,
                }),
            }
        })
}

/// Find the weakest wind above the level at `core_index`.
///
/// The window covers every level above the core up to and including the first level at or above
/// `core pressure - depth`, or the top of the profile if it ends first.
pub fn weakest_wind_above(
    profile: &WindProfile,
    core_index: usize,
    depth: HectoPascal,
) -> Optioned<MetersPSec> {
    let pressure = profile.pressure_profile();
    let speed = profile.speed_profile();

    if core_index + 1 >= pressure.len() {
        return none();
    }

    let window_top = HectoPascal(pressure[core_index].unpack() - depth.unpack());

    let above_p = &pressure[core_index + 1..];
    let above_spd = &speed[core_index + 1..];

    let num_levels = above_p
        .iter()
        .position(|&p| p <= window_top)
        .map(|idx| idx + 1)
        .unwrap_or_else(|| above_p.len());

    above_spd[..num_levels]
        .iter()
        .fold(none(), |min_spd: Optioned<MetersPSec>, &spd| {
            if min_spd.is_none() || spd < min_spd.unpack() {
                some(spd)
            } else {
                min_spd
            }
        })
}
