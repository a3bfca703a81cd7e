//! Configuration for jet detection.
//!
//! A `JetConfig` is built in code with the `with_*` builder methods, or parsed from JSON using the
//! option names `P_floor_hPa`, `S_min_mps`, `decayWindow_hPa`, and `criteria` (a list of
//! `{"coreSpeed_mps": .., "decrease_mps": ..}` pairs, strongest first). Options left out of the
//! JSON take their default values.
use crate::{
    criteria::{CriteriaTiers, CriterionThreshold},
    error::{AnalysisError, Result},
};
use metfor::{HectoPascal, MetersPSec, Quantity};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Default bottom of the upper atmosphere, the search for a core stays at or below this level.
pub const DEFAULT_PRESSURE_FLOOR: HectoPascal = HectoPascal(700.0);
/// Default minimum speed at a jet core.
pub const DEFAULT_MIN_CORE_SPEED: MetersPSec = MetersPSec(10.0);
/// Default depth of the window above the core searched for the weakest wind.
pub const DEFAULT_DECAY_WINDOW: HectoPascal = HectoPascal(300.0);

/// Thresholds and windows used to classify profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct JetConfig {
    pressure_floor: HectoPascal,
    min_core_speed: MetersPSec,
    decay_window: HectoPascal,
    criteria: CriteriaTiers,
}

impl Default for JetConfig {
    fn default() -> Self {
        JetConfig {
            pressure_floor: DEFAULT_PRESSURE_FLOOR,
            min_core_speed: DEFAULT_MIN_CORE_SPEED,
            decay_window: DEFAULT_DECAY_WINDOW,
            criteria: CriteriaTiers::default(),
        }
    }
}

impl JetConfig {
    /// Create a configuration with the default values. This is a proxy for default with a clearer
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llj_analysis::JetConfig;
    /// use metfor::HectoPascal;
    ///
    /// let config = JetConfig::new().with_pressure_floor(HectoPascal(800.0));
    /// assert!(config.validate().is_ok());
    /// ```
    #[inline]
    pub fn new() -> Self {
        JetConfig::default()
    }

    /// Builder method for the pressure floor. Only levels at or below this level (higher
    /// pressure) are searched for a jet core.
    #[inline]
    pub fn with_pressure_floor(mut self, floor: HectoPascal) -> Self {
        self.pressure_floor = floor;
        self
    }

    /// Builder method for the minimum core speed.
    #[inline]
    pub fn with_min_core_speed(mut self, speed: MetersPSec) -> Self {
        self.min_core_speed = speed;
        self
    }

    /// Builder method for the depth of the window above the core.
    #[inline]
    pub fn with_decay_window(mut self, depth: HectoPascal) -> Self {
        self.decay_window = depth;
        self
    }

    /// Builder method for the criteria tiers.
    #[inline]
    pub fn with_criteria(mut self, criteria: CriteriaTiers) -> Self {
        self.criteria = criteria;
        self
    }

    /// Get the pressure floor.
    #[inline]
    pub fn pressure_floor(&self) -> HectoPascal {
        self.pressure_floor
    }

    /// Get the minimum core speed.
    #[inline]
    pub fn min_core_speed(&self) -> MetersPSec {
        self.min_core_speed
    }

    /// Get the depth of the window above the core.
    #[inline]
    pub fn decay_window(&self) -> HectoPascal {
        self.decay_window
    }

    /// Get the criteria tiers.
    #[inline]
    pub fn criteria(&self) -> &CriteriaTiers {
        &self.criteria
    }

    /// Check that the configuration can be used for classification.
    pub fn validate(&self) -> Result<()> {
        let check_positive = |name: &str, val: f64| {
            if val.is_finite() && val > 0.0 {
                Ok(())
            } else {
                Err(AnalysisError::InvalidConfiguration(format!(
                    "{} must be positive, found {}",
                    name, val
                )))
            }
        };

        check_positive("P_floor_hPa", self.pressure_floor.unpack())?;
        check_positive("S_min_mps", self.min_core_speed.unpack())?;
        check_positive("decayWindow_hPa", self.decay_window.unpack())?;

        self.criteria.validate()
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llj_analysis::JetConfig;
    /// use metfor::HectoPascal;
    ///
    /// let config = JetConfig::from_json(r#"{"P_floor_hPa": 800.0}"#).unwrap();
    /// assert_eq!(config.pressure_floor(), HectoPascal(800.0));
    ///
    /// assert!(JetConfig::from_json(r#"{"S_min_mps": 0.0}"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let options: JetOptions = serde_json::from_str(text)
            .map_err(|err| AnalysisError::InvalidConfiguration(err.to_string()))?;

        JetConfig::try_from(options)
    }

    /// Serialize this configuration to JSON using the same option names `from_json` accepts.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&JetOptions::from(self))
            .map_err(|err| AnalysisError::InvalidConfiguration(err.to_string()))
    }
}

/// The configuration surface as plain numbers, used for (de)serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JetOptions {
    /// Pressure floor in hPa.
    #[serde(rename = "P_floor_hPa")]
    pub pressure_floor_hpa: f64,
    /// Minimum core speed in m/s.
    #[serde(rename = "S_min_mps")]
    pub min_core_speed_mps: f64,
    /// Depth of the decay window in hPa.
    #[serde(rename = "decayWindow_hPa")]
    pub decay_window_hpa: f64,
    /// Criteria tiers, strongest first.
    pub criteria: Vec<ThresholdOptions>,
}

/// One criterion tier as plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOptions {
    /// Minimum core speed in m/s.
    #[serde(rename = "coreSpeed_mps")]
    pub core_speed_mps: f64,
    /// Minimum decrease above the core in m/s.
    #[serde(rename = "decrease_mps")]
    pub decrease_mps: f64,
}

impl Default for JetOptions {
    fn default() -> Self {
        JetOptions::from(&JetConfig::default())
    }
}

impl<'a> From<&'a JetConfig> for JetOptions {
    fn from(config: &'a JetConfig) -> Self {
        JetOptions {
            pressure_floor_hpa: config.pressure_floor.unpack(),
            min_core_speed_mps: config.min_core_speed.unpack(),
            decay_window_hpa: config.decay_window.unpack(),
            criteria: config
                .criteria
                .tiers()
                .iter()
                .map(|tier| ThresholdOptions {
                    core_speed_mps: tier.core_speed.unpack(),
                    decrease_mps: tier.decrease.unpack(),
                })
                .collect(),
        }
    }
}

impl TryFrom<JetOptions> for JetConfig {
    type Error = AnalysisError;

    fn try_from(options: JetOptions) -> Result<Self> {
        let criteria = options
            .criteria
            .iter()
            .map(|tier| {
                CriterionThreshold::new(
                    MetersPSec(tier.core_speed_mps),
                    MetersPSec(tier.decrease_mps),
                )
            })
            .collect();

        let config = JetConfig::new()
            .with_pressure_floor(HectoPascal(options.pressure_floor_hpa))
            .with_min_core_speed(MetersPSec(options.min_core_speed_mps))
            .with_decay_window(HectoPascal(options.decay_window_hpa))
            .with_criteria(CriteriaTiers::new(criteria));

        config.validate()?;
        Ok(config)
    }
}
