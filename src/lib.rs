#![warn(missing_docs)]
//! Functions and data types for finding low-level jets in gridded wind fields, such as those
//! pulled from climate model archives.
//!
//! A low-level jet is a maximum in wind speed confined to the lower atmosphere with a measurable
//! decrease in speed above it. Given a (time, level, lat, lon) field of `u` and `v` wind
//! components this crate scans every vertical profile, classifies it, and collects the jets into a
//! table that can be exported as CSV for plotting or further statistics.
//!
//! # Examples
//!
//! ```rust
//! use llj_analysis::{classify, Classification, JetConfig, NoJetReason, WindProfile};
//!
//! let config = JetConfig::default();
//! let profile = WindProfile::from_pairs(&[(1000.0, 3.0), (925.0, 19.0), (850.0, 17.0)]).unwrap();
//!
//! assert_eq!(
//!     classify(&profile, &config),
//!     Classification::NoJet(NoJetReason::InsufficientDecay)
//! );
//! ```

//
// API
//
pub use crate::{
    batch::{find_jets, find_jets_in, find_jets_parallel, BatchOptions, CancelToken, JetAnalysis},
    config::{
        JetConfig, JetOptions, ThresholdOptions, DEFAULT_DECAY_WINDOW, DEFAULT_MIN_CORE_SPEED,
        DEFAULT_PRESSURE_FLOOR,
    },
    criteria::{ClassificationPolicy, CriteriaTiers, CriterionThreshold},
    error::{AnalysisError, FieldDefect, Result},
    field::{GridPoint, LevelOrder, WindField, WindFieldBuilder},
    jet::{
        classify, classify_with_policy, lower_window_core, weakest_wind_above, Classification,
        JetCandidate, LowLevelJet,
    },
    keys::{Criterion, NoJetReason},
    profile::{ProfileScanner, WindProfile},
    table::{JetRecord, JetTable, CSV_COLUMNS},
};

//
// Internal use only
//

// Modules
mod batch;
mod config;
mod criteria;
mod error;
mod field;
mod jet;
mod keys;
mod profile;
mod table;
mod utility;

#[cfg(test)]
mod test_data;
