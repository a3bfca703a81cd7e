//! Apply the jet classifier to every profile in a wind field and gather the results.
//!
//! Profiles are independent of each other, so the parallel driver splits the field into chunks of
//! consecutive profiles, classifies the chunks on the rayon thread pool, and merges the partial
//! results in order afterwards. Cancellation is only checked between chunks, so a cancelled run
//! still holds complete results for every chunk that was started.

use crate::{
    config::JetConfig,
    error::Result,
    field::{GridPoint, WindField},
    jet::{classify, Classification},
    keys::NoJetReason,
    profile::WindProfile,
    table::{JetRecord, JetTable},
    utility::month_index,
};
use rayon::prelude::*;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

/// A flag shared with a running batch to ask it to stop early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a new token that has not been cancelled.
    #[inline]
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Ask any batch holding a clone of this token to stop at its next chunk boundary.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Has cancellation been requested?
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options controlling how a parallel batch is split up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    chunk_size: Option<usize>,
}

impl BatchOptions {
    /// Default options, chunks are one time slice of the field.
    #[inline]
    pub fn new() -> Self {
        BatchOptions::default()
    }

    /// Builder method for the number of profiles in each chunk. Zero is treated as one.
    #[inline]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size.max(1));
        self
    }

    /// The chunk size to use for a given field.
    #[inline]
    pub fn chunk_size(&self, field: &WindField) -> usize {
        self.chunk_size
            .unwrap_or_else(|| field.profiles_per_time())
            .max(1)
    }
}

/// The results of running jet detection over a field.
#[derive(Debug, Clone, PartialEq)]
pub struct JetAnalysis {
    table: JetTable,
    skipped: usize,
    no_jet: BTreeMap<NoJetReason, usize>,
    classified: usize,
    classified_by_month: [usize; 12],
    cancelled: bool,
}

impl JetAnalysis {
    /// The jets found.
    #[inline]
    pub fn table(&self) -> &JetTable {
        &self.table
    }

    /// Take the table of jets, discarding the diagnostics.
    #[inline]
    pub fn into_table(self) -> JetTable {
        self.table
    }

    /// Number of profiles skipped because they were malformed.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of profiles that were classified, with or without a jet.
    #[inline]
    pub fn classified(&self) -> usize {
        self.classified
    }

    /// Number of profiles without a jet for a given reason.
    #[inline]
    pub fn no_jet_count(&self, reason: NoJetReason) -> usize {
        self.no_jet.get(&reason).copied().unwrap_or(0)
    }

    /// Tallies of profiles without a jet, by reason. Every reason is present.
    #[inline]
    pub fn no_jet_tallies(&self) -> &BTreeMap<NoJetReason, usize> {
        &self.no_jet
    }

    /// Was the run cancelled before every chunk was processed?
    #[inline]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Fraction of classified profiles with a jet in each calendar month, January first. Months
    /// with no classified profiles are `None`.
    pub fn monthly_frequency(&self) -> [Option<f64>; 12] {
        let jets = self.table.monthly_counts();

        let mut freq = [None; 12];
        for (i, (&num_jets, &num_classified)) in
            jets.iter().zip(self.classified_by_month.iter()).enumerate()
        {
            if num_classified > 0 {
                freq[i] = Some(num_jets as f64 / num_classified as f64);
            }
        }

        freq
    }
}

/// Find the jets in every profile of a field, one profile at a time.
///
/// The configuration is checked before anything else is done. Malformed profiles are counted and
/// skipped.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use llj_analysis::{find_jets, JetConfig, WindField};
/// use metfor::HectoPascal;
/// use ndarray::Array4;
///
/// let levels: Vec<HectoPascal> = [1000.0, 925.0, 850.0, 700.0, 500.0]
///     .iter()
///     .map(|&p| HectoPascal(p))
///     .collect();
/// let speeds = [5.0, 12.0, 22.0, 18.0, 6.0];
///
/// let mut u = Array4::zeros((1, 5, 1, 1));
/// for (lvl, spd) in speeds.iter().enumerate() {
///     u[[0, lvl, 0, 0]] = *spd;
/// }
///
/// let field = WindField::builder()
///     .with_time_axis(vec![NaiveDate::from_ymd(2015, 1, 1).and_hms(0, 0, 0)])
///     .with_level_axis(levels)
///     .with_lat_axis(vec![-20.5])
///     .with_lon_axis(vec![300.0])
///     .with_u(u)
///     .with_v(Array4::zeros((1, 5, 1, 1)))
///     .build()
///     .unwrap();
///
/// let analysis = find_jets(&field, &JetConfig::default()).unwrap();
/// assert_eq!(analysis.table().len(), 1);
/// assert_eq!(analysis.skipped(), 0);
/// ```
#[inline]
pub fn find_jets(field: &WindField, config: &JetConfig) -> Result<JetAnalysis> {
    find_jets_in(field.profiles(), config)
}

/// Find the jets in any sequence of profiles, one profile at a time.
///
/// This is the driver behind `find_jets`, use it directly when the profiles do not come from a
/// single `WindField`, for example station soundings that each have their own levels. Profiles
/// that failed to load are passed in as errors and are counted as skipped.
pub fn find_jets_in<I>(profiles: I, config: &JetConfig) -> Result<JetAnalysis>
where
    I: IntoIterator<Item = (GridPoint, Result<WindProfile>)>,
{
    config.validate()?;

    let mut tally = Tally::new();
    for (point, profile) in profiles {
        tally.add(point, profile, config);
    }

    Ok(tally.finish(false))
}

/// Find the jets in every profile of a field, classifying chunks of profiles in parallel.
///
/// The results are identical to `find_jets` unless the run is cancelled, in which case only the
/// chunks started before cancellation are included.
pub fn find_jets_parallel(
    field: &WindField,
    config: &JetConfig,
    options: BatchOptions,
    cancel: &CancelToken,
) -> Result<JetAnalysis> {
    config.validate()?;

    let num_profiles = field.num_profiles();
    let chunk_size = options.chunk_size(field);
    let num_chunks = (num_profiles + chunk_size - 1) / chunk_size;

    debug!(num_profiles, chunk_size, num_chunks, "starting parallel jet detection");

    let partials: Vec<Option<Tally>> = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            if cancel.is_cancelled() {
                return None;
            }

            let start = chunk * chunk_size;
            Some(Tally::from_chunk(field, start, start + chunk_size, config))
        })
        .collect();

    Ok(merge_chunks(partials))
}

// Chunks that never ran are `None`. Completed chunks are merged in order.
fn merge_chunks(partials: Vec<Option<Tally>>) -> JetAnalysis {
    let num_chunks = partials.len();
    let completed = partials.iter().filter(|partial| partial.is_some()).count();
    let cancelled = completed < num_chunks;
    if cancelled {
        warn!(completed, num_chunks, "jet detection cancelled");
    }

    partials
        .into_iter()
        .flatten()
        .fold(Tally::new(), |mut acc, partial| {
            acc.merge(partial);
            acc
        })
        .finish(cancelled)
}

// Running totals for a contiguous run of profiles.
#[derive(Debug)]
struct Tally {
    table: JetTable,
    skipped: usize,
    no_jet: BTreeMap<NoJetReason, usize>,
    classified: usize,
    classified_by_month: [usize; 12],
}

impl Tally {
    fn new() -> Self {
        Tally {
            table: JetTable::new(),
            skipped: 0,
            no_jet: NoJetReason::iter().map(|reason| (reason, 0)).collect(),
            classified: 0,
            classified_by_month: [0; 12],
        }
    }

    fn from_chunk(field: &WindField, start: usize, end: usize, config: &JetConfig) -> Self {
        let mut tally = Tally::new();
        for (point, profile) in field.profiles_in(start, end) {
            tally.add(point, profile, config);
        }
        tally
    }

    fn add(&mut self, point: GridPoint, profile: Result<WindProfile>, config: &JetConfig) {
        let profile = match profile {
            Ok(profile) => profile,
            Err(err) => {
                debug!(
                    time_index = point.time_index,
                    lat_index = point.lat_index,
                    lon_index = point.lon_index,
                    error = %err,
                    "skipping profile"
                );
                self.skipped += 1;
                return;
            }
        };

        self.classified += 1;
        self.classified_by_month[month_index(&point.time)] += 1;

        match classify(&profile, config) {
            Classification::Jet(jet) => self.table.push(JetRecord::new(point, jet)),
            Classification::NoJet(reason) => *self.no_jet.entry(reason).or_insert(0) += 1,
        }
    }

    fn merge(&mut self, other: Tally) {
        self.table.append(other.table);
        self.skipped += other.skipped;
        self.classified += other.classified;

        for (reason, count) in other.no_jet {
            *self.no_jet.entry(reason).or_insert(0) += count;
        }

        for (acc, count) in self
            .classified_by_month
            .iter_mut()
            .zip(other.classified_by_month.iter())
        {
            *acc += count;
        }
    }

    fn finish(self, cancelled: bool) -> JetAnalysis {
        info!(
            classified = self.classified,
            jets = self.table.len(),
            skipped = self.skipped,
            "jet detection complete"
        );

        JetAnalysis {
            table: self.table,
            skipped: self.skipped,
            no_jet: self.no_jet,
            classified: self.classified,
            classified_by_month: self.classified_by_month,
            cancelled,
        }
    }
}
