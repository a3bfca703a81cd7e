//! The table of jets found in a wind field, and the records it is made of.

use crate::{
    field::GridPoint,
    jet::LowLevelJet,
    keys::Criterion,
    utility::month_index,
};
use chrono::NaiveDateTime;
use metfor::{HectoPascal, MetersPSec, Quantity};
use std::{collections::BTreeMap, io::Write, iter::FromIterator, slice::Iter};

/// Column names of the tabular export, in order.
pub const CSV_COLUMNS: [&str; 7] = [
    "time",
    "lat",
    "lon",
    "coreLevel_hPa",
    "coreSpeed_mps",
    "decrease_mps",
    "criterion",
];

const CSV_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A jet found at a grid point. Records are never modified after they are created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JetRecord {
    point: GridPoint,
    jet: LowLevelJet,
}

impl JetRecord {
    /// Tag a jet with the coordinate of the profile it was found in.
    #[inline]
    pub fn new(point: GridPoint, jet: LowLevelJet) -> Self {
        JetRecord { point, jet }
    }

    /// The coordinate of the profile.
    #[inline]
    pub fn point(&self) -> &GridPoint {
        &self.point
    }

    /// The jet parameters.
    #[inline]
    pub fn jet(&self) -> &LowLevelJet {
        &self.jet
    }

    /// Valid time.
    #[inline]
    pub fn time(&self) -> NaiveDateTime {
        self.point.time
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.point.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.point.lon
    }

    /// Pressure at the jet core.
    #[inline]
    pub fn core_level(&self) -> HectoPascal {
        self.jet.core_level()
    }

    /// Wind speed at the jet core.
    #[inline]
    pub fn core_speed(&self) -> MetersPSec {
        self.jet.core_speed()
    }

    /// Decrease in speed above the core.
    #[inline]
    pub fn decrease_above_core(&self) -> MetersPSec {
        self.jet.decrease_above_core()
    }

    /// Criterion tier satisfied.
    #[inline]
    pub fn criterion(&self) -> Criterion {
        self.jet.criterion()
    }
}

/// An append-only, ordered table of jets, one row per grid point with a jet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JetTable {
    records: Vec<JetRecord>,
}

impl JetTable {
    /// Create an empty table.
    #[inline]
    pub fn new() -> Self {
        JetTable::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, record: JetRecord) {
        self.records.push(record);
    }

    #[inline]
    pub(crate) fn append(&mut self, mut other: JetTable) {
        self.records.append(&mut other.records);
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Are there any rows?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the rows.
    #[inline]
    pub fn records(&self) -> &[JetRecord] {
        &self.records
    }

    /// Iterate over the rows in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, JetRecord> {
        self.records.iter()
    }

    /// A new table with only the rows inside the latitude and longitude bounds (inclusive).
    pub fn within(&self, lat_bounds: (f64, f64), lon_bounds: (f64, f64)) -> JetTable {
        self.iter()
            .filter(|rec| rec.point().is_within(lat_bounds, lon_bounds))
            .cloned()
            .collect()
    }

    /// Number of jets in each calendar month, January first.
    pub fn monthly_counts(&self) -> [usize; 12] {
        self.iter().fold([0; 12], |mut counts, rec| {
            counts[month_index(&rec.time())] += 1;
            counts
        })
    }

    /// Number of jets satisfying each criterion tier.
    pub fn count_by_criterion(&self) -> BTreeMap<Criterion, usize> {
        let mut counts = BTreeMap::new();
        for rec in self.iter() {
            *counts.entry(rec.criterion()).or_insert(0) += 1;
        }
        counts
    }

    /// Write the table as CSV with a header row.
    ///
    /// The columns are `time, lat, lon, coreLevel_hPa, coreSpeed_mps, decrease_mps, criterion`.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", CSV_COLUMNS.join(","))?;

        for rec in self.iter() {
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                rec.time().format(CSV_TIME_FORMAT),
                rec.lat(),
                rec.lon(),
                rec.core_level().unpack(),
                rec.core_speed().unpack(),
                rec.decrease_above_core().unpack(),
                rec.criterion()
            )?;
        }

        writer.flush()
    }
}

impl FromIterator<JetRecord> for JetTable {
    fn from_iter<I: IntoIterator<Item = JetRecord>>(iter: I) -> Self {
        JetTable {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JetTable {
    type Item = &'a JetRecord;
    type IntoIter = Iter<'a, JetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
