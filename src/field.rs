//! Data type and methods to store a gridded four dimensional wind field.

use crate::{
    error::{AnalysisError, FieldDefect, Result},
    profile::{ProfileScanner, WindProfile},
};
use chrono::NaiveDateTime;
use itertools::Itertools;
use metfor::{HectoPascal, MetersPSec, Quantity};
use ndarray::{s, Array4, ArrayView1, Axis, Zip};

pub use self::grid_point::GridPoint;

mod grid_point;

/// The order of the pressure levels as they were supplied to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOrder {
    /// Surface first, pressure decreasing with index.
    SurfaceFirst,
    /// Top of the atmosphere first, pressure increasing with index.
    TopFirst,
}

/// A wind field on a (time, level, latitude, longitude) grid.
///
/// Only the wind speed is kept, it is computed once from the `u` and `v` components when the
/// field is built. Levels are always stored surface first, no matter how they were supplied.
#[derive(Clone, Debug)]
pub struct WindField {
    times: Vec<NaiveDateTime>,
    levels: Vec<HectoPascal>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    speed: Array4<f64>,
    supplied_order: LevelOrder,
}

impl WindField {
    /// Start building a new field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use llj_analysis::WindField;
    /// use metfor::HectoPascal;
    /// use ndarray::Array4;
    ///
    /// let time = NaiveDate::from_ymd(2015, 1, 1).and_hms(0, 0, 0);
    /// let levels = vec![HectoPascal(1000.0), HectoPascal(850.0), HectoPascal(700.0)];
    ///
    /// let field = WindField::builder()
    ///     .with_time_axis(vec![time])
    ///     .with_level_axis(levels)
    ///     .with_lat_axis(vec![-20.0, -19.5])
    ///     .with_lon_axis(vec![300.0])
    ///     .with_u(Array4::from_elem((1, 3, 2, 1), 3.0))
    ///     .with_v(Array4::from_elem((1, 3, 2, 1), 4.0))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(field.num_profiles(), 2);
    /// assert_eq!(field.speed()[[0, 0, 0, 0]], 5.0);
    /// ```
    #[inline]
    pub fn builder() -> WindFieldBuilder {
        WindFieldBuilder::default()
    }

    /// Get the time axis.
    #[inline]
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Get the pressure levels, surface first.
    #[inline]
    pub fn levels(&self) -> &[HectoPascal] {
        &self.levels
    }

    /// Get the latitude axis.
    #[inline]
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Get the longitude axis.
    #[inline]
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Get the wind speed in m/s indexed by (time, level, lat, lon), levels surface first.
    #[inline]
    pub fn speed(&self) -> &Array4<f64> {
        &self.speed
    }

    /// The order the levels were in when the field was built.
    #[inline]
    pub fn supplied_level_order(&self) -> LevelOrder {
        self.supplied_order
    }

    /// Number of vertical profiles in the field, one per (time, lat, lon).
    #[inline]
    pub fn num_profiles(&self) -> usize {
        self.times.len() * self.profiles_per_time()
    }

    /// Number of vertical profiles at each time.
    #[inline]
    pub fn profiles_per_time(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    /// Iterate over every profile in the field in (time, lat, lon) order.
    ///
    /// The iterator is a cheap view and can be cloned or recreated to scan the field again.
    #[inline]
    pub fn profiles(&self) -> ProfileScanner<'_> {
        ProfileScanner::new(self, 0, self.num_profiles())
    }

    /// Iterate over the profiles with flat indexes in `start..end`, clamped to the field.
    #[inline]
    pub fn profiles_in(&self, start: usize, end: usize) -> ProfileScanner<'_> {
        let end = end.min(self.num_profiles());
        ProfileScanner::new(self, start.min(end), end)
    }

    /// Get the profile at a given set of indexes, or `None` if they are out of range.
    pub fn profile_at(
        &self,
        time_index: usize,
        lat_index: usize,
        lon_index: usize,
    ) -> Option<(GridPoint, Result<WindProfile>)> {
        if time_index >= self.times.len()
            || lat_index >= self.lats.len()
            || lon_index >= self.lons.len()
        {
            return None;
        }

        let flat = (time_index * self.lats.len() + lat_index) * self.lons.len() + lon_index;
        Some(self.profile_by_flat_index(flat))
    }

    /// Get the grid point and profile for a flat (time, lat, lon) index.
    pub(crate) fn profile_by_flat_index(&self, idx: usize) -> (GridPoint, Result<WindProfile>) {
        let nx = self.lons.len();
        let per_time = self.profiles_per_time();

        let time_index = idx / per_time;
        let lat_index = (idx % per_time) / nx;
        let lon_index = idx % nx;

        let point = GridPoint {
            time: self.times[time_index],
            lat: self.lats[lat_index],
            lon: self.lons[lon_index],
            time_index,
            lat_index,
            lon_index,
        };

        let column: ArrayView1<f64> = self.speed.slice(s![time_index, .., lat_index, lon_index]);
        let speed = column.iter().map(|&spd| MetersPSec(spd)).collect();

        (point, WindProfile::new(self.levels.clone(), speed))
    }
}

/// Builder for a `WindField`. All axes and both wind components are required.
#[derive(Clone, Debug, Default)]
pub struct WindFieldBuilder {
    times: Option<Vec<NaiveDateTime>>,
    levels: Option<Vec<HectoPascal>>,
    lats: Option<Vec<f64>>,
    lons: Option<Vec<f64>>,
    u: Option<Array4<f64>>,
    v: Option<Array4<f64>>,
}

impl WindFieldBuilder {
    /// Set the time axis.
    #[inline]
    pub fn with_time_axis(mut self, times: Vec<NaiveDateTime>) -> Self {
        self.times = Some(times);
        self
    }

    /// Set the pressure level axis. It must be strictly ordered, in either direction.
    #[inline]
    pub fn with_level_axis(mut self, levels: Vec<HectoPascal>) -> Self {
        self.levels = Some(levels);
        self
    }

    /// Set the latitude axis in degrees.
    #[inline]
    pub fn with_lat_axis(mut self, lats: Vec<f64>) -> Self {
        self.lats = Some(lats);
        self
    }

    /// Set the longitude axis in degrees.
    #[inline]
    pub fn with_lon_axis(mut self, lons: Vec<f64>) -> Self {
        self.lons = Some(lons);
        self
    }

    /// Set the zonal wind component in m/s, indexed by (time, level, lat, lon).
    #[inline]
    pub fn with_u(mut self, u: Array4<f64>) -> Self {
        self.u = Some(u);
        self
    }

    /// Set the meridional wind component in m/s, indexed by (time, level, lat, lon).
    #[inline]
    pub fn with_v(mut self, v: Array4<f64>) -> Self {
        self.v = Some(v);
        self
    }

    /// Validate the inputs and build the field, computing the wind speed.
    pub fn build(self) -> Result<WindField> {
        use crate::error::FieldDefect::*;

        let times = self.times.ok_or(MissingVariable("time"))?;
        let mut levels = self.levels.ok_or(MissingVariable("level"))?;
        let lats = self.lats.ok_or(MissingVariable("lat"))?;
        let lons = self.lons.ok_or(MissingVariable("lon"))?;
        let u = self.u.ok_or(MissingVariable("u"))?;
        let v = self.v.ok_or(MissingVariable("v"))?;

        let supplied_order = level_order(&levels)?;

        let expected = (times.len(), levels.len(), lats.len(), lons.len());
        if u.dim() != expected || v.dim() != expected {
            return Err(AnalysisError::from(ShapeMismatch));
        }

        let mut speed = Zip::from(&u)
            .and(&v)
            .map_collect(|&u, &v| u.hypot(v));

        if supplied_order == LevelOrder::TopFirst {
            levels.reverse();
            speed.invert_axis(Axis(1));
        }

        Ok(WindField {
            times,
            levels,
            lats,
            lons,
            speed,
            supplied_order,
        })
    }
}

fn level_order(levels: &[HectoPascal]) -> Result<LevelOrder> {
    if levels.is_empty() || levels.iter().any(|p| !p.unpack().is_finite()) {
        return Err(AnalysisError::from(FieldDefect::NonMonotonicLevels));
    }

    if levels.iter().tuple_windows().all(|(p0, p1)| p0 > p1) {
        Ok(LevelOrder::SurfaceFirst)
    } else if levels.iter().tuple_windows().all(|(p0, p1)| p0 < p1) {
        Ok(LevelOrder::TopFirst)
    } else {
        Err(AnalysisError::from(FieldDefect::NonMonotonicLevels))
    }
}
