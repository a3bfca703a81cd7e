//! Vertical wind profiles and the scanner that pulls them out of a wind field.
//!
//! A profile is the wind speed as a function of pressure at a single (time, lat, lon) point. It is
//! always ordered from the surface up, and never contains missing values; a missing (NaN) value
//! ends the profile at that level.

use crate::{
    error::{AnalysisError, FieldDefect, Result},
    field::{GridPoint, WindField},
};
use itertools::{izip, Itertools};
use metfor::{HectoPascal, MetersPSec, Quantity};

/// Wind speed at a series of pressure levels, surface first.
#[derive(Debug, Clone, PartialEq)]
pub struct WindProfile {
    pressure: Vec<HectoPascal>,
    speed: Vec<MetersPSec>,
}

impl WindProfile {
    /// Create a new profile from parallel vectors of pressure and speed.
    ///
    /// The profile is cut off at the first level with a missing (NaN) pressure or speed. It is an
    /// error if nothing is left after that, or if the pressure is not strictly decreasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llj_analysis::WindProfile;
    /// use metfor::{HectoPascal, MetersPSec};
    ///
    /// let profile = WindProfile::new(
    ///     vec![HectoPascal(1000.0), HectoPascal(850.0), HectoPascal(700.0)],
    ///     vec![MetersPSec(5.0), MetersPSec(std::f64::NAN), MetersPSec(8.0)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(profile.len(), 1);
    /// ```
    pub fn new(mut pressure: Vec<HectoPascal>, mut speed: Vec<MetersPSec>) -> Result<Self> {
        if pressure.len() != speed.len() {
            return Err(AnalysisError::from(FieldDefect::ShapeMismatch));
        }

        let valid_levels = izip!(&pressure, &speed)
            .take_while(|(p, spd)| !p.unpack().is_nan() && !spd.unpack().is_nan())
            .count();

        pressure.truncate(valid_levels);
        speed.truncate(valid_levels);

        if pressure.is_empty() {
            return Err(AnalysisError::from(FieldDefect::NoDataProfile));
        }

        if !pressure.iter().tuple_windows().all(|(p0, p1)| p0 > p1) {
            return Err(AnalysisError::from(FieldDefect::NonMonotonicLevels));
        }

        Ok(WindProfile { pressure, speed })
    }

    /// Create a profile from (pressure hPa, speed m/s) pairs, surface first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use llj_analysis::WindProfile;
    ///
    /// assert!(WindProfile::from_pairs(&[(1000.0, 5.0), (850.0, 22.0)]).is_ok());
    /// assert!(WindProfile::from_pairs(&[(850.0, 10.0), (925.0, 12.0)]).is_err());
    /// ```
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let (pressure, speed) = pairs
            .iter()
            .map(|&(p, spd)| (HectoPascal(p), MetersPSec(spd)))
            .unzip();

        WindProfile::new(pressure, speed)
    }

    /// Get the pressure profile, surface first.
    #[inline]
    pub fn pressure_profile(&self) -> &[HectoPascal] {
        &self.pressure
    }

    /// Get the speed profile, surface first.
    #[inline]
    pub fn speed_profile(&self) -> &[MetersPSec] {
        &self.speed
    }

    /// Number of levels in the profile.
    #[inline]
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// A valid profile always has at least one level, but this is here for completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Pressure at the top of the profile.
    #[inline]
    pub fn top_pressure(&self) -> HectoPascal {
        self.pressure[self.pressure.len() - 1]
    }

    /// Iterate over the levels from the surface up.
    #[inline]
    pub fn bottom_up<'a>(&'a self) -> impl Iterator<Item = (HectoPascal, MetersPSec)> + 'a {
        izip!(&self.pressure, &self.speed).map(|(&p, &spd)| (p, spd))
    }
}

/// A lazy, restartable scan over the vertical profiles of a `WindField` in (time, lat, lon) order.
///
/// Each item pairs the coordinate with the profile, or with the error if the profile there is
/// unusable (for example full of missing values). Errors do not end the scan.
#[derive(Debug, Clone)]
pub struct ProfileScanner<'a> {
    field: &'a WindField,
    next: usize,
    end: usize,
}

impl<'a> ProfileScanner<'a> {
    pub(crate) fn new(field: &'a WindField, start: usize, end: usize) -> Self {
        ProfileScanner {
            field,
            next: start,
            end,
        }
    }
}

impl<'a> Iterator for ProfileScanner<'a> {
    type Item = (GridPoint, Result<WindProfile>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            None
        } else {
            let item = self.field.profile_by_flat_index(self.next);
            self.next += 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ProfileScanner<'a> {}
