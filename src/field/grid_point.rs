use chrono::NaiveDateTime;

/// The coordinate of a vertical profile in a wind field.
///
/// Carries both the coordinate values and the indexes into the field they came from, the indexes
/// give the natural (time, latitude, longitude) ordering of results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Valid time of the profile.
    pub time: NaiveDateTime,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Index along the time axis.
    pub time_index: usize,
    /// Index along the latitude axis.
    pub lat_index: usize,
    /// Index along the longitude axis.
    pub lon_index: usize,
}

impl GridPoint {
    /// The (time, latitude, longitude) indexes as a tuple.
    #[inline]
    pub fn indexes(&self) -> (usize, usize, usize) {
        (self.time_index, self.lat_index, self.lon_index)
    }

    /// Is this point inside the latitude and longitude bounds? Bounds are inclusive and may be
    /// given in either order.
    pub fn is_within(&self, lat_bounds: (f64, f64), lon_bounds: (f64, f64)) -> bool {
        let between = |val: f64, (a, b): (f64, f64)| val >= a.min(b) && val <= a.max(b);

        between(self.lat, lat_bounds) && between(self.lon, lon_bounds)
    }
}
