//! Data used in tests.

use crate::{
    field::{GridPoint, WindField, WindFieldBuilder},
    profile::WindProfile,
};
use chrono::NaiveDate;
use metfor::HectoPascal;
use ndarray::Array4;

const SCENARIO_A: [(f64, f64); 5] = [
    (1000.0, 5.0),
    (925.0, 12.0),
    (850.0, 22.0),
    (700.0, 18.0),
    (500.0, 6.0),
];

pub fn scenario_a() -> WindProfile {
    WindProfile::from_pairs(&SCENARIO_A).unwrap()
}

pub fn scenario_b() -> WindProfile {
    WindProfile::from_pairs(&[(1000.0, 4.0), (925.0, 9.0), (850.0, 9.5), (700.0, 8.0)]).unwrap()
}

pub fn scenario_c() -> WindProfile {
    WindProfile::from_pairs(&[(1000.0, 3.0), (925.0, 19.0), (850.0, 17.0)]).unwrap()
}

pub fn test_levels() -> Vec<HectoPascal> {
    SCENARIO_A.iter().map(|&(p, _)| HectoPascal(p)).collect()
}

pub fn make_grid_point(month: u32, lat: f64, lon: f64) -> GridPoint {
    GridPoint {
        time: NaiveDate::from_ymd(2015, month, 15).and_hms(6, 0, 0),
        lat,
        lon,
        time_index: 0,
        lat_index: 0,
        lon_index: 0,
    }
}

/// Two times, five levels, two latitudes, and three longitudes.
///
/// The January time has the scenario A jet (all in the u component) at every point. The February
/// time is a uniform 5 m/s wind (u = 3, v = 4), except the last point which is missing.
pub fn make_test_builder() -> WindFieldBuilder {
    let times = vec![
        NaiveDate::from_ymd(2015, 1, 15).and_hms(0, 0, 0),
        NaiveDate::from_ymd(2015, 2, 15).and_hms(0, 0, 0),
    ];
    let lats = vec![-20.0, -19.5];
    let lons = vec![295.0, 300.0, 305.0];

    let shape = (times.len(), SCENARIO_A.len(), lats.len(), lons.len());
    let mut u = Array4::zeros(shape);
    let mut v = Array4::zeros(shape);

    for ((t, lvl, y, x), val) in u.indexed_iter_mut() {
        *val = if t == 0 { SCENARIO_A[lvl].1 } else { 3.0 };
        if t == 1 && y == 1 && x == 2 {
            *val = std::f64::NAN;
        }
    }

    for ((t, _, y, x), val) in v.indexed_iter_mut() {
        *val = if t == 0 { 0.0 } else { 4.0 };
        if t == 1 && y == 1 && x == 2 {
            *val = std::f64::NAN;
        }
    }

    WindField::builder()
        .with_time_axis(times)
        .with_level_axis(test_levels())
        .with_lat_axis(lats)
        .with_lon_axis(lons)
        .with_u(u)
        .with_v(v)
}

pub fn make_test_field() -> WindField {
    make_test_builder().build().unwrap()
}
