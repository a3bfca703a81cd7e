use chrono::{Datelike, NaiveDateTime};

/// Zero based index of the calendar month, January is 0.
#[inline]
pub(crate) fn month_index(time: &NaiveDateTime) -> usize {
    time.month0() as usize
}
