use chrono::{NaiveTime, TimeDelta};

use crate::calendar::PrayerTimes;
use crate::process::diffs::Offsets;

/// `time` moved by `minutes`, date-agnostic.
///
/// Crossing midnight wraps around: the day carry is dropped, so 23:50 + 20
/// gives 00:10 of the same calendar row. Only the offset modulo one day
/// matters, so arbitrarily large offsets cannot overflow.
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    let minutes = minutes.rem_euclid(24 * 60);
    match TimeDelta::try_minutes(minutes) {
        // second element is the whole-day carry, in seconds
        Some(delta) => time.overflowing_add_signed(delta).0,
        None => time,
    }
}

/// Prayer-by-prayer [`add_minutes`].
pub fn apply_offsets(times: &PrayerTimes, offsets: &Offsets) -> PrayerTimes {
    let mut out = *times;
    for (t, &m) in out.iter_mut().zip(offsets.iter()) {
        *t = add_minutes(*t, m);
    }
    out
}
