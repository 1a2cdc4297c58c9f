use chrono::NaiveDate;
use tracing::{field::display, warn};

use crate::calendar::ProvinceCalendar;

/// Two neighbouring calendar dates that are not one day apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub before: NaiveDate,
    pub after: NaiveDate,
}

impl Gap {
    pub fn days(&self) -> i64 {
        (self.after - self.before).num_days()
    }

    /// First date missing between the two, if the gap skips any.
    pub fn first_missing(&self) -> Option<NaiveDate> {
        (self.days() > 1).then(|| self.before.succ_opt()).flatten()
    }
}

/// Adjacent pairs whose distance is not exactly one day. Repeats and
/// backwards steps count too.
pub fn find_gaps(dates: &[NaiveDate]) -> Vec<Gap> {
    dates
        .windows(2)
        .map(|w| Gap {
            before: w[0],
            after: w[1],
        })
        .filter(|g| g.days() != 1)
        .collect()
}

/// Warn about every gap in `calendar`. Gaps usually mean a month is missing
/// from the batch, so they never stop the run.
pub fn check_calendar(region: &str, calendar: &ProvinceCalendar) -> Vec<Gap> {
    let gaps = find_gaps(&calendar.dates());
    for gap in &gaps {
        warn!(
            region,
            province = %calendar.province,
            before = %gap.before,
            after = %gap.after,
            gap_days = gap.days(),
            first_missing = gap.first_missing().map(display),
            "non-consecutive dates"
        );
    }
    gaps
}
