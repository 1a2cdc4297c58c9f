//! Per-province calendars and the per-region accumulator they are built in.

pub mod assemble;
pub mod contiguity;
pub mod offset;

use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Six times in canonical prayer order.
pub type PrayerTimes = [NaiveTime; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRow {
    pub date: NaiveDate,
    pub times: PrayerTimes,
}

/// All days produced for one province, months in date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProvinceCalendar {
    pub province: String,
    pub rows: Vec<CalendarRow>,
}

impl ProvinceCalendar {
    pub fn new(province: impl Into<String>) -> Self {
        Self {
            province: province.into(),
            rows: Vec::new(),
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }
}

/// Province → rows for a single month.
pub type MonthCalendars = BTreeMap<String, Vec<CalendarRow>>;

/// Running calendars of one region. Months are appended in date order;
/// nothing is shared between regions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarBook {
    pub region: String,
    pub calendars: BTreeMap<String, ProvinceCalendar>,
}

impl CalendarBook {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            calendars: BTreeMap::new(),
        }
    }

    /// Concatenate one month after everything already held.
    pub fn append(&mut self, month: MonthCalendars) {
        for (province, rows) in month {
            self.calendars
                .entry(province.clone())
                .or_insert_with(|| ProvinceCalendar::new(province))
                .rows
                .extend(rows);
        }
    }

    /// Earliest date held by any province.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.calendars
            .values()
            .filter_map(|cal| cal.rows.first())
            .map(|row| row.date)
            .min()
    }

    /// `self` followed by `later`, province by province.
    pub fn merge(mut self, later: CalendarBook) -> CalendarBook {
        for (province, cal) in later.calendars {
            self.calendars
                .entry(province)
                .or_insert_with(|| ProvinceCalendar::new(cal.province.clone()))
                .rows
                .extend(cal.rows);
        }
        self
    }

    pub fn get(&self, province: &str) -> Option<&ProvinceCalendar> {
        self.calendars.get(province)
    }

    pub fn total_rows(&self) -> usize {
        self.calendars.values().map(|c| c.rows.len()).sum()
    }
}
