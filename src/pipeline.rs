// src/pipeline.rs
//! Region runs: pair, validate, normalize, assemble, check.
//!
//! Months of a region are independent once paired and run on the rayon pool;
//! their results are ordered by first date and folded back, so no calendar is
//! ever shared between threads.

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::info;

use crate::calendar::assemble::assemble_month;
use crate::calendar::contiguity::{check_calendar, Gap};
use crate::calendar::{CalendarBook, MonthCalendars};
use crate::config::{RegionSettings, Settings};
use crate::error::Result;
use crate::process::base::normalize_base;
use crate::process::date_parser::DateCorrector;
use crate::process::pair_tables;
use crate::process::raw_table::RawTable;
use crate::process::shape::validate_shape;

/// Result of one region: its calendars plus the data-quality gaps found.
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub book: CalendarBook,
    /// Province → gaps; provinces without gaps are absent.
    pub gaps: BTreeMap<String, Vec<Gap>>,
}

pub struct Pipeline<'a> {
    settings: &'a Settings,
    dates: DateCorrector,
}

impl<'a> Pipeline<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self> {
        Ok(Self {
            settings,
            dates: DateCorrector::new(&settings.date_corrections)?,
        })
    }

    /// One (base, diffs) pair → province rows for that month.
    pub fn process_month(
        &self,
        region: &RegionSettings,
        base: &RawTable,
        diffs: &RawTable,
    ) -> Result<MonthCalendars> {
        validate_shape(base, &self.settings.base_shapes, "base table")?;
        let base = normalize_base(base, self.settings, &self.dates)?;
        let diffs = region.layout.normalize(diffs, region, self.settings)?;
        Ok(assemble_month(&base, &diffs))
    }

    /// Build every province calendar of `region_name` from its tables.
    #[tracing::instrument(level = "info", skip(self, tables), fields(tables = tables.len()))]
    pub fn run_region(&self, region_name: &str, tables: Vec<RawTable>) -> Result<RegionReport> {
        let region = self.settings.region(region_name)?;
        let pairs = pair_tables(region_name, tables)?;

        let mut months: Vec<CalendarBook> = pairs
            .par_iter()
            .map(|(base, diffs)| -> Result<CalendarBook> {
                let mut book = CalendarBook::new(region_name);
                book.append(self.process_month(region, base, diffs)?);
                Ok(book)
            })
            .collect::<Result<Vec<_>>>()?;
        // stable, so months sharing a first date keep their document order
        months.sort_by_key(CalendarBook::first_date);

        let book = months
            .into_iter()
            .fold(CalendarBook::new(region_name), CalendarBook::merge);

        let gaps: BTreeMap<String, Vec<Gap>> = book
            .calendars
            .values()
            .map(|cal| (cal.province.clone(), check_calendar(region_name, cal)))
            .filter(|(_, g)| !g.is_empty())
            .collect();

        info!(
            months = pairs.len(),
            provinces = book.calendars.len(),
            rows = book.total_rows(),
            gaps = gaps.values().map(Vec::len).sum::<usize>(),
            "region assembled"
        );
        Ok(RegionReport { book, gaps })
    }

    /// Run independent regions in parallel. Every region name is checked
    /// before any table is touched.
    pub fn run_all(&self, inputs: Vec<(String, Vec<RawTable>)>) -> Result<Vec<RegionReport>> {
        for (name, _) in &inputs {
            self.settings.region(name)?;
        }
        inputs
            .into_par_iter()
            .map(|(name, tables)| self.run_region(&name, tables))
            .collect()
    }
}
