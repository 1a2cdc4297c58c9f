// src/export.rs
//! One CSV per province: date, the six prayers, province.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use chrono::{NaiveTime, Timelike};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::calendar::{CalendarBook, ProvinceCalendar};
use crate::config::{Language, Settings};
use crate::error::PipelineError;
use crate::prayer::Prayer;

/// File stem for a province: its canonical identifier with path separators
/// replaced.
pub fn file_stem(settings: &Settings, province: &str) -> String {
    settings
        .canonical_province(province)
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// `HH:MM`, or `HH:MM:SS` when the time carries seconds.
fn format_time(t: &NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// Fail if two calendars across `books` would be written to the same file,
/// either because the rename table maps two spellings to one province or
/// because one province appears in several regions.
pub fn check_file_names<'a, I>(books: I, settings: &Settings) -> Result<(), PipelineError>
where
    I: IntoIterator<Item = &'a CalendarBook>,
{
    let mut owners: HashMap<String, String> = HashMap::new();
    for book in books {
        for cal in book.calendars.values() {
            let file = format!("{}.csv", file_stem(settings, &cal.province));
            let owner = format!("{}/{}", book.region, cal.province);
            if let Some(first) = owners.get(&file) {
                return Err(PipelineError::OutputCollision {
                    file,
                    first: first.clone(),
                    second: owner,
                });
            }
            owners.insert(file, owner);
        }
    }
    Ok(())
}

/// Write `calendar` to `<dir>/<province>.csv`, atomically.
pub fn write_calendar<P: AsRef<Path>>(
    dir: P,
    calendar: &ProvinceCalendar,
    settings: &Settings,
    language: Language,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let stem = file_stem(settings, &calendar.province);
    let path = dir.join(format!("{}.csv", stem));
    let tmp_path = dir.join(format!(".{}.csv.tmp", stem));

    let columns = settings.column_names(language);
    let prayers = settings.prayer_names(language);
    let province = settings.canonical_province(&calendar.province);

    {
        let mut wtr = WriterBuilder::new()
            .from_path(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;

        let mut header = vec![columns.date.as_str()];
        header.extend(Prayer::ALL.iter().map(|&p| prayers.name(p)));
        header.push(columns.wilaya.as_str());
        wtr.write_record(&header)?;

        for row in &calendar.rows {
            let mut record = Vec::with_capacity(8);
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(row.times.iter().map(format_time));
            record.push(province.to_string());
            wtr.write_record(&record)?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", tmp_path.display()))?;
    }

    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    debug!(path = %path.display(), rows = calendar.rows.len(), "wrote calendar");
    Ok(path)
}

/// Write every calendar of a region. Nothing is written when two of its
/// calendars share a file name.
pub fn write_book<P: AsRef<Path>>(
    dir: P,
    book: &CalendarBook,
    settings: &Settings,
    language: Language,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    check_file_names([book], settings)?;
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;
    book.calendars
        .values()
        .map(|cal| write_calendar(dir, cal, settings, language))
        .collect()
}
