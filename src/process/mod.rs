// src/process/mod.rs
//! Raw-table intake and normalization.
//!
//! The extractor writes each table it pulls out of a ministry PDF as one CSV
//! file; the first record holds the labels it guessed for the columns. File
//! names sort in document order, with digit runs compared as numbers so
//! `p2.csv` comes before `p10.csv`.

pub mod base;
pub mod date_parser;
pub mod diffs;
pub mod raw_table;
pub mod shape;
pub mod split;
pub mod utils;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::glob;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PipelineError;
use raw_table::RawTable;

/// Read one extracted table.
pub fn load_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // the extractor does not pad short rows
        .from_path(path)
        .with_context(|| format!("Failed to open table {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    let mut records = records.into_iter();
    let headers = records.next().unwrap_or_default();
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RawTable::new(source, headers, records.collect()))
}

/// One run of a file name: digits compare by value, text as written.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NameChunk {
    /// (significant digit count, digits without leading zeros)
    Number(usize, String),
    Text(String),
}

fn natural_key(path: &Path) -> Vec<NameChunk> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;
    for ch in name.chars() {
        let digit = ch.is_ascii_digit();
        if !current.is_empty() && digit != in_digits {
            chunks.push(name_chunk(std::mem::take(&mut current), in_digits));
        }
        in_digits = digit;
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(name_chunk(current, in_digits));
    }
    chunks
}

fn name_chunk(run: String, digits: bool) -> NameChunk {
    if digits {
        let significant = run.trim_start_matches('0').to_string();
        NameChunk::Number(significant.len(), significant)
    } else {
        NameChunk::Text(run)
    }
}

/// Digit-aware file-name order; exact ties fall back to the plain path.
fn natural_order(a: &PathBuf, b: &PathBuf) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

/// All tables of one region directory, in natural file-name order.
#[tracing::instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn load_region_tables<P: AsRef<Path>>(dir: P) -> Result<Vec<RawTable>> {
    let pattern = format!("{}/*.csv", dir.as_ref().display());
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort_by(natural_order);

    let tables = paths
        .iter()
        .map(load_raw_table)
        .collect::<Result<Vec<_>>>()?;
    info!(count = tables.len(), "loaded raw tables");
    Ok(tables)
}

/// Consume the document-ordered tables two at a time as (base, diffs).
pub fn pair_tables(
    region: &str,
    tables: Vec<RawTable>,
) -> Result<Vec<(RawTable, RawTable)>, PipelineError> {
    if tables.len() % 2 != 0 {
        return Err(PipelineError::UnpairedTable {
            region: region.to_string(),
            count: tables.len(),
        });
    }

    let mut pairs = Vec::with_capacity(tables.len() / 2);
    let mut iter = tables.into_iter();
    while let (Some(base), Some(diffs)) = (iter.next(), iter.next()) {
        debug!(base = %base.source, diffs = %diffs.source, "paired tables");
        pairs.push((base, diffs));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn table(name: &str) -> RawTable {
        RawTable::new(name, vec!["a".into()], vec![vec!["1".into()]])
    }

    #[test]
    fn loads_tables_in_name_order() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("02.csv"), "x,y\n3,4\n")?;
        fs::write(dir.path().join("01.csv"), "Unnamed: 0,\"الفارق.1\"\n1\n5,6,7\n")?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let tables = load_region_tables(dir.path())?;
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].source, "01.csv");
        assert_eq!(tables[0].headers, vec!["Unnamed: 0", "الفارق.1", ""]);
        assert_eq!(tables[0].rows, vec![vec!["1", "", ""], vec!["5", "6", "7"]]);
        assert_eq!(tables[1].source, "02.csv");
        Ok(())
    }

    #[test]
    fn unpadded_numbers_load_in_numeric_order() -> Result<()> {
        let dir = tempdir()?;
        for name in ["p10.csv", "p2.csv", "p1.csv", "p11.csv"] {
            fs::write(dir.path().join(name), "x\n1\n")?;
        }

        let tables = load_region_tables(dir.path())?;
        let names: Vec<_> = tables.iter().map(|t| t.source.as_str()).collect();
        assert_eq!(names, vec!["p1.csv", "p2.csv", "p10.csv", "p11.csv"]);
        Ok(())
    }

    #[test]
    fn natural_order_ignores_leading_zeros() {
        let mut paths: Vec<PathBuf> = ["t010.csv", "t9.csv", "t0001.csv", "a.csv"]
            .iter()
            .map(PathBuf::from)
            .collect();
        paths.sort_by(natural_order);
        assert_eq!(
            paths,
            ["a.csv", "t0001.csv", "t9.csv", "t010.csv"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn pairs_in_document_order() -> Result<()> {
        let pairs = pair_tables("centre", vec![table("b1"), table("d1"), table("b2"), table("d2")])?;
        let names: Vec<_> = pairs
            .iter()
            .map(|(b, d)| (b.source.as_str(), d.source.as_str()))
            .collect();
        assert_eq!(names, vec![("b1", "d1"), ("b2", "d2")]);
        Ok(())
    }

    #[test]
    fn odd_table_count_is_rejected() {
        let err = pair_tables("est", vec![table("b1"), table("d1"), table("b2")]).unwrap_err();
        assert!(matches!(err, PipelineError::UnpairedTable { count: 3, .. }));
    }
}
