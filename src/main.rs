use anyhow::{Context, Result};
use clap::Parser;
use mawaqit::{
    config::{Language, Settings},
    export,
    pipeline::Pipeline,
    process,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Build per-province prayer calendars from extracted document tables.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML settings; built-in defaults when absent.
    #[arg(long, env = "MAWAQIT_SETTINGS")]
    settings: Option<PathBuf>,

    /// Directory holding one sub-directory of extracted CSV tables per region.
    #[arg(long, default_value = "tables")]
    input: PathBuf,

    /// Where the per-province CSV files go.
    #[arg(long, default_value = "mawaqit_for_wilayas")]
    output: PathBuf,

    /// Regions to build (repeatable); every sub-directory of `--input` otherwise.
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Header language of the exported files; overrides the settings file.
    #[arg(long, value_enum)]
    language: Option<Language>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mawaqit=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();
    info!(?args, "startup");

    // ─── 2) settings ─────────────────────────────────────────────────
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let language = args.language.unwrap_or(settings.output.language);

    // ─── 3) regions to build, all resolved before reading tables ─────
    let regions: Vec<String> = if args.regions.is_empty() {
        let mut found = Vec::new();
        for entry in fs::read_dir(&args.input)
            .with_context(|| format!("reading input directory {}", args.input.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                found.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        found.sort();
        found
    } else {
        args.regions.clone()
    };
    for region in &regions {
        settings.region(region)?;
    }
    if regions.is_empty() {
        warn!(input = %args.input.display(), "no regions to build");
        return Ok(());
    }

    // ─── 4) load raw tables ──────────────────────────────────────────
    let mut inputs = Vec::with_capacity(regions.len());
    for region in regions {
        let tables = process::load_region_tables(args.input.join(&region))
            .with_context(|| format!("loading tables of region {}", region))?;
        inputs.push((region, tables));
    }

    // ─── 5) assemble ─────────────────────────────────────────────────
    let pipeline = Pipeline::new(&settings)?;
    let reports = pipeline.run_all(inputs)?;

    // ─── 6) export ───────────────────────────────────────────────────
    // regions share one output directory
    export::check_file_names(reports.iter().map(|r| &r.book), &settings)?;
    let mut gap_count = 0;
    for report in &reports {
        let paths = export::write_book(&args.output, &report.book, &settings, language)
            .with_context(|| format!("exporting region {}", report.book.region))?;
        gap_count += report.gaps.values().map(Vec::len).sum::<usize>();
        info!(region = %report.book.region, files = paths.len(), "exported");
    }

    if gap_count > 0 {
        warn!(gap_count, "calendars exported with date gaps");
    }
    info!(output = %args.output.display(), "all done");
    Ok(())
}
