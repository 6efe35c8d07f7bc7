use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use tracing::{info, info_span};

use sales_ingest::{SourceFiles, discover_sources, read_csv_frame, write_csv_frame};
use sales_model::{FrameProfile, MergeOptions, ProfileOptions};
use sales_transform::{AuxiliaryTables, merge_frames, profile_frame, summary_frame};

use crate::cli::{MergeArgs, ProfileArgs, ProfileFormatArg};
use crate::summary::profile_table;
use crate::types::MergeOutcome;

/// Loads the five source tables, merges them and writes the result.
pub fn run_merge(args: &MergeArgs) -> Result<MergeOutcome> {
    let sources = resolve_sources(args)?;
    let span = info_span!("merge", primary = %sources.primary.display());
    let _guard = span.enter();

    let primary = load(&sources.primary)?;
    let holidays = load(&sources.holidays)?;
    let oil = load(&sources.oil)?;
    let stores = load(&sources.stores)?;
    let transactions = load(&sources.transactions)?;

    let options = MergeOptions::new()
        .with_date_key(&args.date_key)
        .with_store_key(&args.store_key)
        .with_suffix(&args.suffix)
        .with_duplicate_keys(args.on_duplicate.into());
    let tables = AuxiliaryTables {
        holidays: &holidays,
        oil: &oil,
        stores: &stores,
        transactions: &transactions,
    };
    let merged = merge_frames(&primary, &tables, &options).context("merge reference tables")?;

    write_csv_frame(&merged, &args.output)
        .with_context(|| format!("write merged frame to {}", args.output.display()))?;
    info!(output = %args.output.display(), rows = merged.height(), "wrote merged frame");

    Ok(MergeOutcome {
        output: args.output.clone(),
        rows: merged.height(),
        columns: merged.width(),
    })
}

/// Loads a CSV file, profiles it and renders the summary in the requested format.
pub fn run_profile(args: &ProfileArgs) -> Result<String> {
    let df = load(&args.input)?;
    let mut options = ProfileOptions::new().with_unique_threshold(args.threshold);
    if let Some(columns) = &args.columns {
        options = options.with_columns(columns.iter().map(String::as_str));
    }
    let profile = profile_frame(&df, &options)
        .with_context(|| format!("profile {}", args.input.display()))?;

    let rendered = render_profile(&profile, args.format)?;
    if let Some(path) = &args.output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("write profile to {}", path.display()))?;
        info!(output = %path.display(), "wrote profile");
    }
    Ok(rendered)
}

pub fn render_profile(profile: &FrameProfile, format: ProfileFormatArg) -> Result<String> {
    match format {
        ProfileFormatArg::Table => Ok(format!(
            "Rows: {}\n{}",
            profile.row_count,
            profile_table(profile)
        )),
        ProfileFormatArg::Json => {
            serde_json::to_string_pretty(profile).context("serialize profile as JSON")
        }
        ProfileFormatArg::Csv => profile_csv(profile),
    }
}

/// CSV cannot hold list cells, so distinct values are joined with `|`.
fn profile_csv(profile: &FrameProfile) -> Result<String> {
    let mut frame: DataFrame = summary_frame(profile).context("build summary frame")?;
    let joined: Vec<String> = profile
        .columns
        .iter()
        .map(|summary| summary.unique_values.join("|"))
        .collect();
    frame
        .with_column(Column::new("unique_values".into(), joined))
        .context("flatten unique values")?;

    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)
        .context("serialize profile as CSV")?;
    String::from_utf8(buffer).context("profile CSV is not UTF-8")
}

/// Explicit paths win; anything missing is discovered in `--data-dir`.
fn resolve_sources(args: &MergeArgs) -> Result<SourceFiles> {
    let discovered = match &args.data_dir {
        Some(dir) => Some(
            discover_sources(dir)
                .with_context(|| format!("discover sources in {}", dir.display()))?,
        ),
        None => None,
    };
    let pick = |explicit: &Option<PathBuf>, found: Option<&PathBuf>, flag: &str| {
        explicit
            .clone()
            .or_else(|| found.cloned())
            .ok_or_else(|| anyhow!("missing --{flag} (or --data-dir)"))
    };

    Ok(SourceFiles {
        primary: pick(&args.train, discovered.as_ref().map(|s| &s.primary), "train")?,
        holidays: pick(
            &args.holidays,
            discovered.as_ref().map(|s| &s.holidays),
            "holidays",
        )?,
        oil: pick(&args.oil, discovered.as_ref().map(|s| &s.oil), "oil")?,
        stores: pick(&args.stores, discovered.as_ref().map(|s| &s.stores), "stores")?,
        transactions: pick(
            &args.transactions,
            discovered.as_ref().map(|s| &s.transactions),
            "transactions",
        )?,
    })
}

fn load(path: &Path) -> Result<DataFrame> {
    read_csv_frame(path).with_context(|| format!("load {}", path.display()))
}
