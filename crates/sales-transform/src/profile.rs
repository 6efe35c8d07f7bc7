//! Per-column descriptive statistics.

use polars::prelude::{
    ChunkAgg, ChunkQuantile, ChunkVar, Column, DataFrame, DataType, Float32Chunked,
    Float64Chunked, IntoSeries, NamedFrom, PlSmallStr, PolarsError, QuantileMethod, Series,
};
use sales_model::{
    ColumnKind, ColumnSummary, FrameProfile, NumericStats, ProfileOptions, null_percentage,
    round_hundredths,
};
use tracing::{debug, error};

use crate::error::{ProfileError, ProfileResult};
use crate::values::any_to_string;

/// Builds the summary table for `df`.
///
/// Produces one [`ColumnSummary`] per column, in frame order (or in the
/// order of [`ProfileOptions::column_subset`] when set). No partial profile
/// is returned: the first column that fails aborts the whole call.
///
/// # Errors
///
/// Returns [`ProfileError`] for a zero threshold, an unknown column in the
/// subset, or a statistic the engine cannot compute for a column's type.
pub fn profile_frame(df: &DataFrame, options: &ProfileOptions) -> ProfileResult<FrameProfile> {
    build_profile(df, options).inspect_err(|err| {
        error!(error = %err, "failed to profile frame");
    })
}

fn build_profile(df: &DataFrame, options: &ProfileOptions) -> ProfileResult<FrameProfile> {
    if options.unique_threshold == 0 {
        return Err(ProfileError::InvalidThreshold);
    }

    let row_count = df.height();
    let columns = select_columns(df, options)?
        .into_iter()
        .map(|column| summarize_column(column, row_count, options.unique_threshold))
        .collect::<ProfileResult<Vec<_>>>()?;

    let profile = FrameProfile { row_count, columns };
    debug!(
        rows = row_count,
        columns = profile.len(),
        numeric = profile.numeric_column_count(),
        "profiled frame"
    );
    Ok(profile)
}

fn select_columns<'a>(
    df: &'a DataFrame,
    options: &ProfileOptions,
) -> ProfileResult<Vec<&'a Column>> {
    match &options.column_subset {
        None => Ok(df.get_columns().iter().collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                df.column(name).map_err(|_| ProfileError::ColumnNotFound {
                    column: name.clone(),
                })
            })
            .collect(),
    }
}

/// Summarizes a single column.
///
/// `row_count` is the frame height used for the null percentage; distinct
/// values are listed only when there are fewer than `unique_threshold`.
/// Float NaN counts as a missing value.
pub fn summarize_column(
    column: &Column,
    row_count: usize,
    unique_threshold: usize,
) -> ProfileResult<ColumnSummary> {
    let name = column.name().as_str();
    let series = &nan_as_null(column.as_materialized_series())?;
    let num_null_values = series.null_count();

    let distinct = series
        .drop_nulls()
        .unique_stable()
        .map_err(|e| statistic_error(name, "distinct values", &e))?;
    let nunique = distinct.len();
    let unique_values = if nunique < unique_threshold {
        distinct_strings(&distinct)
    } else {
        Vec::new()
    };

    Ok(ColumnSummary {
        column: name.to_string(),
        dtype: series.dtype().to_string(),
        count: series.len() - num_null_values,
        kind: column_kind(name, series)?,
        nunique,
        unique_values,
        num_null_values,
        null_perct: null_percentage(num_null_values, row_count),
    })
}

/// Replaces float NaN with null so counts and statistics skip it.
fn nan_as_null(series: &Series) -> ProfileResult<Series> {
    let name = series.name().clone();
    let normalized = match series.dtype() {
        DataType::Float64 => series
            .f64()?
            .iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect::<Float64Chunked>()
            .into_series(),
        DataType::Float32 => series
            .f32()?
            .iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect::<Float32Chunked>()
            .into_series(),
        _ => return Ok(series.clone()),
    };
    Ok(normalized.with_name(name))
}

fn column_kind(name: &str, series: &Series) -> ProfileResult<ColumnKind> {
    let dtype = series.dtype();
    if is_numeric(dtype) {
        return numeric_stats(name, series).map(ColumnKind::Numeric);
    }
    let kind = if dtype.is_temporal() {
        ColumnKind::Temporal
    } else if matches!(dtype, DataType::String) {
        ColumnKind::Text
    } else {
        ColumnKind::Other
    };
    Ok(kind)
}

/// Integer, float and boolean storage count as numeric.
fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Boolean
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn numeric_stats(name: &str, series: &Series) -> ProfileResult<NumericStats> {
    let floats = series
        .cast(&DataType::Float64)
        .map_err(|e| statistic_error(name, "numeric cast", &e))?;
    let values = floats.f64()?;
    let quantile = |q: f64| {
        values
            .quantile(q, QuantileMethod::Linear)
            .map_err(|e| statistic_error(name, "quantile", &e))
    };

    Ok(NumericStats {
        mean: values.mean(),
        std: values.std(1).map(round_hundredths),
        min: values.min(),
        q25: quantile(0.25)?,
        median: quantile(0.5)?,
        q75: quantile(0.75)?,
        max: values.max(),
    })
}

fn distinct_strings(distinct: &Series) -> Vec<String> {
    distinct.rechunk().iter().filter_map(any_to_string).collect()
}

fn statistic_error(column: &str, statistic: &'static str, err: &PolarsError) -> ProfileError {
    ProfileError::Statistic {
        column: column.to_string(),
        statistic,
        message: err.to_string(),
    }
}

/// Renders a profile as a DataFrame with one row per profiled column.
///
/// Columns: `column, dtype, count, mean, std, min, 25%, 50%, 75%, max,
/// nunique, unique_values, num_null_values, null_perct`. `unique_values` is
/// a list-of-strings column.
pub fn summary_frame(profile: &FrameProfile) -> ProfileResult<DataFrame> {
    let summaries = &profile.columns;
    let stat = |pick: fn(&NumericStats) -> Option<f64>| -> Vec<Option<f64>> {
        summaries
            .iter()
            .map(|summary| summary.numeric().and_then(pick))
            .collect()
    };
    let counts = |pick: fn(&ColumnSummary) -> usize| -> Vec<u64> {
        summaries.iter().map(|summary| pick(summary) as u64).collect()
    };

    let names: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
    let dtypes: Vec<&str> = summaries.iter().map(|s| s.dtype.as_str()).collect();
    let unique_values: Vec<Series> = summaries
        .iter()
        .map(|s| Series::new(PlSmallStr::EMPTY, s.unique_values.as_slice()))
        .collect();
    let null_perct: Vec<f64> = summaries.iter().map(|s| s.null_perct).collect();

    let frame = DataFrame::new(vec![
        Column::new("column".into(), names),
        Column::new("dtype".into(), dtypes),
        Column::new("count".into(), counts(|s| s.count)),
        Column::new("mean".into(), stat(|s| s.mean)),
        Column::new("std".into(), stat(|s| s.std)),
        Column::new("min".into(), stat(|s| s.min)),
        Column::new("25%".into(), stat(|s| s.q25)),
        Column::new("50%".into(), stat(|s| s.median)),
        Column::new("75%".into(), stat(|s| s.q75)),
        Column::new("max".into(), stat(|s| s.max)),
        Column::new("nunique".into(), counts(|s| s.nunique)),
        Column::new("unique_values".into(), unique_values),
        Column::new("num_null_values".into(), counts(|s| s.num_null_values)),
        Column::new("null_perct".into(), null_perct),
    ])?;
    Ok(frame)
}
