//! Left joins of the primary frame against its reference tables.
//!
//! The primary frame (daily sales per store and product family) is widened
//! with four reference tables in a fixed order: holidays and oil prices on
//! the date, store metadata on the store identifier, and transaction counts
//! on both. Every join is a left join, so each primary row survives and
//! reference columns are null where no match exists.

use std::collections::HashSet;

use polars::prelude::{
    BooleanChunked, Column, DataFrame, Expr, IntoLazy, JoinArgs, JoinType, NewChunkedArray,
    PlSmallStr, PolarsResult, SortMultipleOptions, col,
};
use sales_model::{AuxiliaryTable, DuplicateKeyPolicy, JoinStep, MergeOptions};
use tracing::{debug, error, info, info_span};

use crate::error::{JoinSide, MergeError, MergeResult};
use crate::values::any_to_string;

/// Temporary column used to restore the left frame's row order after a join.
const ROW_ORDER: &str = "__merge_row_order";

/// The four reference tables, borrowed for the duration of a merge.
#[derive(Debug, Clone, Copy)]
pub struct AuxiliaryTables<'a> {
    pub holidays: &'a DataFrame,
    pub oil: &'a DataFrame,
    pub stores: &'a DataFrame,
    pub transactions: &'a DataFrame,
}

impl<'a> AuxiliaryTables<'a> {
    pub fn get(&self, table: AuxiliaryTable) -> &'a DataFrame {
        match table {
            AuxiliaryTable::Holidays => self.holidays,
            AuxiliaryTable::Oil => self.oil,
            AuxiliaryTable::Stores => self.stores,
            AuxiliaryTable::Transactions => self.transactions,
        }
    }
}

/// Merges the primary frame with all four reference tables.
///
/// Runs the steps from [`MergeOptions::steps`] in order, each one a left
/// join of the running result against the next table. The first failing
/// step aborts the merge; no partially merged frame is returned.
///
/// # Errors
///
/// Returns [`MergeError`] when a key column is missing or mistyped, when
/// duplicate keys violate the configured [`DuplicateKeyPolicy`], or when the
/// join itself fails.
pub fn merge_frames(
    primary: &DataFrame,
    tables: &AuxiliaryTables<'_>,
    options: &MergeOptions,
) -> MergeResult<DataFrame> {
    let span = info_span!("merge", rows = primary.height());
    let _guard = span.enter();

    let mut merged = primary.clone();
    for step in options.steps() {
        merged = left_join(&merged, tables.get(step.table), &step, options)?;
    }

    info!(
        rows = merged.height(),
        columns = merged.width(),
        "merged reference tables"
    );
    Ok(merged)
}

/// Left-joins `right` onto `left` on the step's key columns.
///
/// The output keeps the row order of `left`. Key columns are coalesced;
/// other right-hand columns whose names collide with the left get
/// [`MergeOptions::suffix`] appended.
pub fn left_join(
    left: &DataFrame,
    right: &DataFrame,
    step: &JoinStep,
    options: &MergeOptions,
) -> MergeResult<DataFrame> {
    join_step(left, right, step, options).inspect_err(|err| {
        error!(table = %step.table, error = %err, "join failed");
    })
}

fn join_step(
    left: &DataFrame,
    right: &DataFrame,
    step: &JoinStep,
    options: &MergeOptions,
) -> MergeResult<DataFrame> {
    validate_keys(left, right, step)?;
    let right = apply_duplicate_policy(right, step, options.duplicate_keys)?;
    let right_rows = right.height();

    let engine_error = |source| MergeError::Join {
        table: step.table,
        source,
    };

    let on: Vec<Expr> = step.keys.iter().map(|key| col(key.as_str())).collect();
    let args = JoinArgs::new(JoinType::Left).with_suffix(Some(options.suffix.as_str().into()));

    let joined = left
        .with_row_index(PlSmallStr::from_static(ROW_ORDER), None)
        .map_err(engine_error)?
        .lazy()
        .join(right.lazy(), on.clone(), on, args)
        .sort(
            [ROW_ORDER],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()
        .map_err(engine_error)?
        .drop(ROW_ORDER)
        .map_err(engine_error)?;

    debug!(
        table = %step.table,
        keys = ?step.keys,
        left_rows = left.height(),
        right_rows,
        rows = joined.height(),
        "joined reference table"
    );
    Ok(joined)
}

/// Checks that every key exists on both sides with the same storage type.
fn validate_keys(left: &DataFrame, right: &DataFrame, step: &JoinStep) -> MergeResult<()> {
    if step.keys.is_empty() {
        return Err(MergeError::NoKeys { table: step.table });
    }

    let missing = |side, column: &str| MergeError::MissingKey {
        table: step.table,
        side,
        column: column.to_string(),
    };

    for key in &step.keys {
        let left_column = left.column(key).map_err(|_| missing(JoinSide::Left, key))?;
        let right_column = right
            .column(key)
            .map_err(|_| missing(JoinSide::Right, key))?;
        if left_column.dtype() != right_column.dtype() {
            return Err(MergeError::KeyTypeMismatch {
                table: step.table,
                column: key.clone(),
                left: left_column.dtype().to_string(),
                right: right_column.dtype().to_string(),
            });
        }
    }
    Ok(())
}

fn apply_duplicate_policy(
    right: &DataFrame,
    step: &JoinStep,
    policy: DuplicateKeyPolicy,
) -> MergeResult<DataFrame> {
    if policy == DuplicateKeyPolicy::FanOut {
        return Ok(right.clone());
    }

    let engine_error = |source| MergeError::Join {
        table: step.table,
        source,
    };
    let first = first_key_occurrences(right, &step.keys).map_err(engine_error)?;
    let duplicates = first.iter().filter(|is_first| !**is_first).count();
    if duplicates == 0 {
        return Ok(right.clone());
    }

    if policy == DuplicateKeyPolicy::Reject {
        return Err(MergeError::DuplicateKeys {
            table: step.table,
            keys: step.keys.clone(),
            duplicates,
        });
    }

    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("first_match"), &first);
    let deduped = right.filter(&mask).map_err(engine_error)?;
    debug!(
        table = %step.table,
        dropped = duplicates,
        "kept first row per duplicate key"
    );
    Ok(deduped)
}

/// Flags each row that is the first occurrence of its key tuple.
///
/// Rows with a null key component never match in a join, so they are always
/// flagged as first occurrences.
fn first_key_occurrences(df: &DataFrame, keys: &[String]) -> PolarsResult<Vec<bool>> {
    let columns = keys
        .iter()
        .map(|key| df.column(key))
        .collect::<PolarsResult<Vec<&Column>>>()?;

    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let mut first = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let tuple = columns
            .iter()
            .map(|column| column.get(idx).map(any_to_string))
            .collect::<PolarsResult<Vec<_>>>()?;
        if tuple.iter().any(Option::is_none) {
            first.push(true);
            continue;
        }
        first.push(seen.insert(tuple));
    }
    Ok(first)
}
