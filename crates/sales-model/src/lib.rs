//! Shared types for the sales frame tooling.
//!
//! Plain data types passed between the merge and profile operations and
//! the CLI. Nothing here depends on the dataframe engine.
//!
//! - **options**: [`MergeOptions`], [`ProfileOptions`] and the join plan types
//! - **summary**: [`FrameProfile`], [`ColumnSummary`] and the column kind variant

pub mod options;
pub mod summary;

pub use options::{
    AuxiliaryTable, DEFAULT_DATE_KEY, DEFAULT_JOIN_SUFFIX, DEFAULT_STORE_KEY,
    DEFAULT_UNIQUE_THRESHOLD, DuplicateKeyPolicy, JoinStep, MergeOptions, ProfileOptions,
};
pub use summary::{
    ColumnKind, ColumnSummary, FrameProfile, NumericStats, null_percentage, round_hundredths,
};
