//! Merging and profiling for sales frames.
//!
//! This crate provides the two frame operations of the toolkit:
//!
//! - **merge**: left-join the primary sales frame with holidays, oil prices,
//!   store metadata and transactions
//! - **profile**: build a per-column summary table (type, counts, numeric
//!   statistics, distinct values, nulls)
//!
//! Both take frames by reference and return new frames. Failures come back
//! as [`MergeError`] / [`ProfileError`] and are also logged through
//! `tracing` at the call boundary.

pub mod error;
pub mod merge;
pub mod profile;
pub mod values;

pub use error::{JoinSide, MergeError, MergeResult, ProfileError, ProfileResult};
pub use merge::{AuxiliaryTables, left_join, merge_frames};
pub use profile::{profile_frame, summarize_column, summary_frame};
