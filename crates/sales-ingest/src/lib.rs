//! Loading sales source tables into Polars frames.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files with schema inference and date parsing
//! - **CSV Writing**: Persist merged frames
//! - **Source Discovery**: Locate the primary and reference tables in a directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sales_ingest::{discover_sources, read_csv_frame};
//!
//! let sources = discover_sources(Path::new("data/store-sales"))?;
//! let train = read_csv_frame(&sources.primary)?;
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV ===
pub use csv::{
    INFER_SCHEMA_ROWS, MAX_CSV_FILE_SIZE, MISSING_VALUE_TOKENS, check_file_size,
    check_file_size_with_limit, read_csv_frame, validate_encoding, write_csv_frame,
};

// === Discovery ===
pub use discovery::{SourceFiles, discover_sources, list_csv_files};
