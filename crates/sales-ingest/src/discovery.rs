//! Locating the five source tables inside a data directory.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Paths of the primary table and its four reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub primary: PathBuf,
    pub holidays: PathBuf,
    pub oil: PathBuf,
    pub stores: PathBuf,
    pub transactions: PathBuf,
}

/// Accepted file stems for each table, checked in order.
const PRIMARY_STEMS: &[&str] = &["train", "test"];
const HOLIDAY_STEMS: &[&str] = &["holidays_events", "holidays"];
const OIL_STEMS: &[&str] = &["oil"];
const STORE_STEMS: &[&str] = &["stores"];
const TRANSACTION_STEMS: &[&str] = &["transactions"];

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Finds the source tables in `dir` by file stem (case-insensitive).
///
/// The primary table is `train.csv`, falling back to `test.csv`.
pub fn discover_sources(dir: &Path) -> Result<SourceFiles> {
    let files = list_csv_files(dir)?;
    let find = |table: &'static str, stems: &[&str]| -> Result<PathBuf> {
        stems
            .iter()
            .find_map(|stem| {
                files
                    .iter()
                    .find(|path| file_stem_matches(path, stem))
                    .cloned()
            })
            .ok_or_else(|| IngestError::SourceNotFound {
                table,
                dir: dir.to_path_buf(),
            })
    };

    Ok(SourceFiles {
        primary: find("primary", PRIMARY_STEMS)?,
        holidays: find("holidays", HOLIDAY_STEMS)?,
        oil: find("oil", OIL_STEMS)?,
        stores: find("stores", STORE_STEMS)?,
        transactions: find("transactions", TRANSACTION_STEMS)?,
    })
}

fn file_stem_matches(path: &Path, stem: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case(stem))
}
