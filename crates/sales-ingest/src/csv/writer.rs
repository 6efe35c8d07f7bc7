//! CSV output for merged frames.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{IngestError, Result};

/// Writes a frame to `path` as CSV with a header row.
///
/// Parent directories are created when missing. Nulls are written as empty
/// fields.
pub fn write_csv_frame(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut output = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut output)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::read_csv_frame;
    use polars::df;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("merged.csv");
        let df = df! {
            "store_nbr" => &[1i64, 2],
            "city" => &[Some("Quito"), None],
        }
        .unwrap();

        write_csv_frame(&df, &path).unwrap();
        let loaded = read_csv_frame(&path).unwrap();

        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.column("city").unwrap().null_count(), 1);
    }
}
