//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{
    INFER_SCHEMA_ROWS, MAX_CSV_FILE_SIZE, MISSING_VALUE_TOKENS, check_file_size,
    check_file_size_with_limit, read_csv_frame, validate_encoding,
};
pub use writer::write_csv_frame;
