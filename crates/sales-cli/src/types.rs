use std::path::PathBuf;

/// What a completed merge produced.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
}
