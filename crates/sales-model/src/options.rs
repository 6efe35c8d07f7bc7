//! Configuration options for merging and profiling frames.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key column shared by the primary frame, holidays, oil and transactions.
pub const DEFAULT_DATE_KEY: &str = "date";

/// Key column shared by the primary frame, stores and transactions.
pub const DEFAULT_STORE_KEY: &str = "store_nbr";

/// Suffix appended to right-hand columns whose names collide with the left.
pub const DEFAULT_JOIN_SUFFIX: &str = "_right";

/// Distinct-value count below which a column's values are listed.
pub const DEFAULT_UNIQUE_THRESHOLD: usize = 50;

/// The auxiliary reference tables joined onto the primary frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryTable {
    /// Holiday and event calendar, one row per date (possibly several).
    Holidays,
    /// Daily reference oil price series.
    Oil,
    /// Store metadata: city, state, type and cluster.
    Stores,
    /// Daily transaction counts per store.
    Transactions,
}

impl AuxiliaryTable {
    /// All tables in join order.
    pub const ALL: [AuxiliaryTable; 4] = [
        AuxiliaryTable::Holidays,
        AuxiliaryTable::Oil,
        AuxiliaryTable::Stores,
        AuxiliaryTable::Transactions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AuxiliaryTable::Holidays => "holidays",
            AuxiliaryTable::Oil => "oil",
            AuxiliaryTable::Stores => "stores",
            AuxiliaryTable::Transactions => "transactions",
        }
    }
}

impl fmt::Display for AuxiliaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a join treats right-hand rows that share the same key tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Emit one output row per matching right-hand row.
    #[default]
    FanOut,
    /// Keep only the first right-hand row for each key tuple.
    FirstMatch,
    /// Fail the join when the right-hand side has duplicate keys.
    Reject,
}

/// A single left join of the running result against one auxiliary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStep {
    pub table: AuxiliaryTable,
    pub keys: Vec<String>,
}

impl JoinStep {
    pub fn new<I, S>(table: AuxiliaryTable, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Options controlling how the primary frame is merged with its references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Name of the date key column.
    pub date_key: String,
    /// Name of the store identifier key column.
    pub store_key: String,
    /// Suffix for colliding non-key columns from the right-hand table.
    pub suffix: String,
    /// Treatment of duplicate right-hand keys.
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            date_key: DEFAULT_DATE_KEY.to_string(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            suffix: DEFAULT_JOIN_SUFFIX.to_string(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_key(mut self, key: impl Into<String>) -> Self {
        self.date_key = key.into();
        self
    }

    #[must_use]
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// The four join steps in the order they are applied.
    ///
    /// Holidays and oil join on the date, stores on the store identifier,
    /// and transactions on both.
    pub fn steps(&self) -> Vec<JoinStep> {
        vec![
            JoinStep::new(AuxiliaryTable::Holidays, [self.date_key.as_str()]),
            JoinStep::new(AuxiliaryTable::Oil, [self.date_key.as_str()]),
            JoinStep::new(AuxiliaryTable::Stores, [self.store_key.as_str()]),
            JoinStep::new(
                AuxiliaryTable::Transactions,
                [self.date_key.as_str(), self.store_key.as_str()],
            ),
        ]
    }
}

/// Options controlling the column summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOptions {
    /// Distinct values are listed only when a column has fewer than this many.
    pub unique_threshold: usize,
    /// Restrict the summary to these columns, in this order.
    pub column_subset: Option<Vec<String>>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            unique_threshold: DEFAULT_UNIQUE_THRESHOLD,
            column_subset: None,
        }
    }
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unique_threshold(mut self, threshold: usize) -> Self {
        self.unique_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_subset = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}
