//! Column summary records produced by the profiler.

use serde::{Deserialize, Serialize};

/// Descriptive statistics for a numeric column.
///
/// Every field is `None` when the column has no non-null values. Values are
/// computed in `f64`, so integers beyond 2^53 come back rounded to the
/// nearest representable float; `unique_values` keeps their exact text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    /// Sample standard deviation (ddof = 1), rounded to 2 decimals.
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Broad classification of a column's storage type.
///
/// Statistics only exist for the numeric variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "stats", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer, float or boolean storage.
    Numeric(NumericStats),
    /// Date, datetime, duration or time storage.
    Temporal,
    /// String storage (free text or categorical codes).
    Text,
    /// Anything else (nested, binary, all-null).
    Other,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric(_) => "numeric",
            ColumnKind::Temporal => "temporal",
            ColumnKind::Text => "text",
            ColumnKind::Other => "other",
        }
    }
}

/// One row of the profile: everything known about a single input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Storage type as reported by the dataframe engine.
    pub dtype: String,
    /// Number of non-null values. Float NaN counts as null.
    pub count: usize,
    #[serde(flatten)]
    pub kind: ColumnKind,
    /// Number of distinct non-null values.
    pub nunique: usize,
    /// Distinct non-null values in order of first appearance; empty when
    /// `nunique` reaches the threshold. Nulls are never listed, even when
    /// the column has some; see `num_null_values`.
    pub unique_values: Vec<String>,
    pub num_null_values: usize,
    /// Percentage of null values, rounded to 2 decimals.
    pub null_perct: f64,
}

impl ColumnSummary {
    /// Statistics for numeric columns.
    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.kind {
            ColumnKind::Numeric(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Summary table for a whole frame, one record per profiled column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameProfile {
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
}

impl FrameProfile {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|summary| summary.column == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|summary| summary.column.as_str())
            .collect()
    }

    pub fn numeric_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|summary| summary.kind.is_numeric())
            .count()
    }
}

/// Round to 2 decimal places.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of null values as a percentage, rounded to 2 decimals.
///
/// An empty frame reports 0.0.
pub fn null_percentage(null_count: usize, row_count: usize) -> f64 {
    if row_count == 0 {
        return 0.0;
    }
    round_hundredths(null_count as f64 / row_count as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_percentage_rounds() {
        assert_eq!(null_percentage(3, 10), 30.0);
        assert_eq!(null_percentage(1, 3), 33.33);
        assert_eq!(null_percentage(2, 3), 66.67);
    }

    #[test]
    fn null_percentage_of_empty_frame_is_zero() {
        assert_eq!(null_percentage(0, 0), 0.0);
    }

    #[test]
    fn numeric_accessor_only_for_numeric_kind() {
        let mut summary = ColumnSummary {
            column: "family".to_string(),
            dtype: "str".to_string(),
            count: 2,
            kind: ColumnKind::Text,
            nunique: 2,
            unique_values: vec!["BREAD".to_string(), "DAIRY".to_string()],
            num_null_values: 0,
            null_perct: 0.0,
        };
        assert!(summary.numeric().is_none());

        summary.kind = ColumnKind::Numeric(NumericStats {
            mean: Some(1.5),
            ..NumericStats::default()
        });
        assert_eq!(summary.numeric().and_then(|stats| stats.mean), Some(1.5));
    }

    #[test]
    fn summary_serializes_with_kind_tag() {
        let summary = ColumnSummary {
            column: "sales".to_string(),
            dtype: "f64".to_string(),
            count: 1,
            kind: ColumnKind::Numeric(NumericStats {
                mean: Some(2.0),
                q25: Some(2.0),
                ..NumericStats::default()
            }),
            nunique: 1,
            unique_values: vec!["2".to_string()],
            num_null_values: 0,
            null_perct: 0.0,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["kind"], "numeric");
        assert_eq!(value["stats"]["25%"], 2.0);
        assert_eq!(value["column"], "sales");
    }
}
