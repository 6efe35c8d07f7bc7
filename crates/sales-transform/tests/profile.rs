//! Integration tests for column profiling.

use polars::df;
use polars::prelude::DataFrame;

use sales_model::{ColumnKind, ProfileOptions};
use sales_transform::{ProfileError, profile_frame, summary_frame};

fn sales_frame() -> DataFrame {
    df! {
        "store_nbr" => &[1i64, 2, 3, 4],
        "family" => &["BREAD", "DAIRY", "BREAD", "EGGS"],
        "sales" => &[Some(1.0), Some(2.0), None, Some(4.0)],
    }
    .unwrap()
}

#[test]
fn profile_has_one_record_per_column_in_order() {
    let profile = profile_frame(&sales_frame(), &ProfileOptions::default()).unwrap();

    assert_eq!(profile.len(), 3);
    assert_eq!(profile.column_names(), vec!["store_nbr", "family", "sales"]);
    assert_eq!(profile.row_count, 4);
}

#[test]
fn numeric_column_statistics() {
    let profile = profile_frame(&sales_frame(), &ProfileOptions::default()).unwrap();
    let store = profile.column("store_nbr").unwrap();
    let stats = store.numeric().unwrap();

    assert_eq!(store.dtype, "i64");
    assert_eq!(store.count, 4);
    assert_eq!(stats.mean, Some(2.5));
    assert_eq!(stats.min, Some(1.0));
    assert_eq!(stats.max, Some(4.0));
    assert_eq!(stats.q25, Some(1.75));
    assert_eq!(stats.median, Some(2.5));
    assert_eq!(stats.q75, Some(3.25));
    assert_eq!(stats.std, Some(1.29));
    assert_eq!(store.num_null_values, 0);
    assert_eq!(store.null_perct, 0.0);
}

#[test]
fn text_column_has_no_statistics() {
    let profile = profile_frame(&sales_frame(), &ProfileOptions::default()).unwrap();
    let family = profile.column("family").unwrap();

    assert_eq!(family.kind, ColumnKind::Text);
    assert!(family.numeric().is_none());
    assert_eq!(family.nunique, 3);
    assert_eq!(family.unique_values, vec!["BREAD", "DAIRY", "EGGS"]);
}

#[test]
fn unique_values_respect_threshold() {
    let options = ProfileOptions::default().with_unique_threshold(2);
    let profile = profile_frame(&sales_frame(), &options).unwrap();
    let family = profile.column("family").unwrap();

    assert_eq!(family.nunique, 3);
    assert!(family.unique_values.is_empty());
}

#[test]
fn threshold_is_exclusive() {
    let options = ProfileOptions::default().with_unique_threshold(3);
    let profile = profile_frame(&sales_frame(), &options).unwrap();

    // nunique == threshold is not listed; sales has 3 distinct non-null values.
    assert!(profile.column("family").unwrap().unique_values.is_empty());
    assert!(profile.column("sales").unwrap().unique_values.is_empty());
}

#[test]
fn null_percentage_three_of_ten() {
    let df = df! {
        "onpromotion" => &[
            Some(1i64), None, Some(3), None, Some(5),
            Some(6), None, Some(8), Some(9), Some(10),
        ],
    }
    .unwrap();
    let profile = profile_frame(&df, &ProfileOptions::default()).unwrap();
    let summary = profile.column("onpromotion").unwrap();

    assert_eq!(summary.count, 7);
    assert_eq!(summary.num_null_values, 3);
    assert_eq!(summary.null_perct, 30.0);
}

#[test]
fn nulls_are_excluded_from_statistics_and_distinct_values() {
    let profile = profile_frame(&sales_frame(), &ProfileOptions::default()).unwrap();
    let sales = profile.column("sales").unwrap();
    let stats = sales.numeric().unwrap();

    assert_eq!(sales.count, 3);
    assert_eq!(sales.nunique, 3);
    assert_eq!(sales.unique_values, vec!["1", "2", "4"]);
    assert_eq!(stats.max, Some(4.0));
    assert_eq!(sales.null_perct, 25.0);
}

#[test]
fn column_subset_controls_order() {
    let options = ProfileOptions::default().with_columns(["sales", "store_nbr"]);
    let profile = profile_frame(&sales_frame(), &options).unwrap();

    assert_eq!(profile.column_names(), vec!["sales", "store_nbr"]);
}

#[test]
fn unknown_column_is_an_error_not_a_panic() {
    let options = ProfileOptions::default().with_columns(["transactions"]);
    let result = profile_frame(&sales_frame(), &options);

    assert!(matches!(
        result,
        Err(ProfileError::ColumnNotFound { column }) if column == "transactions"
    ));
}

#[test]
fn zero_threshold_is_rejected() {
    let options = ProfileOptions::default().with_unique_threshold(0);
    let result = profile_frame(&sales_frame(), &options);

    assert!(matches!(result, Err(ProfileError::InvalidThreshold)));
}

#[test]
fn empty_frame_reports_zero_null_percentage() {
    let df = df! { "sales" => Vec::<f64>::new() }.unwrap();
    let profile = profile_frame(&df, &ProfileOptions::default()).unwrap();
    let sales = profile.column("sales").unwrap();

    assert_eq!(profile.row_count, 0);
    assert_eq!(sales.count, 0);
    assert_eq!(sales.null_perct, 0.0);
}

#[test]
fn summary_frame_has_expected_shape() {
    let profile = profile_frame(&sales_frame(), &ProfileOptions::default()).unwrap();
    let frame = summary_frame(&profile).unwrap();

    assert_eq!(frame.height(), 3);
    assert_eq!(
        frame.get_column_names_str(),
        vec![
            "column",
            "dtype",
            "count",
            "mean",
            "std",
            "min",
            "25%",
            "50%",
            "75%",
            "max",
            "nunique",
            "unique_values",
            "num_null_values",
            "null_perct",
        ]
    );

    let mean = frame.column("mean").unwrap().f64().unwrap();
    assert_eq!(mean.get(0), Some(2.5));
    assert_eq!(mean.get(1), None);

    let null_perct = frame.column("null_perct").unwrap().f64().unwrap();
    assert_eq!(null_perct.get(2), Some(25.0));
}
