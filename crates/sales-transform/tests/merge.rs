//! Integration tests for merging reference tables.

use polars::df;
use polars::prelude::DataFrame;

use sales_model::{AuxiliaryTable, DuplicateKeyPolicy, JoinStep, MergeOptions};
use sales_transform::{AuxiliaryTables, JoinSide, MergeError, left_join, merge_frames};

fn train() -> DataFrame {
    df! {
        "date" => &["2017-01-02", "2017-01-01", "2017-01-03", "2017-01-01"],
        "store_nbr" => &[1i64, 1, 2, 3],
        "sales" => &[10.0, 20.0, 30.0, 40.0],
    }
    .unwrap()
}

fn holidays() -> DataFrame {
    df! {
        "date" => &["2017-01-01", "2017-01-02"],
        "type" => &["Holiday", "Transfer"],
    }
    .unwrap()
}

fn oil() -> DataFrame {
    df! {
        "date" => &["2017-01-02", "2017-01-03"],
        "dcoilwtico" => &[Some(52.36), None],
    }
    .unwrap()
}

fn stores() -> DataFrame {
    df! {
        "store_nbr" => &[1i64, 2],
        "city" => &["Quito", "Guayaquil"],
        "type" => &["D", "B"],
    }
    .unwrap()
}

fn transactions() -> DataFrame {
    df! {
        "date" => &["2017-01-01", "2017-01-03"],
        "store_nbr" => &[1i64, 2],
        "transactions" => &[770i64, 1500],
    }
    .unwrap()
}

fn merge_with(
    holidays: &DataFrame,
    stores: &DataFrame,
    options: &MergeOptions,
) -> Result<DataFrame, MergeError> {
    let oil = oil();
    let transactions = transactions();
    let tables = AuxiliaryTables {
        holidays,
        oil: &oil,
        stores,
        transactions: &transactions,
    };
    merge_frames(&train(), &tables, options)
}

#[test]
fn merge_keeps_every_primary_row() {
    let merged = merge_with(&holidays(), &stores(), &MergeOptions::default()).unwrap();
    assert_eq!(merged.height(), 4);
}

#[test]
fn merge_appends_reference_columns_in_join_order() {
    let merged = merge_with(&holidays(), &stores(), &MergeOptions::default()).unwrap();
    assert_eq!(
        merged.get_column_names_str(),
        vec![
            "date",
            "store_nbr",
            "sales",
            "type",
            "dcoilwtico",
            "city",
            "type_right",
            "transactions",
        ]
    );
}

#[test]
fn merge_preserves_primary_row_order() {
    let merged = merge_with(&holidays(), &stores(), &MergeOptions::default()).unwrap();
    let sales: Vec<Option<f64>> = merged
        .column("sales")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(sales, vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]);
}

#[test]
fn unmatched_rows_get_null_reference_columns() {
    let merged = merge_with(&holidays(), &stores(), &MergeOptions::default()).unwrap();

    // Row 2: 2017-01-03 has no holiday; store 3 (row 3) has no metadata.
    let holiday_type = merged.column("type").unwrap().str().unwrap();
    assert_eq!(holiday_type.get(2), None);
    assert_eq!(holiday_type.get(1), Some("Holiday"));

    let city = merged.column("city").unwrap().str().unwrap();
    assert_eq!(city.get(3), None);
    assert_eq!(city.get(2), Some("Guayaquil"));

    // Primary values are untouched for unmatched rows.
    let stores = merged.column("store_nbr").unwrap().i64().unwrap();
    assert_eq!(stores.get(3), Some(3));

    let transactions = merged.column("transactions").unwrap().i64().unwrap();
    assert_eq!(transactions.get(0), None);
    assert_eq!(transactions.get(1), Some(770));
    assert_eq!(transactions.get(2), Some(1500));
}

#[test]
fn duplicate_keys_fan_out_by_default() {
    let holidays = df! {
        "date" => &["2017-01-01", "2017-01-01", "2017-01-02"],
        "type" => &["Holiday", "Event", "Transfer"],
    }
    .unwrap();
    let merged = merge_with(&holidays, &stores(), &MergeOptions::default()).unwrap();

    // Two primary rows fall on 2017-01-01, each matching two holiday rows.
    assert_eq!(merged.height(), 6);
}

#[test]
fn duplicate_keys_first_match_keeps_row_count() {
    let holidays = df! {
        "date" => &["2017-01-01", "2017-01-01", "2017-01-02"],
        "type" => &["Holiday", "Event", "Transfer"],
    }
    .unwrap();
    let options = MergeOptions::default().with_duplicate_keys(DuplicateKeyPolicy::FirstMatch);
    let merged = merge_with(&holidays, &stores(), &options).unwrap();

    assert_eq!(merged.height(), 4);
    let holiday_type = merged.column("type").unwrap().str().unwrap();
    assert_eq!(holiday_type.get(1), Some("Holiday"));
}

#[test]
fn duplicate_keys_rejected_when_configured() {
    let holidays = df! {
        "date" => &["2017-01-01", "2017-01-01"],
        "type" => &["Holiday", "Event"],
    }
    .unwrap();
    let options = MergeOptions::default().with_duplicate_keys(DuplicateKeyPolicy::Reject);
    let result = merge_with(&holidays, &stores(), &options);

    assert!(matches!(
        result,
        Err(MergeError::DuplicateKeys {
            table: AuxiliaryTable::Holidays,
            duplicates: 1,
            ..
        })
    ));
}

#[test]
fn null_store_keys_are_not_duplicates() {
    let stores = df! {
        "store_nbr" => &[None, None, Some(1i64)],
        "city" => &["Ambato", "Cuenca", "Quito"],
        "type" => &["A", "C", "D"],
    }
    .unwrap();
    let options = MergeOptions::default().with_duplicate_keys(DuplicateKeyPolicy::Reject);
    let merged = merge_with(&holidays(), &stores, &options).unwrap();

    assert_eq!(merged.height(), 4);
    let city = merged.column("city").unwrap().str().unwrap();
    assert_eq!(city.get(0), Some("Quito"));
    assert_eq!(city.get(2), None);
}

#[test]
fn missing_key_column_is_an_error_not_a_panic() {
    let stores = df! {
        "store" => &[1i64, 2],
        "city" => &["Quito", "Guayaquil"],
    }
    .unwrap();
    let result = merge_with(&holidays(), &stores, &MergeOptions::default());

    match result {
        Err(MergeError::MissingKey {
            table,
            side,
            column,
        }) => {
            assert_eq!(table, AuxiliaryTable::Stores);
            assert_eq!(side, JoinSide::Right);
            assert_eq!(column, "store_nbr");
        }
        other => panic!("expected missing key error, got {other:?}"),
    }
}

#[test]
fn key_type_mismatch_is_reported() {
    let stores = df! {
        "store_nbr" => &["1", "2"],
        "city" => &["Quito", "Guayaquil"],
    }
    .unwrap();
    let result = merge_with(&holidays(), &stores, &MergeOptions::default());

    assert!(matches!(
        result,
        Err(MergeError::KeyTypeMismatch {
            table: AuxiliaryTable::Stores,
            ..
        })
    ));
}

#[test]
fn custom_key_names_are_used() {
    let primary = df! {
        "day" => &["2017-01-01"],
        "value" => &[1i64],
    }
    .unwrap();
    let oil = df! {
        "day" => &["2017-01-01"],
        "dcoilwtico" => &[50.0],
    }
    .unwrap();
    let options = MergeOptions::default().with_date_key("day");
    let step = JoinStep::new(AuxiliaryTable::Oil, [options.date_key.as_str()]);

    let joined = left_join(&primary, &oil, &step, &options).unwrap();
    let price = joined.column("dcoilwtico").unwrap().f64().unwrap();
    assert_eq!(price.get(0), Some(50.0));
}

#[test]
fn inputs_are_not_mutated() {
    let primary = train();
    let holidays = holidays();
    let stores = stores();
    let oil = oil();
    let transactions = transactions();
    let tables = AuxiliaryTables {
        holidays: &holidays,
        oil: &oil,
        stores: &stores,
        transactions: &transactions,
    };

    merge_frames(&primary, &tables, &MergeOptions::default()).unwrap();

    assert_eq!(primary.width(), 3);
    assert_eq!(primary.height(), 4);
    assert_eq!(holidays.width(), 2);
}
