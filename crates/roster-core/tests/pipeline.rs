use std::fs;
use std::path::PathBuf;

use roster_parser::parse_table;
use roster_core::{
    canonical_field_specs, normalize, resolve, run, run_file, run_with, CanonicalField,
    CanonicalRecord, RawRow, RosterError, RowFilter, TableError, OUTPUT_HEADER,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../roster-parser/tests/data")
        .join(name)
}

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs.iter().copied().collect()
}

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn keeps_only_rows_with_a_theme() {
    init_test_logging();
    let rows = vec![
        row(&[
            ("Trick-or-Treat Name", "Spooky Town"),
            ("Address ", "12 Elm St"),
            ("Household Name", "Smith"),
        ]),
        row(&[
            ("Trick-or-Treat Name", "  "),
            ("Address", "9 Oak Ave"),
            ("Household Name", "Lee"),
        ]),
    ];

    let output = run(&rows);

    assert_eq!(
        output.records,
        vec![CanonicalRecord {
            theme: "Spooky Town".into(),
            address: "12 Elm St".into(),
            household: "Smith".into(),
        }]
    );
    assert_eq!(output.summary.rows_parsed, 2);
    assert_eq!(output.summary.rows_retained, 1);
    assert_eq!(output.summary.rejected.get("missing_theme"), Some(&1));
}

#[test]
fn empty_input_is_an_empty_table() {
    let output = run(&[]);
    assert!(output.records.is_empty());
    assert_eq!(output.summary.rows_parsed, 0);
    assert_eq!(output.summary.rows_retained, 0);
    assert!(output.summary.columns.is_empty());
}

#[test]
fn preserves_source_order() {
    let rows: Vec<RawRow> = ["Ghosts", "", "Bats", "Witches", " "]
        .iter()
        .map(|theme| row(&[("Trick or Treat Name", *theme)]))
        .collect();
    let themes: Vec<_> = run(&rows)
        .records
        .into_iter()
        .map(|record| record.theme)
        .collect();
    assert_eq!(themes, ["Ghosts", "Bats", "Witches"]);
}

#[test]
fn normalize_is_total_for_keys_that_do_not_exist() {
    let keys = resolve(["Nothing", "Useful"], canonical_field_specs());
    for raw in [
        RawRow::default(),
        row(&[("Theme", " Pirates ")]),
        row(&[("Nothing", "x"), ("Useful", "y")]),
    ] {
        let record = normalize(&raw, &keys);
        for field in CanonicalField::ALL {
            assert_eq!(record.get(field), record.get(field).trim());
        }
    }
    // "Theme" is the declared fallback column for the theme field.
    assert_eq!(normalize(&row(&[("Theme", " Pirates ")]), &keys).theme, "Pirates");
}

#[test]
fn normalizing_a_canonical_record_is_idempotent() {
    let raw = row(&[
        ("Household Name", "  Garcia Family "),
        ("Trick-or-Treat Name", " Candy Land"),
        ("Address", "87 Wren Ct  "),
    ]);
    let keys = resolve(raw.keys(), canonical_field_specs());
    let once = normalize(&raw, &keys);

    let canonical_row: RawRow = CanonicalField::ALL
        .iter()
        .map(|field| (field.header(), once.get(*field)))
        .collect();
    let canonical_keys = resolve(canonical_row.keys(), canonical_field_specs());
    let twice = normalize(&canonical_row, &canonical_keys);

    assert_eq!(once, twice);
}

#[test]
fn header_is_resolved_once_from_the_first_row() {
    let rows = vec![
        row(&[("Trick-or-Treat Name", "Ghosts"), ("Household Name", "Ito")]),
        // drifted header in a later row is not re-resolved
        row(&[("Trick or Treat Name", "Bats"), ("Household Name", "Ruiz")]),
    ];
    let output = run(&rows);
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].theme, "Ghosts");

    let theme = &output.summary.columns[0];
    assert_eq!(theme.field, "Trick-or-Treat Name");
    assert_eq!(theme.column, "Trick-or-Treat Name");
    assert!(theme.matched);
    let address = &output.summary.columns[1];
    assert_eq!(address.column, "Address");
    assert!(!address.matched);
}

#[test]
fn custom_filters_do_not_change_the_call_site() {
    let rows = vec![row(&[("Trick-or-Treat Name", "")])];
    assert_eq!(run_with(&rows, canonical_field_specs(), &RowFilter::empty()).records.len(), 1);
    assert_eq!(
        run_with(&rows, canonical_field_specs(), &RowFilter::default()).records.len(),
        0
    );
}

#[test]
fn run_file_normalizes_a_registration_export() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("data/participants.csv");

    let output = run_file(&fixture_path("registrations.csv"), &output_path).unwrap();

    assert_eq!(output.summary.rows_parsed, 4);
    assert_eq!(output.summary.rows_retained, 3);

    let written = fs::read_to_string(&output_path).unwrap();
    let expected = [
        OUTPUT_HEADER.join(","),
        "Haunted Pirate Cove,412 Red Bird Ln,The Hendersons".to_string(),
        "Candy Land,87 Wren Ct,Garcia Family".to_string(),
        "\"The \"\"Spooky\"\" Swamp\",\"5 Lark St, Unit B\",\"ONeil, Pat\"".to_string(),
    ]
    .join("\n")
        + "\n";
    assert_eq!(written, expected);
}

#[test]
fn run_file_handles_drifted_headers() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("participants.csv");

    let output = run_file(&fixture_path("drifted_headers.csv"), &output_path).unwrap();

    let households: Vec<_> = output
        .records
        .iter()
        .map(|record| record.household.as_str())
        .collect();
    assert_eq!(households, ["Nguyen", "", "Kim"]);
    assert_eq!(output.records[1].address, "22 Heron Pl");
}

#[test]
fn short_first_row_does_not_blank_later_columns() {
    let table = parse_table(
        "Trick-or-Treat Name,Address,Household Name\nGhosts,1 Main St\nBats,2 Oak Ave,Ruiz\n",
    )
    .unwrap();

    let output = run(&table.rows);

    let households: Vec<_> = output
        .records
        .iter()
        .map(|record| record.household.as_str())
        .collect();
    assert_eq!(households, ["", "Ruiz"]);
    let household = &output.summary.columns[2];
    assert_eq!(household.column, "Household Name");
    assert!(household.matched);
}

#[test]
fn read_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("participants.csv");

    let err = run_file(&dir.path().join("missing.csv"), &output_path).unwrap_err();

    assert!(matches!(
        err,
        RosterError::Table(TableError::SourceRead { .. })
    ));
    assert!(!output_path.exists());
}

#[test]
fn summary_serializes_for_reporting() {
    let rows = vec![row(&[("Trick-or-Treat Name", "Ghosts")])];
    let summary = serde_json::to_value(run(&rows).summary).unwrap();
    assert_eq!(summary["rows_parsed"], 1);
    assert_eq!(summary["rows_retained"], 1);
    assert_eq!(summary["columns"][2]["column"], "Name");
}
