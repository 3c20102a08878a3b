//! Integration tests for the full cleaning/deduplication pipeline.

use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};

use coalesce::{
    DataTable, Parser, Pipeline, PipelineConfig, RunReport, UnidentifiedPolicy,
};

/// Helper to create a temporary input file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const HEADER: &str =
    "SEQNO\tEMAIL\tFULLNAME\tMOBILE\tLAST_UPDATED\tISACTIVE\tOPTOUT_EMARKETING\tSUB1\tSUB2\tSALESNO\tADDRESS1";

fn run_pipeline(content: &str) -> (DataTable, RunReport, TempDir, PathBuf) {
    let file = create_test_file(content);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned.tsv");

    let report = Pipeline::new().run(file.path(), &out).expect("Run failed");
    let (table, _) = Parser::new().parse_file(&out).expect("Reading output failed");
    (table, report, dir, out)
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_case_variant_emails_merge_to_one_contact() {
    let content = format!(
        "{HEADER}\n\
         5\tJane.Doe@EXAMPLE.com\tjane doe\t\t2024-02-01\tY\tN\tY\t\t31\t\n\
         9\tjane.doe@example.com\tJane Doe\t(04) 1234-5678\t2023-02-01\t\t\t\tN\t31\t8 High St\n"
    );
    let (table, report, _dir, _) = run_pipeline(&content);

    assert_eq!(report.stats.contacts_out, 1);
    assert_eq!(table.row_count(), 1);

    let email_col = table.column_index("EMAIL").unwrap();
    assert_eq!(table.get(0, email_col), Some("jane.doe@example.com"));

    // Fields are combined across member rows.
    let mobile_col = table.column_index("MOBILE").unwrap();
    assert_eq!(table.get(0, mobile_col), Some("0412345678"));
    let addr_col = table.column_index("ADDRESS1").unwrap();
    assert_eq!(table.get(0, addr_col), Some("8 High St"));
}

#[test]
fn test_mobile_normalizes_to_digit_string() {
    let content = format!(
        "{HEADER}\n\
         1\tann@x.com\tAnn\t(04) 1234-5678\t2024-01-01\tY\tN\t\t\t\t\n"
    );
    let (table, _, _dir, _) = run_pipeline(&content);
    let mobile_col = table.column_index("MOBILE").unwrap();
    assert_eq!(table.get(0, mobile_col), Some("0412345678"));
}

#[test]
fn test_isactive_yes_becomes_null() {
    let content = format!(
        "{HEADER}\n\
         1\tann@x.com\tAnn\t\t2024-01-01\tyes\tN\t\t\t\t\n"
    );
    let (table, report, _dir, _) = run_pipeline(&content);
    let col = table.column_index("ISACTIVE").unwrap();
    assert_eq!(table.get(0, col), Some(""));
    assert_eq!(report.stats.nulled_by_column.get("ISACTIVE"), Some(&1));
}

#[test]
fn test_fallback_key_merge_and_seqno_reassignment() {
    let content = format!(
        "{HEADER}\n\
         917\tfirst@x.com\tOther Person\t\t2024-01-01\tY\tN\t\t\t\t\n\
         403\t\tAnn Lee\t0412345678\t2024-01-02\tY\tN\t\t\t\t\n\
         558\t\tann lee\t04 1234 5678\t2023-06-06\tN\tN\t\t\t\t\n"
    );
    let (table, report, _dir, _) = run_pipeline(&content);

    // Rows 2 and 3 share (fullname, mobile) after normalization.
    assert_eq!(report.stats.contacts_out, 2);
    assert_eq!(report.stats.fallback_key_rows, 2);

    // SEQNO reflects output position, not the original values.
    let seq_col = table.column_index("SEQNO").unwrap();
    let seqnos: Vec<_> = table.column_values(seq_col).collect();
    assert_eq!(seqnos, vec!["1", "2"]);
}

#[test]
fn test_missing_input_reports_path_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned.tsv");
    let err = Pipeline::new()
        .run("/data/expected/contacts.tsv", &out)
        .unwrap_err();
    assert!(err.to_string().contains("/data/expected/contacts.tsv"));
    assert!(!out.exists());
}

// =============================================================================
// Invariant Tests
// =============================================================================

#[test]
fn test_flag_columns_only_y_n_or_null() {
    let content = format!(
        "{HEADER}\n\
         1\ta@x.com\tAnn\t\t2024-01-01\tyes\ttrue\ty\tmaybe\t\t\n\
         2\tb@x.com\tBob\t\t2024-01-01\tn\tFALSE\t1\tN\t\t\n\
         3\tc@x.com\tCal\t\t2024-01-01\tY\t0\t\tno\t\t\n"
    );
    let (table, _, _dir, _) = run_pipeline(&content);

    for name in ["ISACTIVE", "OPTOUT_EMARKETING", "SUB1", "SUB2"] {
        let col = table.column_index(name).unwrap();
        for value in table.column_values(col) {
            assert!(
                matches!(value, "Y" | "N" | ""),
                "{name} contained {value:?}"
            );
        }
    }
}

#[test]
fn test_seqno_is_dense_one_to_n() {
    let content = format!(
        "{HEADER}\n\
         40\ta@x.com\tAnn\t\t2024-01-01\tY\tN\t\t\t\t\n\
         90\tb@x.com\tBob\t\t2024-01-01\tY\tN\t\t\t\t\n\
         90\tb@x.com\tBob\t\t2024-01-02\tY\tN\t\t\t\t\n\
         12\tc@x.com\tCal\t\t2024-01-01\tY\tN\t\t\t\t\n"
    );
    let (table, _, _dir, _) = run_pipeline(&content);

    let seq_col = table.column_index("SEQNO").unwrap();
    let seqnos: Vec<_> = table.column_values(seq_col).collect();
    let expected: Vec<String> = (1..=table.row_count()).map(|n| n.to_string()).collect();
    assert_eq!(seqnos, expected);
}

#[test]
fn test_grouping_is_transitive() {
    // A and B share an email, and B and C share it too: all three end up in
    // one canonical row.
    let content = format!(
        "{HEADER}\n\
         1\tSAME@X.COM\tAnn\t\t2024-01-01\tY\tN\t\t\t\t\n\
         2\tsame@x.com\tAnnabel\t\t2024-01-02\tY\tN\t\t\t\t\n\
         3\tSame@x.Com\tAnnabel Lee\t\t2024-01-03\tY\tN\t\t\t\t\n"
    );
    let (_, report, _dir, _) = run_pipeline(&content);
    assert_eq!(report.stats.contacts_out, 1);
}

#[test]
fn test_no_fabricated_values() {
    let content = format!(
        "{HEADER}\n\
         1\tann@x.com\tAnn Lee\t0412345678\t2024-01-01\tY\tN\t\t\tlot-44\t12 Smith St\n\
         2\tann@x.com\tAnn Lee-Smith\t\t2023-01-01\tN\tY\tY\tN\t\t\n"
    );
    let file = create_test_file(&content);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned.tsv");
    Pipeline::new().run(file.path(), &out).unwrap();

    // Re-derive the normalized member rows and check every output cell
    // (except the resequenced SEQNO) appears verbatim in one of them.
    let (raw, _) = Parser::new().parse_file(file.path()).unwrap();
    let (normalized, _) = coalesce::Normalizer::new(Default::default()).normalize_table(&raw);
    let (output, _) = Parser::new().parse_file(&out).unwrap();

    assert_eq!(output.row_count(), 1);
    for (col, name) in output.headers.iter().enumerate() {
        if name == "SEQNO" {
            continue;
        }
        let value = output.get(0, col).unwrap();
        if value.is_empty() {
            continue;
        }
        let found = (0..normalized.row_count()).any(|row| normalized.get(row, col) == Some(value));
        assert!(found, "output value {value:?} in {name} was fabricated");
    }
}

#[test]
fn test_idempotent_on_own_output() {
    let content = format!(
        "{HEADER}\n\
         7\tJane.Doe@EXAMPLE.com\tjane   doe\t(04) 1234-5678\t19/03/2024 09:15\tY\tno\tY\t\t31\t 8 High St \n\
         2\t\tBob o'brien\t0499 999 999\t2023-01-05\t\tN\t\tN\t\tPO Box 7\n\
         4\t\t\t\t\t\t\t\t\t\t\n"
    );
    let (first, _, _dir, out) = run_pipeline(&content);

    let second_out = out.with_file_name("cleaned_again.tsv");
    Pipeline::new().run(&out, &second_out).unwrap();
    let (second, _) = Parser::new().parse_file(&second_out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unidentified_rows_merge_under_legacy_policy() {
    let content = format!(
        "{HEADER}\n\
         1\t\t\t\t2024-01-01\tY\tN\t\t\t\t\n\
         2\t\t\t\t2024-01-02\tY\tN\t\t\t\t\n"
    );
    let file = create_test_file(&content);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned.tsv");

    let config = PipelineConfig {
        unidentified: UnidentifiedPolicy::MergeAll,
        ..Default::default()
    };
    let report = Pipeline::with_config(config).run(file.path(), &out).unwrap();

    assert_eq!(report.stats.contacts_out, 1);
    assert_eq!(report.stats.unidentified_rows, 2);
}

#[test]
fn test_integer_columns_pass_through() {
    let content = format!(
        "{HEADER}\n\
         1\tann@x.com\tAnn\t\t2024-01-01\tY\tN\t\t\tACC-0042\t\n"
    );
    let (table, _, _dir, _) = run_pipeline(&content);
    let col = table.column_index("SALESNO").unwrap();
    assert_eq!(table.get(0, col), Some("ACC-0042"));
}

#[test]
fn test_most_recent_row_wins_flag_conflicts() {
    // Both rows carry a one-character flag; the most recently updated row's
    // value is taken on length ties.
    let content = format!(
        "{HEADER}\n\
         1\tann@x.com\tAnn\t\t2020-01-01\tN\tN\t\t\t\t\n\
         2\tann@x.com\tAnn\t\t2024-01-01\tY\tN\t\t\t\t\n"
    );
    let (table, _, _dir, _) = run_pipeline(&content);
    let col = table.column_index("ISACTIVE").unwrap();
    assert_eq!(table.get(0, col), Some("Y"));
}
