//! Integration tests for the parts CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a parts command isolated from the user's environment
fn parts(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("parts").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("PARTS_DB")
        .env_remove("PARTS_FORMAT")
        .env_remove("PARTS_LOG");
    cmd
}

/// Helper to create an empty catalog in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    parts(&tmp).arg("init").assert().success();
    tmp
}

/// Helper to create a catalog seeded with the sample parts
fn setup_sample_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    parts(&tmp).args(["init", "--sample"]).assert().success();
    tmp
}

/// Identities of the current view, in display order
fn list_ids(tmp: &TempDir) -> Vec<String> {
    let output = parts(tmp).args(["list", "-f", "id"]).output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    parts(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parts Catalog"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    parts(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parts"));
}

#[test]
fn test_list_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    parts(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a parts catalog"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    parts(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parts"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = setup_test_project();
    assert!(tmp.path().join(".parts").is_dir());
    assert!(tmp.path().join(".parts/config.yaml").is_file());
    assert!(tmp.path().join(".parts/parts.db").is_file());
}

#[test]
fn test_init_twice_reports_existing() {
    let tmp = setup_test_project();
    parts(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_sample_seeds_catalog() {
    let tmp = setup_sample_project();
    assert_eq!(
        list_ids(&tmp),
        vec![
            "PN001:A", "PN002:B", "PN003:A", "PN004:C", "PN005:A", "PN006:A", "PN007:B",
            "PN101:1"
        ]
    );
}

// ============================================================================
// View Tests (filter / sort / reset)
// ============================================================================

#[test]
fn test_list_empty_catalog() {
    let tmp = setup_test_project();
    parts(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No parts found."));
}

#[test]
fn test_filter_is_case_insensitive_and_persists() {
    let tmp = setup_sample_project();

    parts(&tmp)
        .args(["filter", "--description", "BRACKET", "-f", "id"])
        .assert()
        .success()
        .stdout("PN006:A\nPN007:B\n");

    // The filter is remembered by later listings
    assert_eq!(list_ids(&tmp), vec!["PN006:A", "PN007:B"]);
}

#[test]
fn test_filter_terms_combine_with_and() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args([
            "filter",
            "--where-used",
            "assy-101",
            "--revision",
            "b",
            "-f",
            "id",
        ])
        .assert()
        .success()
        .stdout("PN007:B\n");
}

#[test]
fn test_filter_on_absent_folder_excludes_record() {
    let tmp = setup_sample_project();
    let output = parts(&tmp)
        .args(["filter", "--folder-path", "C", "-f", "id"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("PN004:C"));
    assert!(stdout.contains("PN001:A"));
}

#[test]
fn test_sort_toggles_direction() {
    let tmp = setup_sample_project();

    // Already sorted by part number: selecting it again reverses
    parts(&tmp)
        .args(["sort", "part-number", "-f", "id"])
        .assert()
        .success();
    let ids = list_ids(&tmp);
    assert_eq!(ids.first().map(String::as_str), Some("PN101:1"));
    assert_eq!(ids.last().map(String::as_str), Some("PN001:A"));

    parts(&tmp).args(["sort", "part-number", "-f", "id"]).assert().success();
    assert_eq!(list_ids(&tmp).first().map(String::as_str), Some("PN001:A"));
}

#[test]
fn test_sort_new_key_is_ascending() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["sort", "revision", "-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revision ↑"));

    let ids = list_ids(&tmp);
    assert_eq!(ids.first().map(String::as_str), Some("PN101:1"));
}

#[test]
fn test_reset_clears_filter_and_sort() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["filter", "--status", "obsolete", "-f", "id"])
        .assert()
        .success()
        .stdout("PN004:C\n");
    parts(&tmp).args(["sort", "status", "-f", "id"]).assert().success();

    parts(&tmp).args(["reset", "-f", "id"]).assert().success();
    let ids = list_ids(&tmp);
    assert_eq!(ids.len(), 8);
    assert_eq!(ids[0], "PN001:A");
}

// ============================================================================
// Record Tests (new / edit / show / delete)
// ============================================================================

#[test]
fn test_new_and_show_part() {
    let tmp = setup_test_project();
    parts(&tmp)
        .args([
            "new",
            "PN500",
            "A",
            "--description",
            "Hex Bolt M6",
            "--status",
            "new",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created part PN500:A"));

    parts(&tmp)
        .args(["show", "PN500", "A", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"Hex Bolt M6\""))
        .stdout(predicate::str::contains("\"status\": \"New\""));
}

#[test]
fn test_new_duplicate_identity_fails() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["new", "PN001", "A", "--description", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Existing record is untouched
    parts(&tmp)
        .args(["show", "PN001", "A", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget Assembly Base Unit"));
}

#[test]
fn test_new_requires_identity() {
    let tmp = setup_test_project();
    parts(&tmp)
        .args(["new", "  ", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_edit_keeps_unset_fields() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["edit", "PN002", "B", "--status", "obsolete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated part PN002:B"));

    parts(&tmp)
        .args(["show", "PN002", "B", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Control Module v2"))
        .stdout(predicate::str::contains("\"status\": \"Obsolete\""));
}

#[test]
fn test_edit_missing_part_fails() {
    let tmp = setup_test_project();
    parts(&tmp)
        .args(["edit", "NOPE", "A", "--description", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_delete_removes_only_named_revision() {
    let tmp = setup_sample_project();
    parts(&tmp).args(["new", "PN001", "B"]).assert().success();

    parts(&tmp)
        .args(["delete", "PN001:A", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 of 1"));

    let ids = list_ids(&tmp);
    assert!(!ids.contains(&"PN001:A".to_string()));
    assert!(ids.contains(&"PN001:B".to_string()));
}

#[test]
fn test_delete_nonexistent_is_noop() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["delete", "GHOST:Z", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 of 1"));
    assert_eq!(list_ids(&tmp).len(), 8);
}

#[test]
fn test_delete_revision_containing_colon() {
    let tmp = setup_test_project();
    parts(&tmp).args(["new", "PN9", "B:2"]).assert().success();
    parts(&tmp).args(["new", "PN9", "B"]).assert().success();

    parts(&tmp)
        .args(["delete", "--part", "PN9", "--rev", "B:2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 of 1"));
    assert_eq!(list_ids(&tmp), vec!["PN9:B"]);
}

#[test]
fn test_delete_help_explains_colon_split() {
    let tmp = TempDir::new().unwrap();
    parts(&tmp)
        .args(["delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("last colon"))
        .stdout(predicate::str::contains("--rev"));
}

#[test]
fn test_delete_rejects_malformed_key() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["delete", "PN001", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PART:REV"));
}

// ============================================================================
// Import / Export Tests
// ============================================================================

#[test]
fn test_import_classifies_rows() {
    let tmp = setup_sample_project();
    let csv = "\u{feff}Part Number,Revision,Description,Where Used,Status,Folder Path,File Names,Last Updated\n\
               PN001,A,Updated base,,Obsolete,,,2020-01-01 00:00\n\
               PN900,X,Brand new,,bogus,,,\n\
               ,A,missing part number,,,,,\n\
               lonely\n";
    fs::write(tmp.path().join("in.csv"), csv).unwrap();

    parts(&tmp)
        .args(["import", "in.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted: 1"))
        .stdout(predicate::str::contains("Updated:  1"))
        .stdout(predicate::str::contains("Skipped:  2"));

    parts(&tmp)
        .args(["show", "PN001", "A", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated base"))
        .stdout(predicate::str::contains("\"status\": \"Obsolete\""))
        .stdout(predicate::str::contains("2020-01-01 00:00"))
        .stdout(predicate::str::contains("\"where_used\": null"));

    parts(&tmp)
        .args(["show", "PN900", "X", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Active\""));
}

#[test]
fn test_import_without_header_keeps_first_row() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join("in.csv"), "PN1,A\nPN2,A,Second\n").unwrap();

    parts(&tmp)
        .args(["import", "in.csv", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inserted\": 2"));
    assert_eq!(list_ids(&tmp), vec!["PN1:A", "PN2:A"]);
}

#[test]
fn test_import_dry_run_changes_nothing() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join("in.csv"), "PN1,A\n").unwrap();

    parts(&tmp)
        .args(["import", "in.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Inserted: 1"));
    assert!(list_ids(&tmp).is_empty());
}

#[test]
fn test_import_missing_file_fails() {
    let tmp = setup_test_project();
    parts(&tmp)
        .args(["import", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_export_follows_current_view() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["filter", "--description", "bracket", "-f", "id"])
        .assert()
        .success();

    parts(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Part Number,Revision,Description,Where Used,Status,Folder Path,File Names,Last Updated\n",
        ))
        .stdout(predicate::str::contains("PN006,A,Mounting Bracket Left"))
        .stdout(predicate::str::contains("PN001").not());
}

#[test]
fn test_export_empty_view_writes_nothing() {
    let tmp = setup_sample_project();
    parts(&tmp)
        .args(["filter", "--part-number", "NO-SUCH-PART", "-f", "id"])
        .assert()
        .success()
        .stdout("");

    parts(&tmp)
        .args(["export", "out.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No records to export"));
    assert!(!tmp.path().join("out.csv").exists());

    parts(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_import_counts_blank_lines_as_skipped() {
    let tmp = setup_test_project();
    fs::write(tmp.path().join("in.csv"), "PN1,A\n\nPN2,A\n").unwrap();

    parts(&tmp)
        .args(["import", "in.csv", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inserted\": 2"))
        .stdout(predicate::str::contains("\"skipped\": 1"));
}

#[test]
fn test_export_import_round_trip() {
    let source = setup_sample_project();
    let out = source.path().join("catalog.csv");
    parts(&source)
        .args(["export", out.to_str().unwrap()])
        .assert()
        .success();

    let target = setup_test_project();
    parts(&target)
        .args(["import", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted: 8"));

    assert_eq!(list_ids(&source), list_ids(&target));

    let left = parts(&source).args(["show", "PN004", "C", "-f", "json"]).output().unwrap();
    let right = parts(&target).args(["show", "PN004", "C", "-f", "json"]).output().unwrap();
    assert_eq!(left.stdout, right.stdout);
}
