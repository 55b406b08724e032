//! CLI integration tests for CaskMark
//!
//! These tests verify the complete workflow from registry initialization
//! through registration, lookup, regauge entry, ownership transfer, and
//! valuation entry, plus the pure codec commands which need no registry at
//! all.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the caskmark binary
fn caskmark_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("caskmark"))
}

/// Create a temporary directory with an initialized registry and a
/// distillery on file
fn setup_registry() -> TempDir {
    let dir = TempDir::new().unwrap();
    caskmark_cmd().arg("init").arg(dir.path()).assert().success();
    caskmark_cmd()
        .current_dir(dir.path())
        .args(["distillery", "add", "G1", "Glen Example"])
        .assert()
        .success();
    dir
}

/// Register one cask and return its CaskMark ID
fn register_cask(dir: &TempDir) -> String {
    let output = caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "register",
            "--distillery",
            "G1",
            "--spirit",
            "single-malt",
            "--cask-type",
            "barrel",
            "--fill-date",
            "2024-05-01",
            "--abv",
            "63.5",
            "--volume",
            "200",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let record: serde_json::Value = serde_json::from_slice(&output).unwrap();
    record["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Codec Tests (no registry required)
// =============================================================================

#[test]
fn test_encode_concrete_vector() {
    caskmark_cmd()
        .args([
            "encode",
            "--country",
            "GB",
            "--year",
            "24",
            "--spirit",
            "SC",
            "--distillery",
            "G1",
            "--serial",
            "000001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CM-GB-24-SC-G1-000001-8"));
}

#[test]
fn test_encode_accepts_fill_date() {
    caskmark_cmd()
        .args([
            "encode",
            "--country",
            "GB",
            "--fill-date",
            "2024-05-01",
            "--spirit",
            "single-malt",
            "--distillery",
            "G1",
            "--serial",
            "000001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CM-GB-24-SC-G1-000001-8"));
}

#[test]
fn test_encode_rejects_invalid_field() {
    caskmark_cmd()
        .args([
            "encode",
            "--country",
            "GBR",
            "--year",
            "24",
            "--spirit",
            "SC",
            "--distillery",
            "G1",
            "--serial",
            "000001",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("country code"));
}

#[test]
fn test_encode_year_and_fill_date_conflict() {
    caskmark_cmd()
        .args([
            "encode",
            "--country",
            "GB",
            "--year",
            "24",
            "--fill-date",
            "2024-05-01",
            "--spirit",
            "SC",
            "--distillery",
            "G1",
            "--serial",
            "000001",
        ])
        .assert()
        .failure();
}

#[test]
fn test_decode_structured_fields() {
    caskmark_cmd()
        .args(["--format", "json", "decode", "CM-GB-24-SC-G1-000001-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"country\":\"GB\""))
        .stdout(predicate::str::contains("\"fill_year\":2024"))
        .stdout(predicate::str::contains("\"spirit_code\":\"SC\""))
        .stdout(predicate::str::contains("\"serial\":\"000001\""));
}

#[test]
fn test_decode_is_case_insensitive() {
    caskmark_cmd()
        .args(["decode", "cm-gb-24-sc-g1-000001-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CM-GB-24-SC-G1-000001-8"));
}

#[test]
fn test_decode_rejects_malformed_input() {
    caskmark_cmd()
        .args(["decode", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed identifier"));
}

#[test]
fn test_verify_valid_id() {
    caskmark_cmd()
        .args(["verify", "CM-GB-24-SC-G1-000001-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid CaskMark ID"));
}

#[test]
fn test_verify_checksum_mismatch_is_distinct() {
    // Well-formed but wrong digit: reported as a checksum problem, not as
    // "not a CaskMark ID at all".
    caskmark_cmd()
        .args(["verify", "CM-GB-24-SC-G1-000001-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Checksum mismatch"));
}

#[test]
fn test_verify_malformed_input() {
    caskmark_cmd()
        .args(["verify", "CM-GB-24-XX-G1-000001-8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("segment 3"));
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    caskmark_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized caskmark registry"));

    assert!(dir.path().join(".caskmark").is_dir());
    assert!(dir.path().join(".caskmark/config.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    caskmark_cmd().arg("init").arg(dir.path()).assert().success();
    caskmark_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_register_assigns_sequential_ids() {
    let dir = setup_registry();

    let first = register_cask(&dir);
    let second = register_cask(&dir);

    assert_eq!(first, "CM-GB-24-SC-G1-000001-8");
    assert!(second.starts_with("CM-GB-24-SC-G1-000002-"));
}

#[test]
fn test_register_requires_known_distillery() {
    let dir = setup_registry();

    caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "register",
            "--distillery",
            "X9",
            "--spirit",
            "grain",
            "--cask-type",
            "butt",
            "--fill-date",
            "2024-05-01",
            "--abv",
            "63.5",
            "--volume",
            "500",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown distillery"));
}

#[test]
fn test_register_outside_registry_fails() {
    let dir = TempDir::new().unwrap();

    caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "register",
            "--distillery",
            "G1",
            "--spirit",
            "grain",
            "--cask-type",
            "butt",
            "--fill-date",
            "2024-05-01",
            "--abv",
            "63.5",
            "--volume",
            "500",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a caskmark registry"));
}

#[test]
fn test_show_registered_cask() {
    let dir = setup_registry();
    let id = register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Glen Example"))
        .stdout(predicate::str::contains("intact"));
}

#[test]
fn test_show_unknown_cask_fails() {
    let dir = setup_registry();

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", "CM-GB-24-SC-G1-00000Z-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cask registered"));
}

#[test]
fn test_show_rejects_corrupted_id_before_lookup() {
    let dir = setup_registry();

    // Checksum failure surfaces at argument parsing; no lookup happens
    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", "CM-GB-24-SC-G1-000001-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Checksum mismatch"));
}

#[test]
fn test_list_and_filter() {
    let dir = setup_registry();
    register_cask(&dir);
    register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cask(s)"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["list", "--distillery", "ZZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No casks registered"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["list", "--spirit", "single-malt", "--year", "24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cask(s)"));
}

#[test]
fn test_regauge_workflow() {
    let dir = setup_registry();
    let id = register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "regauge",
            &id,
            "--volume",
            "192.4",
            "--abv",
            "61.2",
            "--date",
            "2026-05-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded regauge"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Regauges:"))
        .stdout(predicate::str::contains("192.4"));
}

#[test]
fn test_transfer_workflow() {
    let dir = setup_registry();
    let id = register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "transfer",
            &id,
            "--to",
            "Cask Collective Ltd",
            "--date",
            "2025-03-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred"))
        .stdout(predicate::str::contains("Cask Collective Ltd"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ownership history:"))
        .stdout(predicate::str::contains("Cask Collective Ltd"))
        .stdout(predicate::str::contains("intact"));
}

#[test]
fn test_value_workflow() {
    let dir = setup_registry();
    let id = register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .args([
            "value",
            &id,
            "--amount",
            "4200",
            "--date",
            "2025-03-10",
            "--notes",
            "insurance review",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded valuation"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valuations:"))
        .stdout(predicate::str::contains("4200.00"))
        .stdout(predicate::str::contains("insurance review"));
}

#[test]
fn test_value_rejects_non_positive_amount() {
    let dir = setup_registry();
    let id = register_cask(&dir);

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["value", &id, "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid valuation"));
}

#[test]
fn test_distillery_directory() {
    let dir = setup_registry();

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["distillery", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G1"))
        .stdout(predicate::str::contains("Glen Example"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["distillery", "add", "g1", "Glen Renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed distillery G1"));

    caskmark_cmd()
        .current_dir(dir.path())
        .args(["distillery", "add", "BAD", "Too Long"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[A-Z0-9]{2}"));
}
