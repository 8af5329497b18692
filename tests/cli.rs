use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn propledger(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("propledger").unwrap();
    cmd.env("PROPLEDGER_DATA_DIR", dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add_lease(dir: &Path) -> String {
    let output = propledger(dir)
        .args([
            "entry",
            "add",
            "Asha Rao",
            "15000",
            "--type",
            "income",
            "--category",
            "Rent",
            "--date",
            "2025-06-01",
            "--property",
            "Flat 2B",
            "--renew-date",
            "2025-06-18",
            "--reminder",
            "5",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID:"))
        .map(|id| id.trim().to_string())
        .unwrap()
}

fn add_repair(dir: &Path) {
    propledger(dir)
        .args([
            "entry",
            "add",
            "Plumber",
            "2,500",
            "--type",
            "expense",
            "--category",
            "Repairs",
            "--date",
            "2025-06-03",
            "--property",
            "Flat 2B",
        ])
        .assert()
        .success();
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();

    propledger(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("settings.json").exists());
}

#[test]
fn test_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_lease(dir.path());
    add_repair(dir.path());

    propledger(dir.path())
        .args(["entry", "list", "--today", "2025-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha Rao"))
        .stdout(predicate::str::contains("Plumber"))
        .stdout(predicate::str::contains("Approaching"))
        .stdout(predicate::str::contains("Page 1 of 1 (2 entries)"));

    propledger(dir.path())
        .args(["entry", "list", "--type", "expense", "--today", "2025-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plumber"))
        .stdout(predicate::str::contains("Asha Rao").not());
}

#[test]
fn test_list_rejects_page_zero() {
    let dir = TempDir::new().unwrap();
    add_repair(dir.path());

    propledger(dir.path())
        .args(["entry", "list", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pages are numbered from 1"));
}

#[test]
fn test_add_rejects_unknown_reminder() {
    let dir = TempDir::new().unwrap();

    propledger(dir.path())
        .args([
            "entry",
            "add",
            "Asha Rao",
            "15000",
            "--type",
            "income",
            "--renew-date",
            "2025-06-18",
            "--reminder",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reminder must be one of"));
}

#[test]
fn test_show_by_prefix() {
    let dir = TempDir::new().unwrap();
    let id = add_lease(dir.path());

    propledger(dir.path())
        .args(["entry", "show", &id[..8], "--today", "2025-06-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fifteen Thousand"))
        .stdout(predicate::str::contains("Status:      Due"));
}

#[test]
fn test_words() {
    let dir = TempDir::new().unwrap();

    propledger(dir.path())
        .args(["words", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One Lakh"));
}

#[test]
fn test_reports() {
    let dir = TempDir::new().unwrap();
    add_lease(dir.path());
    add_repair(dir.path());

    propledger(dir.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹12500.00"));

    propledger(dir.path())
        .args(["report", "reminders", "--today", "2025-06-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Past Due"));

    propledger(dir.path())
        .args(["report", "reminders", "--today", "2025-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No renewals need attention."));
}

#[test]
fn test_export_csv_and_import_into_fresh_ledger() {
    let source = TempDir::new().unwrap();
    add_lease(source.path());
    add_repair(source.path());

    let csv_path = source.path().join("entries.csv");
    propledger(source.path())
        .args(["export", "csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("\"id\",\"date\",\"type\""));
    assert!(csv.contains("\"Fifteen Thousand\""));

    let target = TempDir::new().unwrap();
    propledger(target.path())
        .args(["import", "csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:    2"));

    // Same ids again are duplicates
    propledger(target.path())
        .args(["import", "csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No new entries to import."));
}

#[test]
fn test_json_backup_restore() {
    let source = TempDir::new().unwrap();
    add_lease(source.path());

    let backup = source.path().join("backup.json");
    propledger(source.path())
        .args(["export", "json", "--pretty"])
        .arg(&backup)
        .assert()
        .success();

    let target = TempDir::new().unwrap();
    propledger(target.path())
        .args(["import", "json"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 entries."));

    propledger(target.path())
        .args(["entry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha Rao"));
}

#[test]
fn test_receipt_written_to_dir() {
    let dir = TempDir::new().unwrap();
    let id = add_lease(dir.path());
    let out = dir.path().join("receipts");

    propledger(dir.path())
        .args(["export", "receipt", &id, "--dir"])
        .arg(&out)
        .assert()
        .success();

    let files: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    assert_eq!(path.extension().unwrap(), "txt");
    let body = std::fs::read_to_string(path).unwrap();
    assert!(body.contains("Asha Rao"));
}

#[test]
fn test_settings_property() {
    let dir = TempDir::new().unwrap();

    propledger(dir.path())
        .args(["settings", "property", "add", "Villa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Property 'Villa' added"));

    propledger(dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Properties:         Villa"));
}
