use assert_cmd::Command;
use predicates::prelude::*;

/// Each test gets its own HOME so settings and data never collide.
fn bb(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bb").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn init(home: &std::path::Path) {
    bb(home)
        .args(["init", "--data-dir"])
        .arg(home.join("budget-data"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized bb"));
}

#[test]
fn import_then_reimport_dedupes() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());

    let csv_path = dir.path().join("sofi.csv");
    std::fs::write(
        &csv_path,
        "Date,Description,Amount,Balance\n\
         2025-01-10,Starbucks,-5.25,1000.00\n\
         2025-01-11,TRADER JOES #123,-42.10,957.90\n",
    )
    .unwrap();

    bb(dir.path())
        .args(["import"])
        .arg(&csv_path)
        .args(["--account", "sofi_checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 parsed"))
        .stdout(predicate::str::contains("0 skipped"));

    // Second import of the same file accepts nothing.
    bb(dir.path())
        .args(["import"])
        .arg(&csv_path)
        .args(["--account", "sofi_checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 skipped (duplicates)"));

    bb(dir.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:   2"));

    // Import auto-categorized the grocery run.
    bb(dir.path())
        .args(["txns", "list", "--category", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TRADER JOES #123"))
        .stdout(predicate::str::contains("1 transactions"));
}

#[test]
fn import_records_balance_and_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());

    let csv_path = dir.path().join("sofi.csv");
    std::fs::write(&csv_path, "Date,Description,Amount,Balance\n2025-01-10,Starbucks,-5.25,1000.00\n")
        .unwrap();

    bb(dir.path())
        .args(["import"])
        .arg(&csv_path)
        .args(["--account", "sofi_checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest balance in file: $1,000.00 on 2025-01-10"));

    bb(dir.path())
        .args(["balances"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Computed from snapshot on 2025-01-10"))
        .stdout(predicate::str::contains("Total liquid"));
}

#[test]
fn unknown_account_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());

    let csv_path = dir.path().join("x.csv");
    std::fs::write(&csv_path, "Date,Description,Amount\n2025-01-10,Starbucks,-5.25\n").unwrap();

    bb(dir.path())
        .args(["import"])
        .arg(&csv_path)
        .args(["--account", "chase_checking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown account: chase_checking"));
}

#[test]
fn demo_seeds_data_and_summary_renders() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());

    bb(dir.path())
        .args(["demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo transactions"));

    bb(dir.path())
        .args(["summary", "--month", "2025-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Variable spending"))
        .stdout(predicate::str::contains("Groceries"));

    bb(dir.path())
        .args(["review", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reviewed"));
}

#[test]
fn category_management_enforces_referential_integrity() {
    let dir = tempfile::tempdir().unwrap();
    init(dir.path());

    bb(dir.path()).args(["demo"]).assert().success();

    bb(dir.path())
        .args(["categories", "remove", "Groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("used by existing transactions"));

    bb(dir.path())
        .args(["categories", "add", "Hobbies"])
        .assert()
        .success();
    bb(dir.path())
        .args(["categories", "remove", "Hobbies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed category: Hobbies"));
}
