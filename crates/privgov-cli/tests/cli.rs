//! End-to-end tests for the privgov binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn privgov(db: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("privgov").unwrap();
    cmd.arg("--db").arg(db);
    // Keep assessments offline and deterministic.
    cmd.env("PRIVGOV_ADVISORY_ENABLED", "false");
    cmd
}

#[test]
fn seed_then_list_register() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("privgov.db");

    privgov(&db)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Corporation"));

    privgov(&db)
        .args(["process", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Employee Payroll Processing"))
        .stdout(predicate::str::contains("CCTV Surveillance"));

    privgov(&db)
        .args(["process", "list", "--approved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Employee Payroll Processing"))
        .stdout(predicate::str::contains("CCTV Surveillance").not());
}

#[test]
fn add_assesses_risk_offline() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("privgov.db");

    privgov(&db).arg("seed").assert().success();

    privgov(&db)
        .args([
            "process",
            "add",
            "--department",
            "dept-it",
            "--title",
            "Visitor Badge Tracking",
            "--subjects",
            "Visitors,Contractors",
            "--categories",
            "Biometric Data,Location Data",
            "--lawful-basis",
            "Legitimate Interest",
            "--recipients",
            "Security Agency",
            "--retention",
            "30 days",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule-based assessment:"))
        .stdout(predicate::str::contains("\"isAI\": false"));
}

#[test]
fn validation_failure_sets_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("privgov.db");

    privgov(&db).arg("seed").assert().success();

    privgov(&db)
        .args([
            "process",
            "add",
            "--department",
            "dept-it",
            "--title",
            "ab",
            "--subjects",
            "Visitors",
            "--categories",
            "Location Data",
            "--lawful-basis",
            "Consent",
            "--recipients",
            "Internal Staff",
            "--retention",
            "30 days",
        ])
        .assert()
        .failure()
        .code(5);
}

#[test]
fn missing_record_sets_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("privgov.db");

    privgov(&db).arg("seed").assert().success();
    privgov(&db)
        .args(["process", "show", "no-such-id"])
        .assert()
        .failure()
        .code(6);
}

#[test]
fn reports_are_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("privgov.db");
    let out = dir.path().join("reports");
    std::fs::create_dir(&out).unwrap();

    privgov(&db).arg("seed").assert().success();

    privgov(&db)
        .args(["report", "--out"])
        .arg(&out)
        .arg("ropa")
        .assert()
        .success();

    privgov(&db)
        .args(["report", "--out"])
        .arg(&out)
        .args(["approval", "process-1"])
        .assert()
        .success();

    privgov(&db)
        .args(["report", "--out"])
        .arg(&out)
        .arg("csv")
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("ropa-report-sample-corporation-")));
    assert!(names.iter().any(|n| n.starts_with("ropa-review-approval-ROPA-PROCESS1-")));
    assert!(names.contains(&"ropa-register.csv".to_string()));

    let pdf = names.iter().find(|n| n.ends_with(".pdf")).unwrap();
    let bytes = std::fs::read(out.join(pdf)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
