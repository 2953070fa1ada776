//! Integration tests for the pagetext CLI surface.
//!
//! These exercise argument handling and early failures only; tests that
//! would need PDFium or Tesseract installed are kept out of CI scope.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pagetext"))
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Extract positioned text regions from a PDF via OCR",
        ))
        .stdout(predicate::str::contains("--dpi"));
}

#[test]
fn test_requires_pdf_argument() {
    cli()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_rejects_zero_dpi() {
    cli()
        .arg("scan.pdf")
        .arg("--dpi")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.pdf");

    cli()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
