//! E2E tests for the hsdash binary.
//!
//! Each test writes a small xlsx fixture, runs the real binary against it,
//! and inspects the generated HTML.

use std::path::{Path, PathBuf};
use std::process::Command;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Math").expect("sheet name");

    let rows: &[&[&str]] = &[
        &["Date", "Start Time", "End Time", "Name", "Grade"],
        &["2023-09-18", "9:00 AM", "10:30 AM", "Ada", "4th Grade"],
        &["2023-09-19", "1:00 PM", "2:00 PM", "", ""],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("write cell");
            }
        }
    }
    workbook.save(path).expect("save fixture");
}

fn hsdash_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hsdash"))
}

/// Run hsdash and return (exit_code, stdout, stderr)
fn run_hsdash(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(hsdash_binary())
        .args(args)
        .output()
        .expect("failed to execute hsdash");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[test]
fn renders_a_dashboard_from_a_workbook() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("log.xlsx");
    let output = dir.path().join("dashboard.html");
    write_fixture(&input);

    let (code, stdout, stderr) = run_hsdash(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Wrote"), "stdout: {stdout}");

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Math"));
    assert!(html.contains("Ada&#39;s Homeschool Dashboard"));
    assert!(html.contains("total hours taught"));
    assert!(html.contains("2.50"));
}

#[test]
fn json_dump_mirrors_the_aggregation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("log.xlsx");
    let output = dir.path().join("dashboard.html");
    let json_path = dir.path().join("dump.json");
    write_fixture(&input);

    let (code, _, stderr) = run_hsdash(&[
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--json",
        json_path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let set = &json[0];
    assert_eq!(set["subjects"][0]["subject"], "Math");
    assert_eq!(set["subjects"][0]["total_hours"], 2.5);
    assert_eq!(set["student"]["name"], "Ada");
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dashboard.html");

    let (code, _, stderr) = run_hsdash(&["no_such_file.xlsx", "-o", output.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no_such_file.xlsx"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn no_arguments_prints_usage() {
    let (code, _, stderr) = run_hsdash(&[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}
