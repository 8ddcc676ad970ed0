use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn log_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_log-monitor"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn sink_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|l| l.starts_with("[LOG Monitor]"))
        .map(str::to_string)
        .collect()
}

const MIXED_LOG: &str = "\
11:35:23,scheduled task 032,START,37980
11:35:56,scheduled task 032,END,37980
11:36:11,scheduled task 796,START,57672
11:36:18,background job wmy,START,81258
11:42:18,scheduled task 796,END,57672
11:51:44,background job wmy,END,81258
not,a,valid,row,at all
11:52:00,orphan,END,99999
";

#[test]
fn text_mode_reports_to_stderr() {
    let file = log_file(MIXED_LOG);
    let output = run(&[file.path().to_str().unwrap()]);

    assert!(output.status.success(), "{:?}", output);
    assert!(output.stdout.is_empty());
    assert_eq!(
        sink_lines(&output),
        vec![
            "[LOG Monitor][WARN] Process 57672 (scheduled task 796) exceeded 5 minutes: took 00:06:07",
            "[LOG Monitor][ERROR] Process 81258 (background job wmy) exceeded 10 minutes: took 00:15:26",
        ]
    );
}

#[test]
fn json_mode_prints_report() {
    let file = log_file(MIXED_LOG);
    let output = run(&[file.path().to_str().unwrap(), "--format", "json"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(sink_lines(&output).is_empty());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["rows"], 9);
    assert_eq!(report["summary"]["skipped_rows"], 2);
    assert_eq!(report["summary"]["completed"], 3);
    assert_eq!(report["summary"]["orphaned"], 1);
    assert_eq!(report["findings"].as_array().unwrap().len(), 2);
    assert_eq!(report["findings"][0]["severity"], "warning");
    assert_eq!(report["findings"][1]["severity"], "error");
    assert_eq!(report["processes"][0]["pid"], "37980");
    assert_eq!(report["processes"][0]["duration_secs"], 33);
}

#[test]
fn custom_thresholds_change_triage() {
    let file = log_file(MIXED_LOG);
    let output = run(&[
        file.path().to_str().unwrap(),
        "--warn-after",
        "20",
        "--error-after",
        "30",
    ]);

    assert!(output.status.success(), "{:?}", output);
    assert!(sink_lines(&output).is_empty());
}

#[test]
fn inverted_thresholds_are_rejected() {
    let file = log_file(MIXED_LOG);
    let output = run(&[
        file.path().to_str().unwrap(),
        "--warn-after",
        "10",
        "--error-after",
        "5",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be below error threshold"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.log");
    let output = run(&[missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("file not found"));
}

#[test]
fn file_argument_is_required() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(sink_lines(&output).is_empty());
}
