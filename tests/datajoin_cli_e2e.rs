#![cfg(feature = "cli")]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run_cli(args: &[&str]) -> Output {
    let binary = PathBuf::from(env!("CARGO_BIN_EXE_datajoin"));
    Command::new(binary)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("cli command should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn e2e_join_inline_sources_as_tsv() {
    let output = run_cli(&[
        "join",
        "--strategy",
        "combinatorial",
        "--format",
        "tsv",
        "--source",
        "os=linux,mac",
        "--source",
        "arch=x86,arm",
    ]);
    assert!(output.status.success(), "join should succeed: {output:?}");

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "os\tarch",
            "linux\tx86",
            "linux\tarm",
            "mac\tx86",
            "mac\tarm"
        ]
    );
}

#[test]
fn e2e_join_pairwise_from_file_verifies_coverage() {
    let tmp = tempdir().expect("tempdir should be created");
    let input = tmp.path().join("sources.json");
    fs::write(
        &input,
        r#"[
            {"name": "browser", "values": ["firefox", "chrome"]},
            {"name": "locale", "values": ["en", "fr"]},
            {"name": "retries", "values": [0, 3]}
        ]"#,
    )
    .expect("sources file should be written");

    let output = run_cli(&[
        "join",
        "--strategy",
        "pairwise",
        "--verify",
        "--input",
        input.to_str().expect("input path should be valid utf-8"),
    ]);
    assert!(output.status.success(), "pairwise join should verify: {output:?}");

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&stdout(&output)).expect("stdout should be a JSON array");
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|row| row["retries"].is_number()));
}

#[test]
fn e2e_sequential_join_fails_coverage_verification() {
    let output = run_cli(&[
        "join",
        "--strategy",
        "sequential",
        "--format",
        "md",
        "--verify",
        "--source",
        "a=1,2",
        "--source",
        "b=x,y",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.starts_with("| a | b |"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("uncovered: a=1 with b=y"), "stderr: {stderr}");
}

#[test]
fn e2e_stats_lists_every_strategy() {
    let output = run_cli(&["stats", "--source", "a=1,2,3", "--source", "b=x,y"]);
    assert!(output.status.success(), "stats should succeed: {output:?}");

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("combinatorial\t6\t"));
    assert!(lines[1].starts_with("sequential\t2\t"));
    assert_eq!(lines[2], "pairwise\t6\tuncovered=0");
}

#[test]
fn e2e_json_rows_keep_source_order() {
    let output = run_cli(&["join", "--source", "zeta=1", "--source", "alpha=x"]);
    assert!(output.status.success(), "join should succeed: {output:?}");

    let text = stdout(&output);
    let zeta = text.find("\"zeta\"").expect("zeta column");
    let alpha = text.find("\"alpha\"").expect("alpha column");
    assert!(zeta < alpha, "columns out of source order: {text}");
}

#[test]
fn e2e_duplicate_source_names_are_rejected() {
    let output = run_cli(&[
        "join",
        "--source",
        "zeta=1,2",
        "--source",
        "alpha=x",
        "--source",
        "zeta=9",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate source name `zeta`"), "stderr: {stderr}");
}

#[test]
fn e2e_stats_counts_large_cross_products_without_building_them() {
    let args: Vec<String> = (0..10)
        .flat_map(|i| ["--source".to_string(), format!("s{i}=a,b,c,d,e")])
        .collect();
    let mut argv = vec!["stats"];
    argv.extend(args.iter().map(String::as_str));

    let output = run_cli(&argv);
    assert!(output.status.success(), "stats should succeed: {output:?}");

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "combinatorial\t9765625\tuncovered=0");
    assert!(lines[1].starts_with("sequential\t5\t"));
    assert!(lines[2].ends_with("\tuncovered=0"));
}

#[test]
fn e2e_empty_source_is_rejected() {
    let output = run_cli(&["join", "--source", "a=1,2", "--source", "b="]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("data source 1 is empty"), "stderr: {stderr}");
}
