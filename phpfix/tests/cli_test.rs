//! End-to-end tests for the command-line surface.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use phpfix::entry_point::run_with_args_to;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BROKEN: &str = "<?php\nreturn $foo +\n    $bar;\n";
const FIXED: &str = "<?php\nreturn $foo\n    + $bar;\n";

fn run(args: &[&str]) -> (i32, String) {
    let mut buffer = Vec::new();
    let code = run_with_args_to(
        args.iter().map(|s| (*s).to_owned()).collect(),
        &mut buffer,
    )
    .unwrap();
    (code, String::from_utf8(buffer).unwrap())
}

#[test]
fn test_fix_rewrites_file_in_place() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.php");
    fs::write(&file, BROKEN).unwrap();

    let (code, output) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(output.contains("broken.php"));
    assert!(output.contains("1 fixed"));
    assert_eq!(fs::read_to_string(&file).unwrap(), FIXED);
}

#[test]
fn test_check_mode_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.php");
    fs::write(&file, BROKEN).unwrap();

    let (code, output) = run(&["--check", dir.path().to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(output.contains("broken.php"));
    assert!(output.contains("need fixing"));
    assert_eq!(fs::read_to_string(&file).unwrap(), BROKEN);
}

#[test]
fn test_check_mode_passes_on_clean_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("clean.php"), FIXED).unwrap();

    let (code, _) = run(&["--check", dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.php"), BROKEN).unwrap();

    let (code, output) = run(&["--check", "--json", dir.path().to_str().unwrap()]);
    assert_eq!(code, 1);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["summary"]["changed"], 1);
    assert_eq!(report["summary"]["errors"], 0);
    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["changed"], true);
    assert!(files[0]["applied_fixers"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v == "operator_linebreak"));
}

#[test]
fn test_tokenize_error_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.php"), "<?php function f() {").unwrap();

    let (code, output) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(output.contains("[ERROR]"));
}

#[test]
fn test_fixer_flag_limits_the_set() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("comment.php");
    fs::write(&file, "<?php\n/** Hello\n */\nreturn $foo +\n    $bar;\n").unwrap();

    let (code, _) = run(&[
        "--fixer",
        "multiline_comment_opening_closing_alone",
        dir.path().to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    let result = fs::read_to_string(&file).unwrap();
    // Comment reshaped, operator untouched.
    assert!(result.contains("/**\n * Hello\n */"));
    assert!(result.contains("$foo +\n"));
}

#[test]
fn test_unknown_fixer_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.php"), FIXED).unwrap();

    let (code, _) = run(&["--fixer", "no_such_fixer", dir.path().to_str().unwrap()]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_file_options_are_honored() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".phpfix.toml"),
        r#"
[phpfix]
fixers = ["operator_linebreak"]

[phpfix.options.operator_linebreak]
position = "end"
"#,
    )
    .unwrap();
    let file = dir.path().join("ops.php");
    fs::write(&file, "<?php\nreturn $foo\n    || $bar;\n").unwrap();

    let (code, _) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "<?php\nreturn $foo ||\n    $bar;\n"
    );
}

#[test]
fn test_explicit_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[phpfix]\nfixers = [\"data_provider_name\"]\n").unwrap();
    let file = dir.path().join("ops.php");
    fs::write(&file, BROKEN).unwrap();

    let (code, _) = run(&[
        "--config",
        config.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    // Only the provider fixer ran, so the operator stays put.
    assert_eq!(fs::read_to_string(&file).unwrap(), BROKEN);
}

#[test]
fn test_missing_config_file_fails() {
    let (code, _) = run(&["--config", "/no/such/file.toml", "."]);
    assert_eq!(code, 1);
}

#[test]
fn test_rules_listing() {
    let (code, output) = run(&["rules"]);
    assert_eq!(code, 0);
    assert!(output.contains("data_provider_name"));
    assert!(output.contains("multiline_comment_opening_closing_alone"));
    assert!(output.contains("operator_linebreak"));
    assert!(output.contains("multiline_promoted_properties"));
    assert!(output.contains("no_phpstorm_generated_comment"));
}

#[test]
fn test_rules_json_listing() {
    let (code, output) = run(&["rules", "--json"]);
    assert_eq!(code, 0);
    let rules: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rules = rules.as_array().unwrap();
    assert_eq!(rules.len(), 5);
    let provider = rules
        .iter()
        .find(|r| r["name"] == "data_provider_name")
        .unwrap();
    assert_eq!(provider["risky"], true);
    assert_eq!(provider["options"][0]["name"], "prefix");
}

#[test]
fn test_help_exits_zero() {
    let (code, output) = run(&["--help"]);
    assert_eq!(code, 0);
    assert!(output.contains("CONFIGURATION FILE"));
}

#[test]
fn test_binary_fixes_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = dir.path().join("broken.php");
    fs::write(&file, BROKEN)?;

    let mut cmd = Command::cargo_bin("phpfix-bin")?;
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.php"));
    assert_eq!(fs::read_to_string(&file)?, FIXED);
    Ok(())
}

#[test]
fn test_binary_check_mode_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("broken.php"), BROKEN)?;

    let mut cmd = Command::cargo_bin("phpfix-bin")?;
    cmd.arg("--check").arg(dir.path()).assert().code(1);
    Ok(())
}
