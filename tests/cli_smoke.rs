use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

// Smoke tests for the binary surface; nothing here needs a server.

#[test]
fn exec_without_connection_prints_usage_message() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--").arg("-q").arg("RETURN 1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pass --uri, --list or --close"));
}

#[test]
fn exec_list_on_a_fresh_process_reports_no_connections() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--").arg("-l");
    cmd.assert().success().stdout(predicate::str::contains("No open connections"));
}

#[test]
fn exec_list_as_json_is_an_empty_array() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--format").arg("json").arg("--").arg("-l");
    cmd.assert().success().stdout(predicate::str::contains("[]"));
}

#[test]
fn exec_close_of_unknown_target_reports_it() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--").arg("-c").arg("nowhere");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Connection not defined for nowhere"));
}

#[test]
fn malformed_var_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--var").arg("no-equals-sign").arg("--").arg("-l");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn missing_config_file_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--config").arg("/nonexistent/cypher-repl.toml").arg("--").arg("-l");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load configuration file"));
}

#[test]
fn invalid_format_value_is_rejected_by_clap() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("exec").arg("--format").arg("yaml").arg("--").arg("-l");
    cmd.assert().failure();
}

#[test]
fn completions_generate_for_bash() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("completions").arg("bash");
    cmd.assert().success().stdout(predicate::str::contains("cypher-repl"));
}

#[test]
fn help_names_the_subcommands() {
    let mut cmd = Command::cargo_bin("cypher-repl").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("completions"));
}
