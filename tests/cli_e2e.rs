use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = r#"
version = "1.4.0"
usage_file = "usage.txt"

[[command]]
phrase = "eags transform rdbms erd"
args = ["<spec-file.ts>"]

[[command]]
phrase = "eags transform rdbms sql"
args = [
    { key = "<dialect-name>", required = true, name = "Dialect" },
    "<spec-file.ts>",
]

[[command]]
phrase = "eags transform rdbms"
"#;

const USAGE: &str = "
Usage:
  tool eags transform rdbms erd <spec-file.ts>
  tool eags transform rdbms sql <dialect-name> <spec-file.ts>
  tool eags transform middleware server <spec-file.ts>
  tool --version
";

const SQL_ARGV: [&str; 6] = [
    "eags",
    "transform",
    "rdbms",
    "sql",
    "SQLite:naming",
    "./test.ts",
];

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docroute"))
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("docroute.toml"), CONFIG).expect("write config");
    std::fs::write(temp_dir.path().join("usage.txt"), USAGE).expect("write usage");
    temp_dir
}

fn run_args(root: &Path, args: &[&str]) -> Output {
    bin()
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run docroute")
}

fn run(root: &Path, command: &str, argv: &[&str]) -> Output {
    let args: Vec<&str> = [command, "--"].iter().chain(argv).copied().collect();
    run_args(root, &args)
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn e2e_parse_prints_option_map() {
    let temp_dir = project();
    let output = run(
        temp_dir.path(),
        "parse",
        &["eags", "transform", "rdbms", "erd", "./test.file"],
    );
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["eags"], true);
    assert_eq!(json["transform"], true);
    assert_eq!(json["erd"], true);
    assert_eq!(json["sql"], false);
    assert_eq!(json["<spec-file.ts>"], "./test.file");
    assert_eq!(json["<dialect-name>"], serde_json::Value::Null);
}

#[test]
fn e2e_parse_is_deterministic() {
    let temp_dir = project();
    let first = run(temp_dir.path(), "parse", &SQL_ARGV);
    let second = run(temp_dir.path(), "parse", &SQL_ARGV);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn e2e_route_picks_most_specific_command() {
    let temp_dir = project();
    let output = run(temp_dir.path(), "route", &SQL_ARGV);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let expected_args = serde_json::json!(["SQLite:naming", "./test.ts"]);
    assert_eq!(json["command"], "eags transform rdbms sql");
    assert_eq!(json["args"], expected_args);
}

#[test]
fn e2e_route_unmatched_command_fails_with_code() {
    let temp_dir = project();
    let output = run(
        temp_dir.path(),
        "route",
        &["eags", "transform", "middleware", "server", "./spec.ts"],
    );

    // Only rdbms routes are configured
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[E0995]"), "Got:\n{}", stderr);
}

#[test]
fn e2e_route_grammar_mismatch_fails() {
    let temp_dir = project();
    let output = run(temp_dir.path(), "route", &["eags", "transform", "rdbms"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn e2e_version_is_printed() {
    let temp_dir = project();
    let output = run(temp_dir.path(), "route", &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1.4.0"));
}

#[test]
fn e2e_verbose_route_logs_debug_events() {
    let temp_dir = project();
    let mut args = vec!["-v", "route", "--"];
    args.extend(SQL_ARGV);
    let output = run_args(temp_dir.path(), &args);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loaded routes"), "Got:\n{}", stderr);
    assert!(stderr.contains("registered commands"), "Got:\n{}", stderr);
    assert!(stderr.contains("dispatching"), "Got:\n{}", stderr);
}

#[test]
fn e2e_quiet_route_keeps_stderr_empty() {
    let temp_dir = project();
    let output = run(temp_dir.path(), "route", &SQL_ARGV);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn e2e_malformed_config_warns_and_uses_defaults() {
    let temp_dir = project();
    let config = temp_dir.path().join("docroute.toml");
    std::fs::write(config, "usage = [unterminated").expect("write config");

    let args = ["parse", "--usage", "usage.txt", "--", "--version"];
    let output = run_args(temp_dir.path(), &args);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["--version"], true);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "Got:\n{}", stderr);
}
