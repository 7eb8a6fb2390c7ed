use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn evalguard(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_evalguard"));
    cmd.current_dir(dir.path())
        .env_remove("EVALGUARD_CONFIG")
        .env("RUST_LOG", "error");
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn test_cli_help() {
    let dir = workspace(&[]);
    evalguard(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Evalguard screens submitted JavaScript fragments",
        ));
}

#[test]
fn test_cli_version() {
    let dir = workspace(&[]);
    evalguard(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("evalguard 0.1.0"));
}

#[test]
fn test_check_clean_fragment_succeeds() {
    let dir = workspace(&[("add.js", "function add(a, b) { return a + b; }")]);
    evalguard(&dir)
        .args(["check", "add.js"])
        .assert()
        .code(0);
}

#[test]
fn test_check_eval_fragment_is_blocked() {
    let dir = workspace(&[("bad.js", "function f(s) { return eval(s); }")]);
    evalguard(&dir)
        .args(["check", "bad.js"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("eval-call"));
}

#[test]
fn test_check_warning_only_fragment_is_allowed() {
    let dir = workspace(&[("warn.js", "function f(el) { el.innerHTML = 'x'; }")]);
    evalguard(&dir)
        .args(["check", "warn.js"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("inner-html-write"));
}

#[test]
fn test_check_strict_fails_on_warnings() {
    let dir = workspace(&[("warn.js", "function f(el) { el.innerHTML = 'x'; }")]);
    evalguard(&dir)
        .args(["check", "--strict", "warn.js"])
        .assert()
        .code(1);
}

#[test]
fn test_check_json_output() {
    let dir = workspace(&[("bad.js", "const o = {}; o.__proto__.x = 1;")]);
    let output = evalguard(&dir)
        .args(["--format", "json", "check", "bad.js"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["safe"], false);
    assert_eq!(
        value["report"]["issues"][0],
        "Prototype pollution via __proto__ detected - this is a security risk"
    );
    assert_eq!(value["findings"][0]["line"], 1);
}

#[test]
fn test_check_missing_file_is_input_error() {
    let dir = workspace(&[]);
    evalguard(&dir)
        .args(["check", "missing.js"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_capabilities_lists_host_apis() {
    let dir = workspace(&[(
        "ui.js",
        "function save(v) { localStorage.setItem('k', v); return fetch('/x'); }",
    )]);
    evalguard(&dir)
        .args(["capabilities", "ui.js"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("fetch").and(predicate::str::contains("localStorage")));
}

#[test]
fn test_capabilities_json_for_pure_fragment() {
    let dir = workspace(&[("add.js", "function add(a, b) { return a + b; }")]);
    let output = evalguard(&dir)
        .args(["--format", "json", "capabilities", "add.js"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["requiresHost"], false);
    assert_eq!(value["apis"], serde_json::json!([]));
}

#[test]
fn test_sanitize_argument() {
    let dir = workspace(&[]);
    evalguard(&dir)
        .args(["sanitize", "failed at /home/alice/app.js"])
        .assert()
        .success()
        .stdout("failed at [path]\n");
}

#[test]
fn test_sanitize_stdin() {
    let dir = workspace(&[]);
    evalguard(&dir)
        .arg("sanitize")
        .write_stdin("see C:\\Users\\bob\\x.js\n")
        .assert()
        .success()
        .stdout("see [path]\n");
}

#[test]
fn test_run_blocked_fragment_runs_no_cases() {
    let dir = workspace(&[
        ("bad.js", "function f(s) { return eval(s); }"),
        ("cases.json", r#"[{"input": ["1"], "expectedOutput": 1}]"#),
    ]);
    let output = evalguard(&dir)
        .args(["--format", "json", "run", "bad.js", "--entry", "f", "--cases", "cases.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["blocked"], true);
    assert_eq!(value["total_count"], 0);
    assert_eq!(value["results"], serde_json::json!([]));
}

#[test]
fn test_run_invalid_cases_file_is_input_error() {
    let dir = workspace(&[
        ("add.js", "function add(a, b) { return a + b; }"),
        ("cases.json", "{ not json"),
    ]);
    evalguard(&dir)
        .args(["run", "add.js", "--entry", "add", "--cases", "cases.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid test cases"));
}

#[test]
fn test_run_rejects_out_of_range_timeout() {
    let dir = workspace(&[
        ("add.js", "function add(a, b) { return a + b; }"),
        ("cases.json", r#"[{"input": [1, 2], "expectedOutput": 3}]"#),
    ]);
    for timeout in ["0", "60001", "4294967296"] {
        evalguard(&dir)
            .args(["run", "add.js", "--entry", "add", "--cases", "cases.json"])
            .args(["--timeout-ms", timeout])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--timeout-ms"));
    }
}

#[test]
fn test_run_verbose_reports_effective_limits() {
    let dir = workspace(&[
        ("bad.js", "function f(s) { return eval(s); }"),
        ("cases.json", "[]"),
    ]);
    evalguard(&dir)
        .args(["--verbose", "run", "bad.js", "--entry", "f", "--cases", "cases.json"])
        .args(["--timeout-ms", "1500"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1500ms per case"));
}

#[test]
fn test_explicit_config_file_must_exist() {
    let dir = workspace(&[("add.js", "function add() {}")]);
    evalguard(&dir)
        .args(["--config", "nope.toml", "check", "add.js"])
        .assert()
        .code(2);
}
