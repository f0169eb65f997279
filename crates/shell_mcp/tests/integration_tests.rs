use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

const BIN: &str = "mcp-server-shell";

fn run_session(args: &[&std::ffi::OsStr], input: &str) -> Vec<Value> {
    let output = Command::cargo_bin(BIN)
        .unwrap()
        .args(args)
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("--help").assert().success();
}

/// A malformed allowlist file is a startup failure
#[test]
fn test_bad_allowlist_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("allow.json");
    std::fs::write(&file, "not json").unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg(temp_dir.path())
        .arg("--allowlist")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("AllowlistParse"));
}

#[test]
fn test_announcement_lists_shell_tools() {
    let temp_dir = TempDir::new().unwrap();
    let lines = run_session(&[temp_dir.path().as_os_str()], "");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], Value::Null);
    assert_eq!(lines[0]["result"]["tools"][0]["name"], "shell/exec");
    assert_eq!(lines[0]["result"]["tools"][1]["name"], "shell/allowed");
}

#[cfg(unix)]
#[test]
fn test_session_validates_before_spawning() {
    let temp_dir = TempDir::new().unwrap();
    let input = [
        r#"{"id":1,"method":"shell/exec","params":{"command":"rm","args":["-rf","/"]}}"#,
        r#"{"id":2,"method":"shell/exec","params":{"command":"npm","args":["publish"]}}"#,
        r#"{"id":3,"method":"shell/exec","params":{"command":"echo","args":["anything","goes"]}}"#,
        r#"{"id":4,"method":"shell/exec","params":{"command":"ls","cwd":"../.."}}"#,
        "{broken",
        r#"{"id":5,"method":"shell/allowed"}"#,
        r#"{"id":6,"method":"fs/read","params":{"path":"x"}}"#,
    ]
    .join("\n");

    let lines = run_session(&[temp_dir.path().as_os_str()], &input);
    let responses = &lines[1..];
    assert_eq!(responses.len(), 7);

    assert_eq!(responses[0]["error"]["message"], "Command 'rm' not allowed");
    assert_eq!(
        responses[1]["error"]["message"],
        "Command 'npm' with argument 'publish' not allowed"
    );
    assert_eq!(
        responses[2]["result"],
        json!({
            "command": "echo anything goes",
            "exitCode": 0,
            "stdout": "anything goes",
            "stderr": "",
            "success": true
        })
    );
    assert_eq!(
        responses[3]["error"]["message"],
        "Path outside workspace not allowed"
    );
    assert_eq!(responses[4]["error"]["code"], -32700);
    assert_eq!(responses[5]["result"]["echo"], json!([]));
    assert_eq!(responses[6]["error"]["message"], "Unknown method: fs/read");

    let ids: Vec<&Value> = responses.iter().map(|response| &response["id"]).collect();
    assert_eq!(
        ids,
        vec![&json!(1), &json!(2), &json!(3), &json!(4), &Value::Null, &json!(5), &json!(6)]
    );
}

#[cfg(unix)]
#[test]
fn test_custom_allowlist_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("allow.json");
    std::fs::write(&file, r#"{"PWD": []}"#).unwrap();

    let input = [
        r#"{"id":"a","method":"shell/allowed"}"#,
        r#"{"id":"b","method":"shell/exec","params":{"command":"echo","args":["hi"]}}"#,
        r#"{"id":"c","method":"shell/exec","params":{"command":"pwd"}}"#,
    ]
    .join("\n");

    let lines = run_session(
        &[
            temp_dir.path().as_os_str(),
            std::ffi::OsStr::new("--allowlist"),
            file.as_os_str(),
        ],
        &input,
    );

    assert_eq!(lines[1]["result"], json!({"pwd": []}));
    assert_eq!(lines[2]["error"]["message"], "Command 'echo' not allowed");
    assert_eq!(lines[3]["result"]["command"], "pwd");
    assert_eq!(lines[3]["result"]["success"], true);
}
