use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}

fn run_sqlgate(args: &[&str], input: &str) -> (Option<i32>, String, String) {
    let dir = unique_temp_dir("sqlgate_cli");
    let input_path = dir.join("input.json");
    std::fs::write(&input_path, input).expect("should write input json");

    let output = Command::new(env!("CARGO_BIN_EXE_sqlgate"))
        .args(args)
        .arg(&input_path)
        .output()
        .expect("should run sqlgate binary");
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn permissions_command_prints_query_and_params() {
    let (code, stdout, stderr) = run_sqlgate(
        &["permissions"],
        r#"[{"type": "admin", "key": "log_select", "resource": "log", "action": "select"},
            {"type": "current_user_account", "key": "me"}]"#,
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    let output: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(
        output["params"],
        serde_json::json!(["log_select", "log", "select", "me"])
    );
    assert!(output["query"]
        .as_str()
        .is_some_and(|q| q.contains("UNION ALL")));
}

#[test]
fn permissions_command_rejects_unknown_check_types() {
    let (code, _, stderr) = run_sqlgate(&["permissions"], r#"[{"type": "bogus", "key": "x"}]"#);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("Unknown permission check type: bogus"), "{stderr}");
}

#[test]
fn filter_command_uses_config_timezone() {
    let dir = unique_temp_dir("sqlgate_cli_config");
    let config_path = dir.join("config.json");
    std::fs::write(&config_path, r#"{"timezone": "utc"}"#).expect("should write config");
    let config_arg = config_path.to_string_lossy().into_owned();

    let (code, stdout, stderr) = run_sqlgate(
        &["--config", &config_arg, "filter"],
        r#"{"columns": [{"name": "created_at", "ui_config": {"data_type": "timestamp"}}],
            "conditions": [{"column": "created_at", "operator": "eq", "value": "2024-03-15"}]}"#,
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    let output: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(
        output["where"],
        r#""created_at" BETWEEN '2024-03-15T00:00:00.000Z' AND '2024-03-15T23:59:59.999Z'"#
    );
}

#[test]
fn decode_command_coerces_rows() {
    let (code, stdout, stderr) = run_sqlgate(
        &["decode"],
        r#"[{"key": "canEdit", "type": "boolean", "result": null},
            {"key": "rank", "type": "number", "result": 3}]"#,
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    let output: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(output["canEdit"], false);
    assert_eq!(output["rank"], 3.0);
}
