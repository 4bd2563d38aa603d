
use std::fs;

use tempfile::tempdir;

use support_single::{run_volley, spawn_http_server};

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_count_run_prints_text_report() -> Result<(), String> {
    let (url, _server) = spawn_http_server(200, "test response")?;

    let output = run_volley(["-u", url.as_str(), "-r", "5", "-c", "2"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Requests:                               10 hits") {
        return Err(format!("Expected 10 requests.\n{}", describe(&output)));
    }
    if !stdout.contains("Successful requests:                    10 hits") {
        return Err(format!("Expected 10 successes.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_json_report_is_parseable() -> Result<(), String> {
    let (url, _server) = spawn_http_server(503, "")?;

    let output = run_volley([
        "-u",
        url.as_str(),
        "-r",
        "3",
        "-c",
        "1",
        "--output-format",
        "json",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid JSON: {}\n{}", err, describe(&output)))?;
    if value.get("requests").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(format!("Unexpected requests.\n{}", describe(&output)));
    }
    if value.get("bad_status").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(format!("Unexpected bad_status.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_duration_run_from_config_file() -> Result<(), String> {
    let (url, _server) = spawn_http_server(200, "ok")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("run.toml");
    let content = format!(
        "url = \"{}\"\nduration = \"1s\"\nconcurrency = 2\noutput_format = \"json\"\n",
        url
    );
    fs::write(&config_path, content).map_err(|err| format!("write failed: {}", err))?;
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = run_volley(["--config", config_arg.as_str()])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid JSON: {}\n{}", err, describe(&output)))?;
    let requests = value
        .get("requests")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if requests == 0 {
        return Err(format!("Expected some requests.\n{}", describe(&output)));
    }
    if value.get("elapsed_seconds").and_then(serde_json::Value::as_u64) < Some(1) {
        return Err(format!("Unexpected elapsed time.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_probe_reports_payload_bytes() -> Result<(), String> {
    let (url, _server) = spawn_http_server(200, "test response")?;

    let output = run_volley([
        "probe",
        "-u",
        url.as_str(),
        "-r",
        "10",
        "--output-format",
        "json",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid JSON: {}\n{}", err, describe(&output)))?;
    if value.get("read_throughput").and_then(serde_json::Value::as_u64) != Some(130) {
        return Err(format!("Unexpected read throughput.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_missing_termination_exits_non_zero() -> Result<(), String> {
    let output = run_volley(["-u", "http://127.0.0.1:9/"])?;
    if output.status.success() {
        return Err(format!("Expected failure.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_conflicting_termination_exits_non_zero() -> Result<(), String> {
    let output = run_volley(["-u", "http://127.0.0.1:9/", "-r", "1", "-t", "1"])?;
    if output.status.success() {
        return Err(format!("Expected failure.\n{}", describe(&output)));
    }
    Ok(())
}

#[test]
fn e2e_probe_error_is_logged() -> Result<(), String> {
    let output = run_volley(["--no-color", "probe", "-u", "https://127.0.0.1:9/", "-r", "1"])?;
    if output.status.success() {
        return Err(format!("Expected failure.\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("ERROR") || !stderr.contains("Unsupported URL scheme") {
        return Err(format!("Expected a logged error.\n{}", describe(&output)));
    }
    Ok(())
}
