use clap::{CommandFactory, FromArgMatches};
use http::Method;
use std::time::Duration;
use tempfile::tempdir;

use super::types::{ConfigFile, DurationValue};
use super::{apply_config, build_run_config, load_config_file, parse_target_url, read_body};
use crate::args::{HttpMethod, OutputFormat, PositiveU64, TesterArgs};
use crate::domain::Termination;
use crate::error::{AppError, ValidationError};

fn parse_with_matches(argv: &[&str]) -> Result<(TesterArgs, clap::ArgMatches), String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = TesterArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from matches failed: {}", err))?;
    Ok((args, matches))
}

fn parse(argv: &[&str]) -> Result<TesterArgs, String> {
    parse_with_matches(argv).map(|(args, _)| args)
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.toml");
    let content = r#"
url = "http://localhost:3000"
method = "put"
duration = "30s"
concurrency = 8
keep_alive = false
headers = ["X-Trace: 1"]
read_timeout = 2
output_format = "json"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://localhost:3000") {
        return Err("Unexpected url".to_owned());
    }
    if config.method != Some(HttpMethod::Put) {
        return Err("Unexpected method".to_owned());
    }
    let duration = config
        .duration
        .as_ref()
        .ok_or_else(|| "Expected duration".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if duration != Duration::from_secs(30) {
        return Err(format!("Unexpected duration: {:?}", duration));
    }
    if config.concurrency != Some(8) || config.keep_alive != Some(false) {
        return Err("Unexpected concurrency or keep-alive".to_owned());
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err("Unexpected output format".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.json");
    let content = r#"{
  "urls_file": "urls.txt",
  "requests": 50,
  "body": "{\"name\":\"max\"}",
  "content_type": "application/json",
  "write_timeout": "250ms"
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.urls_file.as_deref() != Some("urls.txt") || config.requests != Some(50) {
        return Err("Unexpected urls_file or requests".to_owned());
    }
    let timeout = config
        .write_timeout
        .as_ref()
        .ok_or_else(|| "Expected write_timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_millis(250) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("volley.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(_)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected yaml to be rejected".to_owned()),
    }
}

#[test]
fn zero_duration_value_is_rejected() -> Result<(), String> {
    match DurationValue::Seconds(0).to_duration() {
        Err(ValidationError::DurationZero) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}

#[test]
fn cli_values_win_over_config() -> Result<(), String> {
    let (mut args, matches) =
        parse_with_matches(&["volley", "-u", "http://cli.local/", "-c", "2"])?;
    let config = ConfigFile {
        url: Some("http://config.local/".to_owned()),
        concurrency: Some(16),
        requests: Some(7),
        keep_alive: Some(false),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://cli.local/") {
        return Err(format!("Expected CLI url to win: {:?}", args.url));
    }
    if args.concurrency.get() != 2 {
        return Err("Expected CLI concurrency to win".to_owned());
    }
    if args.requests.map(PositiveU64::get) != Some(7) {
        return Err("Expected requests from config".to_owned());
    }
    if args.keep_alive {
        return Err("Expected keep-alive from config".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_zero_concurrency() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["volley"])?;
    let config = ConfigFile {
        concurrency: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err("Expected zero concurrency to fail".to_owned());
    }
    Ok(())
}

#[test]
fn build_count_run_with_defaults() -> Result<(), String> {
    let args = parse(&["volley", "-u", "http://localhost:8080/", "-r", "10", "-c", "3"])?;
    let config = build_run_config(&args).map_err(|err| err.to_string())?;

    if config.termination.per_worker_limit() != Some(10) {
        return Err(format!("Unexpected termination: {:?}", config.termination));
    }
    if config.concurrency.get() != 3 || config.method != Method::GET {
        return Err("Unexpected concurrency or method".to_owned());
    }
    if config.targets.len() != 1 || config.body.is_some() {
        return Err("Unexpected targets or body".to_owned());
    }
    Ok(())
}

#[test]
fn body_implies_post_and_literal_beats_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("body.json");
    std::fs::write(&path, "from-file").map_err(|err| format!("write failed: {}", err))?;
    let path_str = path.to_string_lossy().into_owned();

    let args = parse(&[
        "volley",
        "-u",
        "http://localhost/",
        "-t",
        "5",
        "-b",
        "abc",
        "-d",
        &path_str,
    ])?;
    let config = build_run_config(&args).map_err(|err| err.to_string())?;
    if config.method != Method::POST {
        return Err(format!("Expected POST, got {}", config.method));
    }
    if config.body.as_deref() != Some(b"abc".as_slice()) {
        return Err(format!("Unexpected body: {:?}", config.body));
    }
    if config.termination != Termination::ByDuration(Duration::from_secs(5)) {
        return Err(format!("Unexpected termination: {:?}", config.termination));
    }

    let from_file = read_body(None, Some(&path_str)).map_err(|err| err.to_string())?;
    if from_file.as_deref() != Some(b"from-file".as_slice()) {
        return Err(format!("Unexpected file body: {:?}", from_file));
    }
    Ok(())
}

#[test]
fn urls_file_entries_come_before_url() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("urls.txt");
    std::fs::write(&path, "http://a.local/one\n\n  http://b.local/two  \n")
        .map_err(|err| format!("write failed: {}", err))?;
    let path_str = path.to_string_lossy().into_owned();

    let args = parse(&[
        "volley",
        "-f",
        &path_str,
        "-u",
        "http://c.local/three",
        "-r",
        "1",
    ])?;
    let config = build_run_config(&args).map_err(|err| err.to_string())?;
    let hosts: Vec<&str> = config.targets.iter().filter_map(|uri| uri.host()).collect();
    if hosts != ["a.local", "b.local", "c.local"] {
        return Err(format!("Unexpected target order: {:?}", hosts));
    }
    Ok(())
}

#[test]
fn empty_urls_file_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("urls.txt");
    std::fs::write(&path, "\n  \n").map_err(|err| format!("write failed: {}", err))?;
    let path_str = path.to_string_lossy().into_owned();

    let args = parse(&["volley", "-f", &path_str, "-r", "1"])?;
    match build_run_config(&args) {
        Err(AppError::Http(_)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected empty URL file to fail".to_owned()),
    }
}

#[test]
fn missing_or_conflicting_termination_is_fatal() -> Result<(), String> {
    let neither = parse(&["volley", "-u", "http://localhost/"])?;
    match build_run_config(&neither) {
        Err(AppError::Validation(ValidationError::MissingTermination)) => {}
        Err(err) => return Err(format!("Unexpected error: {}", err)),
        Ok(_) => return Err("Expected missing termination".to_owned()),
    }

    let both = parse(&["volley", "-u", "http://localhost/", "-r", "1", "-t", "1"])?;
    match build_run_config(&both) {
        Err(AppError::Validation(ValidationError::TerminationConflict)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected termination conflict".to_owned()),
    }
}

#[test]
fn missing_target_is_fatal() -> Result<(), String> {
    let args = parse(&["volley", "-r", "1"])?;
    match build_run_config(&args) {
        Err(AppError::Validation(ValidationError::MissingTarget)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected missing target".to_owned()),
    }
}

#[test]
fn target_url_validation() -> Result<(), String> {
    if parse_target_url("http://localhost:8080/path").is_err() {
        return Err("Expected plain http URL to pass".to_owned());
    }
    match parse_target_url("https://localhost/") {
        Err(ValidationError::UnsupportedScheme { scheme, .. }) if scheme == "https" => {}
        other => return Err(format!("Unexpected https result: {:?}", other)),
    }
    match parse_target_url("not a url") {
        Err(ValidationError::InvalidUrl { .. }) => Ok(()),
        other => Err(format!("Unexpected result: {:?}", other)),
    }
}
