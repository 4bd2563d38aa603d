use std::path::{Path, PathBuf};

use bytes::Bytes;
use http::{Method, Uri};
use tracing::warn;
use url::Url;

use crate::args::TesterArgs;
use crate::domain::{RunConfig, Termination};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Validates the merged arguments and freezes them into a [`RunConfig`].
///
/// Reads the URL list and body file from disk. Nothing is started here, so a
/// failure means no request was ever sent.
///
/// # Errors
///
/// Returns an error when no target or no termination mode is configured, both
/// termination modes are set, a file cannot be read, or a URL is invalid.
pub fn build_run_config(args: &TesterArgs) -> AppResult<RunConfig> {
    let termination = select_termination(args)?;
    let targets = collect_targets(args)?;
    let body = read_body(args.body.as_deref(), args.body_file.as_deref())?;

    let method = match args.method {
        Some(method) => method.to_method(),
        None if body.is_some() => Method::POST,
        None => Method::GET,
    };
    if body.is_some() && (method == Method::GET || method == Method::HEAD) {
        warn!("Sending a request body with {}", method);
    }

    Ok(RunConfig {
        targets,
        method,
        body,
        content_type: args.content_type.clone(),
        keep_alive: args.keep_alive,
        authorization: args.auth.clone(),
        extra_headers: args.headers.clone(),
        concurrency: args.concurrency,
        termination,
        read_timeout: args.read_timeout,
        write_timeout: args.write_timeout,
    })
}

fn select_termination(args: &TesterArgs) -> AppResult<Termination> {
    match (args.requests, args.duration) {
        (Some(requests), None) => Ok(Termination::ByCount(requests)),
        (None, Some(duration)) if duration.is_zero() => {
            Err(AppError::validation(ValidationError::DurationZero))
        }
        (None, Some(duration)) => Ok(Termination::ByDuration(duration)),
        (Some(_), Some(_)) => Err(AppError::validation(ValidationError::TerminationConflict)),
        (None, None) => Err(AppError::validation(ValidationError::MissingTermination)),
    }
}

/// URL file entries first, then `--url`.
fn collect_targets(args: &TesterArgs) -> AppResult<Vec<Uri>> {
    let mut raw = Vec::new();
    if let Some(path) = args.urls_file.as_deref() {
        raw.extend(read_url_file(Path::new(path))?);
    }
    if let Some(url) = args.url.as_deref() {
        raw.push(url.to_owned());
    }
    if raw.is_empty() {
        return Err(AppError::validation(ValidationError::MissingTarget));
    }

    raw.iter()
        .map(|entry| {
            let url = parse_target_url(entry).map_err(AppError::validation)?;
            url.as_str().parse::<Uri>().map_err(|err| {
                AppError::http(HttpError::InvalidUri {
                    url: entry.clone(),
                    source: err,
                })
            })
        })
        .collect()
}

fn read_url_file(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::http(HttpError::ReadUrlFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    if urls.is_empty() {
        return Err(AppError::http(HttpError::UrlFileEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(urls)
}

/// Accepts absolute `http://` URLs with a host.
pub(crate) fn parse_target_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw.trim()).map_err(|err| ValidationError::InvalidUrl {
        url: raw.to_owned(),
        source: err,
    })?;
    if url.scheme() != "http" {
        return Err(ValidationError::UnsupportedScheme {
            url: raw.to_owned(),
            scheme: url.scheme().to_owned(),
        });
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost {
            url: raw.to_owned(),
        });
    }
    Ok(url)
}

/// Non-empty literal body if set, otherwise the body file contents.
pub(crate) fn read_body(literal: Option<&str>, file: Option<&str>) -> AppResult<Option<Bytes>> {
    if let Some(body) = literal.filter(|body| !body.is_empty()) {
        if file.is_some() {
            warn!("Both --body and --body-file set; using --body");
        }
        return Ok(Some(Bytes::copy_from_slice(body.as_bytes())));
    }
    match file {
        Some(path) => {
            let path = PathBuf::from(path);
            let data = std::fs::read(&path).map_err(|err| {
                AppError::http(HttpError::ReadBodyFile { path, source: err })
            })?;
            Ok(Some(Bytes::from(data)))
        }
        None => Ok(None),
    }
}
