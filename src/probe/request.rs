use bytes::Bytes;
use url::Url;

use crate::args::ProbeArgs;
use crate::config::{parse_target_url, read_body};
use crate::error::{AppError, AppResult};

/// What the probe sends; a body switches the request to POST.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: Url,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    pub keep_alive: bool,
    pub authorization: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ProbeRequest {
    /// Bare keep-alive GET against `url`.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url,
            body: None,
            content_type: None,
            keep_alive: true,
            authorization: None,
            headers: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the URL is invalid or the body file is unreadable.
    pub fn from_args(args: &ProbeArgs) -> AppResult<Self> {
        let url = parse_target_url(&args.url).map_err(AppError::validation)?;
        Ok(Self {
            url,
            body: read_body(args.body.as_deref(), args.body_file.as_deref())?,
            content_type: args.content_type.clone(),
            keep_alive: args.keep_alive,
            authorization: args.auth.clone(),
            headers: args.headers.clone(),
        })
    }
}
