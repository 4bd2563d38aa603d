use bytes::Bytes;
use http::header::{AUTHORIZATION, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request, Uri};
use http_body_util::Full;

use crate::domain::RunConfig;
use crate::error::HttpError;

/// Method, headers and body shared by every request of a run.
#[derive(Debug, Clone)]
pub(crate) struct RequestTemplate {
    method: Method,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestTemplate {
    pub(crate) fn from_config(config: &RunConfig) -> Result<Self, HttpError> {
        let headers = compose_headers(
            config.keep_alive,
            config.authorization.as_deref(),
            config.content_type.as_deref(),
            &config.extra_headers,
        )?;
        Ok(Self {
            method: config.method.clone(),
            headers,
            body: config.body.clone().unwrap_or_default(),
        })
    }

    pub(crate) fn build(&self, uri: &Uri) -> Request<Full<Bytes>> {
        let mut request = Request::new(Full::new(self.body.clone()));
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = uri.clone();
        *request.headers_mut() = self.headers.clone();
        request
    }
}

/// Builds the fixed header set: `Connection`, then `Authorization` and
/// `Content-Type` when configured, then extra headers (last one wins).
pub(crate) fn compose_headers(
    keep_alive: bool,
    authorization: Option<&str>,
    content_type: Option<&str>,
    extra: &[(String, String)],
) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    let connection = if keep_alive { "keep-alive" } else { "close" };
    headers.insert(CONNECTION, HeaderValue::from_static(connection));

    if let Some(value) = authorization {
        headers.insert(AUTHORIZATION, header_value("Authorization", value)?);
    }
    if let Some(value) = content_type {
        headers.insert(CONTENT_TYPE, header_value("Content-Type", value)?);
    }
    for (name, value) in extra {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            HttpError::InvalidHeaderName {
                header: name.clone(),
                source: err,
            }
        })?;
        headers.insert(header_name, header_value(name, value)?);
    }
    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
        header: name.to_owned(),
        source: err,
    })
}
