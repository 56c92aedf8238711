use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::*;

const ERROR_BODY_MAX_CHARS: usize = 200;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Complete given link into fully qualified URL.
pub fn complete_url(link: &str, host: &str) -> Result<Url> {
    if link.starts_with('/') {
        self::parse_url(format!("https://{}{}", host, link))
    } else {
        self::parse_url(link)
    }
}

/// Returns the response as is if the status is 2xx,
/// otherwise consumes it into `Error::UnexpectedResponseCode`.
pub async fn ensure_success(resp: Response, requested_url: &Url) -> Result<Response> {
    let got = resp.status();
    if got.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::UnexpectedResponseCode {
        got,
        requested_url: requested_url.to_string(),
        body: truncate_chars(body.trim(), ERROR_BODY_MAX_CHARS),
    })
}

pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn is_auth_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_owned(),
    }
}
