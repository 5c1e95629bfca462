//! Where text and lexicons come from: a local file or an HTTP(S) URL.
//! Both collapse to a single `String` for the rest of the crate.

use crate::error::SourceError;
use crate::utils::{is_url, join_lines};
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Classifies `location`: `http://` and `https://` prefixes are URLs,
    /// everything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if is_url(location) {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Reads the whole source as text.
    ///
    /// Files have their lines rejoined with `\n`. URLs are fetched with a GET
    /// request and the body is returned as-is.
    ///
    /// # Errors
    /// Returns a [`SourceError`] when the file cannot be read, the request
    /// fails or returns a non-success status, or `timeout` elapses.
    pub async fn fetch(&self, timeout: Duration) -> Result<String, SourceError> {
        debug!("Fetching {}", self);
        match self {
            Source::File(path) => {
                let read = tokio::time::timeout(timeout, tokio::fs::read_to_string(path))
                    .await
                    .map_err(|_| SourceError::Timeout {
                        location: self.to_string(),
                        timeout,
                    })?;
                let content = read.map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(join_lines(&content))
            }
            Source::Url(url) => fetch_url(url, timeout).await,
        }
    }
}

async fn fetch_url(url: &str, timeout: Duration) -> Result<String, SourceError> {
    let http_error = |err: reqwest::Error| {
        if err.is_timeout() {
            SourceError::Timeout {
                location: url.to_string(),
                timeout,
            }
        } else {
            SourceError::Http {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http_error)?;

    let resp = client.get(url).send().await.map_err(http_error)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    resp.text().await.map_err(http_error)
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Source::parse(s))
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_sources() {
        assert_eq!(
            Source::parse(" https://example.com/text "),
            Source::Url("https://example.com/text".to_string())
        );
        assert_eq!(
            Source::parse("data/text.txt"),
            Source::File(PathBuf::from("data/text.txt"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Source::parse("http://a.b/c").to_string(), "http://a.b/c");
        assert_eq!(Source::parse("a/b.txt").to_string(), "a/b.txt");
    }
}
