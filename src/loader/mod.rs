use std::time::Duration;

use thiserror::Error;

use crate::posts::{self, Post};

pub const LOAD_FAILURE_MESSAGE: &str = "Error loading blog posts.";
pub const EMPTY_RESULT_MESSAGE: &str = "No blog posts found.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostSource {
    FilePath(String),
    Url(String),
    Inline(String),
}

impl PostSource {
    /// `http://` and `https://` locations are fetched, anything else is a
    /// local path.
    pub fn from_location(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::FilePath(trimmed.to_string())
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::FilePath(path) => path.clone(),
            Self::Url(url) => url.clone(),
            Self::Inline(_) => "<inline>".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: concat!("blogpager/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read posts file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch posts: {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} fetching posts: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse posts CSV from {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: csv::Error,
    },

    #[error("no titled posts in {location}")]
    Empty { location: String },
}

impl LoadError {
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Fixed text shown in place of the loading indicator.
    pub fn user_message(&self) -> &'static str {
        if self.is_empty_result() {
            EMPTY_RESULT_MESSAGE
        } else {
            LOAD_FAILURE_MESSAGE
        }
    }
}

async fn fetch_bytes(url: &str, options: &LoadOptions) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(options.timeout_seconds.max(1)))
        .user_agent(options.user_agent.clone())
        .build()
        .map_err(|source| LoadError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| LoadError::Fetch {
            url: url.to_string(),
            source,
        })?;
    if !resp.status().is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    let body = resp.bytes().await.map_err(|source| LoadError::Fetch {
        url: url.to_string(),
        source,
    })?;
    Ok(body.to_vec())
}

/// Raw sheet bytes; decoding happens in the CSV reader so a bad header
/// surfaces as a parse failure.
async fn read_source(source: &PostSource, options: &LoadOptions) -> Result<Vec<u8>, LoadError> {
    match source {
        PostSource::FilePath(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::FileRead {
                    path: path.clone(),
                    source,
                })
        }
        PostSource::Url(url) => fetch_bytes(url, options).await,
        PostSource::Inline(text) => Ok(text.clone().into_bytes()),
    }
}

/// Loads, filters and orders the posts behind `source`.
///
/// Resolves once, with either the newest-first list of titled posts or
/// the reason nothing can be shown.
pub async fn load_posts(source: &PostSource, options: &LoadOptions) -> Result<Vec<Post>, LoadError> {
    let location = source.describe();
    log::debug!("loading posts from {location}");

    let bytes = read_source(source, options).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty { location });
    }
    let report = posts::parse_posts(bytes.as_slice()).map_err(|source| LoadError::Parse {
        location: location.clone(),
        source,
    })?;
    log::debug!(
        "parsed {} rows from {location} ({} skipped)",
        report.posts.len(),
        report.skipped_rows
    );

    let posts = posts::prepare_posts(report.posts);
    if posts.is_empty() {
        return Err(LoadError::Empty { location });
    }
    Ok(posts)
}
