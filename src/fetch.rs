//! Transport for the discovery chain.
//!
//! The resolver only needs "GET this URL, give me status and body". That is
//! the [`Fetch`] trait; [`Fetcher`] implements it for `http(s)://` through
//! `reqwest` and for `file://` through the local filesystem, so a gallery
//! opened straight from disk resolves the same way a hosted one does.
//!
//! ## Local files
//!
//! - A file answers `200` with its contents.
//! - A directory answers `200` with a generated HTML listing: one anchor per
//!   entry, the same shape a static file server produces.
//! - Anything missing answers `404`.

use crate::naming::encode_segment;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Not a local path: {0}")]
    BadFileUrl(Url),
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

impl Fetched {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// 2xx, like the browser's `response.ok`.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A GET-only transport.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url`. Non-2xx statuses are returned, not raised; only
    /// transport failures are errors.
    async fn get(&self, url: &Url) -> Result<Fetched, FetchError>;
}

/// Default transport: `reqwest` for http(s), the filesystem for `file://`.
pub struct Fetcher {
    http: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http })
    }

    async fn get_http(&self, url: &Url) -> Result<Fetched, FetchError> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(Fetched { status, body })
    }

    async fn get_file(&self, url: &Url) -> Result<Fetched, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::BadFileUrl(url.clone()))?;

        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Fetched::not_found()),
            Err(e) => return Err(e.into()),
        };

        if meta.is_dir() {
            let mut names = Vec::new();
            let mut entries = tokio::fs::read_dir(&path).await?;
            while let Some(entry) = entries.next_entry().await? {
                let mut name = entry.file_name().to_string_lossy().to_string();
                if entry.file_type().await?.is_dir() {
                    name.push('/');
                }
                names.push(name);
            }
            names.sort();
            Ok(Fetched::ok(directory_listing_html(&names)))
        } else {
            Ok(Fetched::ok(tokio::fs::read_to_string(&path).await?))
        }
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn get(&self, url: &Url) -> Result<Fetched, FetchError> {
        match url.scheme() {
            "http" | "https" => self.get_http(url).await,
            "file" => self.get_file(url).await,
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Minimal HTML index for a local directory, one anchor per entry.
fn directory_listing_html(names: &[String]) -> String {
    maud::html! {
        html {
            body {
                ul {
                    @for name in names {
                        li { a href=(listing_href(name)) { (name) } }
                    }
                }
            }
        }
    }
    .into_string()
}

/// Entry names become single path segments; directories keep their slash.
fn listing_href(name: &str) -> String {
    match name.strip_suffix('/') {
        Some(dir) => format!("{}/", encode_segment(dir)),
        None => encode_segment(name),
    }
}
