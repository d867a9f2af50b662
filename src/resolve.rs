//! Image discovery: the three-tier fallback chain.
//!
//! A gallery page has no backend, so the list of images has to be found from
//! whatever the hosting happens to expose. Three strategies are tried in
//! order and the first that succeeds wins:
//!
//! ```text
//! 1. Manifest           GET ./images.json           → ["a.png", "b.jpg"]
//! 2. Hosting tree       GET {api}/repos/{owner}/{repo}/git/trees/{branch}?recursive=1
//!                       (only when the page host matches the hosting domain)
//! 3. Directory listing  GET ./  → scrape <a href> for image files
//! ```
//!
//! Every tier returns `Result<Vec<String>, TierError>`. A failure is logged
//! and the next tier runs; when all three fail the result is an empty list.
//! [`resolve`] itself never fails.
//!
//! ## Name rules per tier
//!
//! | Tier | Extension filter | Order |
//! |------|------------------|-------|
//! | Manifest | none (trusted as-is) | as written |
//! | Hosting tree | recognized extensions, direct children of `images_dir` only | sorted |
//! | Directory listing | recognized extensions, excluded names dropped | sorted |

use crate::config::{GalleryConfig, RepoLayout};
use crate::fetch::{Fetch, FetchError};
use crate::naming::{decode_segment, final_segment, has_image_extension};
use crate::types::{Resolution, Tier};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Why a single tier did not produce a list.
#[derive(Error, Debug)]
pub enum TierError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("{url} answered {status}")]
    Status { url: Url, status: u16 },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("host {0:?} is not on the hosting domain")]
    WrongHost(String),
    #[error("no owner/repository in page URL {0}")]
    NoRepository(Url),
    #[error("tree listing has no `tree` array")]
    MissingTree,
}

/// Repository tree response from the hosting API. Only `path` is used.
#[derive(Debug, Deserialize)]
struct TreeListing {
    tree: Option<Vec<TreeEntry>>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
}

/// Run the chain against the page at `page_url`.
///
/// Never fails: tier errors are logged and swallowed, exhaustion yields
/// [`Resolution::exhausted`].
pub async fn resolve(fetch: &dyn Fetch, page_url: &Url, config: &GalleryConfig) -> Resolution {
    for tier in Tier::ORDER {
        debug!(%tier, %page_url, "trying discovery tier");
        let attempt = match tier {
            Tier::Manifest => from_manifest(fetch, page_url, config).await,
            Tier::HostingTree => from_hosting_tree(fetch, page_url, config).await,
            Tier::DirectoryListing => from_directory_listing(fetch, page_url, config).await,
        };
        match attempt {
            Ok(images) => {
                info!(%tier, count = images.len(), "resolved images");
                return Resolution {
                    images,
                    tier: Some(tier),
                };
            }
            Err(e) => warn!(%tier, error = %e, "discovery tier failed"),
        }
    }
    warn!("all discovery tiers failed, gallery is empty");
    Resolution::exhausted()
}

/// Fetch `url` and require a 2xx answer.
async fn fetch_ok(fetch: &dyn Fetch, url: Url) -> Result<String, TierError> {
    let fetched = fetch.get(&url).await?;
    if !fetched.is_ok() {
        return Err(TierError::Status {
            url,
            status: fetched.status,
        });
    }
    Ok(fetched.body)
}

/// Tier 1: the manifest is a JSON array of names, used verbatim.
pub async fn from_manifest(
    fetch: &dyn Fetch,
    page_url: &Url,
    config: &GalleryConfig,
) -> Result<Vec<String>, TierError> {
    let url = page_url.join(&config.manifest_path)?;
    let body = fetch_ok(fetch, url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Tier 2: list the repository tree through the hosting provider's API.
pub async fn from_hosting_tree(
    fetch: &dyn Fetch,
    page_url: &Url,
    config: &GalleryConfig,
) -> Result<Vec<String>, TierError> {
    let (owner, repo) = repository_of(page_url, config)?;
    let api_url = Url::parse(&format!(
        "{}/repos/{owner}/{repo}/git/trees/{}?recursive=1",
        config.hosting.api_base.trim_end_matches('/'),
        config.hosting.branch,
    ))?;
    let body = fetch_ok(fetch, api_url).await?;
    let listing: TreeListing = serde_json::from_str(&body)?;
    let tree = listing.tree.ok_or(TierError::MissingTree)?;

    let prefix = format!("{}/", config.images_dir);
    let mut images: Vec<String> = tree
        .into_iter()
        .filter_map(|entry| {
            let name = entry.path.strip_prefix(&prefix)?;
            (!name.contains('/') && has_image_extension(name, &config.extensions))
                .then(|| name.to_string())
        })
        .collect();
    images.sort();
    Ok(images)
}

/// Owner and repository for a page on the hosting domain.
///
/// - `path` layout: first two non-empty path segments.
/// - `subdomain` layout: first host label, then the first path segment.
pub fn repository_of(page_url: &Url, config: &GalleryConfig) -> Result<(String, String), TierError> {
    let host = page_url.host_str().unwrap_or_default();
    if !host.contains(&config.hosting.domain) {
        return Err(TierError::WrongHost(host.to_string()));
    }

    let segments: Vec<&str> = page_url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let pair = match config.hosting.layout {
        RepoLayout::Path => match segments.as_slice() {
            [owner, repo, ..] => Some((owner.to_string(), repo.to_string())),
            _ => None,
        },
        RepoLayout::Subdomain => {
            let owner = host.split('.').next().filter(|o| !o.is_empty());
            match (owner, segments.first()) {
                (Some(owner), Some(repo)) => Some((owner.to_string(), repo.to_string())),
                _ => None,
            }
        }
    };
    pair.ok_or_else(|| TierError::NoRepository(page_url.clone()))
}

/// Tier 3: scrape image anchors from an HTML directory listing.
pub async fn from_directory_listing(
    fetch: &dyn Fetch,
    page_url: &Url,
    config: &GalleryConfig,
) -> Result<Vec<String>, TierError> {
    let listing_url = page_url.join(&config.listing_path)?;
    let body = fetch_ok(fetch, listing_url.clone()).await?;
    Ok(image_names_in_listing(&body, &listing_url, config))
}

fn anchor_href_regex() -> &'static Regex {
    static HREF: OnceLock<Regex> = OnceLock::new();
    HREF.get_or_init(|| {
        Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("Invalid anchor Regex")
    })
}

/// Image names linked from an HTML listing, resolved against `base`.
///
/// Hrefs are resolved first so relative, absolute and parent-relative links
/// all reduce to their final path segment, which is then percent-decoded.
/// Links carrying a query string are sort controls, not files.
pub fn image_names_in_listing(html: &str, base: &Url, config: &GalleryConfig) -> Vec<String> {
    let mut images: Vec<String> = anchor_href_regex()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or(caps.get(2)).or(caps.get(3)))
        .filter_map(|href| base.join(href.as_str()).ok())
        .filter(|url| has_image_extension(url.as_str(), &config.extensions))
        .map(|url| decode_segment(final_segment(url.path())))
        .filter(|name| {
            !name.is_empty()
                && has_image_extension(name, &config.extensions)
                && !config.excluded_names.contains(name)
        })
        .collect();
    images.sort();
    images
}
