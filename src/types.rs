//! Shared types passed between discovery, the controller and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One strategy in the ordered discovery chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Pre-generated manifest next to the page.
    Manifest,
    /// Repository tree listing from the hosting provider's API.
    HostingTree,
    /// Anchors scraped from an HTML directory listing.
    DirectoryListing,
}

impl Tier {
    /// All tiers in the order they are attempted.
    pub const ORDER: [Tier; 3] = [Tier::Manifest, Tier::HostingTree, Tier::DirectoryListing];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Manifest => "manifest",
            Tier::HostingTree => "hosting tree",
            Tier::DirectoryListing => "directory listing",
        };
        f.write_str(label)
    }
}

/// Outcome of running the discovery chain.
///
/// `tier` is `None` when every tier failed; `images` is then empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub images: Vec<String>,
    pub tier: Option<Tier>,
}

impl Resolution {
    pub fn exhausted() -> Self {
        Self::default()
    }
}
