//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site root (next to `index.html` and the image folder) and is layered
//! on top of stock defaults, so a user only writes the keys they change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Wallpapers"              # Page title and header text
//! count_noun = "wallpapers"         # "{n} wallpapers" in the result counter
//! images_dir = "walls-catppuccin-mocha"
//! manifest_path = "images.json"     # Tier 1: pre-generated manifest
//! listing_path = "./"               # Tier 3: directory listing to parse
//! extensions = ["jpg", "jpeg", "png", "gif", "webp"]
//! excluded_names = ["README.md"]
//!
//! [hosting]                         # Tier 2: repository tree API
//! domain = "github.io"
//! api_base = "https://api.github.com"
//! branch = "main"
//! layout = "path"                   # "path" (/owner/repo/) or "subdomain"
//! user_agent = "wall-gal"
//!
//! [lazy]
//! defer_sources = false             # Render data-src and reveal on visibility
//! root_margin = "50px"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::encode_segment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have defaults matching the original wallpaper deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Page title, shown in `<title>` and the header.
    pub title: String,
    /// Noun used by the result counter (`"{n} {count_noun}"`).
    pub count_noun: String,
    /// Folder, relative to the page, that holds the images.
    pub images_dir: String,
    /// Relative path of the pre-generated manifest.
    pub manifest_path: String,
    /// Relative path fetched as an HTML directory listing.
    pub listing_path: String,
    /// Recognized image extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Names never taken from a directory listing.
    pub excluded_names: Vec<String>,
    /// Repository tree lookup for pages served from a hosting provider.
    pub hosting: HostingConfig,
    /// Deferred image loading.
    pub lazy: LazyConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "Wallpapers".to_string(),
            count_noun: "wallpapers".to_string(),
            images_dir: "walls-catppuccin-mocha".to_string(),
            manifest_path: "images.json".to_string(),
            listing_path: "./".to_string(),
            extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            excluded_names: vec!["README.md".to_string()],
            hosting: HostingConfig::default(),
            lazy: LazyConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.extensions.iter().any(|e| e.is_empty() || e.contains('.')) {
            return Err(ConfigError::Validation(
                "extensions must be bare suffixes like \"png\"".into(),
            ));
        }
        if self.images_dir.is_empty()
            || self.images_dir.starts_with('/')
            || self.images_dir.ends_with('/')
        {
            return Err(ConfigError::Validation(
                "images_dir must be a non-empty relative folder without surrounding slashes"
                    .into(),
            ));
        }
        if self.manifest_path.is_empty() {
            return Err(ConfigError::Validation(
                "manifest_path must not be empty".into(),
            ));
        }
        if self.hosting.domain.is_empty() {
            return Err(ConfigError::Validation(
                "hosting.domain must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Relative path of an image inside the images folder.
    pub fn image_path(&self, name: &str) -> String {
        format!("{}/{}", self.images_dir, name)
    }

    /// [`image_path`](Self::image_path) as a relative URL, with the name
    /// percent-encoded.
    pub fn image_url(&self, name: &str) -> String {
        format!("{}/{}", self.images_dir, encode_segment(name))
    }
}

/// How owner and repository are read off a hosted page URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoLayout {
    /// `https://host/<owner>/<repo>/...`
    #[default]
    Path,
    /// `https://<owner>.host/<repo>/...`
    Subdomain,
}

/// Repository tree lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostingConfig {
    /// The tier only runs when the page host contains this string.
    pub domain: String,
    /// API root; the tree lives at `{api_base}/repos/{owner}/{repo}/git/trees/{branch}`.
    pub api_base: String,
    pub branch: String,
    pub layout: RepoLayout,
    /// Sent with API requests; the hosting API rejects anonymous agents.
    pub user_agent: String,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            domain: "github.io".to_string(),
            api_base: "https://api.github.com".to_string(),
            branch: "main".to_string(),
            layout: RepoLayout::Path,
            user_agent: concat!("wall-gal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Deferred image loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyConfig {
    /// Render the tile source as `data-src` and apply it on first visibility.
    /// When false, the browser's native `loading="lazy"` alone decides.
    pub defer_sources: bool,
    /// Margin around the viewport that counts as visible (CSS length).
    pub root_margin: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            defer_sources: false,
            root_margin: "50px".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given site root.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Wall Gal Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Page title, shown in the browser tab and the header.
title = "Wallpapers"

# Noun for the result counter: "12 wallpapers".
count_noun = "wallpapers"

# Folder next to index.html that holds the images.
images_dir = "walls-catppuccin-mocha"

# Pre-generated list of image names (see `wall-gal manifest`).
manifest_path = "images.json"

# Path fetched as an HTML directory listing when nothing else works.
listing_path = "./"

# Recognized image extensions (case-insensitive, no leading dot).
extensions = ["jpg", "jpeg", "png", "gif", "webp"]

# Names ignored when reading a directory listing.
excluded_names = ["README.md"]

# ---------------------------------------------------------------------------
# Repository tree lookup (used when the page is served from a hosting domain)
# ---------------------------------------------------------------------------
[hosting]
domain = "github.io"
api_base = "https://api.github.com"
branch = "main"
# "path": https://host/<owner>/<repo>/   "subdomain": https://<owner>.host/<repo>/
layout = "path"
user_agent = "wall-gal"

# ---------------------------------------------------------------------------
# Deferred image loading
# ---------------------------------------------------------------------------
[lazy]
# Render tile images with data-src and load them when they come into view.
defer_sources = false
# How far outside the viewport an image counts as visible.
root_margin = "50px"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_deployment() {
        let config = GalleryConfig::default();
        assert_eq!(config.images_dir, "walls-catppuccin-mocha");
        assert_eq!(config.manifest_path, "images.json");
        assert_eq!(config.hosting.domain, "github.io");
        assert_eq!(config.hosting.branch, "main");
        assert_eq!(config.hosting.layout, RepoLayout::Path);
        assert_eq!(config.lazy.root_margin, "50px");
        assert!(!config.lazy.defer_sources);
    }

    #[test]
    fn default_extensions() {
        let config = GalleryConfig::default();
        assert_eq!(config.extensions, vec!["jpg", "jpeg", "png", "gif", "webp"]);
        assert_eq!(config.excluded_names, vec!["README.md"]);
    }

    #[test]
    fn image_path_joins_folder() {
        let config = GalleryConfig::default();
        assert_eq!(
            config.image_path("sunset.png"),
            "walls-catppuccin-mocha/sunset.png"
        );
    }

    #[test]
    fn image_url_encodes_name_only() {
        let config = GalleryConfig::default();
        assert_eq!(
            config.image_url("sun #1.png"),
            "walls-catppuccin-mocha/sun%20%231.png"
        );
        assert_eq!(config.image_path("sun #1.png"), "walls-catppuccin-mocha/sun #1.png");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
images_dir = "walls"

[hosting]
branch = "master"
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.images_dir, "walls");
        assert_eq!(config.hosting.branch, "master");
        // Untouched keys keep their defaults
        assert_eq!(config.hosting.domain, "github.io");
        assert_eq!(config.count_noun, "wallpapers");
    }

    #[test]
    fn parse_subdomain_layout() {
        let config: GalleryConfig = toml::from_str("[hosting]\nlayout = \"subdomain\"").unwrap();
        assert_eq!(config.hosting.layout, RepoLayout::Subdomain);
    }

    #[test]
    fn unknown_layout_rejected() {
        let result: Result<GalleryConfig, _> = toml::from_str("[hosting]\nlayout = \"query\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Wallpapers");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
title = "Mocha"

[lazy]
defer_sources = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Mocha");
        assert!(config.lazy.defer_sources);
        assert_eq!(config.lazy.root_margin, "50px");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = [unclosed").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "image_dir = \"typo\"").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<GalleryConfig, _> = toml::from_str("[lazy]\nmargin = \"10px\"");
        assert!(result.is_err());
    }

    // =========================================================================
    // Merge tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table_keeps_siblings() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[hosting]\ndomain = \"pages.dev\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["hosting"]["domain"].as_str(), Some("pages.dev"));
        assert_eq!(merged["hosting"]["branch"].as_str(), Some("main"));
    }

    #[test]
    fn merge_toml_array_replaced_not_merged() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("extensions = [\"avif\"]").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.extensions, vec!["avif"]);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(GalleryConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_extensions() {
        let config = GalleryConfig {
            extensions: vec![],
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_dotted_extension() {
        let config = GalleryConfig {
            extensions: vec![".png".to_string()],
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_images_dir_slashes() {
        for dir in ["", "/walls", "walls/"] {
            let config = GalleryConfig {
                images_dir: dir.to_string(),
                ..GalleryConfig::default()
            };
            assert!(config.validate().is_err(), "{dir:?} should be rejected");
        }
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("manifest_path = \"\"").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: GalleryConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = GalleryConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.images_dir, defaults.images_dir);
        assert_eq!(config.extensions, defaults.extensions);
        assert_eq!(config.hosting.api_base, defaults.hosting.api_base);
        assert_eq!(config.lazy.root_margin, defaults.lazy.root_margin);
    }
}
