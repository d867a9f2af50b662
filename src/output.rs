//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## Resolve
//!
//! ```text
//! Images (hosting tree)
//! 001 forest.jpg
//!     Source: walls-catppuccin-mocha/forest.jpg
//! 002 sunset.png
//!     Source: walls-catppuccin-mocha/sunset.png
//!
//! 2 wallpapers
//! ```
//!
//! When every tier came up empty the header reads `Images (none found)`.
//!
//! ## Manifest
//!
//! ```text
//! Manifest → images.json
//! 001 forest.jpg
//! 002 sunset.png
//!
//! 2 wallpapers
//! ```
//!
//! ## Build
//!
//! ```text
//! Gallery → index.html
//! 001 forest.jpg → view/1.html
//! 002 sunset.png → view/2.html
//!
//! Generated 2 viewer pages (2 wallpapers)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::GalleryConfig;
use crate::render::viewer_href;
use crate::types::Resolution;
use std::path::Path;

/// Count text shown next to the search box: the number, a space, the noun.
///
/// The noun is never singularized: one image reads `1 wallpapers`.
pub fn count_label(n: usize, noun: &str) -> String {
    format!("{n} {noun}")
}

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolution(resolution: &Resolution, config: &GalleryConfig) -> Vec<String> {
    let mut lines = Vec::new();
    match resolution.tier {
        Some(tier) => lines.push(format!("Images ({})", tier)),
        None => lines.push("Images (none found)".to_string()),
    }
    for (i, name) in resolution.images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
        lines.push(format!("    Source: {}", config.image_path(name)));
    }
    lines.push(String::new());
    lines.push(count_label(resolution.images.len(), &config.count_noun));
    lines
}

pub fn print_resolution(resolution: &Resolution, config: &GalleryConfig) {
    for line in format_resolution(resolution, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Manifest
// ============================================================================

pub fn format_manifest_output(
    manifest_path: &Path,
    images: &[String],
    config: &GalleryConfig,
) -> Vec<String> {
    let mut lines = vec![format!("Manifest → {}", manifest_path.display())];
    for (i, name) in images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
    }
    lines.push(String::new());
    lines.push(count_label(images.len(), &config.count_noun));
    lines
}

pub fn print_manifest_output(manifest_path: &Path, images: &[String], config: &GalleryConfig) {
    for line in format_manifest_output(manifest_path, images, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(working: &[String], config: &GalleryConfig) -> Vec<String> {
    let mut lines = vec!["Gallery → index.html".to_string()];
    for (i, name) in working.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), name, viewer_href(i)));
    }
    lines.push(String::new());
    let pages = if working.len() == 1 { "page" } else { "pages" };
    lines.push(format!(
        "Generated {} viewer {} ({})",
        working.len(),
        pages,
        count_label(working.len(), &config.count_noun)
    ));
    lines
}

pub fn print_build_output(working: &[String], config: &GalleryConfig) {
    for line in format_build_output(working, config) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn count_label_never_singularizes() {
        assert_eq!(count_label(0, "wallpapers"), "0 wallpapers");
        assert_eq!(count_label(1, "wallpapers"), "1 wallpapers");
        assert_eq!(count_label(12, "images"), "12 images");
    }

    #[test]
    fn format_index_zero_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn resolution_lists_tier_images_and_count() {
        let resolution = Resolution {
            images: names(&["forest.jpg", "sunset.png"]),
            tier: Some(Tier::HostingTree),
        };
        let lines = format_resolution(&resolution, &GalleryConfig::default());
        assert_eq!(
            lines,
            vec![
                "Images (hosting tree)",
                "001 forest.jpg",
                "    Source: walls-catppuccin-mocha/forest.jpg",
                "002 sunset.png",
                "    Source: walls-catppuccin-mocha/sunset.png",
                "",
                "2 wallpapers",
            ]
        );
    }

    #[test]
    fn exhausted_resolution_says_none_found() {
        let lines = format_resolution(&Resolution::exhausted(), &GalleryConfig::default());
        assert_eq!(lines, vec!["Images (none found)", "", "0 wallpapers"]);
    }

    #[test]
    fn manifest_output_names_the_file() {
        let lines = format_manifest_output(
            Path::new("images.json"),
            &names(&["a.png"]),
            &GalleryConfig::default(),
        );
        assert_eq!(lines[0], "Manifest → images.json");
        assert_eq!(lines[1], "001 a.png");
        assert_eq!(lines.last().unwrap(), "1 wallpapers");
    }

    #[test]
    fn build_output_maps_images_to_viewer_pages() {
        let lines = format_build_output(&names(&["a.png", "b.png"]), &GalleryConfig::default());
        assert_eq!(lines[0], "Gallery → index.html");
        assert_eq!(lines[1], "001 a.png → view/1.html");
        assert_eq!(lines[2], "002 b.png → view/2.html");
        assert_eq!(lines[4], "Generated 2 viewer pages (2 wallpapers)");
    }

    #[test]
    fn build_output_single_page() {
        let lines = format_build_output(&names(&["a.png"]), &GalleryConfig::default());
        assert_eq!(lines.last().unwrap(), "Generated 1 viewer page (1 wallpapers)");
    }
}
