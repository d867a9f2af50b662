//! Save-as-file action for a single image.
//!
//! A download is fire-and-forget: the page hands the browser a link with a
//! `download` attribute and never learns whether the save worked.

use crate::naming::{decode_segment, final_segment};
use maud::{Markup, html};

/// What the browser is asked to save, and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// The exact image URL, unchanged.
    pub href: String,
    /// Suggested filename: the final path segment, decoded.
    pub filename: String,
}

impl Download {
    pub fn for_path(path: &str) -> Self {
        Self {
            href: path.to_string(),
            filename: decode_segment(final_segment(path)),
        }
    }

    /// Anchor that triggers the browser's native save.
    ///
    /// `href_prefix` re-roots the path for pages that live below the site
    /// root (the viewer pages use `"../"`).
    pub fn anchor(&self, class: &str, href_prefix: &str) -> Markup {
        html! {
            a class=(class) href={ (href_prefix) (self.href) } download=(self.filename) {
                "Download"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_final_segment() {
        let d = Download::for_path("walls-catppuccin-mocha/sunset.png");
        assert_eq!(d.href, "walls-catppuccin-mocha/sunset.png");
        assert_eq!(d.filename, "sunset.png");
    }

    #[test]
    fn filename_is_decoded() {
        let d = Download::for_path("walls/sun%20%231.png");
        assert_eq!(d.href, "walls/sun%20%231.png");
        assert_eq!(d.filename, "sun #1.png");
    }

    #[test]
    fn bare_name_is_its_own_filename() {
        assert_eq!(Download::for_path("forest.jpg").filename, "forest.jpg");
    }

    #[test]
    fn anchor_carries_download_attribute() {
        let html = Download::for_path("walls/a.png")
            .anchor("download-btn", "../")
            .into_string();
        assert!(html.contains(r#"href="../walls/a.png""#));
        assert!(html.contains(r#"download="a.png""#));
        assert!(html.contains(r#"class="download-btn""#));
    }

    #[test]
    fn anchor_escapes_names() {
        let html = Download::for_path(r#"walls/"quoted".png"#)
            .anchor("d", "")
            .into_string();
        assert!(html.contains("&quot;quoted&quot;"));
    }
}
