//! Static snapshot of a gallery.
//!
//! Writes what the page looks like for the controller's current working
//! list: the grid page, and the viewer as it looks after `open_at(i)` for
//! every index. Navigation between viewer pages follows the same wrapping
//! as the live viewer.
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html          # Header, search, count, tile grid
//! └── view/
//!     ├── 1.html          # Viewer open on working[0]
//!     ├── 2.html
//!     └── ...
//! ```
//!
//! Images are referenced, not copied. By default the snapshot lands in the
//! site root next to the image folder; written anywhere else, the image
//! folder is addressed relative to the output directory
//! (see [`images_dir_from`]).

use crate::app::Gallery;
use crate::modal::Modal;
use crate::naming::encode_segment;
use crate::render;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Viewer error: {0}")]
    Viewer(#[from] crate::modal::ModalError),
}

/// Counts of what [`build`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub tiles: usize,
    pub viewer_pages: usize,
}

/// Write the snapshot of `gallery` into `output_dir`.
pub fn build(gallery: &Gallery, output_dir: &Path) -> Result<BuildSummary, SiteError> {
    let config = gallery.config();
    let working = gallery.working();

    fs::create_dir_all(output_dir)?;
    let index = render::render_index(config, gallery.query(), gallery.tiles());
    fs::write(output_dir.join("index.html"), index.into_string())?;
    info!(tiles = working.len(), "generated index.html");

    let view_dir = output_dir.join("view");
    if view_dir.exists() {
        fs::remove_dir_all(&view_dir)?;
    }
    fs::create_dir_all(&view_dir)?;

    let mut modal = Modal::default();
    for index in 0..working.len() {
        modal.open_at(index, working, config)?;
        if let Some(view) = modal.view() {
            let page = render::render_viewer_page(config, view, working.len());
            fs::write(view_dir.join(format!("{}.html", index + 1)), page.into_string())?;
        }
    }
    info!(pages = working.len(), "generated viewer pages");

    Ok(BuildSummary {
        tiles: working.len(),
        viewer_pages: working.len(),
    })
}

/// `images_dir` as addressed from pages in `output_dir`, for a site rooted
/// at `root`. Creates `output_dir` so both sides can be canonicalized.
pub fn images_dir_from(
    root: &Path,
    output_dir: &Path,
    images_dir: &str,
) -> Result<String, SiteError> {
    fs::create_dir_all(output_dir)?;
    let root = fs::canonicalize(root)?;
    let output = fs::canonicalize(output_dir)?;

    let root_parts: Vec<_> = root.components().collect();
    let output_parts: Vec<_> = output.components().collect();
    let shared = root_parts
        .iter()
        .zip(&output_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments = vec!["..".to_string(); output_parts.len() - shared];
    segments.extend(
        root_parts[shared..]
            .iter()
            .map(|part| encode_segment(&part.as_os_str().to_string_lossy())),
    );
    segments.push(images_dir.to_string());
    Ok(segments.join("/"))
}
