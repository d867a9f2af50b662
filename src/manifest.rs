//! Pre-generated manifest: the list the first discovery tier reads.
//!
//! The manifest is a JSON array of bare image names, written next to the
//! page:
//!
//! ```text
//! site/
//! ├── index.html
//! ├── images.json                 ← ["forest.jpg", "sunset.png"]
//! └── walls-catppuccin-mocha/
//!     ├── forest.jpg
//!     ├── sunset.png
//!     ├── README.md               (not an image, skipped)
//!     └── drafts/                 (subdirectory, skipped)
//! ```
//!
//! Only regular files directly inside the image folder are listed, matching
//! what the hosting-tree tier would find.

use crate::naming::has_image_extension;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Image names directly inside `dir`, sorted.
pub fn scan_images(dir: &Path, extensions: &[String]) -> Result<Vec<String>, ManifestError> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if has_image_extension(&name, extensions) {
            images.push(name);
        }
    }
    images.sort();
    Ok(images)
}

/// Write `images` as a pretty-printed JSON array.
pub fn write_manifest(path: &Path, images: &[String]) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(images)?;
    fs::write(path, json)?;
    Ok(())
}
