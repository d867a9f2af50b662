//! Image name helpers shared by discovery, rendering and downloads.
//!
//! An image name is a bare filename with extension (`sunset.png`). Names
//! discovered through the fallback tiers must carry a recognized extension;
//! names from the manifest are trusted as-is.
//!
//! ## Display
//!
//! - Label: the name itself (`forest-path.JPG`)
//! - Alt text: the name with its final extension removed (`forest-path`)
//! - Download filename: the last `/` segment of the asset path, decoded
//!
//! ## URLs
//!
//! Names are stored decoded (`sun #1.png`). Wherever a name becomes part of
//! a URL it goes through [`encode_segment`]; wherever a name is read back
//! out of a URL it goes through [`decode_segment`].

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Bytes that cannot appear raw in a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of splitting an image name into stem and extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Everything before the final dot. The full name if there is no extension.
    pub stem: String,
    /// Extension without the dot, as written. `None` for dotless names.
    pub extension: Option<String>,
}

/// Split a name on its final dot.
///
/// - `"sunset.png"` → stem="sunset", extension=Some("png")
/// - `"city.night.JPEG"` → stem="city.night", extension=Some("JPEG")
/// - `"README"` → stem="README", extension=None
/// - `".hidden"` → stem="", extension=Some("hidden")
/// - `"odd."` → stem="odd.", extension=None
pub fn parse_image_name(name: &str) -> ParsedName {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => ParsedName {
            stem: name[..dot].to_string(),
            extension: Some(name[dot + 1..].to_string()),
        },
        _ => ParsedName {
            stem: name.to_string(),
            extension: None,
        },
    }
}

/// True when `value` ends in `.{ext}` for one of `extensions`, ignoring case.
///
/// Works on bare names, paths and full URLs alike, since only the suffix is
/// inspected.
pub fn has_image_extension(value: &str, extensions: &[String]) -> bool {
    let lower = value.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext.to_lowercase())))
}

/// Final `/` segment of a path. Empty when the path ends in a slash.
pub fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Alt text for an image: the name without its final extension.
pub fn alt_text(name: &str) -> String {
    parse_image_name(name).stem
}

/// Percent-encode a name for use as one URL path segment.
pub fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, SEGMENT).to_string()
}

/// Decode a URL path segment back into a name. Invalid UTF-8 is replaced.
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
