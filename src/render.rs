//! HTML rendering of gallery state.
//!
//! Everything the page shows is a pure function of controller state:
//!
//! - **Header**: title, search input, result count (`"12 wallpapers"`)
//! - **Grid**: one tile per working-list entry (image, filename, download)
//! - **Viewer**: the open image with close, prev/next and download controls
//!
//! Rendering always produces the whole grid; there is no diffing. Tiles are
//! built first as [`Tile`] values so the controller can track per-tile state
//! (the deferred image source) between renders.
//!
//! ## Hooks for the page script
//!
//! | Attribute | Element | Used for |
//! |-----------|---------|----------|
//! | `data-index` | tile | position in the working list |
//! | `data-open` | tile | viewer URL opened by click or Enter/Space |
//! | `data-name` | tile | in-page filtering |
//! | `data-src` | tile image | deferred source, applied on visibility |
//! | `data-root-margin` | grid | visibility margin |
//! | `data-close`/`data-prev`/`data-next` | viewer | Escape/ArrowLeft/ArrowRight |
//! | `data-position` | viewer | 1-based page number, matched against the grid's working list |
//!
//! The grid hands its current working list to a viewer page as
//! `?q=<query>&in=<page numbers>`. The viewer page then takes prev/next and
//! nav visibility from that list instead of the one it was built with.
//!
//! Uses [maud](https://maud.lambda.xyz/), so every interpolated name is
//! escaped.

use crate::config::GalleryConfig;
use crate::download::Download;
use crate::modal::{ViewerView, wrapped_next, wrapped_prev};
use crate::naming::alt_text;
use crate::output::count_label;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const JS: &str = include_str!("../static/gallery.js");

/// One grid element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub index: usize,
    pub name: String,
    pub src: String,
    pub alt: String,
    /// Source not applied yet; rendered as `data-src` until revealed.
    pub deferred: bool,
    pub download: Download,
}

impl Tile {
    pub fn new(index: usize, name: &str, config: &GalleryConfig) -> Self {
        let src = config.image_url(name);
        Self {
            index,
            name: name.to_string(),
            alt: alt_text(name),
            deferred: config.lazy.defer_sources,
            download: Download::for_path(&src),
            src,
        }
    }

    /// Apply the deferred source once the tile comes into view.
    ///
    /// Returns whether anything changed: tiles without a deferred source are
    /// left to the native lazy loading.
    pub fn reveal(&mut self) -> bool {
        std::mem::replace(&mut self.deferred, false)
    }
}

/// Tiles for a working list, indexed by position.
pub fn build_tiles(working: &[String], config: &GalleryConfig) -> Vec<Tile> {
    working
        .iter()
        .enumerate()
        .map(|(index, name)| Tile::new(index, name, config))
        .collect()
}

/// Viewer page URL for a working-list index, relative to the grid page.
pub fn viewer_href(index: usize) -> String {
    format!("view/{}.html", index + 1)
}

// ============================================================================
// Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, body_style: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body style=[body_style] {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Title, search input and running count.
pub fn render_header(config: &GalleryConfig, query: &str, count: usize) -> Markup {
    html! {
        header.gallery-header {
            h1 { (config.title) }
            input #searchInput type="search" placeholder="Search…" value=(query) autocomplete="off";
            span #imageCount data-noun=(config.count_noun) { (count_label(count, &config.count_noun)) }
        }
    }
}

/// A single focusable tile.
pub fn render_tile(tile: &Tile) -> Markup {
    let href = viewer_href(tile.index);
    html! {
        div.gallery-item tabindex="0" data-index=(tile.index) data-open=(href) data-name=(tile.name) {
            a.gallery-item-open href=(href) tabindex="-1" {
                @if tile.deferred {
                    img data-src=(tile.src) alt=(tile.alt) loading="lazy" decoding="async";
                } @else {
                    img src=(tile.src) alt=(tile.alt) loading="lazy" decoding="async";
                }
            }
            div.gallery-item-info {
                div.gallery-item-name { (tile.name) }
                (tile.download.anchor("download-btn-small", ""))
            }
        }
    }
}

/// The full grid. Always replaces whatever was rendered before.
pub fn render_gallery(tiles: &[Tile], config: &GalleryConfig) -> Markup {
    html! {
        main #gallery.gallery data-root-margin=(config.lazy.root_margin) {
            @for tile in tiles {
                (render_tile(tile))
            }
        }
    }
}

/// The open viewer for `view`, as it sits on its own page under `view/`.
///
/// `len` is the working-list length; prev/next point at the wrapped
/// neighbours and are hidden, without key hooks, for a single image.
/// `data-position` lets the page script re-derive the neighbours when the
/// grid hands over a narrower working list.
pub fn render_viewer(view: &ViewerView, len: usize) -> Markup {
    let page = |index: usize| format!("{}.html", index + 1);
    let prev = wrapped_prev(view.index, len).map(page);
    let next = wrapped_next(view.index, len).map(page);
    let close = "../index.html";
    let hook = |target: &Option<String>| target.clone().filter(|_| view.show_nav);

    html! {
        div #modal.modal.active data-position=(view.index + 1) data-close=(close)
            data-prev=[hook(&prev)] data-next=[hook(&next)] {
            a #modalOverlay.modal-overlay href=(close) aria-label="Close" {}
            div.modal-content {
                a #modalClose.modal-close href=(close) aria-label="Close" { "×" }
                a #modalPrev.modal-nav.modal-prev href=[prev] aria-label="Previous" hidden[!view.show_nav] { "‹" }
                img #modalImage src={ "../" (view.src) } alt=(alt_text(&view.filename));
                a #modalNext.modal-nav.modal-next href=[next] aria-label="Next" hidden[!view.show_nav] { "›" }
                div.modal-info {
                    span #modalFilename { (view.filename) }
                    (view.download.anchor("download-btn", "../"))
                }
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// The grid page: header plus tiles.
pub fn render_index(config: &GalleryConfig, query: &str, tiles: &[Tile]) -> Markup {
    let content = html! {
        (render_header(config, query, tiles.len()))
        (render_gallery(tiles, config))
    };
    base_document(&config.title, None, content)
}

/// A viewer page. Background scroll is suppressed on the body.
pub fn render_viewer_page(config: &GalleryConfig, view: &ViewerView, len: usize) -> Markup {
    let title = format!("{} - {}", view.filename, config.title);
    base_document(&title, Some("overflow: hidden"), render_viewer(view, len))
}

// ============================================================================
// Tests
// ============================================================================
