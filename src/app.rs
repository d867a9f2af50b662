//! The gallery controller.
//!
//! [`Gallery`] owns every piece of page state: the canonical list (fixed at
//! construction), the search query, the working list derived from it, the
//! tiles of the last render, and the viewer. Hosts feed it [`Event`]s and
//! repaint whatever the returned [`Redraw`] names.
//!
//! ```text
//! Resolution ──▶ Gallery::new ──▶ canonical (immutable)
//!                                   │ search::filter(query)
//!                                   ▼
//!                                 working ──▶ tiles ──▶ render_gallery
//!                                   │ index
//!                                   ▼
//!                                 Modal ──▶ render_viewer
//! ```

use crate::config::GalleryConfig;
use crate::modal::{self, Modal};
use crate::render::{self, Tile};
use crate::search;
use crate::types::{Resolution, Tier};
use maud::Markup;
use tracing::debug;

/// Keys the gallery reacts to, by DOM `KeyboardEvent.key` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other,
}

impl Key {
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Viewer controls that can be clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Close,
    /// The dimmed background behind the image.
    Overlay,
    Prev,
    Next,
}

/// Something the user (or the page) did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SearchInput(String),
    TileClicked(usize),
    TileKey(usize, Key),
    /// Document-level key press.
    Key(Key),
    Control(Control),
    /// Tile came within the visibility margin.
    TileVisible(usize),
    ImageFailed(String),
}

/// What the host has to repaint after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    /// Header count and the whole tile grid. Any open viewer is gone.
    Grid,
    /// The viewer (opened, closed, or moved to another image).
    Viewer,
    /// One tile, after its deferred source was applied.
    Tile(usize),
}

pub struct Gallery {
    config: GalleryConfig,
    canonical: Vec<String>,
    tier: Option<Tier>,
    query: String,
    working: Vec<String>,
    tiles: Vec<Tile>,
    modal: Modal,
}

impl Gallery {
    /// Build the page state from a finished resolution. No query, viewer closed.
    pub fn new(config: GalleryConfig, resolution: Resolution) -> Self {
        let working = resolution.images.clone();
        let tiles = render::build_tiles(&working, &config);
        Self {
            config,
            canonical: resolution.images,
            tier: resolution.tier,
            query: String::new(),
            working,
            tiles,
            modal: Modal::default(),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn canonical(&self) -> &[String] {
        &self.canonical
    }

    /// Tier that produced the canonical list, `None` if discovery failed.
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn working(&self) -> &[String] {
        &self.working
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Running count text, e.g. `"2 wallpapers"`.
    pub fn count_label(&self) -> String {
        crate::output::count_label(self.working.len(), &self.config.count_noun)
    }

    /// Process one event and report what needs repainting.
    pub fn handle(&mut self, event: Event) -> Redraw {
        debug!(?event, "gallery event");
        match event {
            Event::SearchInput(raw) => self.search(&raw),
            Event::TileClicked(index) => self.open_at(index),
            Event::TileKey(index, Key::Enter | Key::Space) => self.open_at(index),
            Event::TileKey(..) => Redraw::Nothing,
            Event::Key(key) if self.modal.is_open() => match key {
                Key::Escape => self.close(),
                Key::ArrowLeft => self.prev(),
                Key::ArrowRight => self.next(),
                _ => Redraw::Nothing,
            },
            Event::Key(_) => Redraw::Nothing,
            Event::Control(Control::Close | Control::Overlay) => self.close(),
            Event::Control(Control::Prev) => self.prev(),
            Event::Control(Control::Next) => self.next(),
            Event::TileVisible(index) => {
                let revealed = self.tiles.get_mut(index).is_some_and(Tile::reveal);
                if revealed {
                    Redraw::Tile(index)
                } else {
                    Redraw::Nothing
                }
            }
            Event::ImageFailed(src) => {
                modal::report_load_failure(&src);
                Redraw::Nothing
            }
        }
    }

    /// Recompute the working list and re-render the grid.
    ///
    /// The viewer indexes the working list, so an open viewer is closed
    /// whenever the list it points into is replaced.
    pub fn search(&mut self, raw: &str) -> Redraw {
        self.query = raw.to_string();
        self.working = search::filter(&self.canonical, raw);
        self.tiles = render::build_tiles(&self.working, &self.config);
        self.modal.close();
        Redraw::Grid
    }

    /// Open the viewer on a working-list index. Out-of-range is ignored.
    pub fn open_at(&mut self, index: usize) -> Redraw {
        match self.modal.open_at(index, &self.working, &self.config) {
            Ok(()) => Redraw::Viewer,
            Err(e) => {
                debug!(error = %e, "ignoring open request");
                Redraw::Nothing
            }
        }
    }

    pub fn close(&mut self) -> Redraw {
        if !self.modal.is_open() {
            return Redraw::Nothing;
        }
        self.modal.close();
        Redraw::Viewer
    }

    pub fn prev(&mut self) -> Redraw {
        self.navigate(Modal::prev)
    }

    pub fn next(&mut self) -> Redraw {
        self.navigate(Modal::next)
    }

    fn navigate(
        &mut self,
        step: fn(&mut Modal, &[String], &GalleryConfig) -> Result<(), modal::ModalError>,
    ) -> Redraw {
        if !self.modal.is_open() {
            return Redraw::Nothing;
        }
        match step(&mut self.modal, &self.working, &self.config) {
            Ok(()) => Redraw::Viewer,
            Err(e) => {
                debug!(error = %e, "ignoring navigation");
                Redraw::Nothing
            }
        }
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    pub fn render_header(&self) -> Markup {
        render::render_header(&self.config, &self.query, self.working.len())
    }

    pub fn render_gallery(&self) -> Markup {
        render::render_gallery(&self.tiles, &self.config)
    }

    pub fn render_tile(&self, index: usize) -> Option<Markup> {
        self.tiles.get(index).map(render::render_tile)
    }

    /// The open viewer, or `None` while closed.
    pub fn render_viewer(&self) -> Option<Markup> {
        self.modal
            .view()
            .map(|view| render::render_viewer(view, self.working.len()))
    }
}
