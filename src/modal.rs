//! Fullscreen single-image viewer.
//!
//! ## State machine
//!
//! ```text
//!            open_at(i)               prev() / next()
//!  Closed ───────────────▶ Open{i} ◀──────────────────┐
//!    ▲                       │  └─────────────────────┘
//!    └──────── close() ──────┘
//! ```
//!
//! The viewer never owns the image list. Every operation takes the current
//! working list, so the index is checked against the list it indexes. Wrapping
//! is modulo the list length: `prev` from 0 goes to the last entry, `next`
//! from the last goes to 0.

use crate::config::GalleryConfig;
use crate::download::Download;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModalError {
    #[error("index {index} out of range for {len} images")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Everything the open viewer displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub index: usize,
    /// Displayed image source.
    pub src: String,
    /// Filename label.
    pub filename: String,
    /// Modal-level download control, wired to the current image.
    pub download: Download,
    /// Prev/next controls are shown only for lists longer than one.
    pub show_nav: bool,
}

/// The viewer: closed, or open on one entry of the working list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Open(ViewerView),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open(_))
    }

    /// Current index, only while open.
    pub fn current_index(&self) -> Option<usize> {
        match self {
            Modal::Open(view) => Some(view.index),
            Modal::Closed => None,
        }
    }

    pub fn view(&self) -> Option<&ViewerView> {
        match self {
            Modal::Open(view) => Some(view),
            Modal::Closed => None,
        }
    }

    /// Background scrolling is suppressed exactly while the viewer is open.
    pub fn background_scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Open on `working[index]`. Out-of-range indices leave the state as-is.
    pub fn open_at(
        &mut self,
        index: usize,
        working: &[String],
        config: &GalleryConfig,
    ) -> Result<(), ModalError> {
        let name = working.get(index).ok_or(ModalError::IndexOutOfRange {
            index,
            len: working.len(),
        })?;
        let src = config.image_url(name);
        *self = Modal::Open(ViewerView {
            index,
            download: Download::for_path(&src),
            src,
            filename: name.clone(),
            show_nav: working.len() > 1,
        });
        Ok(())
    }

    /// Clear the image and return to closed. No-op when already closed.
    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    /// Step back with wraparound. No-op when closed.
    pub fn prev(&mut self, working: &[String], config: &GalleryConfig) -> Result<(), ModalError> {
        self.step(working, config, wrapped_prev)
    }

    /// Step forward with wraparound. No-op when closed.
    pub fn next(&mut self, working: &[String], config: &GalleryConfig) -> Result<(), ModalError> {
        self.step(working, config, wrapped_next)
    }

    fn step(
        &mut self,
        working: &[String],
        config: &GalleryConfig,
        advance: fn(usize, usize) -> Option<usize>,
    ) -> Result<(), ModalError> {
        let Some(index) = self.current_index() else {
            return Ok(());
        };
        let target = advance(index, working.len())
            .ok_or(ModalError::IndexOutOfRange { index, len: 0 })?;
        self.open_at(target, working, config)
    }
}

/// Index reached by `prev` from `index` in a list of `len`. `None` for an
/// empty list.
pub fn wrapped_prev(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}

/// Index reached by `next` from `index` in a list of `len`. `None` for an
/// empty list.
pub fn wrapped_next(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// A tile or viewer image failed to load. Diagnostic only.
pub fn report_load_failure(src: &str) {
    warn!(src, "failed to load image");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img-{i}.png")).collect()
    }

    fn config() -> GalleryConfig {
        GalleryConfig::default()
    }

    #[test]
    fn starts_closed() {
        let modal = Modal::default();
        assert!(!modal.is_open());
        assert_eq!(modal.current_index(), None);
        assert!(!modal.background_scroll_locked());
    }

    #[test]
    fn open_at_sets_view() {
        let list = working(3);
        let mut modal = Modal::default();
        modal.open_at(1, &list, &config()).unwrap();
        let view = modal.view().unwrap();

        assert_eq!(view.index, 1);
        assert_eq!(view.filename, "img-1.png");
        assert_eq!(view.src, "walls-catppuccin-mocha/img-1.png");
        assert_eq!(view.download.href, view.src);
        assert_eq!(view.download.filename, "img-1.png");
        assert!(modal.background_scroll_locked());
    }

    #[test]
    fn open_at_out_of_range_leaves_state() {
        let list = working(2);
        let mut modal = Modal::default();
        let err = modal.open_at(2, &list, &config()).unwrap_err();
        assert_eq!(err, ModalError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn open_at_on_empty_list_fails() {
        let mut modal = Modal::default();
        assert!(modal.open_at(0, &[], &config()).is_err());
        assert!(!modal.is_open());
    }

    #[test]
    fn single_image_hides_nav() {
        let mut modal = Modal::default();
        modal.open_at(0, &working(1), &config()).unwrap();
        assert!(!modal.view().unwrap().show_nav);
    }

    #[test]
    fn two_or_more_images_show_nav() {
        let mut modal = Modal::default();
        modal.open_at(0, &working(2), &config()).unwrap();
        assert!(modal.view().unwrap().show_nav);
        modal.open_at(0, &working(5), &config()).unwrap();
        assert!(modal.view().unwrap().show_nav);
    }

    #[test]
    fn close_clears_source_and_unlocks_scroll() {
        let mut modal = Modal::default();
        modal.open_at(0, &working(2), &config()).unwrap();
        modal.close();
        assert_eq!(modal, Modal::Closed);
        assert!(modal.view().is_none());
        assert!(!modal.background_scroll_locked());
        // Closing twice is harmless
        modal.close();
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let list = working(3);
        let mut modal = Modal::default();
        modal.open_at(0, &list, &config()).unwrap();
        modal.prev(&list, &config()).unwrap();
        assert_eq!(modal.current_index(), Some(2));
    }

    #[test]
    fn next_from_last_wraps_to_first() {
        let list = working(3);
        let mut modal = Modal::default();
        modal.open_at(2, &list, &config()).unwrap();
        modal.next(&list, &config()).unwrap();
        assert_eq!(modal.current_index(), Some(0));
    }

    #[test]
    fn navigation_refreshes_filename_and_download() {
        let list = working(3);
        let mut modal = Modal::default();
        modal.open_at(0, &list, &config()).unwrap();
        modal.next(&list, &config()).unwrap();
        let view = modal.view().unwrap();
        assert_eq!(view.filename, "img-1.png");
        assert_eq!(view.download.filename, "img-1.png");
    }

    #[test]
    fn single_image_navigation_stays_put() {
        let list = working(1);
        let mut modal = Modal::default();
        modal.open_at(0, &list, &config()).unwrap();
        modal.next(&list, &config()).unwrap();
        assert_eq!(modal.current_index(), Some(0));
        modal.prev(&list, &config()).unwrap();
        assert_eq!(modal.current_index(), Some(0));
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let list = working(3);
        let mut modal = Modal::default();
        modal.next(&list, &config()).unwrap();
        modal.prev(&list, &config()).unwrap();
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let list = working(4);
        let mut modal = Modal::default();
        modal.open_at(1, &list, &config()).unwrap();
        for _ in 0..4 {
            modal.next(&list, &config()).unwrap();
        }
        assert_eq!(modal.current_index(), Some(1));
        for _ in 0..4 {
            modal.prev(&list, &config()).unwrap();
        }
        assert_eq!(modal.current_index(), Some(1));
    }

    #[test]
    fn wrapped_helpers_match_navigation() {
        assert_eq!(wrapped_prev(0, 3), Some(2));
        assert_eq!(wrapped_next(2, 3), Some(0));
        assert_eq!(wrapped_next(0, 1), Some(0));
        assert_eq!(wrapped_prev(0, 1), Some(0));
    }

    #[test]
    fn wrapped_helpers_on_empty_list() {
        assert_eq!(wrapped_prev(0, 0), None);
        assert_eq!(wrapped_next(0, 0), None);
    }

    #[test]
    fn navigating_an_emptied_list_fails_without_panicking() {
        let mut modal = Modal::default();
        modal.open_at(0, &working(2), &config()).unwrap();
        assert!(modal.next(&[], &config()).is_err());
        assert!(modal.prev(&[], &config()).is_err());
        assert_eq!(modal.current_index(), Some(0));
    }

    #[test]
    fn open_at_encodes_source_but_not_label() {
        let list = vec!["sun #1.png".to_string()];
        let mut modal = Modal::default();
        modal.open_at(0, &list, &config()).unwrap();
        let view = modal.view().unwrap();
        assert_eq!(view.src, "walls-catppuccin-mocha/sun%20%231.png");
        assert_eq!(view.filename, "sun #1.png");
        assert_eq!(view.download.filename, "sun #1.png");
    }
}
