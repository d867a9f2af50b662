//! # Wall Gal
//!
//! A single-page image gallery that finds its own images. The page ships
//! without an image list; at load time it works out what is in the image
//! folder by asking, in order, whoever can answer.
//!
//! # Architecture: Discover, Then Browse
//!
//! ```text
//! 1. Resolve   page URL  →  canonical list   (manifest → hosting tree → listing)
//! 2. Filter    query     →  working list     (case-insensitive substring)
//! 3. Render    working   →  grid + viewer    (Maud, tiny embedded script)
//! ```
//!
//! The canonical list is fixed once resolution finishes. Search derives a
//! working list from it; the grid and the viewer only ever index into the
//! working list.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Three-tier discovery chain, first success wins |
//! | [`fetch`] | `Fetch` trait and the `reqwest`/filesystem transport behind it |
//! | [`app`] | The `Gallery` controller: state plus event handling |
//! | [`search`] | Query normalization and order-preserving filtering |
//! | [`modal`] | Viewer state machine with wraparound navigation |
//! | [`render`] | Maud markup for header, tiles, grid and viewer |
//! | [`download`] | Download anchors that keep the original filename |
//! | [`site`] | Writes a static snapshot of a gallery to disk |
//! | [`manifest`] | Scans the image folder and writes the manifest |
//! | [`config`] | `config.toml` loading, validation and merging over stock defaults |
//! | [`naming`] | Filename parsing and extension checks |
//! | [`types`] | `Tier` and `Resolution`, shared by discovery and the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failures Fall Through
//!
//! A tier that errors, answers non-2xx, or does not apply to the current host
//! is logged and skipped. When every tier fails the gallery is simply empty
//! (`0 wallpapers`); nothing is surfaced as a page error.
//!
//! ## Transport Behind a Trait
//!
//! Discovery talks to [`fetch::Fetch`], not to `reqwest`. The binary uses
//! [`fetch::Fetcher`], which also serves `file://` URLs from disk so a local
//! folder behaves like a server with directory indexes. Tests substitute an
//! in-memory double.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a build error and every interpolated filename is escaped.

pub mod app;
pub mod config;
pub mod download;
pub mod fetch;
pub mod manifest;
pub mod modal;
pub mod naming;
pub mod output;
pub mod render;
pub mod resolve;
pub mod search;
pub mod site;
pub mod types;
