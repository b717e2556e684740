//! # Vitae
//!
//! A single-page resume rendering engine.
//!
//! Most resume generators lay content onto an unbounded canvas and
//! paginate afterwards, which is exactly how headers end up orphaned at
//! a page bottom and bullet lists get sliced mid-entry. Vitae does the
//! opposite: **the page is the whole world.** One fixed A4 surface, a
//! full-width identity band, two independent card columns, and a hard
//! rule that content which cannot fit is dropped — never spilled onto a
//! page two that does not exist.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON)
//!       ↓
//!   [model]    — Normalized resume: identity, sections, metadata
//!       ↓
//!   [layout]   — Section adapters → flows → two-pass card renderer
//!       ↓
//!   [compose]  — Background, header band, left column, right column
//!       ↓
//!   [surface]  — PDF back end (or a recording back end for tests)
//! ```
//!
//! Every card renders in two passes over the same content: a measure
//! pass that computes its height, then — if it fits — a draw pass inside
//! a rounded clip. The `Surface::measure_height` contract (identical
//! arguments, identical result) is what makes the two passes agree.

pub mod compose;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod style;
pub mod surface;
pub mod text;

pub use error::VitaeError;
pub use model::Resume;

use style::PageGeometry;
use surface::pdf::PdfSurface;

/// Render a resume to PDF bytes.
///
/// This is the primary entry point. Rendering itself is infallible:
/// missing sections are skipped, oversized content is truncated by the
/// overflow guard, and a broken photo becomes a placeholder.
pub fn render(resume: &Resume) -> Vec<u8> {
    let geometry = PageGeometry::default();
    let mut surface = PdfSurface::single_page(geometry.width, geometry.height);
    surface.set_metadata(
        resume.metadata.title.as_deref(),
        resume.metadata.author.as_deref(),
    );
    compose::build_document(surface, resume)
}

/// Render a resume described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>, VitaeError> {
    let resume: Resume = serde_json::from_str(json)?;
    Ok(render(&resume))
}
