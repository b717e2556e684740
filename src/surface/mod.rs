//! # Surface
//!
//! The drawing back end the layout engine targets. A `Surface` exposes
//! page-level primitives — filled shapes, clipped regions, raster images,
//! wrapped text runs — plus one pure query, `measure_height`, which the
//! two-pass card renderer depends on.
//!
//! Coordinates are top-left origin, y growing downward, in points. Each
//! implementation converts to its own native space (the PDF surface flips
//! to bottom-left origin internally).
//!
//! A surface is single-page by construction: there is no page-break
//! operation anywhere on this trait, so "forgot to disable pagination"
//! is not an expressible bug.

pub mod pdf;
pub mod recording;

use crate::font::FontContext;
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextStyle};
use crate::text;

/// Page-level drawing primitives plus pure text-height measurement.
pub trait Surface {
    /// What `finish` produces (PDF bytes, a draw-call log, ...).
    type Output;

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color);

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color);

    /// Fill a closed polygon given as a point list.
    fn fill_path(&mut self, points: &[(f64, f64)], color: Color);

    /// Draw a raster image cover-fitted into the target box: scaled to
    /// fill the box completely, centered, overflow clipped away.
    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64);

    /// Draw a text run wrapped to `max_width`, the first line's box
    /// starting at `(x, y)`. Line advance is `style.size + line_gap`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, max_width: f64, style: &TextStyle, line_gap: f64);

    /// Height the given text consumes when wrapped to `max_width`.
    ///
    /// Referentially consistent: identical arguments always yield the
    /// identical result. The card renderer's measure pass relies on this
    /// to predict exactly what the draw pass will consume.
    fn measure_height(&self, text: &str, max_width: f64, style: &TextStyle, line_gap: f64) -> f64;

    /// Enter a rounded-rect clip region. Prefer `clipped`, which pairs
    /// this with `pop_clip` on every return path.
    fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64);

    /// Exit the most recently entered clip region.
    fn pop_clip(&mut self);

    /// Run `body` inside a rounded-rect clip region. The clip is exited
    /// before this returns, whatever path `body` takes out.
    fn clipped<R>(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R
    where
        Self: Sized,
    {
        self.push_clip(x, y, w, h, radius);
        let result = body(self);
        self.pop_clip();
        result
    }

    /// Finalize the page and hand back the backing store.
    fn finish(self) -> Self::Output
    where
        Self: Sized;
}

/// Shared measurement arithmetic so every surface wraps text identically.
///
/// Height is `line_count * (font_size + line_gap)`; zero for empty text.
pub(crate) fn measure_text_height(
    fonts: &FontContext,
    text: &str,
    max_width: f64,
    style: &TextStyle,
    line_gap: f64,
) -> f64 {
    let lines = text::break_into_lines(
        fonts,
        text,
        &style.family,
        style.weight,
        style.is_italic(),
        style.size,
        max_width,
    );
    lines.len() as f64 * (style.size + line_gap)
}
