//! # Recording Surface
//!
//! A surface that records every draw call as a comparable value instead
//! of producing output. This is the introspection layer the integration
//! tests build on: card counts, clip balance, column independence, and
//! the measure/draw symmetry property are all checked against the
//! recorded call sequence.
//!
//! Measurement goes through the same font context and line breaker as
//! the PDF surface, so heights recorded here are the heights the real
//! back end would consume.

use crate::font::FontContext;
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextStyle};
use crate::surface::{measure_text_height, Surface};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        color: Color,
    },
    Path {
        points: Vec<(f64, f64)>,
        color: Color,
    },
    Image {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        width_px: u32,
        height_px: u32,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        max_width: f64,
        size: f64,
        weight: u32,
        color: Color,
        line_gap: f64,
    },
    PushClip {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
    },
    PopClip,
}

impl DrawCall {
    /// The x origin of this call, for column-bucketing in tests.
    pub fn x(&self) -> Option<f64> {
        match self {
            DrawCall::Rect { x, .. }
            | DrawCall::RoundedRect { x, .. }
            | DrawCall::Image { x, .. }
            | DrawCall::Text { x, .. }
            | DrawCall::PushClip { x, .. } => Some(*x),
            DrawCall::Circle { cx, .. } => Some(*cx),
            DrawCall::Path { points, .. } => points.first().map(|p| p.0),
            DrawCall::PopClip => None,
        }
    }
}

/// A surface that accumulates `DrawCall`s.
pub struct RecordingSurface {
    fonts: FontContext,
    calls: Vec<DrawCall>,
    clip_depth: usize,
}

impl RecordingSurface {
    pub fn single_page() -> Self {
        Self {
            fonts: FontContext::new(),
            calls: Vec::new(),
            clip_depth: 0,
        }
    }

    /// The calls recorded so far (also available by value via `finish`).
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::single_page()
    }
}

impl Surface for RecordingSurface {
    type Output = Vec<DrawCall>;

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, w, h, color });
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color) {
        self.calls.push(DrawCall::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.calls.push(DrawCall::Circle { cx, cy, r, color });
    }

    fn fill_path(&mut self, points: &[(f64, f64)], color: Color) {
        self.calls.push(DrawCall::Path {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64) {
        self.calls.push(DrawCall::Image {
            x,
            y,
            w,
            h,
            width_px: image.width_px,
            height_px: image.height_px,
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, max_width: f64, style: &TextStyle, line_gap: f64) {
        if text.is_empty() {
            return;
        }
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            max_width,
            size: style.size,
            weight: style.weight,
            color: style.color,
            line_gap,
        });
    }

    fn measure_height(&self, text: &str, max_width: f64, style: &TextStyle, line_gap: f64) -> f64 {
        measure_text_height(&self.fonts, text, max_width, style, line_gap)
    }

    fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        self.clip_depth += 1;
        self.calls.push(DrawCall::PushClip { x, y, w, h, radius });
    }

    fn pop_clip(&mut self) {
        assert!(self.clip_depth > 0, "pop_clip without matching push_clip");
        self.clip_depth -= 1;
        self.calls.push(DrawCall::PopClip);
    }

    fn finish(self) -> Vec<DrawCall> {
        assert_eq!(self.clip_depth, 0, "finish with an unbalanced clip stack");
        self.calls
    }
}
