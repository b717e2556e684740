//! # Card Layout Engine
//!
//! The heart of Vitae. Content is composed out of *cards*: decorated,
//! independently laid-out boxes with a background, an optional header
//! banner, and a clipped body. A card's height depends on its wrapped
//! text, which only the surface can measure — so every card renders in
//! two passes:
//!
//! 1. **Measure pass** — ask the content block how tall it would be at
//!    the card's inner width. No drawing happens.
//! 2. **Overflow guard** — if the card would extend past the page
//!    bottom, draw nothing and report the remaining space. Content that
//!    cannot fit is dropped, never spilled onto a second page.
//! 3. **Draw pass** — shadow, background, banner, then the content block
//!    inside a rounded-corner clip.
//!
//! The two passes must agree. Rather than asking every adapter author to
//! keep a measure closure and a draw closure in sync, the `ContentBlock`
//! trait names the two operations, and the one real implementation
//! (`Flow`) walks the same item list with the same arithmetic in both.

pub mod sections;

use crate::style::{PageGeometry, TextStyle, Theme};
use crate::surface::Surface;

/// Per-column running vertical write position plus fixed column geometry.
///
/// Two independent cursors exist per document, one per column. They never
/// read or write each other's state.
#[derive(Debug, Clone, Copy)]
pub struct LayoutCursor {
    /// Column x origin. Fixed.
    pub x: f64,
    /// Column width. Fixed.
    pub width: f64,
    /// Current y offset. Advances monotonically.
    y: f64,
}

impl LayoutCursor {
    pub fn new(x: f64, width: f64, top: f64) -> Self {
        Self { x, width, y: top }
    }

    /// Current vertical offset.
    pub fn offset(&self) -> f64 {
        self.y
    }

    /// Advance by `height` (never negative) and return the new offset.
    pub fn advance(&mut self, height: f64) -> f64 {
        debug_assert!(height >= 0.0, "cursor cannot move upward");
        self.y += height.max(0.0);
        self.y
    }
}

/// The inner box a content block measures against and draws into.
#[derive(Debug, Clone, Copy)]
pub struct ContentFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// A card body that can report its height and draw itself.
///
/// `measure` must perform no drawing, and the height it returns must
/// equal the vertical extent `draw` actually consumes for the same
/// frame width — the card renderer clips to the measured height.
pub trait ContentBlock<S: Surface> {
    fn measure(&self, surface: &S, frame: ContentFrame) -> f64;
    fn draw(&self, surface: &mut S, frame: ContentFrame);
}

/// One item in a [`Flow`].
#[derive(Debug, Clone)]
enum FlowItem {
    /// A wrapped text run.
    Text {
        text: String,
        style: TextStyle,
        line_gap: f64,
    },
    /// A wrapped text run with a single bullet prefix.
    Bullet {
        text: String,
        style: TextStyle,
        line_gap: f64,
    },
    /// Fixed vertical space.
    Gap(f64),
}

/// The standard content block: a vertical flow of text runs, bullets,
/// and gaps. Measure and draw walk the identical item list, so their
/// heights agree by construction.
#[derive(Debug, Clone, Default)]
pub struct Flow {
    items: Vec<FlowItem>,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_text(&mut self, text: impl Into<String>, style: TextStyle, line_gap: f64) {
        let text = text.into();
        if !text.is_empty() {
            self.items.push(FlowItem::Text { text, style, line_gap });
        }
    }

    pub fn add_bullet(&mut self, text: impl Into<String>, style: TextStyle, line_gap: f64) {
        let text = text.into();
        if !text.is_empty() {
            self.items.push(FlowItem::Bullet { text, style, line_gap });
        }
    }

    pub fn add_gap(&mut self, height: f64) {
        if height > 0.0 {
            self.items.push(FlowItem::Gap(height));
        }
    }

    fn bullet_text(text: &str) -> String {
        format!("\u{2022} {}", text)
    }

    /// Height of a single item at the given width.
    fn item_height<S: Surface>(item: &FlowItem, surface: &S, width: f64) -> f64 {
        match item {
            FlowItem::Text { text, style, line_gap } => {
                surface.measure_height(text, width, style, *line_gap)
            }
            FlowItem::Bullet { text, style, line_gap } => {
                surface.measure_height(&Self::bullet_text(text), width, style, *line_gap)
            }
            FlowItem::Gap(height) => *height,
        }
    }
}

impl<S: Surface> ContentBlock<S> for Flow {
    fn measure(&self, surface: &S, frame: ContentFrame) -> f64 {
        self.items
            .iter()
            .map(|item| Self::item_height(item, surface, frame.width))
            .sum()
    }

    fn draw(&self, surface: &mut S, frame: ContentFrame) {
        let mut y = frame.y;
        for item in &self.items {
            match item {
                FlowItem::Text { text, style, line_gap } => {
                    surface.draw_text(text, frame.x, y, frame.width, style, *line_gap);
                }
                FlowItem::Bullet { text, style, line_gap } => {
                    surface.draw_text(
                        &Self::bullet_text(text),
                        frame.x,
                        y,
                        frame.width,
                        style,
                        *line_gap,
                    );
                }
                FlowItem::Gap(_) => {}
            }
            y += Self::item_height(item, surface, frame.width);
        }
    }
}

/// A single card invocation: origin, width, optional title.
///
/// Ephemeral — fully described by its inputs and fully consumed by one
/// `render_card` call.
#[derive(Debug, Clone)]
pub struct CardFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub title: Option<String>,
}

impl CardFrame {
    /// A card at the cursor's current position, spanning its column.
    pub fn at(cursor: &LayoutCursor, title: Option<&str>) -> Self {
        Self {
            x: cursor.x,
            y: cursor.offset(),
            width: cursor.width,
            title: title.map(str::to_string),
        }
    }
}

/// Render one card and return the height the caller should advance by.
///
/// Runs the measure pass, applies the overflow guard, draws the card
/// chrome, and runs the draw pass inside a scoped clip. On overflow the
/// card draws nothing and the remaining page space is returned instead,
/// so the cursor parks at the page bottom and subsequent cards are
/// truncated too.
pub fn render_card<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    geometry: &PageGeometry,
    frame: &CardFrame,
    block: &dyn ContentBlock<S>,
) -> f64 {
    let card = &theme.card;

    let inner_x = frame.x + card.padding;
    let inner_width = frame.width - card.padding * 2.0;
    let inner_y = frame.y
        + if frame.title.is_some() {
            card.header_height + card.padding * 2.0
        } else {
            card.padding
        };

    // Measure pass.
    let content_height = block.measure(
        surface,
        ContentFrame {
            x: inner_x,
            y: inner_y,
            width: inner_width,
        },
    );

    let total_height = content_height
        + if frame.title.is_some() {
            card.header_height + card.header_gap
        } else {
            0.0
        }
        + card.padding * 2.0;

    // Overflow guard: a card that cannot fit is dropped, not spilled.
    if frame.y + total_height > geometry.height + card.overflow_tolerance {
        return (geometry.height - frame.y).max(0.0);
    }

    // Shadow, then background.
    surface.fill_rounded_rect(
        frame.x + card.shadow_offset,
        frame.y + card.shadow_offset,
        frame.width,
        total_height,
        card.corner_radius,
        theme.card_shadow,
    );
    surface.fill_rounded_rect(
        frame.x,
        frame.y,
        frame.width,
        total_height,
        card.corner_radius,
        theme.card_background,
    );

    // Header banner across the card's top interior.
    if let Some(title) = &frame.title {
        let banner_height = card.header_height;
        surface.fill_rounded_rect(
            frame.x,
            frame.y,
            frame.width,
            banner_height,
            card.corner_radius,
            theme.card_header_background,
        );
        // Square off the banner's bottom edge under the rounded top.
        surface.fill_rect(
            frame.x,
            frame.y + banner_height / 2.0,
            frame.width,
            banner_height / 2.0,
            theme.card_header_background,
        );
        let title_style = theme.card_title();
        let title_y = frame.y + (banner_height - title_style.size) / 2.0;
        surface.draw_text(title, inner_x, title_y, inner_width, &title_style, 0.0);
    }

    // Draw pass, clipped to the card bounds. The clip is exited on every
    // path out, including an empty body.
    surface.clipped(
        frame.x,
        frame.y,
        frame.width,
        total_height,
        card.corner_radius,
        |s| {
            block.draw(
                s,
                ContentFrame {
                    x: inner_x,
                    y: inner_y,
                    width: inner_width,
                },
            );
        },
    );

    total_height + card.margin_bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::surface::recording::{DrawCall, RecordingSurface};

    fn body_style() -> TextStyle {
        TextStyle::new("Helvetica", 10.0, 400, Color::BLACK)
    }

    #[test]
    fn test_cursor_advances_monotonically() {
        let mut cursor = LayoutCursor::new(36.0, 180.0, 100.0);
        assert_eq!(cursor.offset(), 100.0);
        assert_eq!(cursor.advance(50.0), 150.0);
        assert_eq!(cursor.advance(0.0), 150.0);
        assert_eq!(cursor.advance(25.0), 175.0);
    }

    #[test]
    fn test_flow_measure_draw_symmetry() {
        let mut flow = Flow::new();
        flow.add_text("a paragraph that wraps over a couple of lines", body_style(), 2.0);
        flow.add_gap(6.0);
        flow.add_bullet("bulleted line that also wraps at this width", body_style(), 2.0);

        let mut surface = RecordingSurface::single_page();
        let frame = ContentFrame { x: 10.0, y: 20.0, width: 120.0 };
        let measured = flow.measure(&surface, frame);
        flow.draw(&mut surface, frame);

        // The last drawn run must end exactly where the measure said.
        let calls = surface.finish();
        let last = calls
            .iter()
            .rev()
            .find_map(|call| match call {
                DrawCall::Text { text, y, max_width, line_gap, .. } => {
                    Some((text.clone(), *y, *max_width, *line_gap))
                }
                _ => None,
            })
            .expect("flow drew text");
        let probe = RecordingSurface::single_page();
        let last_height = probe.measure_height(&last.0, last.2, &body_style(), last.3);
        let consumed = (last.1 + last_height) - frame.y;
        assert!((measured - consumed).abs() < 1e-9);
    }

    #[test]
    fn test_card_height_formula_untitled() {
        let theme = Theme::default();
        let geometry = PageGeometry::default();
        let mut surface = RecordingSurface::single_page();
        let mut flow = Flow::new();
        flow.add_text("one line", body_style(), 2.0);

        let frame = CardFrame { x: 36.0, y: 100.0, width: 200.0, title: None };
        let returned = render_card(&mut surface, &theme, &geometry, &frame, &flow);

        let content = 12.0; // one line at size 10 + gap 2
        let expected = content + theme.card.padding * 2.0 + theme.card.margin_bottom;
        assert!((returned - expected).abs() < 1e-9);
    }

    #[test]
    fn test_card_height_formula_titled() {
        let theme = Theme::default();
        let geometry = PageGeometry::default();
        let mut surface = RecordingSurface::single_page();
        let mut flow = Flow::new();
        flow.add_text("one line", body_style(), 2.0);

        let frame = CardFrame { x: 36.0, y: 100.0, width: 200.0, title: Some("Skills".into()) };
        let returned = render_card(&mut surface, &theme, &geometry, &frame, &flow);

        let content = 12.0;
        let expected = content
            + theme.card.header_height
            + theme.card.header_gap
            + theme.card.padding * 2.0
            + theme.card.margin_bottom;
        assert!((returned - expected).abs() < 1e-9);
    }

    #[test]
    fn test_overflow_guard_draws_nothing() {
        let theme = Theme::default();
        let geometry = PageGeometry::default();
        let mut surface = RecordingSurface::single_page();
        let mut flow = Flow::new();
        // Far more text than the remaining page can hold.
        flow.add_text("word ".repeat(3000), body_style(), 2.0);

        let y = geometry.height - 40.0;
        let frame = CardFrame { x: 36.0, y, width: 200.0, title: Some("Objective".into()) };
        let returned = render_card(&mut surface, &theme, &geometry, &frame, &flow);

        assert!((returned - 40.0).abs() < 1e-9, "returns remaining space");
        assert!(surface.finish().is_empty(), "nothing may be drawn");
    }

    #[test]
    fn test_overflow_past_page_bottom_returns_zero() {
        let theme = Theme::default();
        let geometry = PageGeometry::default();
        let mut surface = RecordingSurface::single_page();
        let mut flow = Flow::new();
        flow.add_text("text", body_style(), 2.0);

        let frame = CardFrame {
            x: 36.0,
            y: geometry.height + 5.0,
            width: 200.0,
            title: None,
        };
        let returned = render_card(&mut surface, &theme, &geometry, &frame, &flow);
        assert_eq!(returned, 0.0);
    }

    #[test]
    fn test_empty_body_still_enters_and_exits_clip() {
        let theme = Theme::default();
        let geometry = PageGeometry::default();
        let mut surface = RecordingSurface::single_page();
        let flow = Flow::new();

        let frame = CardFrame { x: 36.0, y: 50.0, width: 200.0, title: None };
        render_card(&mut surface, &theme, &geometry, &frame, &flow);

        let calls = surface.finish();
        let pushes = calls.iter().filter(|c| matches!(c, DrawCall::PushClip { .. })).count();
        let pops = calls.iter().filter(|c| matches!(c, DrawCall::PopClip)).count();
        assert_eq!(pushes, 1);
        assert_eq!(pops, 1);
    }

    #[test]
    fn test_bullet_prefix_applied_once() {
        let mut flow = Flow::new();
        flow.add_bullet("already clean", body_style(), 2.0);

        let mut surface = RecordingSurface::single_page();
        flow.draw(&mut surface, ContentFrame { x: 0.0, y: 0.0, width: 300.0 });
        let calls = surface.finish();
        match &calls[0] {
            DrawCall::Text { text, .. } => assert_eq!(text, "\u{2022} already clean"),
            other => panic!("expected text, got {:?}", other),
        }
    }
}
