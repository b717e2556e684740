//! # Style & Geometry
//!
//! Every fixed constant of the page template lives here as an explicit,
//! immutable configuration value: page box, column split, card chrome,
//! palette, and the text styles the section adapters use. Nothing in the
//! layout code reaches for module-level globals — the composer owns one
//! `Theme` and one `PageGeometry` and threads them through.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Font style for text runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// A fully resolved text style: family, weight, slant, size, color.
///
/// The surface measures and draws with exactly these values — there is no
/// cascade or inheritance step between an adapter and the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub weight: u32,
    pub style: FontStyle,
    pub color: Color,
}

impl TextStyle {
    pub fn new(family: &str, size: f64, weight: u32, color: Color) -> Self {
        Self {
            family: family.to_string(),
            size,
            weight,
            style: FontStyle::Normal,
            color,
        }
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn is_italic(&self) -> bool {
        self.style == FontStyle::Italic
    }
}

/// Fixed page box and column split for one document.
///
/// Immutable for the lifetime of a build. The left column takes
/// `left_fraction` of the content width; the right column takes the rest
/// minus the gap.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    /// Page width in points (1/72 inch).
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Outer margin on all four sides.
    pub margin: f64,
    /// Horizontal gap between the two columns.
    pub column_gap: f64,
    /// Fraction of the content width given to the left column.
    pub left_fraction: f64,
    /// Height of the identity header band at the top of the page.
    pub header_band_height: f64,
    /// Vertical gap between the header band and the first row of cards.
    pub header_band_gap: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 in points.
        Self {
            width: 595.28,
            height: 841.89,
            margin: 36.0,
            column_gap: 14.0,
            left_fraction: 0.35,
            header_band_height: 104.0,
            header_band_gap: 14.0,
        }
    }
}

impl PageGeometry {
    /// Width of the content area between the margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    /// X origin and width of the left column.
    pub fn left_column(&self) -> (f64, f64) {
        (self.margin, self.content_width() * self.left_fraction)
    }

    /// X origin and width of the right column.
    pub fn right_column(&self) -> (f64, f64) {
        let (left_x, left_w) = self.left_column();
        let x = left_x + left_w + self.column_gap;
        (x, self.content_width() - left_w - self.column_gap)
    }

    /// Y offset where the columns start (below the identity header band).
    pub fn columns_top(&self) -> f64 {
        self.margin + self.header_band_height + self.header_band_gap
    }
}

/// Card chrome constants: padding, header banner, shadow, spacing.
#[derive(Debug, Clone, Copy)]
pub struct CardStyle {
    /// Inner padding between the card edge and its content.
    pub padding: f64,
    /// Height of the title banner across the card's top interior.
    pub header_height: f64,
    /// Gap between the title banner and the content below it.
    pub header_gap: f64,
    /// Corner radius of the card background and its clip region.
    pub corner_radius: f64,
    /// Offset of the drop shadow behind the card.
    pub shadow_offset: f64,
    /// Vertical margin added below every card (included in the returned
    /// height so cursors advance past it).
    pub margin_bottom: f64,
    /// Slack allowed past the page bottom before the overflow guard trips.
    pub overflow_tolerance: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            padding: 10.0,
            header_height: 20.0,
            header_gap: 6.0,
            corner_radius: 6.0,
            shadow_offset: 2.5,
            margin_bottom: 12.0,
            overflow_tolerance: 2.0,
        }
    }
}

/// The complete visual theme: palette, card chrome, and type scale.
#[derive(Debug, Clone)]
pub struct Theme {
    pub page_background: Color,
    pub accent: Color,
    pub accent_dark: Color,
    pub card_background: Color,
    pub card_shadow: Color,
    pub card_header_background: Color,
    pub card_header_text: Color,
    pub body_text: Color,
    pub muted_text: Color,
    pub banner_text: Color,
    pub card: CardStyle,
    /// Font family used throughout. Swappable via custom font registration.
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_background: Color::hex("#eef1f4"),
            accent: Color::hex("#2c6e91"),
            accent_dark: Color::hex("#1d4a62"),
            card_background: Color::WHITE,
            card_shadow: Color::hex("#c9cfd6"),
            card_header_background: Color::hex("#2c6e91"),
            card_header_text: Color::WHITE,
            body_text: Color::hex("#2b2f33"),
            muted_text: Color::hex("#5f6b76"),
            banner_text: Color::WHITE,
            card: CardStyle::default(),
            font_family: "Helvetica".to_string(),
        }
    }
}

impl Theme {
    /// Title style for the card header banner.
    pub fn card_title(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 11.0, 700, self.card_header_text)
    }

    /// Regular body text inside cards.
    pub fn body(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 9.5, 400, self.body_text)
    }

    /// Bold entry heading inside cards (degree, role, project name).
    pub fn entry_heading(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 10.0, 700, self.body_text)
    }

    /// Secondary line under an entry heading (institution, company, dates).
    pub fn entry_sub(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 9.0, 400, self.muted_text)
    }

    /// Name line in the identity header band.
    pub fn banner_name(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 22.0, 700, self.banner_text)
    }

    /// Professional title line in the identity header band.
    pub fn banner_title(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 11.0, 400, self.banner_text)
    }

    /// Contact detail lines in the identity header band.
    pub fn banner_contact(&self) -> TextStyle {
        TextStyle::new(&self.font_family, 8.5, 400, self.banner_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::hex("#ff0000");
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.g).abs() < 1e-9);
        let short = Color::hex("#f00");
        assert!((short.r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_split_covers_content_width() {
        let geom = PageGeometry::default();
        let (_, lw) = geom.left_column();
        let (rx, rw) = geom.right_column();
        assert!((lw + geom.column_gap + rw - geom.content_width()).abs() < 1e-6);
        assert!((rx + rw - (geom.width - geom.margin)).abs() < 1e-6);
    }

    #[test]
    fn test_columns_start_below_header_band() {
        let geom = PageGeometry::default();
        assert!(geom.columns_top() > geom.margin + geom.header_band_height);
    }
}
