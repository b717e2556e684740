//! Built-in glyph metrics for the standard Helvetica family.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for the printable
//! ASCII range (0x20..=0x7E). The oblique faces share the upright widths,
//! as they do in the AFM files. Characters outside the table fall back to
//! the space width, which keeps measurement total and deterministic.

/// Helvetica advance widths for chars 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Helvetica-Bold advance widths for chars 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// Metrics for one standard font face.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
    /// Ascender in 1/1000 em, used to place the first baseline.
    pub ascender: i16,
    /// Descender in 1/1000 em (negative).
    pub descender: i16,
}

pub const HELVETICA: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_WIDTHS,
    ascender: 718,
    descender: -207,
};

pub const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_BOLD_WIDTHS,
    ascender: 718,
    descender: -207,
};

impl StandardFontMetrics {
    /// Advance width of a single character in points at `font_size`.
    ///
    /// Non-ASCII characters measure as the space width. The WinAnsi bullet
    /// and dash characters the renderer emits are close enough to that
    /// approximation that wrapped output stays stable.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let code = ch as u32;
        let units = if (0x20..=0x7E).contains(&code) {
            self.widths[(code - 0x20) as usize]
        } else {
            self.widths[0]
        };
        units as f64 / 1000.0 * font_size
    }

    /// Width of a whole string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }

    /// Distance from the top of the line box to the baseline, in points.
    pub fn baseline_offset(&self, font_size: f64) -> f64 {
        self.ascender as f64 / 1000.0 * font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // Helvetica space is 278/1000 em.
        let w = HELVETICA.char_width(' ', 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_bold_wider() {
        let regular = HELVETICA.measure_string("Profile", 10.0);
        let bold = HELVETICA_BOLD.measure_string("Profile", 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_non_ascii_falls_back_to_space() {
        let w = HELVETICA.char_width('é', 10.0);
        assert!((w - HELVETICA.char_width(' ', 10.0)).abs() < 1e-9);
    }
}
