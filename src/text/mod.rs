//! # Text Layout
//!
//! Greedy line breaking over UAX#14 break opportunities, plus the small
//! string-normalization helpers the section adapters share (bullet-line
//! splitting, delimited skill lists).
//!
//! No hyphenation, no BiDi, no shaping — out of scope for this engine.
//! The breaker is deterministic: same text, same style, same width, same
//! lines, every time. The surfaces' `measure_height` contract rests on it.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::font::FontContext;

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position (i.e. "can we break before
/// char[i]?"). Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields (byte_offset, opportunity) where byte_offset is
    // the start of the next segment. Convert byte offsets to char indices.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
        // byte_offset == text.len() means "break at end" — ignored.
    }

    result
}

/// Break a string into lines that fit within `max_width` points.
///
/// Greedy: each line takes as many characters as fit, backing up to the
/// last UAX#14 break opportunity. A single unbreakable run wider than the
/// column is hard-split so the function always terminates and every line
/// fits. Embedded newlines are mandatory breaks.
pub fn break_into_lines(
    fonts: &FontContext,
    text: &str,
    family: &str,
    weight: u32,
    italic: bool,
    font_size: f64,
    max_width: f64,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let widths: Vec<f64> = chars
        .iter()
        .map(|&ch| fonts.char_width(ch, family, weight, italic, font_size))
        .collect();
    let break_opps = compute_break_opportunities(text);

    let mut lines: Vec<String> = Vec::new();
    let mut line_start = 0usize;
    let mut line_width = 0.0f64;
    let mut last_break: Option<usize> = None;

    let flush = |lines: &mut Vec<String>, start: usize, end: usize| {
        let line: String = chars[start..end].iter().collect();
        lines.push(line.trim_end().to_string());
    };

    let mut i = 0;
    while i < chars.len() {
        if i > 0 {
            match break_opps[i] {
                Some(BreakOpportunity::Mandatory) => {
                    // Exclude the line-terminator character itself.
                    let end = if matches!(chars[i - 1], '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                        i - 1
                    } else {
                        i
                    };
                    flush(&mut lines, line_start, end);
                    line_start = i;
                    line_width = 0.0;
                    last_break = None;
                }
                Some(BreakOpportunity::Allowed) => {
                    last_break = Some(i);
                }
                None => {}
            }
        }

        let w = widths[i];
        if line_width + w > max_width && i > line_start {
            let split_at = match last_break {
                Some(bp) if bp > line_start => bp,
                _ => i, // unbreakable run wider than the column
            };
            flush(&mut lines, line_start, split_at);
            // Skip leading spaces on the continuation line.
            line_start = split_at;
            while line_start < chars.len() && chars[line_start] == ' ' {
                line_start += 1;
            }
            last_break = None;
            // Skipping spaces can move the continuation start past the
            // current position; restart there with an empty line.
            if line_start > i {
                line_width = 0.0;
                i = line_start;
                continue;
            }
            line_width = widths[line_start..i].iter().sum();
        }

        line_width += w;
        i += 1;
    }

    if line_start < chars.len() {
        flush(&mut lines, line_start, chars.len());
    }

    lines
}

/// Characters treated as an existing bullet prefix on a description line.
const BULLET_PREFIXES: &[char] = &['•', '-', '*', '·', '‣', '▪', '–', '—'];

/// Split a free-text description into clean bullet lines.
///
/// Lines are split on newlines, trimmed, and any existing bullet-like
/// prefix is stripped so the renderer can add exactly one bullet per line.
/// Empty lines contribute nothing.
pub fn bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            let stripped = line
                .strip_prefix(BULLET_PREFIXES)
                .map(str::trim_start)
                .unwrap_or(line);
            stripped.to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a comma- or pipe-delimited string into trimmed, non-empty items.
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split(|c| c == ',' || c == '|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: f64) -> Vec<String> {
        let fonts = FontContext::new();
        break_into_lines(&fonts, text, "Helvetica", 400, false, 10.0, width)
    }

    #[test]
    fn test_empty_text_no_lines() {
        assert!(wrap("", 100.0).is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap("Hello", 100.0);
        assert_eq!(lines, vec!["Hello"]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let lines = wrap("alpha beta gamma delta epsilon", 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.starts_with(' '));
            assert!(!line.ends_with(' '));
        }
    }

    #[test]
    fn test_long_unbreakable_run_hard_splits() {
        let lines = wrap(&"x".repeat(200), 50.0);
        assert!(lines.len() > 1, "200 x's cannot fit 50pt");
    }

    #[test]
    fn test_word_fitting_within_one_space_of_the_width() {
        // "aaaa" fits at 23pt but its trailing space does not, and there
        // is no earlier break opportunity. The break lands on the space,
        // and the continuation line must restart cleanly after it.
        let lines = wrap("aaaa bb", 23.0);
        assert_eq!(lines, vec!["aaaa", "bb"]);
    }

    #[test]
    fn test_first_word_nearly_filling_the_column() {
        // A word within one space-width of the column width (55 'a's at
        // size 10 measure 305.8pt), followed by more text. Must wrap,
        // not panic.
        let word = "a".repeat(55);
        let text = format!("{word} more text here");
        let lines = wrap(&text, 306.13);
        assert_eq!(lines[0], word);
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_newline_is_mandatory_break() {
        let lines = wrap("first\nsecond", 500.0);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_breaking_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog, twice.";
        assert_eq!(wrap(text, 80.0), wrap(text, 80.0));
    }

    #[test]
    fn test_bullet_lines_strip_existing_prefixes() {
        let lines = bullet_lines("• built a thing\n- shipped it\nplain line");
        assert_eq!(lines, vec!["built a thing", "shipped it", "plain line"]);
    }

    #[test]
    fn test_bullet_lines_strip_dash_prefixes() {
        let lines = bullet_lines("– en dash line\n— em dash line");
        assert_eq!(lines, vec!["en dash line", "em dash line"]);
    }

    #[test]
    fn test_bullet_lines_drop_empties() {
        let lines = bullet_lines("one\n\n  \ntwo");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_split_delimited_commas_and_pipes() {
        let items = split_delimited("Rust, C++ | Go,,  Zig ");
        assert_eq!(items, vec!["Rust", "C++", "Go", "Zig"]);
    }
}
