//! End-to-end tests: resume JSON in, a valid single-page PDF out, plus
//! the layout properties the engine guarantees, checked against the
//! recording surface's call log.

use vitae::compose::{build_document, Composer};
use vitae::font::FontContext;
use vitae::model::{EducationEntry, ExperienceEntry, Identity, Resume};
use vitae::style::{Color, PageGeometry, TextStyle, Theme};
use vitae::surface::pdf::PdfSurface;
use vitae::surface::recording::{DrawCall, RecordingSurface};
use vitae::surface::Surface;
use vitae::{render, render_json};

// ============ Test Helpers ============

fn sample_resume() -> Resume {
    Resume {
        identity: Identity {
            name: "Priya Raman".into(),
            title: Some("Senior Backend Engineer".into()),
            email: Some("priya.raman@example.com".into()),
            phone: Some("+91 98765 43210".into()),
            location: Some("Bengaluru, India".into()),
            ..Default::default()
        },
        summary: Some("Backend engineer with eight years of experience.".into()),
        skills: vec!["Rust".into(), "PostgreSQL".into(), "Kafka".into()],
        education: vec![EducationEntry {
            degree: Some("B.E. Computer Science".into()),
            institution: Some("BMS College of Engineering".into()),
            year: Some("2017".into()),
            score: Some("8.9 CGPA".into()),
        }],
        experience: vec![ExperienceEntry {
            role: Some("Senior Backend Engineer".into()),
            company: Some("Finch Payments".into()),
            period: Some("2021 — present".into()),
            description: Some("Led the ledger rewrite\nDesigned the idempotency layer".into()),
        }],
        ..Default::default()
    }
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    let tail = &bytes[bytes.len().saturating_sub(32)..];
    let tail_str = String::from_utf8_lossy(tail);
    assert!(tail_str.contains("%%EOF"), "Missing EOF marker");
    let content = String::from_utf8_lossy(bytes);
    assert!(content.contains("/Type /Page"), "Missing page object");
    assert!(content.contains("/Type /Catalog"), "Missing catalog");
}

/// Clip pushes bucketed by column — one push per rendered card.
fn cards_per_column(calls: &[DrawCall], geometry: &PageGeometry) -> (usize, usize) {
    let (left_x, _) = geometry.left_column();
    let (right_x, _) = geometry.right_column();
    let mut left = 0;
    let mut right = 0;
    for call in calls {
        if let DrawCall::PushClip { x, .. } = call {
            if (*x - left_x).abs() < 1e-6 {
                left += 1;
            } else if (*x - right_x).abs() < 1e-6 {
                right += 1;
            } else {
                panic!("card clip at unexpected x = {x}");
            }
        }
    }
    (left, right)
}

// ============ PDF Output ============

#[test]
fn test_render_sample_resume_is_valid_pdf() {
    assert_valid_pdf(&render(&sample_resume()));
}

#[test]
fn test_render_empty_resume_is_valid_pdf() {
    assert_valid_pdf(&render(&Resume::default()));
}

#[test]
fn test_render_is_deterministic() {
    let resume = sample_resume();
    assert_eq!(render(&resume), render(&resume));
}

#[test]
fn test_render_json_roundtrip() {
    let json = r#"{
        "identity": { "name": "Ada Lovelace", "email": "ada@example.com" },
        "summary": "First programmer.",
        "skillsText": "Mathematics, Poetry",
        "languages": "English, French"
    }"#;
    assert_valid_pdf(&render_json(json).unwrap());
}

#[test]
fn test_render_json_rejects_malformed_input() {
    let err = render_json("{ not json").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Failed to parse resume"));
    assert!(msg.contains("Hint:"), "parse errors carry a hint: {msg}");
}

#[test]
fn test_metadata_lands_in_info_dictionary() {
    let resume = Resume {
        metadata: vitae::model::Metadata {
            title: Some("Priya Raman — Resume".into()),
            author: Some("Priya Raman".into()),
        },
        ..sample_resume()
    };
    let bytes = render(&resume);
    let content = String::from_utf8_lossy(&bytes);
    assert!(content.contains("/Title"));
    assert!(content.contains("/Author"));
}

#[test]
fn test_broken_photo_still_renders() {
    let resume = Resume {
        identity: Identity {
            name: "Ada".into(),
            photo: Some("data:image/png;base64,!!!not-base64!!!".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_valid_pdf(&render(&resume));
}

#[test]
fn test_summary_word_at_column_width_renders() {
    // First word of the summary measures within one space-width of the
    // card's inner width, forcing a break exactly on the space.
    let resume = Resume {
        summary: Some("a".repeat(56) + "m more text here"),
        ..Default::default()
    };
    assert_valid_pdf(&render(&resume));
}

// ============ Custom Fonts ============

/// The smallest font ttf-parser accepts: an sfnt wrapper around `head`,
/// `hhea`, and `maxp`. No outlines and no cmap, so every character
/// measures at the default advance — enough to exercise registration,
/// metrics, and embedding.
fn minimal_truetype_font() -> Vec<u8> {
    fn u16be(out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&v.to_be_bytes());
    }
    fn u32be(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_be_bytes());
    }

    let mut head = Vec::new();
    u32be(&mut head, 0x0001_0000); // version
    u32be(&mut head, 0); // font revision
    u32be(&mut head, 0); // checksum adjustment
    u32be(&mut head, 0x5F0F_3CF5); // magic
    u16be(&mut head, 0); // flags
    u16be(&mut head, 1000); // unitsPerEm
    head.extend_from_slice(&[0u8; 16]); // created + modified
    u16be(&mut head, 0); // xMin
    u16be(&mut head, 0); // yMin
    u16be(&mut head, 1000); // xMax
    u16be(&mut head, 1000); // yMax
    u16be(&mut head, 0); // macStyle
    u16be(&mut head, 8); // lowestRecPPEM
    u16be(&mut head, 2); // fontDirectionHint
    u16be(&mut head, 0); // indexToLocFormat
    u16be(&mut head, 0); // glyphDataFormat

    let mut hhea = Vec::new();
    u32be(&mut hhea, 0x0001_0000); // version
    u16be(&mut hhea, 800); // ascender
    u16be(&mut hhea, (-200i16) as u16); // descender
    u16be(&mut hhea, 0); // lineGap
    hhea.extend_from_slice(&[0u8; 24]); // caret/reserved fields
    u16be(&mut hhea, 1); // numberOfHMetrics

    let mut maxp = Vec::new();
    u32be(&mut maxp, 0x0000_5000); // version 0.5
    u16be(&mut maxp, 1); // numGlyphs

    let tables: [(&[u8; 4], &[u8]); 3] =
        [(b"head", &head), (b"hhea", &hhea), (b"maxp", &maxp)];

    let mut font = Vec::new();
    u32be(&mut font, 0x0001_0000); // sfnt version
    u16be(&mut font, tables.len() as u16);
    u16be(&mut font, 0); // searchRange
    u16be(&mut font, 0); // entrySelector
    u16be(&mut font, 0); // rangeShift
    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        u32be(&mut font, 0); // checksum (unvalidated)
        u32be(&mut font, offset);
        u32be(&mut font, data.len() as u32);
        offset += data.len() as u32;
    }
    for (_, data) in &tables {
        font.extend_from_slice(data);
    }
    font
}

#[test]
fn test_registered_truetype_font_is_embedded() {
    let mut fonts = FontContext::new();
    fonts
        .registry_mut()
        .register("Inter", 400, false, minimal_truetype_font())
        .unwrap();

    let mut surface = PdfSurface::single_page(595.28, 841.89).with_fonts(fonts);
    let style = TextStyle::new("Inter", 10.0, 400, Color::BLACK);
    surface.draw_text("custom face text", 40.0, 40.0, 300.0, &style, 2.0);
    let bytes = surface.finish();

    assert_valid_pdf(&bytes);
    let content = String::from_utf8_lossy(&bytes);
    assert!(content.contains("/Subtype /TrueType"), "embedded font dict missing");
    assert!(content.contains("/FontFile2"), "font program not embedded");
    assert!(content.contains("/FontDescriptor"), "descriptor missing");
}

#[test]
fn test_registered_font_metrics_drive_measurement() {
    let mut fonts = FontContext::new();
    fonts
        .registry_mut()
        .register("Inter", 400, false, minimal_truetype_font())
        .unwrap();

    // No cmap: every character measures at the default advance of half
    // an em, which is 5pt at size 10.
    let w = fonts.char_width('x', "Inter", 400, false, 10.0);
    assert!((w - 5.0).abs() < 1e-9);
}

// ============ Layout Properties ============

#[test]
fn test_education_and_experience_share_the_wide_column() {
    let resume = Resume {
        identity: Identity {
            name: "Ada".into(),
            ..Default::default()
        },
        education: sample_resume().education,
        experience: sample_resume().experience,
        ..Default::default()
    };
    let geometry = PageGeometry::default();
    let calls = build_document(RecordingSurface::single_page(), &resume);
    let (left, right) = cards_per_column(&calls, &geometry);
    assert_eq!(left, 0, "no left-column sections were provided");
    assert_eq!(right, 2, "one card each for experience and education");
}

#[test]
fn test_absent_sections_render_no_cards() {
    let resume = Resume {
        summary: Some("Only an objective.".into()),
        ..Default::default()
    };
    let calls = build_document(RecordingSurface::single_page(), &resume);
    let (left, right) = cards_per_column(&calls, &PageGeometry::default());
    assert_eq!((left, right), (0, 1));
    assert!(calls
        .iter()
        .any(|c| matches!(c, DrawCall::Text { text, .. } if text == "Objective")));
    assert!(!calls
        .iter()
        .any(|c| matches!(c, DrawCall::Text { text, .. } if text == "Skills")));
}

#[test]
fn test_cursors_advance_past_every_card() {
    let resume = sample_resume();
    let geometry = PageGeometry::default();
    let mut composer = Composer::new(
        RecordingSurface::single_page(),
        Theme::default(),
        geometry,
    );
    composer.draw_background();
    composer.draw_header(&resume);
    assert_eq!(composer.left_offset(), geometry.columns_top());
    assert_eq!(composer.right_offset(), geometry.columns_top());

    composer.layout_left(&resume);
    let left_end = composer.left_offset();
    assert!(left_end > geometry.columns_top());

    composer.layout_right(&resume);
    assert_eq!(composer.left_offset(), left_end, "right layout must not move the left cursor");
    assert!(composer.right_offset() > geometry.columns_top());
    assert!(composer.right_offset() <= geometry.height);
}

#[test]
fn test_oversized_card_is_dropped_not_spilled() {
    // A summary far taller than the page. Its card trips the overflow
    // guard, the cursor parks at the page bottom, and every later card in
    // that column is dropped too.
    let resume = Resume {
        summary: Some("overflow ".repeat(1000)),
        experience: sample_resume().experience,
        ..Default::default()
    };
    let geometry = PageGeometry::default();
    let mut composer = Composer::new(
        RecordingSurface::single_page(),
        Theme::default(),
        geometry,
    );
    composer.draw_background();
    composer.draw_header(&resume);
    composer.layout_left(&resume);
    composer.layout_right(&resume);
    assert!((composer.right_offset() - geometry.height).abs() < 1e-6);

    let calls = composer.finish();
    let (_, right) = cards_per_column(&calls, &geometry);
    assert_eq!(right, 0, "neither card fits once the first overflows");
}

#[test]
fn test_fitting_cards_after_a_dropped_column_still_render_elsewhere() {
    // Overflow in the right column must not affect the left column.
    let resume = Resume {
        summary: Some("overflow ".repeat(1000)),
        skills: vec!["Rust".into()],
        ..Default::default()
    };
    let calls = build_document(RecordingSurface::single_page(), &resume);
    let (left, right) = cards_per_column(&calls, &PageGeometry::default());
    assert_eq!(left, 1);
    assert_eq!(right, 0);
}

#[test]
fn test_right_column_output_ignores_left_column_content() {
    let geometry = PageGeometry::default();
    let (right_x, _) = geometry.right_column();
    let right_calls = |resume: &Resume| -> Vec<DrawCall> {
        build_document(RecordingSurface::single_page(), resume)
            .into_iter()
            .filter(|call| call.x().map(|x| x >= right_x - 1e-6).unwrap_or(false))
            .collect()
    };

    let with_left = sample_resume();
    let without_left = Resume {
        skills: Vec::new(),
        ..sample_resume()
    };
    assert_eq!(right_calls(&with_left), right_calls(&without_left));
}

#[test]
fn test_every_clip_is_balanced() {
    let calls = build_document(RecordingSurface::single_page(), &sample_resume());
    let mut depth = 0i64;
    for call in &calls {
        match call {
            DrawCall::PushClip { .. } => depth += 1,
            DrawCall::PopClip => {
                depth -= 1;
                assert!(depth >= 0);
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_all_drawing_stays_on_the_page() {
    let geometry = PageGeometry::default();
    let calls = build_document(RecordingSurface::single_page(), &sample_resume());
    for call in &calls {
        if let Some(x) = call.x() {
            assert!(x >= -1e-6 && x <= geometry.width + 1e-6, "x = {x} off page");
        }
        if let DrawCall::Text { y, .. } = call {
            assert!(*y >= 0.0 && *y <= geometry.height, "text y = {y} off page");
        }
    }
}

#[test]
fn test_parallel_builds_are_identical() {
    let resume = sample_resume();
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let resume = resume.clone();
            std::thread::spawn(move || build_document(RecordingSurface::single_page(), &resume))
        })
        .collect();
    let mut results: Vec<Vec<DrawCall>> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();
    let first = results.pop().unwrap();
    assert_eq!(first, results.pop().unwrap());
}
