//! # Section Adapters
//!
//! One adapter per resume section. Each adapter reads its slice of the
//! model, normalizes it (bullet prefixes stripped and re-added exactly
//! once, delimited strings split, blank fields skipped), and emits a
//! [`Flow`] under a fixed card title. An adapter whose source data is
//! empty emits nothing at all — no empty card, no placeholder.
//!
//! Adapters never draw and never touch a cursor; the composer owns both.
//! The one exception is the identity header band, which is page chrome
//! rather than a card and draws directly onto the surface.

use crate::image_loader;
use crate::layout::Flow;
use crate::model::{Identity, Resume};
use crate::style::{PageGeometry, Theme};
use crate::surface::Surface;
use crate::text;

/// Line gap inside wrapped body text.
const LINE_GAP: f64 = 2.0;
/// Vertical gap between entries within one card.
const ENTRY_GAP: f64 = 6.0;

/// A titled card body ready for the composer.
pub struct Section {
    pub title: &'static str,
    pub flow: Flow,
}

impl Section {
    fn some(title: &'static str, flow: Flow) -> Option<Self> {
        if flow.is_empty() {
            None
        } else {
            Some(Self { title, flow })
        }
    }
}

/// Join the present, non-blank parts with a separator.
fn join_present(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(sep))
    }
}

/// Objective / professional summary: one wrapped paragraph.
pub fn objective(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    if let Some(summary) = resume.summary.as_deref() {
        let summary = summary.trim();
        if !summary.is_empty() {
            flow.add_text(summary, theme.body(), LINE_GAP);
        }
    }
    Section::some("Objective", flow)
}

/// Skills with the fixed source precedence, one bullet per skill.
pub fn skills(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for skill in resume.resolved_skills() {
        flow.add_bullet(skill, theme.body(), LINE_GAP);
    }
    Section::some("Skills", flow)
}

pub fn education(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for entry in &resume.education {
        let heading = join_present(&[entry.degree.as_deref()], "");
        let sub = join_present(&[entry.institution.as_deref()], "");
        let meta = join_present(&[entry.year.as_deref(), entry.score.as_deref()], " \u{00b7} ");
        if heading.is_none() && sub.is_none() && meta.is_none() {
            continue;
        }
        if !flow.is_empty() {
            flow.add_gap(ENTRY_GAP);
        }
        if let Some(heading) = heading {
            flow.add_text(heading, theme.entry_heading(), LINE_GAP);
        }
        if let Some(sub) = sub {
            flow.add_text(sub, theme.body(), LINE_GAP);
        }
        if let Some(meta) = meta {
            flow.add_text(meta, theme.entry_sub(), LINE_GAP);
        }
    }
    Section::some("Education", flow)
}

pub fn experience(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for entry in &resume.experience {
        let heading = join_present(&[entry.role.as_deref()], "");
        let sub = join_present(
            &[entry.company.as_deref(), entry.period.as_deref()],
            " \u{00b7} ",
        );
        let bullets: Vec<String> = entry
            .description
            .as_deref()
            .map(text::bullet_lines)
            .unwrap_or_default();
        if heading.is_none() && sub.is_none() && bullets.is_empty() {
            continue;
        }
        if !flow.is_empty() {
            flow.add_gap(ENTRY_GAP);
        }
        if let Some(heading) = heading {
            flow.add_text(heading, theme.entry_heading(), LINE_GAP);
        }
        if let Some(sub) = sub {
            flow.add_text(sub, theme.entry_sub(), LINE_GAP);
        }
        for line in bullets {
            flow.add_bullet(line, theme.body(), LINE_GAP);
        }
    }
    Section::some("Work Experience", flow)
}

pub fn projects(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for entry in &resume.projects {
        let heading = join_present(&[entry.name.as_deref()], "");
        let link = join_present(&[entry.link.as_deref()], "");
        let bullets: Vec<String> = entry
            .description
            .as_deref()
            .map(text::bullet_lines)
            .unwrap_or_default();
        if heading.is_none() && link.is_none() && bullets.is_empty() {
            continue;
        }
        if !flow.is_empty() {
            flow.add_gap(ENTRY_GAP);
        }
        if let Some(heading) = heading {
            flow.add_text(heading, theme.entry_heading(), LINE_GAP);
        }
        if let Some(link) = link {
            flow.add_text(link, theme.entry_sub(), LINE_GAP);
        }
        for line in bullets {
            flow.add_bullet(line, theme.body(), LINE_GAP);
        }
    }
    Section::some("Projects", flow)
}

pub fn certifications(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for entry in &resume.certifications {
        let line = join_present(
            &[
                entry.name.as_deref(),
                entry.issuer.as_deref(),
                entry.year.as_deref(),
            ],
            " \u{00b7} ",
        );
        if let Some(line) = line {
            flow.add_bullet(line, theme.body(), LINE_GAP);
        }
    }
    Section::some("Certifications", flow)
}

pub fn languages(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    if let Some(langs) = &resume.languages {
        for item in langs.items() {
            flow.add_bullet(item, theme.body(), LINE_GAP);
        }
    }
    Section::some("Languages", flow)
}

/// Activities / interests: one bullet per entry, name and description
/// joined when both exist.
pub fn interests(resume: &Resume, theme: &Theme) -> Option<Section> {
    let mut flow = Flow::new();
    for entry in &resume.activities {
        let line = join_present(
            &[entry.name.as_deref(), entry.description.as_deref()],
            " \u{2014} ",
        );
        if let Some(line) = line {
            flow.add_bullet(line, theme.body(), LINE_GAP);
        }
    }
    Section::some("Interests", flow)
}

/// Left-column sections, in their fixed display order.
pub fn left_sections(resume: &Resume, theme: &Theme) -> Vec<Section> {
    [
        skills(resume, theme),
        certifications(resume, theme),
        languages(resume, theme),
        interests(resume, theme),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Right-column sections, in their fixed display order.
pub fn right_sections(resume: &Resume, theme: &Theme) -> Vec<Section> {
    [
        objective(resume, theme),
        experience(resume, theme),
        education(resume, theme),
        projects(resume, theme),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Draw the full-width identity header band: name, title, contact lines,
/// and the photo (or a placeholder disc when the photo fails to load).
///
/// This is page chrome, not a card — it draws directly at a fixed
/// position and never touches a column cursor.
pub fn draw_identity_band<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    geometry: &PageGeometry,
    identity: &Identity,
) {
    let x = geometry.margin;
    let y = geometry.margin;
    let width = geometry.content_width();
    let height = geometry.header_band_height;
    let pad = 14.0;

    surface.fill_rounded_rect(x, y, width, height, theme.card.corner_radius, theme.accent);
    // Angled sliver along the bottom edge, in the darker accent.
    surface.fill_path(
        &[
            (x, y + height),
            (x + width * 0.45, y + height - 10.0),
            (x + width, y + height - 4.0),
            (x + width, y + height),
        ],
        theme.accent_dark,
    );

    let photo_diameter = height - pad * 2.0;
    let photo_x = x + width - pad - photo_diameter;
    let text_width = width - pad * 3.0 - photo_diameter;

    let mut text_y = y + pad;
    let name = identity.name.trim();
    if !name.is_empty() {
        let style = theme.banner_name();
        surface.draw_text(name, x + pad, text_y, text_width, &style, 0.0);
        text_y += style.size + 4.0;
    }
    if let Some(title) = identity.title.as_deref() {
        let title = title.trim();
        if !title.is_empty() {
            let style = theme.banner_title();
            surface.draw_text(title, x + pad, text_y, text_width, &style, 0.0);
            text_y += style.size + 4.0;
        }
    }
    let contact_style = theme.banner_contact();
    for line in identity.contact_lines() {
        surface.draw_text(line, x + pad, text_y, text_width, &contact_style, 0.0);
        text_y += contact_style.size + 2.0;
    }

    // Photo, cover-fitted into a circular clip. Any load failure falls
    // back to a flat placeholder disc of the same bounds.
    let radius = photo_diameter / 2.0;
    match identity.photo.as_deref().map(image_loader::load_image) {
        Some(Ok(image)) => {
            surface.clipped(photo_x, y + pad, photo_diameter, photo_diameter, radius, |s| {
                s.draw_image(&image, photo_x, y + pad, photo_diameter, photo_diameter);
            });
        }
        Some(Err(_)) => {
            surface.fill_circle(photo_x + radius, y + pad + radius, radius, theme.accent_dark);
        }
        None => {}
    }
}
