//! # Document Composer
//!
//! Assembles one complete page from a [`Resume`]: background, identity
//! band, then the two card columns, each driven by its own cursor. The
//! build order is a fixed pipeline — background, header, left column,
//! right column, finalize — and the composer enforces it as a phase
//! machine. Calling a step out of order is a bug in the caller, not a
//! recoverable input condition, so it panics.
//!
//! Generic over [`Surface`], so the same pipeline renders to PDF in
//! production and to a recorded call log in tests.

use crate::layout::sections::{self, Section};
use crate::layout::{render_card, CardFrame, LayoutCursor};
use crate::model::Resume;
use crate::style::{PageGeometry, Theme};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    BackgroundDrawn,
    HeaderDrawn,
    LeftColumn,
    RightColumn,
}

/// Drives the fixed page-assembly pipeline over any surface.
pub struct Composer<S: Surface> {
    surface: S,
    theme: Theme,
    geometry: PageGeometry,
    phase: Phase,
    left: LayoutCursor,
    right: LayoutCursor,
}

impl<S: Surface> Composer<S> {
    pub fn new(surface: S, theme: Theme, geometry: PageGeometry) -> Self {
        let (lx, lw) = geometry.left_column();
        let (rx, rw) = geometry.right_column();
        let top = geometry.columns_top();
        Self {
            surface,
            theme,
            geometry,
            phase: Phase::Created,
            left: LayoutCursor::new(lx, lw, top),
            right: LayoutCursor::new(rx, rw, top),
        }
    }

    fn step(&mut self, from: Phase, to: Phase, op: &str) {
        if self.phase != from {
            panic!("{op} called in phase {:?}, expected {from:?}", self.phase);
        }
        self.phase = to;
    }

    /// Page background fill plus the flat accent decoration.
    pub fn draw_background(&mut self) {
        self.step(Phase::Created, Phase::BackgroundDrawn, "draw_background");
        let g = self.geometry;
        self.surface
            .fill_rect(0.0, 0.0, g.width, g.height, self.theme.page_background);
        // Accent wedge across the bottom edge.
        self.surface.fill_path(
            &[
                (0.0, g.height - 18.0),
                (g.width, g.height - 6.0),
                (g.width, g.height),
                (0.0, g.height),
            ],
            self.theme.accent,
        );
    }

    /// The full-width identity band at the top of the page.
    pub fn draw_header(&mut self, resume: &Resume) {
        self.step(Phase::BackgroundDrawn, Phase::HeaderDrawn, "draw_header");
        sections::draw_identity_band(&mut self.surface, &self.theme, &self.geometry, &resume.identity);
    }

    fn layout_column(&mut self, column: Column, section_list: Vec<Section>) {
        for section in section_list {
            let cursor = match column {
                Column::Left => &self.left,
                Column::Right => &self.right,
            };
            let frame = CardFrame::at(cursor, Some(section.title));
            let advance = render_card(
                &mut self.surface,
                &self.theme,
                &self.geometry,
                &frame,
                &section.flow,
            );
            match column {
                Column::Left => self.left.advance(advance),
                Column::Right => self.right.advance(advance),
            };
        }
    }

    /// Lay out the left (narrow) column's cards top to bottom.
    pub fn layout_left(&mut self, resume: &Resume) {
        self.step(Phase::HeaderDrawn, Phase::LeftColumn, "layout_left");
        let list = sections::left_sections(resume, &self.theme);
        self.layout_column(Column::Left, list);
    }

    /// Lay out the right (wide) column's cards top to bottom.
    pub fn layout_right(&mut self, resume: &Resume) {
        self.step(Phase::LeftColumn, Phase::RightColumn, "layout_right");
        let list = sections::right_sections(resume, &self.theme);
        self.layout_column(Column::Right, list);
    }

    /// Final y offset of the left cursor. Test introspection.
    pub fn left_offset(&self) -> f64 {
        self.left.offset()
    }

    /// Final y offset of the right cursor. Test introspection.
    pub fn right_offset(&self) -> f64 {
        self.right.offset()
    }

    /// Finalize the page and hand back the surface's output.
    pub fn finish(mut self) -> S::Output {
        self.step(Phase::RightColumn, Phase::RightColumn, "finish");
        self.surface.finish()
    }
}

#[derive(Clone, Copy)]
enum Column {
    Left,
    Right,
}

/// Run the whole pipeline over a surface and return its output.
pub fn build_document<S: Surface>(surface: S, resume: &Resume) -> S::Output {
    let mut composer = Composer::new(surface, Theme::default(), PageGeometry::default());
    composer.draw_background();
    composer.draw_header(resume);
    composer.layout_left(resume);
    composer.layout_right(resume);
    composer.finish()
}
