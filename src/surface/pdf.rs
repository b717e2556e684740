//! # PDF Surface
//!
//! A single-page PDF 1.7 back end, written byte-by-byte without an
//! external PDF library. Draw calls append operators to one content
//! stream in immediate-mode order; `finish` compresses the stream,
//! assembles the object table, and serializes header, xref, and trailer.
//!
//! There is deliberately no "add page" operation. The surface is created
//! with `single_page` and that is the whole capability: a resume that
//! does not fit does not spill — the layout layer truncates it.
//!
//! ## Fonts
//!
//! The standard Helvetica family is referenced as Type1 without
//! embedding. Caller-registered TrueType fonts are embedded as simple
//! /TrueType fonts with WinAnsi encoding and a widths array.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{FontContext, FontData, FontKey};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::style::{Color, TextStyle};
use crate::surface::{measure_text_height, Surface};
use crate::text;

const KAPPA: f64 = 0.5522847498;

/// A single page accumulating PDF content-stream operators.
pub struct PdfSurface {
    width: f64,
    height: f64,
    fonts: FontContext,
    content: String,
    /// Fonts referenced by the content stream, in first-use order (/F0, /F1, ...).
    used_fonts: Vec<FontKey>,
    /// Images referenced by the content stream (/Im0, /Im1, ...).
    images: Vec<LoadedImage>,
    clip_depth: usize,
    doc_title: Option<String>,
    doc_author: Option<String>,
}

impl PdfSurface {
    /// Create a surface for exactly one page of the given size in points.
    pub fn single_page(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fonts: FontContext::new(),
            content: String::new(),
            used_fonts: Vec::new(),
            images: Vec::new(),
            clip_depth: 0,
            doc_title: None,
            doc_author: None,
        }
    }

    /// Replace the font context (e.g. after registering custom fonts).
    pub fn with_fonts(mut self, fonts: FontContext) -> Self {
        self.fonts = fonts;
        self
    }

    /// Title/author for the PDF Info dictionary.
    pub fn set_metadata(&mut self, title: Option<&str>, author: Option<&str>) {
        self.doc_title = title.map(str::to_string);
        self.doc_author = author.map(str::to_string);
    }

    pub fn fonts(&self) -> &FontContext {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontContext {
        &mut self.fonts
    }

    /// Find or allocate the /F index for a font key.
    fn font_index(&mut self, style: &TextStyle) -> usize {
        let key = FontKey {
            family: style.family.clone(),
            weight: if style.weight >= 600 { 700 } else { 400 },
            italic: style.is_italic(),
        };
        if let Some(i) = self.used_fonts.iter().position(|k| *k == key) {
            return i;
        }
        self.used_fonts.push(key);
        self.used_fonts.len() - 1
    }

    /// Append a rounded-rect path in PDF (bottom-left origin) coordinates.
    fn write_rounded_rect(stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0);
        if r <= 0.0 {
            let _ = writeln!(stream, "{:.2} {:.2} {:.2} {:.2} re", x, y, w, h);
            return;
        }
        let k = r * KAPPA;

        let _ = writeln!(stream, "{:.2} {:.2} m", x + r, y);
        let _ = writeln!(stream, "{:.2} {:.2} l", x + w - r, y);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w - r + k, y, x + w, y + r - k, x + w, y + r
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x + w, y + h - r);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x + r, y + h);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x + r - k, y + h, x, y + h - r + k, x, y + h - r
        );
        let _ = writeln!(stream, "{:.2} {:.2} l", x, y + r);
        let _ = writeln!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            x, y + r - k, x + r - k, y, x + r, y
        );
        let _ = writeln!(stream, "h");
    }

    /// Encode a text line as a parenthesized PDF string in WinAnsi bytes.
    fn encode_text_line(line: &str) -> String {
        let mut out = String::new();
        for ch in line.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly; the 0x80..=0x9F range
    /// holds smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Escape special characters in a PDF metadata string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Write a font as one or more PDF objects, returning the root id.
    fn write_font_object(objects: &mut Vec<Vec<u8>>, data: &FontData) -> usize {
        match data {
            FontData::Standard(std_font) => {
                let obj_id = objects.len();
                let font_dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                     /Encoding /WinAnsiEncoding >>",
                    std_font.pdf_name()
                );
                objects.push(font_dict.into_bytes());
                obj_id
            }
            FontData::Custom { data, metrics } => {
                // FontFile2 stream
                let compressed = compress_to_vec_zlib(data, 6);
                let file_obj_id = objects.len();
                let mut file_obj: Vec<u8> = Vec::new();
                let _ = write!(
                    file_obj,
                    "<< /Length {} /Length1 {} /Filter /FlateDecode >>\nstream\n",
                    compressed.len(),
                    data.len()
                );
                file_obj.extend_from_slice(&compressed);
                file_obj.extend_from_slice(b"\nendstream");
                objects.push(file_obj);

                let scale = 1000.0 / metrics.units_per_em as f64;
                let ascent = metrics.ascender as f64 * scale;
                let descent = metrics.descender as f64 * scale;

                // FontDescriptor
                let desc_obj_id = objects.len();
                let descriptor = format!(
                    "<< /Type /FontDescriptor /FontName /Embedded{} \
                     /Flags 32 /FontBBox [-200 {:.0} 1200 {:.0}] /ItalicAngle 0 \
                     /Ascent {:.0} /Descent {:.0} /CapHeight {:.0} /StemV 80 \
                     /FontFile2 {} 0 R >>",
                    file_obj_id, descent, ascent, ascent, descent, ascent, file_obj_id
                );
                objects.push(descriptor.into_bytes());

                // Widths for WinAnsi codes 32..=255, approximated by the
                // Latin-1 codepoints they mostly coincide with.
                let widths: Vec<String> = (32u32..=255)
                    .map(|code| {
                        let ch = char::from_u32(code).unwrap_or(' ');
                        format!("{:.0}", metrics.char_width(ch, 1000.0))
                    })
                    .collect();

                let obj_id = objects.len();
                let font_dict = format!(
                    "<< /Type /Font /Subtype /TrueType /BaseFont /Embedded{} \
                     /FirstChar 32 /LastChar 255 /Widths [{}] \
                     /Encoding /WinAnsiEncoding /FontDescriptor {} 0 R >>",
                    file_obj_id,
                    widths.join(" "),
                    desc_obj_id
                );
                objects.push(font_dict.into_bytes());
                obj_id
            }
        }
    }

    /// Write an image as one or two XObjects, returning the main id.
    fn write_image_xobject(objects: &mut Vec<Vec<u8>>, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let obj_id = objects.len();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space_str,
                    data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                objects.push(obj_data);
                obj_id
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // SMask first if an alpha channel exists.
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let smask_obj_id = objects.len();
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image \
                         /Width {} /Height {} \
                         /ColorSpace /DeviceGray \
                         /BitsPerComponent 8 \
                         /Filter /FlateDecode \
                         /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    objects.push(smask_data);
                    smask_obj_id
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let obj_id = objects.len();
                let mut obj_data: Vec<u8> = Vec::new();

                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();

                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace /DeviceRGB \
                     /BitsPerComponent 8 \
                     /Filter /FlateDecode \
                     /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                objects.push(obj_data);
                obj_id
            }
        }
    }
}

impl Surface for PdfSurface {
    type Output = Vec<u8>;

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let pdf_y = self.height - y - h;
        let _ = write!(
            self.content,
            "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
            color.r, color.g, color.b, x, pdf_y, w, h
        );
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let pdf_y = self.height - y - h;
        let _ = write!(
            self.content,
            "q\n{:.3} {:.3} {:.3} rg\n",
            color.r, color.g, color.b
        );
        let mut path = String::new();
        Self::write_rounded_rect(&mut path, x, pdf_y, w, h, radius);
        self.content.push_str(&path);
        let _ = write!(self.content, "f\nQ\n");
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        if color.a <= 0.0 || r <= 0.0 {
            return;
        }
        let pdf_cy = self.height - cy;
        let k = r * KAPPA;
        let s = &mut self.content;
        let _ = write!(s, "q\n{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b);
        let _ = writeln!(s, "{:.2} {:.2} m", cx + r, pdf_cy);
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx + r, pdf_cy + k, cx + k, pdf_cy + r, cx, pdf_cy + r
        );
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx - k, pdf_cy + r, cx - r, pdf_cy + k, cx - r, pdf_cy
        );
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx - r, pdf_cy - k, cx - k, pdf_cy - r, cx, pdf_cy - r
        );
        let _ = writeln!(
            s,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
            cx + k, pdf_cy - r, cx + r, pdf_cy - k, cx + r, pdf_cy
        );
        let _ = write!(s, "h\nf\nQ\n");
    }

    fn fill_path(&mut self, points: &[(f64, f64)], color: Color) {
        if color.a <= 0.0 || points.len() < 3 {
            return;
        }
        let _ = write!(
            self.content,
            "q\n{:.3} {:.3} {:.3} rg\n",
            color.r, color.g, color.b
        );
        for (i, (px, py)) in points.iter().enumerate() {
            let op = if i == 0 { "m" } else { "l" };
            let _ = writeln!(self.content, "{:.2} {:.2} {}", px, self.height - py, op);
        }
        let _ = write!(self.content, "h\nf\nQ\n");
    }

    fn draw_image(&mut self, image: &LoadedImage, x: f64, y: f64, w: f64, h: f64) {
        if image.width_px == 0 || image.height_px == 0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        let idx = self.images.len();
        self.images.push(image.clone());

        // Cover fit: scale to fill the box, center, clip the overflow.
        let scale = (w / image.width_px as f64).max(h / image.height_px as f64);
        let draw_w = image.width_px as f64 * scale;
        let draw_h = image.height_px as f64 * scale;
        let dx = x - (draw_w - w) / 2.0;
        let dy = y - (draw_h - h) / 2.0;

        let box_pdf_y = self.height - y - h;
        let img_pdf_y = self.height - dy - draw_h;
        let _ = write!(
            self.content,
            "q\n{:.2} {:.2} {:.2} {:.2} re\nW n\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
            x, box_pdf_y, w, h, draw_w, draw_h, dx, img_pdf_y, idx
        );
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, max_width: f64, style: &TextStyle, line_gap: f64) {
        if text.is_empty() {
            return;
        }
        let lines = text::break_into_lines(
            &self.fonts,
            text,
            &style.family,
            style.weight,
            style.is_italic(),
            style.size,
            max_width,
        );
        let font_idx = self.font_index(style);
        let baseline = self
            .fonts
            .baseline_offset(&style.family, style.weight, style.is_italic(), style.size);
        let advance = style.size + line_gap;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let pdf_y = self.height - (y + i as f64 * advance + baseline);
            let _ = write!(
                self.content,
                "q\nBT\n/F{} {:.1} Tf\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} Td\n({}) Tj\nET\nQ\n",
                font_idx,
                style.size,
                style.color.r,
                style.color.g,
                style.color.b,
                x,
                pdf_y,
                Self::encode_text_line(line)
            );
        }
    }

    fn measure_height(&self, text: &str, max_width: f64, style: &TextStyle, line_gap: f64) -> f64 {
        measure_text_height(&self.fonts, text, max_width, style, line_gap)
    }

    fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let pdf_y = self.height - y - h;
        self.content.push_str("q\n");
        let mut path = String::new();
        Self::write_rounded_rect(&mut path, x, pdf_y, w, h, radius);
        self.content.push_str(&path);
        self.content.push_str("W n\n");
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        assert!(self.clip_depth > 0, "pop_clip without matching push_clip");
        self.clip_depth -= 1;
        self.content.push_str("Q\n");
    }

    fn finish(self) -> Vec<u8> {
        assert_eq!(self.clip_depth, 0, "finish with an unbalanced clip stack");

        // Object 0 is the free-list placeholder, 1 the Catalog, 2 the
        // page tree root; fonts, images, content, and page follow.
        let mut objects: Vec<Vec<u8>> = vec![
            Vec::new(),
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            Vec::new(),
        ];

        let mut font_resources = String::new();
        for (i, key) in self.used_fonts.iter().enumerate() {
            let data = self.fonts.resolve(&key.family, key.weight, key.italic);
            let obj_id = Self::write_font_object(&mut objects, data);
            let _ = write!(font_resources, "/F{} {} 0 R ", i, obj_id);
        }
        if self.used_fonts.is_empty() {
            // A page with no text still gets a font resource so viewers
            // never see an empty /Font dictionary reference.
            let data = self.fonts.resolve("Helvetica", 400, false);
            let obj_id = Self::write_font_object(&mut objects, data);
            let _ = write!(font_resources, "/F0 {} 0 R ", obj_id);
        }

        let mut xobject_resources = String::new();
        for (i, image) in self.images.iter().enumerate() {
            let obj_id = Self::write_image_xobject(&mut objects, image);
            let _ = write!(xobject_resources, "/Im{} {} 0 R ", i, obj_id);
        }

        let compressed = compress_to_vec_zlib(self.content.as_bytes(), 6);
        let content_obj_id = objects.len();
        let mut content_data: Vec<u8> = Vec::new();
        let _ = write!(
            content_data,
            "<< /Length {} /Filter /FlateDecode >>\nstream\n",
            compressed.len()
        );
        content_data.extend_from_slice(&compressed);
        content_data.extend_from_slice(b"\nendstream");
        objects.push(content_data);

        let resources = if xobject_resources.is_empty() {
            format!("/Font << {} >>", font_resources.trim_end())
        } else {
            format!(
                "/Font << {} >> /XObject << {} >>",
                font_resources.trim_end(),
                xobject_resources.trim_end()
            )
        };
        let page_obj_id = objects.len();
        let page_dict = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Contents {} 0 R /Resources << {} >> >>",
            self.width, self.height, content_obj_id, resources
        );
        objects.push(page_dict.into_bytes());

        // Page tree root (object 2): exactly one kid, by construction.
        objects[2] = format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", page_obj_id).into_bytes();

        let info_obj_id = if self.doc_title.is_some() || self.doc_author.is_some() {
            let id = objects.len();
            let mut info = String::from("<< ");
            if let Some(ref title) = self.doc_title {
                let _ = write!(info, "/Title ({}) ", Self::escape_pdf_string(title));
            }
            if let Some(ref author) = self.doc_author {
                let _ = write!(info, "/Author ({}) ", Self::escape_pdf_string(author));
            }
            let _ = write!(info, "/Producer (Vitae 0.3) /Creator (Vitae) >>");
            objects.push(info.into_bytes());
            Some(id)
        } else {
            None
        };

        // Serialize: header, objects, xref, trailer.
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(obj);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(output, "trailer\n<< /Size {} /Root 1 0 R", objects.len());
        if let Some(info_id) = info_obj_id {
            let _ = write!(output, " /Info {} 0 R", info_id);
        }
        let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

        output
    }
}
