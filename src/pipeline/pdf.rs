//! PDF page-flow writer on top of printpdf.
//!
//! printpdf exposes absolute-positioned primitives only, so this module owns
//! the flow state the report needs: a descending y cursor, automatic page
//! breaks that repeat the institutional header band and footer page number,
//! word wrapping, and alignment helpers. The writer knows nothing about
//! diagnostic semantics — [`crate::report`] drives it with [`LayoutOp`]s.
//!
//! Builtin Helvetica faces carry no embedded metrics here, so centring and
//! wrapping use an average glyph width of half the point size. The margins
//! leave enough slack that the approximation never pushes text off-page.

use crate::error::MedscanError;
use crate::pipeline::layout::LayoutOp;
use printpdf::*;
use std::io::BufWriter;

// Page geometry (A4, mm)
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_L: f32 = 10.0;
const MARGIN_R: f32 = 200.0;
/// First body baseline, below the header band.
const BODY_TOP: f32 = 257.0;
/// Body must not descend into the footer area.
const BOTTOM: f32 = 20.0;

const MM_PER_PT: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the point size.
const AVG_GLYPH: f32 = 0.5;

const BODY_SIZE: f32 = 10.0;
const BODY_LINE: f32 = 5.0;
const BULLET_INDENT: f32 = 15.0;
const BULLET_TEXT_X: f32 = 20.0;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const HEADING_BLUE: (u8, u8, u8) = (0, 51, 102);

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH * MM_PER_PT
}

/// Characters that fit between `x` and the right margin at `size`.
fn max_chars(x: f32, size: f32) -> usize {
    (((MARGIN_R - x) / (size * AVG_GLYPH * MM_PER_PT)) as usize).max(1)
}

/// Flowing writer for one report document.
pub struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    y: f32,
    page_no: usize,
}

impl ReportWriter {
    /// Create the document and its first page with header band and footer.
    pub fn new(title: &str) -> Result<Self, MedscanError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| MedscanError::PdfError { detail: format!("font: {e}") })?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| MedscanError::PdfError { detail: format!("font: {e}") })?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| MedscanError::PdfError { detail: format!("font: {e}") })?;

        let layer = doc.get_page(page).get_layer(layer);
        let mut writer = Self {
            doc,
            layer,
            regular,
            bold,
            italic,
            y: BODY_TOP,
            page_no: 1,
        };
        writer.page_chrome();
        Ok(writer)
    }

    /// Header band + divider + footer page number for the current page.
    fn page_chrome(&mut self) {
        let title = "Universal Medical Center";
        let subtitle = "Radiology Department | AI Diagnostic Unit";

        self.layer.set_fill_color(rgb(BLACK));
        self.layer.use_text(
            title,
            20.0,
            Mm((PAGE_W - text_width_mm(title, 20.0)) / 2.0),
            Mm(PAGE_H - 15.0),
            &self.bold,
        );
        self.layer.use_text(
            subtitle,
            10.0,
            Mm((PAGE_W - text_width_mm(subtitle, 10.0)) / 2.0),
            Mm(PAGE_H - 23.0),
            &self.italic,
        );
        self.draw_rule(PAGE_H - 30.0);

        let footer = format!("Page {}", self.page_no);
        self.layer.use_text(
            &footer,
            8.0,
            Mm((PAGE_W - text_width_mm(&footer, 8.0)) / 2.0),
            Mm(10.0),
            &self.italic,
        );
    }

    fn draw_rule(&self, y: f32) {
        self.layer.set_outline_color(rgb(BLACK));
        self.layer.set_outline_thickness(0.3);
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN_L), Mm(y)), false),
                (Point::new(Mm(MARGIN_R), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    /// Break to a fresh page if fewer than `needed` millimetres remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < BOTTOM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.page_no += 1;
            self.y = BODY_TOP;
            self.page_chrome();
        }
    }

    /// Advance the cursor without emitting anything.
    pub fn vertical_space(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Single full-width line at the left margin (no wrapping).
    fn emit_line(&mut self, text: &str, size: f32, font: Font, color: (u8, u8, u8), x: f32, advance: f32) {
        self.ensure_space(advance);
        self.layer.set_fill_color(rgb(color));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), self.font(font));
        self.y -= advance;
    }

    /// Fixed-position cell on the current baseline; the caller advances.
    pub fn cell(&mut self, text: &str, size: f32, font: Font, x: f32) {
        self.ensure_space(0.0);
        self.layer.set_fill_color(rgb(BLACK));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), self.font(font));
    }

    /// Advance one row of height `mm` after a run of [`cell`](Self::cell)s.
    pub fn end_row(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Bold section label in the front matter ("PATIENT DETAILS", …).
    pub fn section_label(&mut self, text: &str, size: f32) {
        self.emit_line(text, size, Font::Bold, BLACK, MARGIN_L, 8.0);
    }

    /// Horizontal rule at the cursor, with spacing below.
    pub fn rule(&mut self, space_after: f32) {
        self.ensure_space(space_after);
        self.draw_rule(self.y);
        self.y -= space_after;
    }

    /// Diagnostic heading: vertical space, bold 12, heading blue.
    pub fn heading(&mut self, text: &str) {
        self.vertical_space(5.0);
        self.emit_line(text, 12.0, Font::Bold, HEADING_BLUE, MARGIN_L, 8.0);
    }

    /// Indented bullet: glyph cell + wrapping text block.
    pub fn bullet(&mut self, text: &str) {
        self.ensure_space(BODY_LINE);
        self.layer.set_fill_color(rgb(BLACK));
        self.layer
            .use_text("\u{2022}", BODY_SIZE, Mm(BULLET_INDENT), Mm(self.y), &self.regular);
        self.wrapped(text, BULLET_TEXT_X);
    }

    /// Plain wrapping block at the left margin.
    pub fn paragraph(&mut self, text: &str) {
        self.wrapped(text, MARGIN_L);
    }

    fn wrapped(&mut self, text: &str, x: f32) {
        for line in wrap_text(text, max_chars(x, BODY_SIZE)) {
            self.ensure_space(BODY_LINE);
            self.layer.set_fill_color(rgb(BLACK));
            self.layer.use_text(&line, BODY_SIZE, Mm(x), Mm(self.y), &self.regular);
            self.y -= BODY_LINE;
        }
    }

    /// Append the whole diagnostic body.
    pub fn body(&mut self, ops: &[LayoutOp]) {
        for op in ops {
            match op {
                LayoutOp::Heading(text) => self.heading(text),
                LayoutOp::Bullet(text) => self.bullet(text),
                LayoutOp::Paragraph(text) => self.paragraph(text),
            }
        }
    }

    /// Right-aligned signature block closing the report.
    pub fn signature_block(&mut self) {
        self.vertical_space(10.0);
        self.ensure_space(20.0);

        let rule = "_".repeat(30);
        self.right_aligned(&rule, 10.0, Font::Bold, 8.0);
        self.right_aligned("Authorized Signature", 10.0, Font::Bold, 5.0);
        self.right_aligned("AI Diagnostic Assistant", 8.0, Font::Italic, 5.0);
    }

    fn right_aligned(&mut self, text: &str, size: f32, font: Font, advance: f32) {
        let x = MARGIN_R - text_width_mm(text, size);
        self.emit_line(text, size, font, BLACK, x, advance);
    }

    fn font(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Italic => &self.italic,
        }
    }

    /// Serialise the accumulated pages.
    pub fn finish(self) -> Result<Vec<u8>, MedscanError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| MedscanError::PdfError { detail: format!("save: {e}") })?;
        buf.into_inner()
            .map_err(|e| MedscanError::PdfError { detail: format!("buffer: {e}") })
    }
}

/// Font face selector for writer primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

/// Simple word-wrap: greedy fill up to `max_chars` per line.
///
/// A single word longer than the budget is emitted on its own line rather
/// than split; the page margins absorb the overhang.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_text("one two three four five six seven", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 12, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrap_empty_yields_one_empty_line() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }

    #[test]
    fn wrap_single_long_word_kept_whole() {
        let lines = wrap_text("pneumonoultramicroscopic", 10);
        assert_eq!(lines, vec!["pneumonoultramicroscopic".to_string()]);
    }

    #[test]
    fn max_chars_never_zero() {
        assert!(max_chars(MARGIN_R - 0.1, 48.0) >= 1);
    }

    #[test]
    fn writer_produces_pdf_bytes() {
        let mut w = ReportWriter::new("test").unwrap();
        w.paragraph("hello");
        let bytes = w.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_body_paginates() {
        let mut w = ReportWriter::new("test").unwrap();
        for i in 0..200 {
            w.bullet(&format!("Finding {i}: unremarkable"));
        }
        assert!(w.page_no > 1, "200 bullet rows must overflow one A4 page");
        let bytes = w.finish().unwrap();
        assert!(!bytes.is_empty());
    }
}
