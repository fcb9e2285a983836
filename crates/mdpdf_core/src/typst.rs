use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::diag::SourceDiagnostic;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

use crate::error::{Error, Result};
use crate::font::FontResource;
use crate::page::PageConfig;
use crate::surface::{PageCanvas, Surface};

// Width of the box each string is set in
const NO_WRAP_WIDTH: f64 = 10000.0;
const NO_BREAK_SPACE: char = '\u{a0}';

/// A canvas that records every drawn string as absolutely placed Typst content.
///
/// Each finished page becomes a run of `#place` calls separated by page breaks.
/// Text edges are set to the baseline, so a `dy` offset positions the baseline
/// exactly where the flowable asked for it.
#[derive(Debug)]
pub struct TypstCanvas {
    width: f64,
    height: f64,
    family: String,
    pages: Vec<String>,
    current: String,
    origin: (f64, f64),
    font_size: f64,
    stack: Vec<((f64, f64), f64)>,
}

impl TypstCanvas {
    pub fn new(page: &PageConfig, family: &str) -> Self {
        Self {
            width: page.width,
            height: page.height,
            family: family.to_string(),
            pages: Vec::new(),
            current: String::new(),
            origin: (0.0, 0.0),
            font_size: 12.0,
            stack: Vec::new(),
        }
    }

    /// The complete Typst source for all finished pages.
    pub fn into_markup(self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "#set page(width: {}pt, height: {}pt, margin: 0pt)\n",
            pt(self.width),
            pt(self.height)
        ));
        out.push_str(&format!(
            "#set text(font: \"{}\", top-edge: \"baseline\", bottom-edge: \"baseline\", hyphenate: false)\n",
            escape(&self.family)
        ));
        out.push('\n');

        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push_str("#pagebreak()\n");
            }
            out.push_str(page);
        }
        out
    }
}

impl Surface for TypstCanvas {
    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        if text.is_empty() {
            return;
        }
        let dx = self.origin.0 + x;
        let dy = self.height - (self.origin.1 + y);
        self.current.push_str(&format!(
            "#place(top + left, dx: {}pt, dy: {}pt, block(width: {}pt, text(size: {}pt, \"{}\")))\n",
            pt(dx),
            pt(dy),
            pt(NO_WRAP_WIDTH),
            pt(self.font_size),
            escape(text)
        ));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }

    fn save_state(&mut self) {
        self.stack.push((self.origin, self.font_size));
    }

    fn restore_state(&mut self) {
        if let Some((origin, font_size)) = self.stack.pop() {
            self.origin = origin;
            self.font_size = font_size;
        }
    }
}

impl PageCanvas for TypstCanvas {
    fn show_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.origin = (0.0, 0.0);
        self.stack.clear();
    }
}

/// Format a length without float noise: at most three decimals, no trailing zeros.
fn pt(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Escape text for a Typst string literal. Whitespace becomes a no-break
/// space: a drawn string is exactly one line and typst must not wrap it.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_whitespace() => out.push(NO_BREAK_SPACE),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Compile Typst source into a laid-out document with the bundled font registered.
pub fn compile(markup: String, font: &FontResource) -> Result<PagedDocument> {
    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(markup)
        .fonts([font.data()])
        .search_fonts_with(font_options)
        .build();

    engine
        .compile()
        .output
        .map_err(|e| Error::Conversion(format!("typst compilation failed: {:?}", e)))
}

/// Compile Typst source to PDF bytes.
pub fn render_pdf(markup: String, font: &FontResource) -> Result<Vec<u8>> {
    let doc = compile(markup, font)?;
    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|diags| Error::Conversion(format!("PDF generation failed: {}", describe(&diags))))
}

fn describe(diags: &[SourceDiagnostic]) -> String {
    diags
        .iter()
        .map(|diag| diag.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSize;
    use typst_library::layout::{Frame, FrameItem, Point};

    fn canvas() -> TypstCanvas {
        TypstCanvas::new(&PageConfig::new(PageSize::Letter), "DejaVu Sans")
    }

    /// (x, y-from-top, text) of every text run on the first page.
    fn text_runs(markup: String) -> Vec<(f64, f64, String)> {
        let font = FontResource::load("DejaVu Sans").unwrap();
        let doc = compile(markup, &font).unwrap();
        let mut runs = Vec::new();
        collect_runs(&doc.pages[0].frame, Point::zero(), &mut runs);
        runs
    }

    fn collect_runs(frame: &Frame, offset: Point, runs: &mut Vec<(f64, f64, String)>) {
        for (pos, item) in frame.items() {
            let pos = offset + *pos;
            match item {
                FrameItem::Group(group) => collect_runs(&group.frame, pos, runs),
                FrameItem::Text(text) => {
                    runs.push((pos.x.to_pt(), pos.y.to_pt(), text.text.to_string()))
                }
                _ => {}
            }
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn lengths_are_compact() {
        assert_eq!(pt(72.0), "72");
        assert_eq!(pt(595.2756), "595.276");
        assert_eq!(pt(12.5), "12.5");
        assert_eq!(pt(-0.0001), "0");
    }

    #[test]
    fn escapes_string_literals() {
        assert_eq!(escape(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
        assert_eq!(
            escape("two\nlines\tand\u{7}bell"),
            "two\u{a0}lines\u{a0}andbell"
        );
        assert_eq!(escape("#*_[x]$"), "#*_[x]$");
    }

    #[test]
    fn draws_at_baseline_from_top() {
        let mut canvas = canvas();
        canvas.set_font_size(12.0);
        canvas.save_state();
        canvas.translate(72.0, 698.0);
        canvas.draw_string(20.0, 0.0, "label");
        canvas.restore_state();
        canvas.show_page();

        let markup = canvas.into_markup();
        assert!(markup.starts_with("#set page(width: 612pt, height: 792pt, margin: 0pt)\n"));
        assert!(markup.contains(
            "#place(top + left, dx: 92pt, dy: 94pt, block(width: 10000pt, text(size: 12pt, \"label\")))\n"
        ));
    }

    #[test]
    fn pages_are_separated_by_breaks() {
        let mut canvas = canvas();
        canvas.draw_string(0.0, 700.0, "one");
        canvas.show_page();
        canvas.draw_string(0.0, 700.0, "two");
        canvas.show_page();

        let markup = canvas.into_markup();
        assert_eq!(markup.matches("#pagebreak()").count(), 1);
        let one = markup.find("\"one\"").unwrap();
        let brk = markup.find("#pagebreak()").unwrap();
        let two = markup.find("\"two\"").unwrap();
        assert!(one < brk && brk < two);
    }

    #[test]
    fn empty_strings_are_skipped() {
        let mut canvas = canvas();
        canvas.draw_string(0.0, 0.0, "");
        canvas.show_page();
        assert!(!canvas.into_markup().contains("#place"));
    }

    #[test]
    fn renders_pdf_bytes() {
        let font = FontResource::load("DejaVu Sans").unwrap();
        let mut canvas = canvas();
        canvas.set_font_size(12.0);
        canvas.draw_string(72.0, 698.0, "\u{2611}");
        canvas.show_page();

        let pdf = render_pdf(canvas.into_markup(), &font).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn compiled_glyphs_land_on_placed_baseline() {
        let mut canvas = canvas();
        canvas.set_font_size(12.0);
        canvas.translate(72.0, 698.0);
        canvas.draw_string(0.0, 0.0, "\u{2611}");
        canvas.draw_string(20.0, 0.0, "done");
        canvas.show_page();

        let runs = text_runs(canvas.into_markup());
        assert_eq!(runs.len(), 2);
        let (glyph_x, glyph_y, glyph) = &runs[0];
        assert_eq!(glyph, "\u{2611}");
        assert!(close(*glyph_x, 72.0) && close(*glyph_y, 94.0), "{:?}", runs[0]);
        let (label_x, label_y, label) = &runs[1];
        assert_eq!(label, "done");
        assert!(close(*label_x, 92.0) && close(*label_y, 94.0), "{:?}", runs[1]);
    }

    #[test]
    fn long_label_stays_on_one_line() {
        let label: Vec<String> = (0..1200).map(|i| format!("w{}", i)).collect();
        let mut canvas = canvas();
        canvas.set_font_size(12.0);
        canvas.draw_string(92.0, 698.0, &label.join(" "));
        canvas.show_page();

        let runs = text_runs(canvas.into_markup());
        assert!(!runs.is_empty());
        assert!(runs.iter().all(|(_, y, _)| close(*y, 94.0)), "{:?}", runs);
    }

    #[test]
    fn broken_markup_is_a_conversion_error() {
        let font = FontResource::load("DejaVu Sans").unwrap();
        let err = render_pdf("#place(".to_string(), &font).unwrap_err();
        assert!(matches!(err, Error::Conversion(_)));
    }
}
