//! Self-measuring, self-painting units consumed by the layout engine.
//!
//! Every flowable answers two questions: how much room it needs given the
//! space left in the frame (`measure`), and how to draw itself once the
//! engine has decided where it goes (`paint`). Painting happens in local
//! coordinates whose origin is the bottom-left corner of the measured box.

use crate::font::TextMeasure;
use crate::style::ParagraphStyle;
use crate::surface::Surface;

pub const BULLET: char = '\u{2022}';
pub const CHECKED_BOX: char = '\u{2611}';
pub const UNCHECKED_BOX: char = '\u{2610}';

/// Horizontal offset of a checkbox label from its glyph.
pub const CHECKBOX_LABEL_INDENT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A unit of flow content
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Text(TextBlock),
    Spacer(Spacer),
    Checkbox(CheckboxLine),
}

impl Flowable {
    pub fn measure(&self, fonts: &dyn TextMeasure, avail_width: f64, avail_height: f64) -> Size {
        match self {
            Flowable::Text(block) => block.measure(fonts, avail_width),
            Flowable::Spacer(spacer) => spacer.measure(avail_width),
            Flowable::Checkbox(line) => line.measure(avail_width, avail_height),
        }
    }

    /// Break into a part that fits `avail_height` and a remainder.
    /// Only text blocks can split, and only between lines.
    pub fn split(
        &self,
        fonts: &dyn TextMeasure,
        avail_width: f64,
        avail_height: f64,
    ) -> Option<(Flowable, Flowable)> {
        match self {
            Flowable::Text(block) => block
                .split(fonts, avail_width, avail_height)
                .map(|(head, tail)| (Flowable::Text(head), Flowable::Text(tail))),
            Flowable::Spacer(_) | Flowable::Checkbox(_) => None,
        }
    }

    pub fn paint(&self, fonts: &dyn TextMeasure, surface: &mut dyn Surface, width: f64) {
        match self {
            Flowable::Text(block) => block.paint(fonts, surface, width),
            Flowable::Spacer(_) => {}
            Flowable::Checkbox(line) => line.paint(surface),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Flowable::Text(_) => "text block",
            Flowable::Spacer(_) => "spacer",
            Flowable::Checkbox(_) => "checkbox line",
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Flowable::Spacer(_))
    }
}

/// A run of text set in one style, wrapped to the frame width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub style: ParagraphStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: &ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            style: *style,
        }
    }

    /// Greedy word wrap. A word wider than the line gets a line of its own.
    pub fn lines(&self, fonts: &dyn TextMeasure, width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in self.text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if fonts.text_width(&candidate, self.style.font_size) <= width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn height_for(&self, line_count: usize) -> f64 {
        line_count as f64 * self.style.leading + self.style.space_after
    }

    fn measure(&self, fonts: &dyn TextMeasure, avail_width: f64) -> Size {
        let lines = self.lines(fonts, avail_width);
        Size::new(avail_width, self.height_for(lines.len()))
    }

    fn split(
        &self,
        fonts: &dyn TextMeasure,
        avail_width: f64,
        avail_height: f64,
    ) -> Option<(TextBlock, TextBlock)> {
        if self.style.leading <= 0.0 {
            return None;
        }
        let lines = self.lines(fonts, avail_width);
        // When every line fits but the trailing space does not, the last line
        // moves on with the space
        let fit = ((avail_height / self.style.leading).floor() as usize)
            .min(lines.len().saturating_sub(1));
        if fit == 0 {
            return None;
        }

        // Trailing space belongs to the last fragment only
        let mut head_style = self.style;
        head_style.space_after = 0.0;
        let head = TextBlock {
            text: lines[..fit].join(" "),
            style: head_style,
        };
        let tail = TextBlock {
            text: lines[fit..].join(" "),
            style: self.style,
        };
        Some((head, tail))
    }

    fn paint(&self, fonts: &dyn TextMeasure, surface: &mut dyn Surface, width: f64) {
        let lines = self.lines(fonts, width);
        let top = self.height_for(lines.len());

        surface.set_font_size(self.style.font_size);
        for (i, line) in lines.iter().enumerate() {
            let baseline = top - self.style.font_size - i as f64 * self.style.leading;
            surface.draw_string(0.0, baseline, line);
        }
    }
}

/// Fixed vertical gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    pub height: f64,
}

impl Spacer {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    fn measure(&self, avail_width: f64) -> Size {
        Size::new(avail_width, self.height.max(0.0))
    }
}

/// One checklist entry: a ballot-box glyph followed by its label.
///
/// The height is always `font_size + space_after`. Labels are never wrapped
/// or truncated, so a long label runs past the right margin.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxLine {
    pub checked: bool,
    pub label: String,
    pub font_size: f64,
    pub space_after: f64,
}

impl CheckboxLine {
    pub fn new(checked: bool, label: impl Into<String>, font_size: f64, space_after: f64) -> Self {
        Self {
            checked,
            label: label.into(),
            font_size,
            space_after,
        }
    }

    pub fn glyph(&self) -> char {
        if self.checked {
            CHECKED_BOX
        } else {
            UNCHECKED_BOX
        }
    }

    fn measure(&self, avail_width: f64, _avail_height: f64) -> Size {
        Size::new(avail_width, self.font_size + self.space_after)
    }

    fn paint(&self, surface: &mut dyn Surface) {
        surface.set_font_size(self.font_size);
        surface.draw_string(0.0, 0.0, self.glyph().encode_utf8(&mut [0; 4]));
        surface.draw_string(CHECKBOX_LABEL_INDENT, 0.0, &self.label);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::style::StyleSet;
    use crate::style::StyleName;
    use crate::surface::recording::RecordingSurface;
    use rstest::rstest;

    /// Every character is half an em wide.
    pub(crate) struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, text: &str, font_size: f64) -> f64 {
            text.chars().count() as f64 * font_size * 0.5
        }
    }

    fn normal(text: &str) -> TextBlock {
        TextBlock::new(text, StyleSet::default().get(StyleName::Normal))
    }

    #[rstest]
    #[case(0)]
    #[case(10)]
    #[case(500)]
    fn checkbox_height_ignores_label_length(#[case] label_len: usize) {
        let line = Flowable::Checkbox(CheckboxLine::new(true, "x".repeat(label_len), 12.0, 10.0));
        for width in [50.0, 468.0] {
            let size = line.measure(&FixedWidth, width, 600.0);
            assert_eq!(size, Size::new(width, 22.0));
        }
    }

    #[test]
    fn checkbox_never_splits() {
        let line = Flowable::Checkbox(CheckboxLine::new(false, "todo", 12.0, 10.0));
        assert_eq!(line.split(&FixedWidth, 468.0, 5.0), None);
    }

    #[rstest]
    #[case(true, "\u{2611}")]
    #[case(false, "\u{2610}")]
    fn checkbox_paints_glyph_then_indented_label(#[case] checked: bool, #[case] glyph: &str) {
        let line = CheckboxLine::new(checked, "Bounce rate analysis", 12.0, 10.0);
        let mut surface = RecordingSurface::default();
        Flowable::Checkbox(line).paint(&FixedWidth, &mut surface, 468.0);

        assert_eq!(surface.strings.len(), 2);
        assert_eq!(surface.strings[0].text, glyph);
        assert_eq!((surface.strings[0].x, surface.strings[0].y), (0.0, 0.0));
        assert_eq!(surface.strings[1].text, "Bounce rate analysis");
        assert_eq!((surface.strings[1].x, surface.strings[1].y), (20.0, 0.0));
        assert!(surface.strings.iter().all(|s| s.size == 12.0));
    }

    #[test]
    fn spacer_claims_width_and_fixed_height() {
        let spacer = Flowable::Spacer(Spacer::new(12.0));
        assert_eq!(spacer.measure(&FixedWidth, 300.0, 1.0), Size::new(300.0, 12.0));
        assert_eq!(spacer.split(&FixedWidth, 300.0, 1.0), None);
    }

    #[test]
    fn text_wraps_on_word_boundaries() {
        // Normal is 10pt, so each char is 5pt wide; 50pt fits ten chars
        let block = normal("alpha beta gamma delta");
        assert_eq!(
            block.lines(&FixedWidth, 50.0),
            vec!["alpha beta", "gamma", "delta"]
        );
        let size = Flowable::Text(block).measure(&FixedWidth, 50.0, 1000.0);
        assert_eq!(size.height, 36.0);
    }

    #[test]
    fn overlong_word_keeps_its_own_line() {
        let block = normal("a supercalifragilistic b");
        assert_eq!(
            block.lines(&FixedWidth, 20.0),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn text_collapses_whitespace() {
        let block = normal("one\ntwo   three");
        assert_eq!(block.lines(&FixedWidth, 1000.0), vec!["one two three"]);
    }

    #[test]
    fn text_splits_between_lines() {
        let mut style = *StyleSet::default().get(StyleName::Normal);
        style.space_after = 6.0;
        let block = Flowable::Text(TextBlock::new("aaaa bbbb cccc dddd", &style));

        // 25pt wide holds one word per line; 30pt of height holds two 12pt lines
        let (head, tail) = block.split(&FixedWidth, 25.0, 30.0).unwrap();
        let Flowable::Text(head) = head else { panic!("head is not text") };
        let Flowable::Text(tail) = tail else { panic!("tail is not text") };
        assert_eq!(head.text, "aaaa bbbb");
        assert_eq!(head.style.space_after, 0.0);
        assert_eq!(tail.text, "cccc dddd");
        assert_eq!(tail.style.space_after, 6.0);
    }

    #[test]
    fn text_does_not_split_when_nothing_fits() {
        let block = Flowable::Text(normal("aaaa bbbb"));
        assert_eq!(block.split(&FixedWidth, 25.0, 11.0), None);
        let single = Flowable::Text(normal("aaaa"));
        assert_eq!(single.split(&FixedWidth, 25.0, 100.0), None);
    }

    #[test]
    fn last_line_carries_trailing_space_over() {
        let mut style = *StyleSet::default().get(StyleName::Normal);
        style.space_after = 6.0;
        let block = Flowable::Text(TextBlock::new("aaaa bbbb", &style));

        // Both lines fit in 26pt but the 6pt space after them does not
        let (head, tail) = block.split(&FixedWidth, 25.0, 26.0).unwrap();
        let Flowable::Text(head) = head else { panic!("head is not text") };
        let Flowable::Text(tail) = tail else { panic!("tail is not text") };
        assert_eq!(head.text, "aaaa");
        assert_eq!(tail.text, "bbbb");
        assert_eq!(tail.style.space_after, 6.0);
    }

    #[test]
    fn text_paints_lines_top_down() {
        let block = Flowable::Text(normal("alpha beta gamma"));
        let mut surface = RecordingSurface::default();
        block.paint(&FixedWidth, &mut surface, 50.0);

        let lines: Vec<(&str, f64)> = surface
            .strings
            .iter()
            .map(|s| (s.text.as_str(), s.y))
            .collect();
        // Two lines, 24pt tall box: baselines at 24 - 10 and 24 - 10 - 12
        assert_eq!(lines, vec![("alpha beta", 14.0), ("gamma", 2.0)]);
    }
}
