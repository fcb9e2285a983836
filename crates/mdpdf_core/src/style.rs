use crate::config::{StyleConfig, StylesConfig};

/// Name of a paragraph style in the style set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleName {
    Normal,
    Heading1,
    Heading2,
    Heading3,
}

impl StyleName {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Normal => "Normal",
            StyleName::Heading1 => "Heading1",
            StyleName::Heading2 => "Heading2",
            StyleName::Heading3 => "Heading3",
        }
    }

    /// Style keyed by a heading level, for the levels that have one.
    pub fn for_heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(StyleName::Heading1),
            2 => Some(StyleName::Heading2),
            3 => Some(StyleName::Heading3),
            _ => None,
        }
    }
}

/// Resolved attributes of one style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub name: StyleName,
    pub font_size: f64,
    pub leading: f64,
    pub space_after: f64,
}

impl ParagraphStyle {
    fn from_config(name: StyleName, config: &StyleConfig) -> Self {
        Self {
            name,
            font_size: config.font_size,
            leading: config.leading,
            space_after: config.space_after,
        }
    }
}

/// The styles available to the mapper. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSet {
    normal: ParagraphStyle,
    heading1: ParagraphStyle,
    heading2: ParagraphStyle,
    heading3: ParagraphStyle,
}

impl StyleSet {
    pub fn from_config(config: &StylesConfig) -> Self {
        Self {
            normal: ParagraphStyle::from_config(StyleName::Normal, &config.normal),
            heading1: ParagraphStyle::from_config(StyleName::Heading1, &config.heading1),
            heading2: ParagraphStyle::from_config(StyleName::Heading2, &config.heading2),
            heading3: ParagraphStyle::from_config(StyleName::Heading3, &config.heading3),
        }
    }

    pub fn get(&self, name: StyleName) -> &ParagraphStyle {
        match name {
            StyleName::Normal => &self.normal,
            StyleName::Heading1 => &self.heading1,
            StyleName::Heading2 => &self.heading2,
            StyleName::Heading3 => &self.heading3,
        }
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::from_config(&StylesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "Heading1", 24.0)]
    #[case(2, "Heading2", 20.0)]
    #[case(3, "Heading3", 16.0)]
    fn heading_styles(#[case] level: u8, #[case] name: &str, #[case] font_size: f64) {
        let styles = StyleSet::default();
        let style_name = StyleName::for_heading(level).unwrap();
        assert_eq!(style_name.as_str(), name);
        assert_eq!(styles.get(style_name).font_size, font_size);
        assert_eq!(styles.get(style_name).space_after, 0.0);
    }

    #[test]
    fn deeper_headings_have_no_style() {
        assert_eq!(StyleName::for_heading(4), None);
        assert_eq!(StyleName::for_heading(0), None);
    }
}
