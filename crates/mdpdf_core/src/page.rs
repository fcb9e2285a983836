use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Margin applied to every side of every page, in points.
pub const PAGE_MARGIN: f64 = 72.0;

/// Supported page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.2756, 841.8898),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Letter => f.write_str("Letter"),
            PageSize::A4 => f.write_str("A4"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(format!("unknown page size '{}' (expected Letter or A4)", other)),
        }
    }
}

/// Page geometry for one conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageConfig {
    pub fn new(size: PageSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            width,
            height,
            margin_top: PAGE_MARGIN,
            margin_bottom: PAGE_MARGIN,
            margin_left: PAGE_MARGIN,
            margin_right: PAGE_MARGIN,
        }
    }

    pub fn frame_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn frame_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl From<PageSize> for PageConfig {
    fn from(size: PageSize) -> Self {
        Self::new(size)
    }
}
