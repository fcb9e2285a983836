use std::fmt;

use ttf_parser::{Face, GlyphId, name_id};

use crate::error::{Error, Result};

// Bundled DejaVu Sans: covers the bullet and ballot-box glyphs
static DEJAVU_SANS: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

/// Horizontal text measurement used by line wrapping.
pub trait TextMeasure {
    /// Advance width of `text` set at `font_size`, in points.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// The single Unicode face every flowable is drawn with.
pub struct FontResource {
    family: String,
    data: &'static [u8],
    face: Face<'static>,
}

impl FontResource {
    /// Load the bundled face and check it provides `family`.
    pub fn load(family: &str) -> Result<Self> {
        Self::from_static(DEJAVU_SANS, family)
    }

    fn from_static(data: &'static [u8], family: &str) -> Result<Self> {
        let face = Face::parse(data, 0)
            .map_err(|e| Error::MissingFont(format!("cannot parse bundled font: {}", e)))?;

        let found = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::FAMILY)
            .filter_map(|name| name.to_string())
            .find(|name| name.eq_ignore_ascii_case(family));

        match found {
            Some(family) => {
                log::debug!("registered font family '{}'", family);
                Ok(Self { family, data, face })
            }
            None => Err(Error::MissingFont(format!(
                "no font with family '{}' is available",
                family
            ))),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    fn advance(&self, ch: char) -> u16 {
        self.face
            .glyph_index(ch)
            .and_then(|glyph| self.face.glyph_hor_advance(glyph))
            .or_else(|| self.face.glyph_hor_advance(GlyphId(0)))
            .unwrap_or(0)
    }
}

impl TextMeasure for FontResource {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| u32::from(self.advance(ch))).sum();
        f64::from(units) * font_size / f64::from(self.face.units_per_em())
    }
}

impl fmt::Debug for FontResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResource")
            .field("family", &self.family)
            .field("bytes", &self.data.len())
            .finish()
    }
}
