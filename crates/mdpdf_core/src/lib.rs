mod config;
mod error;
mod flowable;
mod font;
mod html;
mod layout;
mod mapper;
mod node;
mod page;
mod parser;
mod style;
mod surface;
mod typst;

pub use config::{
    CheckboxConfig, Config, ConfigError, FontConfig, PageSection, StyleConfig, StylesConfig,
};
pub use error::{Error, LayoutError, Result};
pub use flowable::{
    BULLET, CHECKBOX_LABEL_INDENT, CHECKED_BOX, CheckboxLine, Flowable, Size, Spacer, TextBlock,
    UNCHECKED_BOX,
};
pub use font::{FontResource, TextMeasure};
pub use layout::DocTemplate;
pub use mapper::{BLOCK_SPACING, ElementMapper, LIST_ITEM_SPACING};
pub use node::{MarkupNode, NodeKind};
pub use page::{PAGE_MARGIN, PageConfig, PageSize};
pub use style::{ParagraphStyle, StyleName, StyleSet};
pub use surface::{PageCanvas, Surface};

use crate::typst::TypstCanvas;

/// Parse markdown text into its top-level markup nodes.
pub fn parse(markdown: &str) -> Vec<MarkupNode> {
    parser::parse(markdown)
}

/// Convert markdown to PDF bytes using the compiled-in defaults.
pub fn markdown_to_pdf(markdown: &str, page_size: PageSize) -> Result<Vec<u8>> {
    Converter::new()?.convert(markdown, page_size)
}

/// Markdown to PDF converter.
///
/// Construction registers the font and builds the style set; both are only
/// read afterwards, so one converter can serve concurrent conversions.
#[derive(Debug)]
pub struct Converter {
    styles: StyleSet,
    checkbox: CheckboxConfig,
    font: FontResource,
}

impl Converter {
    /// Converter with the compiled-in default config.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::compiled_default())
    }

    /// Fails with [`Error::MissingFont`] when the configured family is not available.
    pub fn with_config(config: &Config) -> Result<Self> {
        let font = FontResource::load(&config.font.family)?;
        Ok(Self {
            styles: StyleSet::from_config(&config.styles),
            checkbox: config.checkbox,
            font,
        })
    }

    /// Parse and map markdown into the ordered flowable sequence.
    pub fn flowables(&self, markdown: &str) -> Result<Vec<Flowable>> {
        let nodes = parse(markdown);
        let flowables = ElementMapper::new(&self.styles, self.checkbox).map_nodes(&nodes);
        if flowables.is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(flowables)
    }

    /// Lay the document out and return the Typst source of the placed pages.
    pub fn render_markup(&self, markdown: &str, page_size: PageSize) -> Result<String> {
        let flowables = self.flowables(markdown)?;
        let page = PageConfig::new(page_size);
        let mut canvas = TypstCanvas::new(&page, self.font.family());

        let pages = DocTemplate::new(page).build(flowables, &self.font, &mut canvas)?;
        log::debug!("laid out {} page(s) on {}", pages, page_size);

        Ok(canvas.into_markup())
    }

    /// Convert markdown to PDF bytes.
    pub fn convert(&self, markdown: &str, page_size: PageSize) -> Result<Vec<u8>> {
        let markup = self.render_markup(markdown, page_size)?;
        let pdf = typst::render_pdf(markup, &self.font)?;
        log::info!("generated {} byte PDF", pdf.len());
        Ok(pdf)
    }
}
