use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the converter.
///
/// Parse, layout and rendering failures all collapse into [`Error::Conversion`];
/// callers cannot tell them apart beyond the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Nothing in the input produced any output.
    #[error("no content to convert")]
    EmptyContent,

    #[error("error converting markdown to PDF: {0}")]
    Conversion(String),

    /// The required font face could not be registered at startup.
    #[error("font unavailable: {0}")]
    MissingFont(String),
}

/// Failures inside the pagination engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{kind} of height {height:.1}pt does not fit a frame of height {frame_height:.1}pt")]
    TooLarge {
        kind: &'static str,
        height: f64,
        frame_height: f64,
    },
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Conversion(e.to_string())
    }
}
