//! Result types for extraction output.

use serde::Serialize;

/// Result of extracting a document.
///
/// `content` is plain text for RTF and `text/*` input, and minimal markup
/// (only `<p>`, `<em>` and `<strong>`) for DOC, DOCX and ODT input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    /// Extracted text or minimal markup.
    pub content: String,

    /// Normalised media type that selected the extraction path.
    pub media_type: String,

    /// Non-fatal issues encountered during extraction, such as:
    /// - The expected member was missing from the container
    /// - The legacy DOC converter was unavailable and the lossy fallback ran
    /// - The RTF group structure was unbalanced
    pub warnings: Vec<String>,
}

impl ExtractResult {
    pub(crate) fn new(content: String, media_type: &str) -> Self {
        Self {
            content,
            media_type: media_type.to_string(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
