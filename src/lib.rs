//! # rs-docparser
//!
//! Text extraction from word-processing documents.
//!
//! RTF is reduced to plain text; DOCX, ODT and legacy DOC are reduced to
//! minimal HTML that keeps only paragraphs (`<p>`), emphasis (`<em>`) and
//! strong emphasis (`<strong>`); `text/*` input is decoded and passed
//! through.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_docparser::extract_bytes;
//!
//! let rtf = br"{\rtf1\ansi{\fonttbl{\f0 Arial;}}Hello\par World}";
//! let result = extract_bytes(rtf, Some("application/rtf"))?;
//! assert_eq!(result.content, "Hello\nWorld");
//! # Ok::<(), rs_docparser::Error>(())
//! ```
//!
//! ## Formats
//!
//! | Media type | Output |
//! |---|---|
//! | `text/*` | Decoded text, unchanged |
//! | `application/rtf` | Plain text |
//! | `application/msword` | `p`/`em`/`strong` markup via an external converter, or a lossy fallback |
//! | `application/vnd.openxmlformats-officedocument.wordprocessingml.document` | `p`/`em`/`strong` markup |
//! | `application/vnd.oasis.opendocument.text` | `p`/`em`/`strong` markup |
//!
//! The two core algorithms are also usable on their own: [`rtf::extract_rtf`]
//! and [`rewrite::rewrite`].

mod error;
mod extract;
mod options;
mod result;

/// Zip container access for DOCX and ODT packages.
pub mod container;

/// Character decoding for pass-through text and RTF code pages.
pub mod encoding;

/// Legacy binary Word extraction.
pub mod legacy;

/// Media-type parsing and content sniffing.
pub mod media_type;

/// Structural rewrite of document XML into minimal HTML.
pub mod rewrite;

/// Group-stack RTF tokenizer.
pub mod rtf;

/// Owned XML element tree.
pub mod xml;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::ExtractResult;

use std::path::Path;

/// Extracts content from bytes using default options.
///
/// # Arguments
///
/// * `bytes` - The document bytes
/// * `media_type` - The declared media type, parameters allowed
///   (`text/html; charset=utf-8`). `None` means `text/plain`.
///
/// # Returns
///
/// Returns `Ok(ExtractResult)` with the extracted content. Returns
/// `Error::UnsupportedType` for media types with no extractor, and
/// `Error::MalformedContainer` / `Error::MalformedMarkup` for broken
/// DOCX/ODT/DOC input.
///
/// # Example
///
/// ```rust
/// use rs_docparser::extract_bytes;
///
/// let result = extract_bytes(b"Caf\xE9", Some("text/plain; charset=iso-8859-1"))?;
/// assert_eq!(result.content, "Café");
/// assert_eq!(result.media_type, "text/plain");
/// # Ok::<(), rs_docparser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(bytes: &[u8], media_type: Option<&str>) -> Result<ExtractResult> {
    extract_bytes_with_options(bytes, media_type, &Options::default())
}

/// Extracts content from bytes with custom options.
///
/// # Example
///
/// ```rust
/// use rs_docparser::{extract_bytes_with_options, Options};
///
/// let options = Options {
///     use_doc_converter: false,
///     ..Options::default()
/// };
/// let result = extract_bytes_with_options(b"First\rSecond\r", Some("application/msword"), &options)?;
/// assert_eq!(result.content, "<p>First</p><p>Second</p>");
/// # Ok::<(), rs_docparser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes_with_options(
    bytes: &[u8],
    media_type: Option<&str>,
    options: &Options,
) -> Result<ExtractResult> {
    extract::extract(bytes, media_type.unwrap_or(crate::media_type::TEXT_PLAIN), options)
}

/// Extracts content from a file using default options.
///
/// # Arguments
///
/// * `path` - The file to read
/// * `media_type` - The declared media type. `None` sniffs it from the file's
///   bytes, then its extension.
///
/// # Returns
///
/// Returns `Error::UnreadableInput` if the file cannot be read, otherwise as
/// [`extract_bytes`].
#[allow(clippy::missing_errors_doc)]
pub fn extract_file(path: impl AsRef<Path>, media_type: Option<&str>) -> Result<ExtractResult> {
    extract_file_with_options(path, media_type, &Options::default())
}

/// Extracts content from a file with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn extract_file_with_options(
    path: impl AsRef<Path>,
    media_type: Option<&str>,
    options: &Options,
) -> Result<ExtractResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::UnreadableInput(format!("cannot read file {}: {e}", path.display())))?;

    match media_type {
        Some(declared) => extract::extract(&bytes, declared, options),
        None => {
            let sniffed = crate::media_type::sniff(&bytes, Some(path));
            log::debug!("sniffed {} as {sniffed}", path.display());
            extract::extract(&bytes, &sniffed, options)
        }
    }
}
