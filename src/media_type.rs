//! Media types: parsing declared types and sniffing undeclared ones.

use std::path::Path;

/// Rich Text Format.
pub const RTF: &str = "application/rtf";
/// Legacy binary Word document.
pub const MSWORD: &str = "application/msword";
/// Office Open XML word-processing document.
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// OpenDocument text document.
pub const ODT: &str = "application/vnd.oasis.opendocument.text";
/// Default for byte input without a declared type.
pub const TEXT_PLAIN: &str = "text/plain";

/// Reported for empty input; no extractor handles it.
const EMPTY: &str = "inode/x-empty";
const OCTET_STREAM: &str = "application/octet-stream";

/// Document family selected by a media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Any `text/*` type: passed through.
    Text,
    Rtf,
    LegacyDoc,
    Docx,
    Odt,
}

/// A media type split into its essence and charset parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// Lower-cased `type/subtype`.
    pub essence: String,
    /// `charset` parameter, if declared.
    pub charset: Option<String>,
}

impl MediaType {
    /// Split `type/subtype; param=value` into essence and charset.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(';');
        let essence = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        let charset = parts.find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"').to_string())
        });
        Self { essence, charset }
    }

    /// Extraction path for this type, or `None` if unsupported.
    #[must_use]
    pub fn kind(&self) -> Option<DocumentKind> {
        match self.essence.as_str() {
            essence if essence.starts_with("text/") => Some(DocumentKind::Text),
            RTF => Some(DocumentKind::Rtf),
            MSWORD => Some(DocumentKind::LegacyDoc),
            DOCX => Some(DocumentKind::Docx),
            ODT => Some(DocumentKind::Odt),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        matches!(self.essence.as_str(), "text/html" | "application/xhtml+xml")
    }
}

/// Guess the media type of undeclared input from its bytes, then its path.
///
/// Magic numbers (via `infer`) decide first when they name a supported
/// document. Text is told apart by its prologue. The file extension is only
/// consulted when neither applies.
#[must_use]
pub fn sniff(bytes: &[u8], path: Option<&Path>) -> String {
    if bytes.is_empty() {
        return EMPTY.to_string();
    }

    let inferred = infer::get(bytes).map(|kind| kind.mime_type());
    if let Some(mime) = inferred.filter(|mime| MediaType::parse(mime).kind().is_some()) {
        return mime.to_string();
    }
    if let Some(text) = sniff_text(bytes) {
        return text.to_string();
    }

    path.and_then(from_extension)
        .or(inferred)
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Plain text, HTML or XML for NUL-free UTF-8 input.
fn sniff_text(bytes: &[u8]) -> Option<&'static str> {
    let text = std::str::from_utf8(bytes).ok().filter(|t| !t.contains('\0'))?;
    let head = text.trim_start_matches('\u{FEFF}').trim_start();
    let lower = head.chars().take(64).collect::<String>().to_ascii_lowercase();
    if lower.starts_with("<!doctype html") || lower.starts_with("<html") {
        Some("text/html")
    } else if lower.starts_with("<?xml") {
        Some("text/xml")
    } else {
        Some(TEXT_PLAIN)
    }
}

fn from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "rtf" => RTF,
        "doc" => MSWORD,
        "docx" => DOCX,
        "odt" => ODT,
        "txt" | "text" | "md" | "csv" => TEXT_PLAIN,
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn package(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in members {
            // Stored, as ODF requires for its mimetype member
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn parse_splits_charset() {
        let media_type = MediaType::parse(" Text/HTML; charset=\"ISO-8859-1\" ");
        assert_eq!(media_type.essence, "text/html");
        assert_eq!(media_type.charset.as_deref(), Some("ISO-8859-1"));
        assert!(media_type.is_html());
    }

    #[test]
    fn parse_without_parameters() {
        let media_type = MediaType::parse(RTF);
        assert_eq!(media_type.essence, RTF);
        assert_eq!(media_type.charset, None);
    }

    #[test]
    fn kinds() {
        assert_eq!(MediaType::parse("text/csv").kind(), Some(DocumentKind::Text));
        assert_eq!(MediaType::parse(RTF).kind(), Some(DocumentKind::Rtf));
        assert_eq!(MediaType::parse(MSWORD).kind(), Some(DocumentKind::LegacyDoc));
        assert_eq!(MediaType::parse(DOCX).kind(), Some(DocumentKind::Docx));
        assert_eq!(MediaType::parse(ODT).kind(), Some(DocumentKind::Odt));
        assert_eq!(MediaType::parse("application/pdf").kind(), None);
        assert_eq!(MediaType::parse("").kind(), None);
    }

    #[test]
    fn sniff_magic_numbers() {
        assert_eq!(sniff(br"{\rtf1 x}", None), RTF);
        assert_eq!(sniff(br"{\rtf1 x}", Some(Path::new("notes.txt"))), RTF);
    }

    #[test]
    fn sniff_packages_by_content() {
        let docx = package(&[("word/document.xml", b"<w:document/>".as_slice())]);
        assert_eq!(sniff(&docx, None), DOCX);

        let odt = package(&[("mimetype", ODT.as_bytes()), ("content.xml", b"<office:document-content/>".as_slice())]);
        assert_eq!(sniff(&odt, Some(Path::new("upload.bin"))), ODT);
    }

    #[test]
    fn sniff_unrecognised_ole_uses_extension() {
        // A bare compound-file header without a Word stream
        let mut ole = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        ole.extend_from_slice(&[0; 16]);
        assert_eq!(sniff(&ole, Some(Path::new("memo.doc"))), MSWORD);
    }

    #[test]
    fn sniff_text_flavours() {
        assert_eq!(sniff(b"<!DOCTYPE html><html></html>", None), "text/html");
        assert_eq!(sniff(b"  <?xml version=\"1.0\"?><a/>", None), "text/xml");
        assert_eq!(sniff(b"just words", None), TEXT_PLAIN);
    }

    #[test]
    fn sniff_empty() {
        assert_eq!(sniff(b"", Some(Path::new("x.txt"))), "inode/x-empty");
        assert_eq!(MediaType::parse(&sniff(b"", None)).kind(), None);
    }

    #[test]
    fn sniff_falls_back_to_extension() {
        let binary = [0xFFu8, 0x00, 0x13, 0x37];
        assert_eq!(sniff(&binary, Some(Path::new("scan.RTF"))), RTF);
        assert_eq!(sniff(&binary, Some(Path::new("blob.bin"))), "application/octet-stream");
        assert_eq!(sniff(&binary, None), "application/octet-stream");
    }

    #[test]
    fn broken_zip_is_not_a_document() {
        let bytes = [b'P', b'K', 0x03, 0x04, 0, 0];
        assert_eq!(sniff(&bytes, None), "application/zip");
        assert_eq!(MediaType::parse(&sniff(&bytes, None)).kind(), None);
        assert_eq!(sniff(&bytes, Some(Path::new("a.docx"))), DOCX);
    }
}
