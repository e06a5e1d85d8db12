//! Character encoding detection and transcoding.
//!
//! Pass-through `text/*` input is decoded to UTF-8 from its byte-order mark,
//! its declared charset, or (for HTML) its meta charset declaration. RTF and
//! legacy DOC bytes are decoded through Windows code pages.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the character encoding of pass-through text.
///
/// Looks, in order, for:
/// 1. A byte-order mark
/// 2. The `charset` parameter declared with the media type
/// 3. For HTML, `<meta charset="...">` or the `http-equiv` form
/// 4. Defaults to UTF-8
///
/// Only the first 1024 bytes are examined for meta declarations.
#[must_use]
pub fn detect_encoding(bytes: &[u8], declared: Option<&str>, is_html: bool) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(encoding) = declared.and_then(|label| Encoding::for_label(label.trim().as_bytes())) {
        return encoding;
    }

    if is_html {
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
        let meta = CHARSET_META_RE
            .captures(&head)
            .or_else(|| CONTENT_TYPE_CHARSET_RE.captures(&head))
            .and_then(|c| c.get(1))
            .and_then(|m| Encoding::for_label(m.as_str().as_bytes()));
        if let Some(encoding) = meta {
            return encoding;
        }
    }

    UTF_8
}

/// Transcode pass-through text to a UTF-8 string.
///
/// Invalid sequences are replaced with � rather than causing errors, and a
/// byte-order mark is stripped.
///
/// # Examples
///
/// ```
/// use rs_docparser::encoding::decode_text;
///
/// let text = decode_text(b"Caf\xE9", Some("iso-8859-1"), false);
/// assert_eq!(text, "Café");
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8], declared: Option<&str>, is_html: bool) -> String {
    let encoding = detect_encoding(bytes, declared, is_html);
    let (decoded, _encoding_used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Map an RTF `\ansicpg` number to a single-byte encoding.
///
/// Multi-byte code pages cannot be decoded one `\'hh` escape at a time, so
/// they fall back to Windows-1252 like any unknown code page.
#[must_use]
pub fn codepage_encoding(codepage: i32) -> &'static Encoding {
    let label = match codepage {
        874 | 1250..=1258 => format!("windows-{codepage}"),
        10000 => "macintosh".to_string(),
        _ => return WINDOWS_1252,
    };
    Encoding::for_label(label.as_bytes()).unwrap_or(WINDOWS_1252)
}

/// Decode a single byte through a single-byte encoding.
#[must_use]
pub fn decode_byte(encoding: &'static Encoding, byte: u8) -> String {
    let (decoded, _had_errors) = encoding.decode_without_bom_handling(std::slice::from_ref(&byte));
    decoded.into_owned()
}

/// Decode legacy 8-bit text as Windows-1252.
#[must_use]
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    let (decoded, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    decoded.into_owned()
}
