//! Format dispatch: route bytes to the extractor for their media type.

use crate::container::{self, DOCX_DOCUMENT, ODT_CONTENT};
use crate::encoding::decode_text;
use crate::error::{Error, Result};
use crate::legacy;
use crate::media_type::{DocumentKind, MediaType};
use crate::options::Options;
use crate::result::ExtractResult;
use crate::rewrite::{rewrite_markup, Profile};
use crate::rtf::{RtfText, RtfTokenizer};

/// Extract `bytes` declared as `media_type`.
pub(crate) fn extract(bytes: &[u8], media_type: &str, options: &Options) -> Result<ExtractResult> {
    let declared = MediaType::parse(media_type);
    let Some(kind) = declared.kind() else {
        return Err(Error::UnsupportedType(media_type.trim().to_string()));
    };
    log::debug!("extracting {} bytes as {kind:?} ({})", bytes.len(), declared.essence);

    match kind {
        DocumentKind::Text => {
            let text = decode_text(bytes, declared.charset.as_deref(), declared.is_html());
            Ok(ExtractResult::new(text, &declared.essence))
        }
        DocumentKind::Rtf => Ok(extract_rtf(bytes, &declared.essence)),
        DocumentKind::LegacyDoc => legacy::extract_doc(bytes, options),
        DocumentKind::Docx => extract_package(bytes, &declared.essence, DOCX_DOCUMENT, Profile::Docx),
        DocumentKind::Odt => extract_package(bytes, &declared.essence, ODT_CONTENT, Profile::Odt),
    }
}

fn extract_rtf(bytes: &[u8], media_type: &str) -> ExtractResult {
    let scanned = RtfTokenizer::new(bytes).run();
    let balanced = scanned.is_balanced();
    let RtfText {
        text,
        open_groups,
        unmatched_closes,
    } = scanned;

    let result = ExtractResult::new(text, media_type);
    if balanced {
        return result;
    }

    log::warn!("unbalanced RTF groups: {open_groups} left open, {unmatched_closes} unmatched closes");
    result.with_warning(format!(
        "unbalanced RTF groups ({open_groups} left open, {unmatched_closes} unmatched closes)"
    ))
}

/// Pull `member` out of a zip package and rewrite it with `profile`.
fn extract_package(bytes: &[u8], media_type: &str, member: &str, profile: Profile) -> Result<ExtractResult> {
    let Some(xml) = container::read_member(bytes, member)? else {
        log::warn!("{media_type} package has no {member}");
        return Ok(ExtractResult::new(String::new(), media_type)
            .with_warning(format!("member {member} not found")));
    };

    let html = rewrite_markup(&xml, profile)?;
    Ok(ExtractResult::new(html, media_type))
}
