//! Legacy binary Word (`.doc`) extraction.
//!
//! The preferred path hands the bytes to an external converter that emits
//! DocBook XML (by default `antiword -x db`) and rewrites that with
//! [`Profile::DocBook`]. When the converter is disabled, missing or fails, a
//! lossy fallback splits the raw bytes on carriage returns and keeps the
//! segments that look like text.

use crate::encoding::decode_windows_1252;
use crate::error::Result;
use crate::media_type::MSWORD;
use crate::options::Options;
use crate::result::ExtractResult;
use crate::rewrite::{rewrite_markup, Profile};
use quick_xml::escape::partial_escape;
use std::io::{self, Write};
use std::process::Command;
use tempfile::NamedTempFile;

/// Outcome of one converter run.
#[derive(Debug)]
enum Conversion {
    /// Converter stdout.
    Converted(Vec<u8>),
    /// The program does not exist on this system.
    Unavailable,
    /// The program ran (or could not be run) and produced nothing usable.
    Failed(String),
}

/// Extract a DOC file to `p`/`em`/`strong` markup.
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` if the converter succeeds but its output
/// is not well-formed XML.
pub fn extract_doc(bytes: &[u8], options: &Options) -> Result<ExtractResult> {
    if !options.use_doc_converter {
        log::debug!("doc converter disabled, using byte-split fallback");
        return Ok(ExtractResult::new(fallback_paragraphs(bytes), MSWORD));
    }

    let program = &options.doc_converter_program;
    let warning = match convert(bytes, options) {
        Conversion::Converted(stdout) => {
            let mut html = rewrite_markup(&stdout, Profile::DocBook)?;
            if options.flatten_docbook_output {
                html = html.replace('\n', "").trim().to_string();
            }
            return Ok(ExtractResult::new(html, MSWORD));
        }
        Conversion::Unavailable => {
            log::debug!("doc converter {program} not found, using byte-split fallback");
            format!("converter {program} not found; used lossy fallback")
        }
        Conversion::Failed(reason) => {
            log::warn!("doc converter {program} failed: {reason}");
            format!("converter {program} failed ({reason}); used lossy fallback")
        }
    };

    Ok(ExtractResult::new(fallback_paragraphs(bytes), MSWORD).with_warning(warning))
}

fn convert(bytes: &[u8], options: &Options) -> Conversion {
    let input = match write_temp(bytes) {
        Ok(file) => file,
        Err(e) => return Conversion::Failed(format!("cannot stage input: {e}")),
    };

    let output = Command::new(&options.doc_converter_program)
        .args(&options.doc_converter_args)
        .arg(input.path())
        .output();

    match output {
        Ok(output) if output.status.success() => Conversion::Converted(output.stdout),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                Conversion::Failed(output.status.to_string())
            } else {
                Conversion::Failed(format!("{}: {stderr}", output.status))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Conversion::Unavailable,
        Err(e) => Conversion::Failed(e.to_string()),
    }
}

fn write_temp(bytes: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".doc").tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Recover paragraphs from raw DOC bytes without a converter.
///
/// Word stores paragraph text as runs terminated by `\r`. Segments that are
/// empty or contain a NUL byte (binary structures) are dropped; the rest are
/// decoded as Windows-1252, escaped and wrapped in `<p>`.
#[must_use]
pub fn fallback_paragraphs(bytes: &[u8]) -> String {
    bytes
        .split(|&b| b == b'\r')
        .filter(|segment| !segment.is_empty() && !segment.contains(&0))
        .map(|segment| format!("<p>{}</p>", partial_escape(&decode_windows_1252(segment))))
        .collect()
}
