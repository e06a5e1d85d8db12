//! Zip container access for DOCX and ODT packages.

use crate::error::{Error, Result};
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

/// Main document member of a DOCX package.
pub const DOCX_DOCUMENT: &str = "word/document.xml";
/// Main content member of an ODT package.
pub const ODT_CONTENT: &str = "content.xml";

/// Open a zip container held in memory.
///
/// # Errors
///
/// Returns `Error::MalformedContainer` if the bytes are not a readable archive.
pub fn open(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::MalformedContainer(format!("cannot open archive: {e}")))
}

/// Read one named member from a zip container.
///
/// Returns `Ok(None)` when the archive has no member called `name`.
///
/// # Errors
///
/// Returns `Error::MalformedContainer` if the archive cannot be opened or the
/// member cannot be decompressed.
pub fn read_member(bytes: &[u8], name: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = open(bytes)?;
    read_from(&mut archive, name)
}

/// Read one named member from an already opened archive.
pub fn read_from(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(Error::MalformedContainer(format!("cannot locate {name}: {e}"))),
    };

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| Error::MalformedContainer(format!("cannot read {name}: {e}")))?;
    Ok(Some(content))
}
