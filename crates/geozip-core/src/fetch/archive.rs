use std::io::{Cursor, Read};

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{GeozipError, Result};
use crate::models::Dataset;

/// Most we reserve up front from an entry's declared size; the buffer grows
/// past this as data actually arrives.
const MAX_PREALLOCATE_BYTES: u64 = 64 * 1024 * 1024;

/// Open `archive` as a ZIP file and return the lines of the entry named
/// `entry_name`, in file order with line terminators stripped.
pub fn extract_lines(archive: &[u8], entry_name: &str) -> Result<Dataset> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    debug!(entries = zip.len(), "Opened archive");

    let mut entry = match zip.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(GeozipError::EntryNotFound(entry_name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    // The declared size comes from the central directory and may be bogus
    let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOCATE_BYTES) as usize);
    entry.read_to_end(&mut bytes).map_err(ZipError::Io)?;

    let text = String::from_utf8(bytes).map_err(|source| GeozipError::Encoding {
        entry: entry_name.to_string(),
        source,
    })?;

    let lines: Dataset = text.lines().map(str::to_owned).collect();
    debug!(entry = entry_name, lines = lines.len(), "Extracted entry");
    Ok(lines)
}
