//! File access for header inspection.
//!
//! Only the first [`HEADER_READ_LEN`] bytes are ever read, regardless of file
//! size.  The file handle is dropped before decoding starts.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::header::{HeaderError, HeaderRecord, HEADER_READ_LEN};

/// Read the bounded prefix of `path`.
pub fn read_prefix(path: &Path) -> Result<Vec<u8>, HeaderError> {
    let with_path = |source: io::Error| HeaderError::File { path: path.to_path_buf(), source };

    debug!(path = %path.display(), "opening");
    let file = File::open(path).map_err(with_path)?;
    let mut buf = Vec::with_capacity(HEADER_READ_LEN);
    file.take(HEADER_READ_LEN as u64)
        .read_to_end(&mut buf)
        .map_err(with_path)?;
    debug!(path = %path.display(), bytes = buf.len(), "prefix read");
    Ok(buf)
}

/// Open `path`, read its prefix and decode the header record.
pub fn read_header(path: &Path) -> Result<HeaderRecord, HeaderError> {
    let prefix = read_prefix(path)?;
    HeaderRecord::decode(&prefix).map_err(|e| {
        if let HeaderError::TooSmall { len, min } = e {
            warn!(path = %path.display(), len, min, "file too small for header");
        }
        e
    })
}
