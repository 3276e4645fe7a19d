//! Rendering of decoded headers to stdout.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::header::{HeaderRecord, TagDecoding};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub tag_decoding: TagDecoding,
    /// Append the tag and trailer bytes as hex (text mode only).
    pub raw: bool,
}

/// One JSON line per inspected file.
#[derive(Debug, Serialize)]
pub struct HeaderReport {
    /// Lossy: a file name that is not valid UTF-8 still yields a report.
    pub path: String,
    pub tag: String,
    pub tag_hex: String,
    pub zero_x: f32,
    pub zero_y: f32,
    pub zero_z: f32,
    pub trailer_hex: Option<String>,
}

impl HeaderReport {
    pub fn new(path: &Path, rec: &HeaderRecord, opts: &ReportOptions) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            tag: rec.tag_text(opts.tag_decoding),
            tag_hex: hex::encode(rec.tag),
            zero_x: rec.zero_x,
            zero_y: rec.zero_y,
            zero_z: rec.zero_z,
            trailer_hex: rec.trailer.map(hex::encode),
        }
    }
}

/// Labelled text, four lines per record (six with `raw`).
pub fn write_text<W: Write>(mut out: W, rec: &HeaderRecord, opts: &ReportOptions) -> io::Result<()> {
    writeln!(out, "STL tag: {}", rec.tag_text(opts.tag_decoding))?;
    // `{:?}` keeps the fractional part: 0.0 rather than 0.
    writeln!(out, "zero_x: {:?}", rec.zero_x)?;
    writeln!(out, "zero_y: {:?}", rec.zero_y)?;
    writeln!(out, "zero_z: {:?}", rec.zero_z)?;
    if opts.raw {
        writeln!(out, "tag bytes: {}", hex::encode(rec.tag))?;
        match rec.trailer {
            Some(t) => writeln!(out, "trailer: {}", hex::encode(t))?,
            None    => writeln!(out, "trailer: absent")?,
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(
    mut out: W,
    path: &Path,
    rec: &HeaderRecord,
    opts: &ReportOptions,
) -> io::Result<()> {
    serde_json::to_writer(&mut out, &HeaderReport::new(path, rec, opts))?;
    writeln!(out)
}
