//! Fixed-layout STL header record.
//!
//! Only a narrow slice of the file is interpreted:
//!
//! | Offset | Size | Field      |
//! |--------|------|------------|
//! | 0      | 4    | `tag`      |
//! | 4      | 60   | `reserved` |
//! | 64     | 4    | `zero_x`   |
//! | 68     | 4    | `zero_y`   |
//! | 72     | 4    | `zero_z`   |
//! | 76     | 4    | `trailer`  |
//!
//! All floats are IEEE-754 binary32, little-endian.  At most
//! [`HEADER_READ_LEN`] bytes are consumed; at least [`MIN_HEADER_LEN`] must be
//! present.  The trailer is kept verbatim when available and never
//! interpreted.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

pub const TAG_LEN: usize = 4;
pub const RESERVED_LEN: usize = 60;
pub const TRAILER_LEN: usize = 4;

/// Byte offset of `zero_x`; `zero_y` and `zero_z` follow at +4 and +8.
pub const ZERO_POINT_OFFSET: usize = TAG_LEN + RESERVED_LEN;
/// Shortest prefix that can be decoded.
pub const MIN_HEADER_LEN: usize = ZERO_POINT_OFFSET + 3 * 4;
/// Number of bytes pulled from the file.
pub const HEADER_READ_LEN: usize = MIN_HEADER_LEN + TRAILER_LEN;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("file too small: got {len} bytes, need at least {min}")]
    TooSmall { len: usize, min: usize },
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl HeaderError {
    /// The underlying I/O error kind, if this failure came from file access.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            HeaderError::File { source, .. } | HeaderError::Io(source) => Some(source.kind()),
            HeaderError::TooSmall { .. } => None,
        }
    }
}

/// How invalid UTF-8 inside the tag is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagDecoding {
    /// Drop invalid sequences.
    #[default]
    Ignore,
    /// Substitute U+FFFD for each invalid sequence.
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRecord {
    pub tag: [u8; TAG_LEN],
    pub reserved: [u8; RESERVED_LEN],
    pub zero_x: f32,
    pub zero_y: f32,
    pub zero_z: f32,
    /// `None` when the source held fewer than [`HEADER_READ_LEN`] bytes.
    pub trailer: Option<[u8; TRAILER_LEN]>,
}

impl HeaderRecord {
    pub fn new(tag: [u8; TAG_LEN], zero_point: [f32; 3]) -> Self {
        let [zero_x, zero_y, zero_z] = zero_point;
        Self {
            tag,
            reserved: [0u8; RESERVED_LEN],
            zero_x,
            zero_y,
            zero_z,
            trailer: None,
        }
    }

    /// Decode a header from an in-memory prefix.  Bytes past
    /// [`HEADER_READ_LEN`] are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(HeaderError::TooSmall { len: bytes.len(), min: MIN_HEADER_LEN });
        }
        let mut cur = &bytes[..MIN_HEADER_LEN];
        let mut tag = [0u8; TAG_LEN];
        cur.read_exact(&mut tag)?;
        let mut reserved = [0u8; RESERVED_LEN];
        cur.read_exact(&mut reserved)?;
        let zero_x = cur.read_f32::<LittleEndian>()?;
        let zero_y = cur.read_f32::<LittleEndian>()?;
        let zero_z = cur.read_f32::<LittleEndian>()?;

        let trailer = bytes
            .get(MIN_HEADER_LEN..HEADER_READ_LEN)
            .map(|t| {
                let mut out = [0u8; TRAILER_LEN];
                out.copy_from_slice(t);
                out
            });

        Ok(Self { tag, reserved, zero_x, zero_y, zero_z, trailer })
    }

    /// Pull at most [`HEADER_READ_LEN`] bytes from `reader` and decode them.
    pub fn read<R: Read>(reader: R) -> Result<Self, HeaderError> {
        let mut buf = Vec::with_capacity(HEADER_READ_LEN);
        reader.take(HEADER_READ_LEN as u64).read_to_end(&mut buf)?;
        Self::decode(&buf)
    }

    /// Write the full 80-byte image.  A missing trailer is written as zeros.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.tag)?;
        writer.write_all(&self.reserved)?;
        writer.write_f32::<LittleEndian>(self.zero_x)?;
        writer.write_f32::<LittleEndian>(self.zero_y)?;
        writer.write_f32::<LittleEndian>(self.zero_z)?;
        writer.write_all(&self.trailer.unwrap_or([0u8; TRAILER_LEN]))?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_READ_LEN);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.reserved);
        for v in self.zero_point() {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&self.trailer.unwrap_or([0u8; TRAILER_LEN]));
        out
    }

    pub fn zero_point(&self) -> [f32; 3] {
        [self.zero_x, self.zero_y, self.zero_z]
    }

    /// Best-effort text for the tag.  Never fails; trailing NUL padding is
    /// stripped so an all-zero tag renders as `""`.
    pub fn tag_text(&self, mode: TagDecoding) -> String {
        let mut text = String::with_capacity(TAG_LEN);
        for chunk in self.tag.utf8_chunks() {
            text.push_str(chunk.valid());
            if mode == TagDecoding::Replace && !chunk.invalid().is_empty() {
                text.push(char::REPLACEMENT_CHARACTER);
            }
        }
        let trimmed = text.trim_end_matches('\0').len();
        text.truncate(trimmed);
        text
    }
}
