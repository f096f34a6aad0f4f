//! One-shot loading of scanner input from a file.
//!
//! The loader reads the whole file synchronously, decodes it under the
//! requested encoding, and hands the text to the scanner's in-memory
//! constructor. There is no streaming: the scanner's only source is fully
//! materialized.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ScanError;

/// Text encoding of a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8.
    Utf8,
    /// UTF-16, little-endian.
    Utf16Le,
    /// UTF-16, big-endian.
    Utf16Be,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
        };
        f.write_str(name)
    }
}

/// Read `path` and decode it under `encoding`.
///
/// A leading byte order mark matching the requested encoding is stripped;
/// letting U+FEFF through as content would poison the first literal match
/// of every scan. A BOM of a different encoding is not special-cased and
/// fails or decodes as the bytes dictate.
pub fn read_source(path: &Path, encoding: TextEncoding) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %encoding, len = bytes.len(), "read source file");

    let text = decode(&bytes, encoding).ok_or_else(|| ScanError::CannotDecode {
        path: path.to_path_buf(),
        encoding,
    })?;
    debug!(units = text.chars().count(), "decoded source text");

    Ok(text)
}

/// Decode `bytes` under `encoding`, stripping a matching leading BOM.
/// `None` if the bytes are not valid text in that encoding.
fn decode(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
            std::str::from_utf8(bytes).ok().map(str::to_owned)
        }
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            if bytes.len() % 2 != 0 {
                return None;
            }
            let bom: &[u8] = match encoding {
                TextEncoding::Utf16Le => &[0xFF, 0xFE],
                _ => &[0xFE, 0xFF],
            };
            let bytes = bytes.strip_prefix(bom).unwrap_or(bytes);
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| match encoding {
                    TextEncoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                    _ => u16::from_be_bytes([pair[0], pair[1]]),
                })
                .collect();
            String::from_utf16(&units).ok()
        }
    }
}
