//! Load-failure errors.
//!
//! Scanning itself never errors: absent targets are sentinel results with
//! documented cursor post-conditions, and argument-contract violations are
//! debug assertions. The only fallible surface is constructing a scanner
//! from a file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::loader::TextEncoding;

/// Why a source file could not be turned into scanner input.
///
/// Returned by [`Scanner::from_file`](crate::Scanner::from_file); a
/// failure never affects any already-constructed scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file could not be read.
    #[error("cannot read source file {}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The file's bytes are not valid text under the requested encoding.
    #[error("cannot decode {} as {}", .path.display(), .encoding)]
    CannotDecode {
        /// Path that failed to decode.
        path: PathBuf,
        /// The encoding the caller asked for.
        encoding: TextEncoding,
    },
}
