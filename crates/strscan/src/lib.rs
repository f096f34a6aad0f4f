//! Backtracking text-scanning cursor for hand-written lexers and parsers.
//!
//! A [`Scanner`] owns a [`TextSource`] and advances through it scalar by
//! scalar or in bulk, matching character sets or literal substrings while
//! tracking a single read position. Operations that miss their target
//! either stay where they stopped (`scan_up_to_*`) or roll the cursor back
//! to where the call began (`scan_string`, the numeric scanners, the
//! `skip_up_*` pair); each post-condition is documented on the operation.
//!
//! Text indexes by Unicode scalar value, so every position arithmetic step
//! is exactly one unit regardless of the plane a character lives in.
//!
//! # Example
//!
//! ```
//! use strscan::{CharSet, NumberRepresentation, Scanner};
//!
//! let mut scanner = Scanner::new("width = 42");
//! scanner.skip_set = None;
//!
//! let key = scanner.scan_up_to_characters(&CharSet::whitespace());
//! assert_eq!(key.text, "width");
//!
//! assert!(scanner.skip_up_to("="));
//! scanner.skip_characters(&CharSet::whitespace());
//! assert_eq!(scanner.scan_i64(NumberRepresentation::Decimal), Some(42));
//! ```

mod char_set;
mod error;
mod loader;
mod number;
mod scanner;
mod source;

pub use char_set::CharSet;
pub use error::ScanError;
pub use loader::TextEncoding;
pub use number::NumberRepresentation;
pub use scanner::{ScanResult, Scanner};
pub use source::{SeekOrigin, StringSource, TextSource};
