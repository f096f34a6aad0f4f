//! The scanning engine.
//!
//! A [`Scanner`] owns one [`TextSource`] and advances through it with
//! scan-up-to, scan-while, and exact-literal operations, plus skip
//! variants that discard what they consume. Every operation documents its
//! cursor post-condition; the failure paths either leave the cursor where
//! the operation ended (the `scan_up_to_*` pair) or roll it back to the
//! pre-call position (everything else that can fail).
//!
//! # Contract violations
//!
//! Empty character sets and empty literals are caller errors. They fail a
//! debug assertion; release builds return the operation's miss value
//! without scanning.

use std::ops::Range;
use std::path::Path;

use crate::char_set::CharSet;
use crate::error::ScanError;
use crate::loader::{self, TextEncoding};
use crate::number::{NumberRepresentation, ScanTarget};
use crate::source::{SeekOrigin, StringSource, TextSource};

/// Outcome of a scan-up-to operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    /// Whether the target was found before end-of-input.
    pub reached: bool,
    /// The span consumed on the way, skipped scalars included.
    pub text: String,
}

impl ScanResult {
    /// Miss with nothing consumed; the degraded value for violated
    /// argument contracts.
    fn missed() -> Self {
        Self {
            reached: false,
            text: String::new(),
        }
    }
}

/// Compare two scalars under the scanner's case rule.
fn scalars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase().eq(b.to_lowercase())
    }
}

/// Compare two strings under the scanner's case rule, without allocating.
fn strings_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
    }
}

/// A stateful text-scanning cursor.
///
/// The scanner owns its source exclusively; the pair forms one unit of
/// mutable state with a single owner and no internal synchronization.
/// Configuration is plain fields, settable between any two operations.
pub struct Scanner<S: TextSource = StringSource> {
    source: S,
    /// Scalars transparently consumed during `scan_up_to_*` operations.
    /// `None` (or an empty set) disables skipping.
    pub skip_set: Option<CharSet>,
    /// Whether literal and substring comparisons distinguish case.
    /// Defaults to `false`.
    pub case_sensitive: bool,
}

impl<S: TextSource> Scanner<S> {
    /// Create a scanner over an arbitrary source.
    ///
    /// Defaults: skip set is
    /// [`CharSet::whitespace_and_newlines`], comparisons are
    /// case-insensitive.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            skip_set: Some(CharSet::whitespace_and_newlines()),
            case_sensitive: false,
        }
    }

    // ─── Queries ───────────────────────────────────────────────────────

    /// Total unit count of the source.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns `true` if the source contains no text.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Current cursor position.
    pub fn index(&self) -> usize {
        self.source.index()
    }

    /// Returns `true` once the cursor has consumed the whole source.
    pub fn is_at_end(&self) -> bool {
        self.index() >= self.len()
    }

    /// Move the cursor to an absolute position.
    ///
    /// # Contract
    ///
    /// `index <= len`.
    pub fn seek(&mut self, index: usize) {
        debug_assert!(
            index <= self.len(),
            "seek to {index} is out of range for source of length {}",
            self.len()
        );
        self.rewind(index);
    }

    // ─── Lookahead ─────────────────────────────────────────────────────

    /// The scalar at `index`, without moving the cursor.
    ///
    /// # Contract
    ///
    /// `index < len`.
    pub fn peek_at(&mut self, index: usize) -> char {
        debug_assert!(
            index < self.len(),
            "peek at {index} is out of range for source of length {}",
            self.len()
        );
        let saved = self.index();
        self.rewind(index);
        let scalar = self.source.read_scalar();
        self.rewind(saved);
        scalar
    }

    /// The span covering `range`, without moving the cursor.
    ///
    /// # Contract
    ///
    /// `range` must lie within `0..len`.
    pub fn peek_range(&mut self, range: Range<usize>) -> String {
        debug_assert!(
            range.start <= range.end && range.end <= self.len(),
            "peek of {range:?} is out of range for source of length {}",
            self.len()
        );
        let saved = self.index();
        self.rewind(range.start);
        let text = self.source.read(range.len());
        self.rewind(saved);
        text
    }

    // ─── Scanning up to a target ───────────────────────────────────────

    /// Scan forward until a scalar from `set` is encountered, accumulating
    /// the consumed span.
    ///
    /// At each step the skip set is tried first; a skipped scalar still
    /// counts toward the accumulated span, and only un-skipped scalars are
    /// tested against `set`. On a hit the cursor stops immediately before
    /// the matched scalar; on a miss (`reached: false`) it stays at
    /// end-of-input. `set` must not be empty.
    pub fn scan_up_to_characters(&mut self, set: &CharSet) -> ScanResult {
        if set.is_empty() {
            debug_assert!(false, "scan target set must not be empty");
            return ScanResult::missed();
        }

        let start = self.index();
        let mut consumed = 0;
        let mut reached = false;

        while !self.is_at_end() {
            if self.skip_if_needed() {
                consumed += 1;
                continue;
            }

            if set.contains(self.source.read_scalar()) {
                reached = true;
                break;
            }

            consumed += 1;
        }

        self.rewind(start);
        let text = self.source.read(consumed);

        ScanResult { reached, text }
    }

    /// Scan forward until `substring` is encountered, accumulating the
    /// consumed span.
    ///
    /// Comparison follows [`case_sensitive`](Self::case_sensitive). Each
    /// candidate position is probed with the substring's first unit
    /// before the full-length comparison; a failed full comparison
    /// advances by exactly one unit and retries, so the worst case is
    /// quadratic. Skip-set interleaving works as in
    /// [`scan_up_to_characters`](Self::scan_up_to_characters). On a hit
    /// the cursor stops immediately before the match; on a miss it stays
    /// at end-of-input. `substring` must not be empty.
    pub fn scan_up_to_string(&mut self, substring: &str) -> ScanResult {
        let Some(first) = substring.chars().next() else {
            debug_assert!(false, "scan target substring must not be empty");
            return ScanResult::missed();
        };
        let needle_len = substring.chars().count();

        let start = self.index();
        let mut consumed = 0;
        let mut reached = false;

        while !self.is_at_end() {
            if self.skip_if_needed() {
                consumed += 1;
                continue;
            }

            let remaining = self.len() - self.index();
            if remaining < needle_len {
                // Too little input left for any match; consume the tail.
                consumed += remaining;
                break;
            }

            let probe_at = self.index();
            if scalars_eq(self.source.read_scalar(), first, self.case_sensitive) {
                self.rewind(probe_at);
                let window = self.source.read(needle_len);
                if strings_eq(&window, substring, self.case_sensitive) {
                    reached = true;
                    break;
                }
                self.rewind(probe_at + 1);
            }

            consumed += 1;
        }

        self.rewind(start);
        let text = self.source.read(consumed);

        ScanResult { reached, text }
    }

    // ─── Consuming scans ───────────────────────────────────────────────

    /// Consume and return the next scalar, or `None` at end-of-input.
    /// The skip set is not consulted.
    pub fn scan_character(&mut self) -> Option<char> {
        if self.is_at_end() {
            return None;
        }
        Some(self.source.read_scalar())
    }

    /// Greedily consume the maximal run of scalars from `set` at the
    /// cursor.
    ///
    /// No skip-set interleaving, unlike the `scan_up_to_*` pair. Returns
    /// `None` with the cursor unchanged when zero units match. `set` must
    /// not be empty.
    pub fn scan_characters(&mut self, set: &CharSet) -> Option<String> {
        if set.is_empty() {
            debug_assert!(false, "scan set must not be empty");
            return None;
        }

        let start = self.index();
        let mut consumed = 0;

        while !self.is_at_end() {
            if !set.contains(self.source.read_scalar()) {
                break;
            }
            consumed += 1;
        }

        self.rewind(start);
        if consumed > 0 {
            Some(self.source.read(consumed))
        } else {
            None
        }
    }

    /// Consume `literal` at the cursor if the source matches it under the
    /// case rule, returning the consumed source text.
    ///
    /// Rolls back on mismatch; returns `None` without scanning when the
    /// remaining input is shorter than `literal`. `literal` must not be
    /// empty.
    pub fn scan_string(&mut self, literal: &str) -> Option<String> {
        if literal.is_empty() {
            debug_assert!(false, "scan literal must not be empty");
            return None;
        }

        let needle_len = literal.chars().count();
        if self.len() - self.index() < needle_len {
            return None;
        }

        let start = self.index();
        let window = self.source.read(needle_len);
        if strings_eq(&window, literal, self.case_sensitive) {
            return Some(window);
        }

        self.rewind(start);
        None
    }

    // ─── Numeric scanning ──────────────────────────────────────────────

    /// Scan an `f64`.
    pub fn scan_f64(&mut self, representation: NumberRepresentation) -> Option<f64> {
        self.scan_number(representation)
    }

    /// Scan an `f32`.
    pub fn scan_f32(&mut self, representation: NumberRepresentation) -> Option<f32> {
        self.scan_number(representation)
    }

    /// Scan a platform-width signed integer.
    pub fn scan_isize(&mut self, representation: NumberRepresentation) -> Option<isize> {
        self.scan_number(representation)
    }

    /// Scan an `i32`.
    pub fn scan_i32(&mut self, representation: NumberRepresentation) -> Option<i32> {
        self.scan_number(representation)
    }

    /// Scan an `i64`.
    pub fn scan_i64(&mut self, representation: NumberRepresentation) -> Option<i64> {
        self.scan_number(representation)
    }

    /// Scan a `u64`.
    pub fn scan_u64(&mut self, representation: NumberRepresentation) -> Option<u64> {
        self.scan_number(representation)
    }

    /// Harvest a numeric-looking span with the representation's permissive
    /// set, then parse it. The permissive harvest admits non-numbers like
    /// `"+-"`; a failed parse rolls the cursor back to the pre-scan
    /// position so the span is not consumed.
    fn scan_number<T: ScanTarget>(&mut self, representation: NumberRepresentation) -> Option<T> {
        let start = self.index();
        let text = self.scan_characters(T::harvest_set(representation))?;
        match T::parse(&text, representation) {
            Some(value) => Some(value),
            None => {
                self.rewind(start);
                None
            }
        }
    }

    // ─── Skipping ──────────────────────────────────────────────────────

    /// Skip one unit unconditionally. `false` at end-of-input.
    pub fn skip_character(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.source.seek_to(1, SeekOrigin::Current);
        true
    }

    /// Skip one scalar if it belongs to `set`, rolling back on mismatch.
    pub fn skip_character_from(&mut self, set: &CharSet) -> bool {
        if self.is_at_end() {
            return false;
        }
        if set.contains(self.source.read_scalar()) {
            return true;
        }
        self.source.seek_to(-1, SeekOrigin::Current);
        false
    }

    /// Skip the maximal run of scalars from `set`. `true` iff at least
    /// one unit was consumed. `set` must not be empty.
    pub fn skip_characters(&mut self, set: &CharSet) -> bool {
        self.scan_characters(set).is_some()
    }

    /// Skip `literal` if the source matches it at the cursor. `literal`
    /// must not be empty.
    pub fn skip_string(&mut self, literal: &str) -> bool {
        self.scan_string(literal).is_some()
    }

    /// Scan up to the first scalar from `set`, then also consume the run
    /// of matching scalars.
    ///
    /// If no scalar from `set` occurs in the remaining input the cursor is
    /// fully rolled back to the pre-call position, a stronger guarantee
    /// than the underlying [`scan_up_to_characters`](Self::scan_up_to_characters),
    /// which leaves the cursor at end-of-input on a miss. `set` must not
    /// be empty; at end-of-input this is a no-op returning `false`.
    pub fn skip_up_from(&mut self, set: &CharSet) -> bool {
        if set.is_empty() {
            debug_assert!(false, "skip target set must not be empty");
            return false;
        }
        if self.is_at_end() {
            return false;
        }

        let start = self.index();
        if !self.scan_up_to_characters(set).reached {
            self.rewind(start);
            return false;
        }

        let _ = self.scan_characters(set);
        true
    }

    /// Scan up to `substring`, then also consume it.
    ///
    /// Fully rolls back when the substring is absent, and fails fast
    /// without scanning when the remaining input is shorter than
    /// `substring`. `substring` must not be empty.
    pub fn skip_up_to(&mut self, substring: &str) -> bool {
        if substring.is_empty() {
            debug_assert!(false, "skip target substring must not be empty");
            return false;
        }
        if self.len() - self.index() < substring.chars().count() {
            return false;
        }

        let start = self.index();
        if !self.scan_up_to_string(substring).reached {
            self.rewind(start);
            return false;
        }

        let _ = self.scan_string(substring);
        true
    }

    // ─── Support ───────────────────────────────────────────────────────

    /// Consume the scalar at the cursor if the skip set contains it,
    /// rolling back one unit otherwise. A `None` or empty skip set skips
    /// nothing. Used only by the two scan-up-to algorithms.
    fn skip_if_needed(&mut self) -> bool {
        let Some(skip) = &self.skip_set else {
            return false;
        };
        if skip.is_empty() {
            return false;
        }

        if skip.contains(self.source.read_scalar()) {
            return true;
        }

        self.source.seek_to(-1, SeekOrigin::Current);
        false
    }

    /// Absolute clamped seek, for rollbacks and span re-reads.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "an in-memory source never exceeds isize::MAX units"
    )]
    fn rewind(&mut self, index: usize) {
        self.source.seek_to(index as isize, SeekOrigin::Start);
    }
}

impl Scanner<StringSource> {
    /// Create a scanner over in-memory text.
    pub fn new(text: &str) -> Self {
        Self::with_source(StringSource::new(text))
    }

    /// Load `path` under `encoding` and scan its contents.
    ///
    /// The read is one-shot and synchronous; the decoded text backs an
    /// in-memory source. Fails with [`ScanError`] when the file cannot be
    /// read or its bytes cannot be decoded under `encoding`.
    pub fn from_file(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Self, ScanError> {
        let text = loader::read_source(path.as_ref(), encoding)?;
        Ok(Self::new(&text))
    }
}
