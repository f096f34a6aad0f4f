//! Explicit sets of Unicode scalars used as scan targets and skip sets.

use rustc_hash::FxHashSet;

/// A set of Unicode scalars.
///
/// Scan operations take a `CharSet` as the match target; the scanner's
/// skip set is one as well. Membership is explicit: a scalar is in the set
/// iff it was inserted, via [`from_chars`](Self::from_chars), one of the
/// presets, or [`insert`](Self::insert).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    scalars: FxHashSet<char>,
}

/// Horizontal whitespace scalars: Unicode `White_Space` minus the line
/// terminators below.
const WHITESPACE: &str = "\t \u{A0}\u{1680}\u{2000}\u{2001}\u{2002}\u{2003}\u{2004}\u{2005}\u{2006}\u{2007}\u{2008}\u{2009}\u{200A}\u{202F}\u{205F}\u{3000}";

/// Line terminator scalars: LF, VT, FF, CR, NEL, LS, PS.
const NEWLINES: &str = "\n\u{B}\u{C}\r\u{85}\u{2028}\u{2029}";

impl CharSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing every scalar of `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self {
            scalars: chars.chars().collect(),
        }
    }

    /// Horizontal whitespace (spaces and tabs, including the Unicode
    /// space separators).
    pub fn whitespace() -> Self {
        Self::from_chars(WHITESPACE)
    }

    /// Line terminators.
    pub fn newlines() -> Self {
        Self::from_chars(NEWLINES)
    }

    /// Whitespace and line terminators together. This is the scanner's
    /// default skip set.
    pub fn whitespace_and_newlines() -> Self {
        let mut set = Self::whitespace();
        set.scalars.extend(NEWLINES.chars());
        set
    }

    /// Add a single scalar to the set.
    pub fn insert(&mut self, scalar: char) {
        self.scalars.insert(scalar);
    }

    /// Returns `true` if `scalar` is a member.
    #[inline]
    pub fn contains(&self, scalar: char) -> bool {
        self.scalars.contains(&scalar)
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Number of member scalars.
    pub fn len(&self) -> usize {
        self.scalars.len()
    }
}
