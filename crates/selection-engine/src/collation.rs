//! String comparers used by the sort engine.
//!
//! Two independent switches select one of four comparers:
//!
//! - **ordinal** compares raw UTF-8 bytes (equivalently, code points), optionally after
//!   folding each char to its single-char upper case;
//! - **culture** compares grapheme by grapheme on a primary weight (character class, then
//!   case-folded text) so that `"apple" < "Banana" < "cherry"`, with lower case ordered before
//!   upper case only when the comparison is case-sensitive.
//!
//! The culture comparer is a locale-neutral approximation of dictionary order; it does not
//! load CLDR tailorings.

use std::cmp::Ordering;

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_segmentation::UnicodeSegmentation;

/// One of the four comparers selectable by `ordinal_comparison × case_sensitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparer {
    /// Byte-wise comparison.
    Ordinal,
    /// Byte-wise comparison of upper-case folded text.
    OrdinalIgnoreCase,
    /// Dictionary-style comparison; case breaks ties.
    Culture,
    /// Dictionary-style comparison; case is ignored.
    CultureIgnoreCase,
}

impl Comparer {
    /// Pick the comparer for the given switches.
    pub fn new(ordinal: bool, case_sensitive: bool) -> Self {
        match (ordinal, case_sensitive) {
            (true, true) => Self::Ordinal,
            (true, false) => Self::OrdinalIgnoreCase,
            (false, true) => Self::Culture,
            (false, false) => Self::CultureIgnoreCase,
        }
    }

    /// Compare two keys.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Ordinal => a.as_bytes().cmp(b.as_bytes()),
            Self::OrdinalIgnoreCase => a
                .chars()
                .map(simple_uppercase)
                .cmp(b.chars().map(simple_uppercase)),
            Self::Culture => culture_compare(a, b, true),
            Self::CultureIgnoreCase => culture_compare(a, b, false),
        }
    }

    /// Returns `true` if the two keys compare equal.
    pub fn equals(self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Upper-case `ch` only where that maps one char to one char, so `'ß'` stays `'ß'`
/// instead of expanding to `"SS"`.
fn simple_uppercase(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Character classes in primary sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
    Other,
}

fn char_class(ch: char) -> CharClass {
    use GeneralCategory::*;

    if ch.is_whitespace() {
        return CharClass::Whitespace;
    }
    match get_general_category(ch) {
        ConnectorPunctuation | DashPunctuation | OpenPunctuation | ClosePunctuation
        | InitialPunctuation | FinalPunctuation | OtherPunctuation => CharClass::Punctuation,
        MathSymbol | CurrencySymbol | ModifierSymbol | OtherSymbol => CharClass::Symbol,
        DecimalNumber | LetterNumber | OtherNumber => CharClass::Digit,
        UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter | OtherLetter => {
            CharClass::Letter
        }
        _ => CharClass::Other,
    }
}

/// Returns `true` for characters dropped from a sort key when punctuation is ignored.
///
/// Follows the usual editor notion of punctuation: Unicode punctuation plus math, currency
/// and modifier symbols.
pub fn is_punctuation(ch: char) -> bool {
    use GeneralCategory::*;

    matches!(
        get_general_category(ch),
        OtherPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | ConnectorPunctuation
            | DashPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
    )
}

fn primary_weights(s: &str) -> impl Iterator<Item = (CharClass, char)> + '_ {
    s.graphemes(true).flat_map(|grapheme| {
        let class = grapheme
            .chars()
            .next()
            .map(char_class)
            .unwrap_or(CharClass::Other);
        grapheme
            .chars()
            .flat_map(char::to_lowercase)
            .map(move |ch| (class, ch))
    })
}

// Lower case sorts before upper case, matching common dictionary collations.
fn case_weights(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.chars().map(|ch| if ch.is_uppercase() { 1 } else { 0 })
}

fn culture_compare(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    let primary = primary_weights(a).cmp(primary_weights(b));
    if primary != Ordering::Equal || !case_sensitive {
        return primary;
    }
    case_weights(a)
        .cmp(case_weights(b))
        .then_with(|| a.cmp(b))
}
