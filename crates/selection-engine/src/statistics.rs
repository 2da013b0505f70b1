//! Selection statistics.

use unicode_segmentation::UnicodeSegmentation;

use crate::line_sequence::LineSequence;

/// Counts describing a block of text. Display is left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStatistics {
    /// Number of lines (a trailing terminator does not start a new line).
    pub lines: usize,
    /// Lines that are empty or whitespace only.
    pub blank_lines: usize,
    /// Unicode words (UAX #29), punctuation excluded.
    pub words: usize,
    /// User-perceived characters (grapheme clusters), terminators excluded.
    pub characters: usize,
    /// Grapheme clusters that are not whitespace.
    pub non_whitespace_characters: usize,
}

impl TextStatistics {
    /// Compute statistics for `text`.
    pub fn compute(text: &str) -> Self {
        let seq = LineSequence::parse(text);
        let mut stats = Self {
            lines: seq.len(),
            ..Self::default()
        };

        for line in seq.lines() {
            if line.is_blank() {
                stats.blank_lines += 1;
            }
            stats.words += line.content.unicode_words().count();
            for grapheme in line.content.graphemes(true) {
                stats.characters += 1;
                if !grapheme.chars().all(char::is_whitespace) {
                    stats.non_whitespace_characters += 1;
                }
            }
        }

        stats
    }
}
