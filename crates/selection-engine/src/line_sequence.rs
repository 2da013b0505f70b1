//! Line sequence model.
//!
//! A [`LineSequence`] is the shared data structure every selection transform works on: an
//! ordered list of `(content, terminator)` pairs built from one block of text.
//!
//! # Invariants
//!
//! - Concatenating `content + terminator` for every line, in order, reproduces the text the
//!   sequence was parsed from byte-for-byte.
//! - Only the final line may be unterminated.
//!
//! Transforms never mutate a sequence in place; they produce a new one, which keeps a failed
//! or no-op transform from touching the caller's copy.

use crate::line_ending::LineTerminator;

/// One line of a selection: its text and the terminator that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Line {
    /// Line text, without the terminator.
    pub content: String,
    /// The terminator exactly as found in the source text.
    pub terminator: LineTerminator,
}

impl Line {
    /// Create a line from its parts.
    pub fn new(content: impl Into<String>, terminator: LineTerminator) -> Self {
        Self {
            content: content.into(),
            terminator,
        }
    }

    /// Returns `true` if the content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Leading whitespace of the content.
    pub fn indentation(&self) -> &str {
        let trimmed = self.content.trim_start();
        &self.content[..self.content.len() - trimmed.len()]
    }
}

/// An ordered block of lines, each carrying its own terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Split `text` on CR, LF and CRLF boundaries in a single pass.
    ///
    /// Empty input yields an empty sequence. Text ending in a terminator does not produce a
    /// trailing empty line; text that does not yields an unterminated last line.
    pub fn parse(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            let terminator = LineTerminator::detect_at(&bytes[pos..]);
            if terminator.is_none() {
                pos += 1;
                continue;
            }
            // CR and LF are ASCII, so `start..pos` always falls on char boundaries.
            lines.push(Line::new(&text[start..pos], terminator));
            pos += terminator.byte_len();
            start = pos;
        }

        if start < bytes.len() {
            lines.push(Line::new(&text[start..], LineTerminator::None));
        }

        Self { lines }
    }

    /// Build a sequence directly from lines.
    ///
    /// Any unterminated line that is not last receives the sequence's dominant terminator.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let mut seq = Self { lines };
        seq.fill_terminators(false);
        seq
    }

    /// Concatenate every line with its recorded terminator.
    pub fn serialize(&self) -> String {
        let capacity = self
            .lines
            .iter()
            .map(|line| line.content.len() + line.terminator.byte_len())
            .sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(&line.content);
            out.push_str(line.terminator.as_str());
        }
        out
    }

    /// Replace the lines with a reordered (and possibly filtered) set of lines.
    ///
    /// Terminators travel with the [`Line`] values they belong to. The one exception is the
    /// trailing shape of the block: if this block ended without a terminator and the
    /// unterminated line moved away from the end, it trades terminators with the line that now
    /// ends the block. A block that ended unterminated therefore still does, and the
    /// "only the last line may be unterminated" invariant holds.
    pub fn replace_lines(&mut self, new_order: Vec<Line>) {
        let ends_unterminated = self.ends_unterminated();
        self.lines = new_order;
        self.fill_terminators(ends_unterminated);
    }

    /// Return a new sequence with every line's content mapped through `f`.
    ///
    /// Terminators are copied unchanged.
    pub fn map_content(&self, mut f: impl FnMut(&str) -> String) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| Line::new(f(&line.content), line.terminator))
                .collect(),
        }
    }

    /// The lines, in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Consume the sequence, returning its lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if the last line has no terminator.
    pub fn ends_unterminated(&self) -> bool {
        self.lines.last().is_some_and(|line| line.terminator.is_none())
    }

    /// The most frequent terminator in the block, used when a transform inserts new lines.
    ///
    /// Ties go to the terminator seen first; a block with no terminators at all yields LF.
    pub fn dominant_terminator(&self) -> LineTerminator {
        let mut counts: Vec<(LineTerminator, usize)> = Vec::with_capacity(3);
        for line in &self.lines {
            if line.terminator.is_none() {
                continue;
            }
            match counts.iter_mut().find(|(t, _)| *t == line.terminator) {
                Some((_, count)) => *count += 1,
                None => counts.push((line.terminator, 1)),
            }
        }

        let mut best: Option<(LineTerminator, usize)> = None;
        for (terminator, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((terminator, count));
            }
        }
        best.map(|(t, _)| t).unwrap_or(LineTerminator::Lf)
    }

    fn fill_terminators(&mut self, keep_open_end: bool) {
        let Some(last_index) = self.lines.len().checked_sub(1) else {
            return;
        };
        let fallback = self.dominant_terminator();

        let mut spare = None;
        if keep_open_end {
            let last = &mut self.lines[last_index];
            if !last.terminator.is_none() {
                spare = Some(last.terminator);
                last.terminator = LineTerminator::None;
            }
        }

        for line in &mut self.lines[..last_index] {
            if line.terminator.is_none() {
                line.terminator = spare.take().unwrap_or(fallback);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminators(seq: &LineSequence) -> Vec<LineTerminator> {
        seq.lines().iter().map(|l| l.terminator).collect()
    }

    #[test]
    fn test_parse_empty() {
        let seq = LineSequence::parse("");
        assert!(seq.is_empty());
        assert_eq!(seq.serialize(), "");
    }

    #[test]
    fn test_parse_mixed_terminators() {
        let seq = LineSequence::parse("a\r\nb\nc\rd");
        assert_eq!(seq.len(), 4);
        assert_eq!(
            terminators(&seq),
            vec![
                LineTerminator::Crlf,
                LineTerminator::Lf,
                LineTerminator::Cr,
                LineTerminator::None
            ]
        );
        assert_eq!(seq.serialize(), "a\r\nb\nc\rd");
    }

    #[test]
    fn test_parse_lf_cr_is_two_breaks() {
        let seq = LineSequence::parse("a\n\rb");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.lines()[1].content, "");
        assert_eq!(seq.lines()[1].terminator, LineTerminator::Cr);
    }

    #[test]
    fn test_parse_blank_lines_only() {
        let seq = LineSequence::parse("\n\n");
        assert_eq!(seq.len(), 2);
        assert!(seq.lines().iter().all(|l| l.content.is_empty()));
        assert_eq!(seq.serialize(), "\n\n");
    }

    #[test]
    fn test_replace_lines_moves_open_end() {
        let mut seq = LineSequence::parse("a\r\nb\nc");
        let mut lines = seq.lines().to_vec();
        lines.reverse();
        seq.replace_lines(lines);
        assert_eq!(seq.serialize(), "c\r\nb\na");
    }

    #[test]
    fn test_replace_lines_keeps_closed_end() {
        let mut seq = LineSequence::parse("a\r\nb\n");
        let mut lines = seq.lines().to_vec();
        lines.reverse();
        seq.replace_lines(lines);
        assert_eq!(seq.serialize(), "b\na\r\n");
    }

    #[test]
    fn test_from_lines_fills_missing_terminators() {
        let seq = LineSequence::from_lines(vec![
            Line::new("x", LineTerminator::None),
            Line::new("y", LineTerminator::Crlf),
            Line::new("z", LineTerminator::None),
        ]);
        assert_eq!(seq.serialize(), "x\r\ny\r\nz");
    }

    #[test]
    fn test_dominant_terminator() {
        assert_eq!(
            LineSequence::parse("a\r\nb\nc\r\n").dominant_terminator(),
            LineTerminator::Crlf
        );
        assert_eq!(
            LineSequence::parse("a\rb\n").dominant_terminator(),
            LineTerminator::Cr
        );
        assert_eq!(
            LineSequence::parse("single").dominant_terminator(),
            LineTerminator::Lf
        );
    }

    #[test]
    fn test_indentation() {
        assert_eq!(Line::new("  \tx ", LineTerminator::None).indentation(), "  \t");
        assert_eq!(Line::new("x", LineTerminator::None).indentation(), "");
    }
}
