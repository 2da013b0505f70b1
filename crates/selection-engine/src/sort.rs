//! Line sorting.
//!
//! [`sort_lines`] reorders a [`LineSequence`] under a [`SortPolicy`]. It is a pure function:
//! the input sequence is untouched and no line content is ever altered, only its position and
//! (when duplicates are eliminated) its presence.
//!
//! # Example
//!
//! ```rust
//! use selection_engine::{LineSequence, SortPolicy, sort_lines};
//!
//! let policy = SortPolicy {
//!     ordinal_comparison: true,
//!     case_sensitive: true,
//!     ..SortPolicy::default()
//! };
//! let sorted = sort_lines(&LineSequence::parse("b\na\nc\n"), &policy);
//! assert_eq!(sorted.serialize(), "a\nb\nc\n");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::collation::{Comparer, is_punctuation};
use crate::line_sequence::{Line, LineSequence};

/// How lines are compared and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortPolicy {
    /// If `true`, `"a"` and `"A"` are different keys.
    pub case_sensitive: bool,
    /// If `true`, compare bytes; otherwise use dictionary-style collation.
    pub ordinal_comparison: bool,
    /// If `false`, the result is in descending order.
    pub ascending: bool,
    /// Drop leading whitespace before building the key.
    pub ignore_leading_whitespace: bool,
    /// Drop punctuation from the key (the line content keeps it).
    pub ignore_punctuation: bool,
    /// Keep only the first line of each group of equal keys.
    pub eliminate_duplicates: bool,
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            ordinal_comparison: false,
            ascending: true,
            ignore_leading_whitespace: false,
            ignore_punctuation: false,
            eliminate_duplicates: false,
        }
    }
}

impl SortPolicy {
    /// The comparer selected by `ordinal_comparison` and `case_sensitive`.
    pub fn comparer(&self) -> Comparer {
        Comparer::new(self.ordinal_comparison, self.case_sensitive)
    }

    /// Derive the sort key for a line's content.
    pub fn sort_key<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let content = if self.ignore_leading_whitespace {
            content.trim_start()
        } else {
            content
        };

        if self.ignore_punctuation && content.chars().any(is_punctuation) {
            Cow::Owned(content.chars().filter(|&ch| !is_punctuation(ch)).collect())
        } else {
            Cow::Borrowed(content)
        }
    }
}

/// Sort `seq` under `policy`, returning a new sequence.
///
/// The sort is stable. Descending order reverses the order of the equal-key groups, not the
/// lines inside a group, so ties keep their original relative order in both directions.
/// Terminators stay attached to their lines (see [`LineSequence::replace_lines`]).
pub fn sort_lines(seq: &LineSequence, policy: &SortPolicy) -> LineSequence {
    let comparer = policy.comparer();

    let mut keyed: Vec<(Cow<'_, str>, &Line)> = seq
        .lines()
        .iter()
        .map(|line| (policy.sort_key(&line.content), line))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| comparer.compare(a, b));

    let mut groups: Vec<&[(Cow<'_, str>, &Line)]> = keyed
        .chunk_by(|(a, _), (b, _)| comparer.equals(a, b))
        .collect();
    if !policy.ascending {
        groups.reverse();
    }

    let ordered: Vec<Line> = if policy.eliminate_duplicates {
        groups
            .iter()
            .filter_map(|group| group.first())
            .map(|(_, line)| (*line).clone())
            .collect()
    } else {
        groups
            .iter()
            .flat_map(|group| group.iter())
            .map(|(_, line)| (*line).clone())
            .collect()
    };

    let mut result = seq.clone();
    result.replace_lines(ordered);
    result
}
