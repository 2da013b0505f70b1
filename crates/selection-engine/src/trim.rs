//! Per-line whitespace trimming.

use serde::{Deserialize, Serialize};

use crate::line_sequence::LineSequence;

/// Which ends of each line are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimPolicy {
    /// Remove leading whitespace.
    pub trim_start: bool,
    /// Remove trailing whitespace.
    pub trim_end: bool,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            trim_start: true,
            trim_end: true,
        }
    }
}

/// Trim every line of `seq` under `policy`, returning a new sequence.
///
/// Terminators are never touched and no line is removed: a whitespace-only line becomes an
/// empty line. With both flags off the result equals the input.
pub fn trim_lines(seq: &LineSequence, policy: &TrimPolicy) -> LineSequence {
    seq.map_content(|content| {
        let content = if policy.trim_start {
            content.trim_start()
        } else {
            content
        };
        let content = if policy.trim_end {
            content.trim_end()
        } else {
            content
        };
        content.to_string()
    })
}
