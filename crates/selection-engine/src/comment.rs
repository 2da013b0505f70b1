//! Comment, region and TODO transforms.
//!
//! These work on raw line text only: a line counts as commented when its first
//! non-whitespace characters are the language's line token, and a block counts as commented
//! when its first non-blank line starts with the block start token and its last non-blank line
//! ends with the block end token. Nothing here parses the language.

use std::ops::Range;

use selection_engine_lang::{CommentConfig, RegionConfig};

use crate::line_ending::LineTerminator;
use crate::line_sequence::{Line, LineSequence};

/// Returns `true` if `line` starts with `token` after its indentation.
fn has_line_token(line: &Line, token: &str) -> bool {
    line.content.trim_start().starts_with(token)
}

fn first_and_last_non_blank(seq: &LineSequence) -> Option<(usize, usize)> {
    let lines = seq.lines();
    let first = lines.iter().position(|line| !line.is_blank())?;
    let last = lines.iter().rposition(|line| !line.is_blank())?;
    Some((first, last))
}

/// Where the block tokens sit on the wrapping lines, as byte ranges into the original content.
struct BlockWrap {
    first: usize,
    last: usize,
    start_token: Range<usize>,
    end_token: Range<usize>,
}

/// Locate the block tokens around the non-blank span of `seq`.
///
/// On a single line the two tokens must not share characters, so `"/*/"` is not a comment.
fn block_wrap(seq: &LineSequence, start: &str, end: &str) -> Option<BlockWrap> {
    let (first, last) = first_and_last_non_blank(seq)?;
    let lines = seq.lines();

    let head = &lines[first].content;
    let indent = head.len() - head.trim_start().len();
    if !head[indent..].starts_with(start) {
        return None;
    }

    let tail = &lines[last].content;
    let body_end = tail.trim_end().len();
    if !tail[..body_end].ends_with(end) {
        return None;
    }

    let start_token = indent..indent + start.len();
    let end_token = body_end - end.len()..body_end;
    if first == last && end_token.start < start_token.end {
        return None;
    }
    Some(BlockWrap {
        first,
        last,
        start_token,
        end_token,
    })
}

/// Returns `true` if at least one line of `seq` is already commented under `config`.
pub fn contains_commented_line(seq: &LineSequence, config: &CommentConfig) -> bool {
    if let Some(token) = config.line_token()
        && seq.lines().iter().any(|line| has_line_token(line, token))
    {
        return true;
    }
    config
        .block_tokens()
        .is_some_and(|(start, end)| block_wrap(seq, start, end).is_some())
}

/// Comment every non-blank line of `seq`.
///
/// With a line token, `"<token> "` is inserted at the smallest indentation shared by the
/// non-blank lines, so the tokens line up. Block-only languages wrap the non-blank span in
/// `"<start> "` / `" <end>"`. Blank lines are left alone.
pub fn comment_lines(seq: &LineSequence, config: &CommentConfig) -> LineSequence {
    if let Some(token) = config.line_token() {
        let column = seq
            .lines()
            .iter()
            .filter(|line| !line.is_blank())
            .map(|line| line.indentation().chars().count())
            .min()
            .unwrap_or(0);

        return seq.map_content(|content| {
            if content.trim().is_empty() {
                return content.to_string();
            }
            let split = content
                .char_indices()
                .nth(column)
                .map(|(byte, _)| byte)
                .unwrap_or(content.len());
            format!("{}{} {}", &content[..split], token, &content[split..])
        });
    }

    let Some((start, end)) = config.block_tokens() else {
        return seq.clone();
    };
    let Some((first, last)) = first_and_last_non_blank(seq) else {
        return seq.clone();
    };

    let mut lines = seq.lines().to_vec();
    let head = &mut lines[first].content;
    let indent = head.len() - head.trim_start().len();
    head.insert_str(indent, &format!("{start} "));
    let tail = &mut lines[last].content;
    let body_end = tail.trim_end().len();
    tail.insert_str(body_end, &format!(" {end}"));
    LineSequence::from_lines(lines)
}

fn strip_line_token(content: &str, token: &str) -> String {
    let trimmed = content.trim_start();
    let indent = &content[..content.len() - trimmed.len()];
    match trimmed.strip_prefix(token) {
        Some(rest) => {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            format!("{indent}{rest}")
        }
        None => content.to_string(),
    }
}

/// Remove one level of commenting from `seq`.
///
/// Every line starting with the line token loses the token and one following space; other
/// lines are unchanged. If no line carries the line token and the block is wrapped in block
/// tokens, the wrapping pair is removed instead.
pub fn uncomment_lines(seq: &LineSequence, config: &CommentConfig) -> LineSequence {
    if let Some(token) = config.line_token()
        && seq.lines().iter().any(|line| has_line_token(line, token))
    {
        return seq.map_content(|content| strip_line_token(content, token));
    }

    let Some(wrap) = config
        .block_tokens()
        .and_then(|(start, end)| block_wrap(seq, start, end))
    else {
        return seq.clone();
    };

    let mut lines = seq.lines().to_vec();
    if wrap.first == wrap.last {
        let content = &lines[wrap.first].content;
        let mut body = wrap.start_token.end..wrap.end_token.start;
        if content[body.clone()].starts_with(' ') {
            body.start += 1;
        }
        if content[body.clone()].ends_with(' ') {
            body.end -= 1;
        }
        let stripped = format!(
            "{}{}{}",
            &content[..wrap.start_token.start],
            &content[body],
            &content[wrap.end_token.end..]
        );
        lines[wrap.first].content = stripped;
    } else {
        let head = &lines[wrap.first].content;
        let mut after = wrap.start_token.end;
        if head[after..].starts_with(' ') {
            after += 1;
        }
        let stripped_head = format!("{}{}", &head[..wrap.start_token.start], &head[after..]);
        lines[wrap.first].content = stripped_head;

        let tail = &lines[wrap.last].content;
        let mut cut = wrap.end_token.start;
        if tail[..cut].ends_with(' ') {
            cut -= 1;
        }
        let stripped_tail = format!("{}{}", &tail[..cut], &tail[wrap.end_token.end..]);
        lines[wrap.last].content = stripped_tail;
    }

    LineSequence::from_lines(lines)
}

/// Wrap `seq` in a named region.
///
/// The markers take the indentation of the first non-blank line and the block's dominant
/// terminator. The end marker is terminated only if the selection was.
pub fn add_region(seq: &LineSequence, config: &RegionConfig, name: &str) -> LineSequence {
    let indent = seq
        .lines()
        .iter()
        .find(|line| !line.is_blank())
        .map(|line| line.indentation().to_string())
        .unwrap_or_default();
    let terminator = seq.dominant_terminator();
    let start_marker = if name.is_empty() {
        format!("{indent}{}", config.start)
    } else {
        format!("{indent}{} {name}", config.start)
    };

    let mut lines = Vec::with_capacity(seq.len() + 2);
    lines.push(Line::new(start_marker, terminator));
    lines.extend(seq.lines().iter().cloned());

    let end_terminator = match lines.last_mut() {
        Some(last) if last.terminator.is_none() => {
            last.terminator = terminator;
            LineTerminator::None
        }
        Some(last) => last.terminator,
        None => LineTerminator::None,
    };
    // An empty selection leaves only the start marker, which must keep its terminator.
    let end_terminator = if seq.is_empty() {
        LineTerminator::None
    } else {
        end_terminator
    };
    lines.push(Line::new(format!("{indent}{}", config.end), end_terminator));

    LineSequence::from_lines(lines)
}

/// Build a TODO comment for `selection`.
///
/// A single line (or empty) selection becomes `"<token> TODO: <text>"`. A multi-line selection
/// keeps its lines and gets a TODO comment line inserted above, indented like its first line.
/// `author`, when set, renders as `"TODO (author): "`.
pub fn todo_comment(
    seq: &LineSequence,
    config: &CommentConfig,
    author: Option<&str>,
) -> LineSequence {
    let label = match author.filter(|a| !a.trim().is_empty()) {
        Some(author) => format!("TODO ({}):", author.trim()),
        None => "TODO:".to_string(),
    };
    let wrap = |body: &str| -> Option<String> {
        let body = body.trim();
        let text = if body.is_empty() {
            format!("{label} ")
        } else {
            format!("{label} {body}")
        };
        if let Some(token) = config.line_token() {
            Some(format!("{token} {text}"))
        } else {
            config
                .block_tokens()
                .map(|(start, end)| format!("{start} {} {end}", text.trim_end()))
        }
    };

    if seq.len() <= 1 {
        let line = seq.lines().first().cloned().unwrap_or_default();
        let indent = line.indentation().to_string();
        let Some(comment) = wrap(&line.content) else {
            return seq.clone();
        };
        return LineSequence::from_lines(vec![Line::new(
            format!("{indent}{comment}"),
            line.terminator,
        )]);
    }

    let indent = seq
        .lines()
        .iter()
        .find(|line| !line.is_blank())
        .map(|line| line.indentation().to_string())
        .unwrap_or_default();
    let Some(comment) = wrap("") else {
        return seq.clone();
    };
    let mut lines = Vec::with_capacity(seq.len() + 1);
    lines.push(Line::new(format!("{indent}{comment}"), seq.dominant_terminator()));
    lines.extend(seq.lines().iter().cloned());
    LineSequence::from_lines(lines)
}
