//! Tokenizer for microvm program text.

/// Split a single line into whitespace-separated tokens.
///
/// Comments start with `#` and extend to end of line. Returns an empty Vec
/// for blank lines and comment-only lines.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split_whitespace().collect()
}
