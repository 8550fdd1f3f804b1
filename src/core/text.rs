// src/core/text.rs

//! Indentation helpers for formatted console output.

/// Returns `text` with every line prefixed by `spaces` space characters.
///
/// Lines are split the way [`str::lines`] splits them: a trailing newline
/// does not produce an extra line, and an empty input yields no lines at
/// all, so `indent("", n)` is the empty string. Callers without a specific
/// width in mind should pass [`crate::constants::DEFAULT_INDENT`].
pub fn indent(text: &str, spaces: usize) -> String {
    let prefix = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins `lines` with newlines and indents the result.
///
/// Counterpart of [`indent`] for callers holding a sequence of lines rather
/// than a single string.
pub fn indent_lines<I, S>(lines: I, spaces: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    indent(&joined, spaces)
}

// MARK: --- UNIT TESTS ---
