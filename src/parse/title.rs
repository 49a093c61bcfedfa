//! Scanner for the `for:"<text>"` title clause.
//!
//! The clause is located in the raw input, before whitespace splitting, since
//! the quoted text may itself contain spaces.

use std::borrow::Cow;
use std::ops::Range;

const KEYWORD: &[u8] = b"for";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TitleClause<'a> {
    pub span: Range<usize>,
    pub text: &'a str,
}

/// Finds the first well-formed title clause in `input`.
pub(crate) fn find(input: &str) -> Option<TitleClause<'_>> {
    let bytes = input.as_bytes();
    (0..bytes.len())
        .filter(|&at| {
            bytes
                .get(at..at + KEYWORD.len())
                .map_or(false, |b| b.eq_ignore_ascii_case(KEYWORD))
        })
        .find_map(|at| clause_at(input, at))
}

// `at` points at an ASCII `for`, so both `at` and `at + 3` are char boundaries.
fn clause_at(input: &str, at: usize) -> Option<TitleClause<'_>> {
    let mut pos = at + KEYWORD.len();
    let rest = &input[pos..];
    let word_len = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(rest.len(), |(i, _)| i);
    pos += word_len;

    let rest = input[pos..].strip_prefix(":\"")?;
    pos += 2;
    let close = rest.find(|c: char| c == '"' || c == ':')?;
    if !rest[close..].starts_with('"') {
        return None;
    }
    let text = &rest[..close];
    Some(TitleClause {
        span: at..pos + close + 1,
        text,
    })
}

/// Splits the title clause out of `input`, returning the trimmed title (if
/// non-empty) and the input with the clause replaced by a space.
pub(crate) fn extract(input: &str) -> (Option<String>, Cow<'_, str>) {
    match find(input) {
        Some(clause) => {
            let title = Some(clause.text.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_owned);
            let rest = format!(
                "{} {}",
                &input[..clause.span.start],
                &input[clause.span.end..]
            );
            (title, Cow::Owned(rest))
        }
        None => (None, Cow::Borrowed(input)),
    }
}
