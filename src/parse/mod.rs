pub mod ast;
mod lexer;
mod title;

use ast::{Modifier, ParsedInput};
use lexer::TokenKind;

/// Classifies a raw roll input.
///
/// The title clause is pulled out of the raw string first; the rest is split
/// on whitespace and each lower-cased token is matched on its own. Tokens that
/// match nothing are ignored.
///
/// # Examples
/// ```
/// # use rollbot::parse::{classify, ast::Modifier};
/// let parsed = classify("2d10 adv +4");
/// assert_eq!(parsed.rolls.len(), 1);
/// assert!(parsed.advantage);
/// assert_eq!(parsed.modifier, Some(Modifier::Value(4)));
/// ```
pub fn classify(input: &str) -> ParsedInput {
    let (title, rest) = title::extract(input);
    let mut parsed = ParsedInput {
        title,
        ..ParsedInput::default()
    };

    for token in rest.split_whitespace() {
        let token = token.trim().to_lowercase();
        let kind = TokenKind::of_token(&token);
        if let Some(kind) = &kind {
            tracing::trace!(%token, %kind, "classified token");
        }
        match kind {
            Some(TokenKind::Roll(spec)) => parsed.rolls.push(spec),
            Some(TokenKind::Modifier(m)) => {
                parsed.modifier.get_or_insert(Modifier::Value(m));
            }
            Some(TokenKind::Cursed) => parsed.cursed = true,
            Some(TokenKind::Advantage) => parsed.advantage = true,
            Some(TokenKind::Disadvantage) => parsed.disadvantage = true,
            Some(TokenKind::Help) => parsed.help = true,
            Some(TokenKind::Error) | None => {
                if looks_like_modifier(&token) {
                    parsed
                        .modifier
                        .get_or_insert_with(|| Modifier::Malformed(token.clone()));
                } else {
                    tracing::trace!(%token, "ignoring unrecognized token");
                }
            }
        }
    }

    tracing::debug!(?parsed, "classified roll input");
    parsed
}

/// Classifies an input that was already split into tokens.
pub fn classify_tokens<I>(tokens: I) -> ParsedInput
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let joined = tokens
        .into_iter()
        .map(|t| t.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ");
    classify(&joined)
}

fn looks_like_modifier(token: &str) -> bool {
    token.len() > 1 && token.starts_with(|c: char| c == '+' || c == '-')
}
