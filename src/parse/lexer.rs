use super::ast::RollSpec;
use crate::common::*;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"([0-9]+)?d[0-9]+([+-][0-9]+)?", |lex| parse_roll(lex.slice()))]
    Roll(RollSpec),

    #[regex(r"[+-][0-9]+", |lex| lex.slice().parse())]
    Modifier(Int),

    #[token("cursed")]
    Cursed,
    #[token("adv")]
    #[token("advantage")]
    Advantage,
    #[token("dis")]
    #[token("disadvantage")]
    Disadvantage,
    #[token("help")]
    #[token("man")]
    Help,

    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Roll(_) => "<roll>",
            Modifier(_) => "<modifier>",
            Cursed => "'cursed'",
            Advantage => "'adv'",
            Disadvantage => "'dis'",
            Help => "'help'",
            Error => "<error>",
        }
    }

    /// Classifies one normalized token. Returns `None` unless a single rule
    /// consumes the whole token.
    pub fn of_token(token: &str) -> Option<Self> {
        let mut lex = lexer(token);
        let kind = lex.next()?;
        if kind == Self::Error || lex.peek().is_some() {
            None
        } else {
            Some(kind)
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Out-of-range counts, sides or modifiers, and zero sides, leave the token unrecognized.
fn parse_roll(s: &str) -> Option<RollSpec> {
    let (count, rest) = s.split_once('d')?;
    let count = if count.is_empty() {
        1
    } else {
        count.parse().ok()?
    };
    let (sides, modifier) = match rest.find(|c: char| c == '+' || c == '-') {
        Some(at) => (&rest[..at], Some(rest[at..].parse::<Int>().ok()?)),
        None => (rest, None),
    };
    let sides: NonZeroUInt = sides.parse().ok()?;
    let spec = RollSpec::new(count, sides);
    Some(match modifier {
        Some(m) => spec.with_modifier(m),
        None => spec,
    })
}
