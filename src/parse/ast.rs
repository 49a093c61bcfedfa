use crate::common::*;
use std::fmt;

/// A single roll expression such as `2d10+3` or `d20`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RollSpec {
    pub count: UInt,
    pub sides: NonZeroUInt,
    pub modifier: Option<Int>,
}

impl RollSpec {
    pub const fn new(count: UInt, sides: NonZeroUInt) -> Self {
        Self {
            count,
            sides,
            modifier: None,
        }
    }

    pub const fn with_modifier(mut self, modifier: Int) -> Self {
        self.modifier = Some(modifier);
        self
    }
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(m) = self.modifier {
            write!(f, "{}", Signed(m))?;
        }
        Ok(())
    }
}

/// A bare modifier token. Tokens that look like a modifier but don't hold an
/// integer are kept so the evaluator can report them.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Modifier {
    Value(Int),
    Malformed(String),
}

/// Everything the classifier found in one roll input.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParsedInput {
    pub cursed: bool,
    pub rolls: Vec<RollSpec>,
    pub advantage: bool,
    pub disadvantage: bool,
    pub modifier: Option<Modifier>,
    pub help: bool,
    pub title: Option<String>,
}

impl ParsedInput {
    pub fn modifier_value(&self) -> Option<Int> {
        match self.modifier {
            Some(Modifier::Value(m)) => Some(m),
            _ => None,
        }
    }
}
