use std::fmt;
use std::num::NonZeroU32;
pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum AdvType {
    #[default]
    None = 0,
    Adv = 1,
    Dis = -1,
}

impl AdvType {
    pub(crate) fn from_flags(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => Self::Adv,
            (false, true) => Self::Dis,
            _ => Self::None,
        }
    }

    pub const fn is_replayed(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Picks the value that counts out of a first roll and its replay.
    pub fn pick(self, first: Int, replay: Int) -> Int {
        match self {
            Self::None => first,
            Self::Adv => first.max(replay),
            Self::Dis => first.min(replay),
        }
    }
}

impl fmt::Display for AdvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "",
            Self::Adv => "Advantage",
            Self::Dis => "Disadvantage",
        };
        f.write_str(s)
    }
}

/// Formats a signed value with an explicit sign, e.g. `+3` or `-1`.
pub(crate) struct Signed(pub Int);

impl fmt::Display for Signed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
