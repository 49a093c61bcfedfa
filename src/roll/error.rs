use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("Input Error: Can't have both 'adv' and 'dis'")]
    ConflictingAdvantage,
    #[error("Input Error: Couldn't find a roll. Include `cursed` or `#d#`.")]
    MissingRoll,
    #[error("Input Error: Expected modifier to be a number. Got '{0}'.")]
    InvalidModifier(String),
    #[error("Input Error: Too many dice; at most {max} can be rolled at once.")]
    TooManyRolls { max: usize },
}
