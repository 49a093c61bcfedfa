/// Limits applied to a single roll evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RollConfig {
    /// Most dice drawn per evaluation, replays included. `None` is unbounded.
    pub max_rolls: Option<usize>,
    /// Longest reply, in characters, before the transcript is summarized.
    pub max_len: usize,
}

impl RollConfig {
    pub const DEFAULT_MAX_ROLLS: usize = 1000;
    pub const DEFAULT_MAX_LEN: usize = 2000;

    pub const fn new(max_rolls: Option<usize>, max_len: usize) -> Self {
        Self { max_rolls, max_len }
    }

    pub const fn unbounded() -> Self {
        Self::new(None, Self::DEFAULT_MAX_LEN)
    }

    pub const fn with_max_rolls(mut self, max_rolls: usize) -> Self {
        self.max_rolls = Some(max_rolls);
        self
    }

    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_MAX_ROLLS), Self::DEFAULT_MAX_LEN)
    }
}
