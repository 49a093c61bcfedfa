use crate::common::{NonZeroUInt, UInt};
use rand::Rng;

/// Faces of the cursed die; a d6 picks one of them.
pub const CURSED_FACES: [UInt; 6] = [0, 1, 1, 1, 2, 3];

const D6: NonZeroUInt = match NonZeroUInt::new(6) {
    Some(n) => n,
    None => unreachable!(),
};

pub trait Roller {
    /// Returns a value in `1..=sides`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;

    fn roll_cursed(&mut self) -> UInt {
        let face = self.roll(D6) as usize;
        CURSED_FACES[face.saturating_sub(1) % CURSED_FACES.len()]
    }
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
