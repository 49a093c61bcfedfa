use crate::common::*;
use crate::parse::ast::RollSpec;

#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn total(&self) -> Int;

    /// Number of dice drawn.
    fn dice(&self) -> usize;
}

/// The result of one draw from the cursed die.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CursedDraw {
    pub value: UInt,
}

impl CursedDraw {
    pub fn new(value: UInt) -> Self {
        Self { value }
    }
}

impl Eval for CursedDraw {
    fn total(&self) -> Int {
        Int::from(self.value)
    }

    fn dice(&self) -> usize {
        1
    }
}

/// Every draw made for one roll expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpecRoll {
    pub spec: RollSpec,
    pub draws: Vec<UInt>,
}

impl SpecRoll {
    pub fn new(spec: RollSpec, draws: Vec<UInt>) -> Self {
        Self { spec, draws }
    }

    /// Sum of the draws, before the inline modifier.
    pub fn sum(&self) -> Int {
        self.draws
            .iter()
            .fold(0, |acc: Int, &x| acc.saturating_add(Int::from(x)))
    }
}

impl Eval for SpecRoll {
    fn total(&self) -> Int {
        self.sum().saturating_add(self.spec.modifier.unwrap_or(0))
    }

    fn dice(&self) -> usize {
        self.draws.len()
    }
}

/// One pass over all roll expressions of an input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceTrial {
    pub specs: NonEmpty<SpecRoll>,
}

impl DiceTrial {
    pub fn new(specs: NonEmpty<SpecRoll>) -> Self {
        Self { specs }
    }
}

impl Eval for DiceTrial {
    fn total(&self) -> Int {
        self.specs
            .iter()
            .fold(0, |acc: Int, s| acc.saturating_add(s.total()))
    }

    fn dice(&self) -> usize {
        self.specs.iter().map(Eval::dice).sum()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval)]
pub enum Trial {
    Cursed(CursedDraw),
    Dice(DiceTrial),
}

/// A finished roll: the first trial, its replay under advantage or
/// disadvantage, and the bare modifier.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RollOutcome {
    pub title: Option<String>,
    pub adv: AdvType,
    pub trials: NonEmpty<Trial>,
    pub modifier: Option<Int>,
}

impl RollOutcome {
    pub(crate) fn new(
        title: Option<String>,
        adv: AdvType,
        trials: NonEmpty<Trial>,
        modifier: Option<Int>,
    ) -> Self {
        Self {
            title,
            adv,
            trials,
            modifier,
        }
    }

    pub fn first(&self) -> &Trial {
        self.trials.first()
    }

    pub fn replay(&self) -> Option<&Trial> {
        self.trials.get(1)
    }

    pub fn is_cursed(&self) -> bool {
        matches!(self.first(), Trial::Cursed(_))
    }

    /// The trial value after advantage or disadvantage, without the modifier.
    pub fn roll_total(&self) -> Int {
        let first = self.first().total();
        match self.replay() {
            Some(replay) => self.adv.pick(first, replay.total()),
            None => first,
        }
    }

    pub fn total(&self) -> Int {
        self.roll_total()
            .saturating_add(self.modifier.unwrap_or(0))
    }

    pub fn dice(&self) -> usize {
        self.trials.iter().map(Eval::dice).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_roll(count: UInt, sides: UInt, modifier: Option<Int>, draws: Vec<UInt>) -> SpecRoll {
        let mut spec = RollSpec::new(count, NonZeroUInt::new(sides).unwrap());
        spec.modifier = modifier;
        SpecRoll::new(spec, draws)
    }

    fn dice_trial(specs: Vec<SpecRoll>) -> Trial {
        DiceTrial::new(NonEmpty::try_from_vec(specs).unwrap()).into()
    }

    #[test]
    fn test_spec_roll_total() {
        let roll = spec_roll(3, 6, Some(-2), vec![4, 5, 6]);
        assert_eq!(roll.sum(), 15);
        assert_eq!(roll.total(), 13);
        assert_eq!(roll.dice(), 3);
    }

    #[test]
    fn test_dice_trial_total() {
        let trial = dice_trial(vec![
            spec_roll(2, 10, None, vec![3, 9]),
            spec_roll(1, 4, Some(1), vec![2]),
        ]);
        assert_eq!(trial.total(), 15);
        assert_eq!(trial.dice(), 3);
    }

    #[test]
    fn test_outcome_advantage() {
        let low = dice_trial(vec![spec_roll(1, 20, None, vec![4])]);
        let high = dice_trial(vec![spec_roll(1, 20, None, vec![17])]);

        let adv = RollOutcome::new(None, AdvType::Adv, vec1![low.clone(), high.clone()], Some(2));
        assert_eq!(adv.roll_total(), 17);
        assert_eq!(adv.total(), 19);

        let dis = RollOutcome::new(None, AdvType::Dis, vec1![low.clone(), high], None);
        assert_eq!(dis.total(), 4);
        assert_eq!(dis.dice(), 2);

        let single = RollOutcome::new(None, AdvType::None, vec1![low], Some(-5));
        assert_eq!(single.total(), -1);
    }

    #[test]
    fn test_cursed_outcome() {
        let outcome = RollOutcome::new(
            None,
            AdvType::Dis,
            vec1![CursedDraw::new(3).into(), CursedDraw::new(0).into()],
            None,
        );
        assert!(outcome.is_cursed());
        assert_eq!(outcome.total(), 0);
    }
}
