use super::{error::RollError, roller::Roller, tree::*, Evaluation, RResult};
use crate::common::*;
use crate::config::RollConfig;
use crate::parse::ast::{Modifier, ParsedInput, RollSpec};

pub type DefaultRoller = rand::rngs::ThreadRng;

pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    pub fn with_config(config: &RollConfig, roller: R) -> Self {
        Self::new(config.max_rolls, roller)
    }

    /// Dice drawn since the last evaluation started.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        match self.max_rolls {
            Some(max) if self.rolls > max => Err(RollError::TooManyRolls { max }),
            _ => Ok(()),
        }
    }

    fn roll_spec(&mut self, spec: RollSpec) -> RResult<SpecRoll> {
        self.count_rolls(spec.count as usize)?;
        tracing::trace!(%spec, "rolling");
        let draws = (0..spec.count)
            .map(|_| self.roller.roll(spec.sides))
            .collect();
        Ok(SpecRoll::new(spec, draws))
    }

    fn roll_cursed(&mut self) -> RResult<Trial> {
        self.count_rolls(1)?;
        Ok(CursedDraw::new(self.roller.roll_cursed()).into())
    }

    fn roll_dice(&mut self, specs: &NonEmpty<RollSpec>) -> RResult<Trial> {
        let mut rolled = vec1![self.roll_spec(*specs.first())?];
        for &spec in specs.iter().skip(1) {
            rolled.push(self.roll_spec(spec)?);
        }
        Ok(DiceTrial::new(rolled).into())
    }

    fn play(&mut self, specs: Option<&NonEmpty<RollSpec>>) -> RResult<Trial> {
        match specs {
            Some(specs) => self.roll_dice(specs),
            None => self.roll_cursed(),
        }
    }

    /// Validates `input` and, unless help was asked for, plays its rolls.
    pub fn eval(&mut self, input: &ParsedInput) -> RResult<Evaluation> {
        self.rolls = 0;
        validate(input)?;
        if input.help {
            return Ok(Evaluation::Help);
        }

        // A cursed roll drops any dice expressions.
        let specs = if input.cursed {
            None
        } else {
            NonEmpty::try_from_vec(input.rolls.clone()).ok()
        };
        let adv = AdvType::from_flags(input.advantage, input.disadvantage);

        let mut trials = vec1![self.play(specs.as_ref())?];
        if adv.is_replayed() {
            trials.push(self.play(specs.as_ref())?);
        }

        let outcome = RollOutcome::new(input.title.clone(), adv, trials, input.modifier_value());
        tracing::debug!(
            total = outcome.total(),
            dice = self.rolls,
            cursed = outcome.is_cursed(),
            adv = ?adv,
            "roll evaluated"
        );
        Ok(Evaluation::Rolled(outcome))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Some(RollConfig::DEFAULT_MAX_ROLLS), rand::thread_rng())
    }
}

fn validate(input: &ParsedInput) -> RResult<()> {
    if input.advantage && input.disadvantage {
        return Err(RollError::ConflictingAdvantage);
    }
    if !input.cursed && input.rolls.is_empty() {
        return Err(RollError::MissingRoll);
    }
    if let Some(Modifier::Malformed(token)) = &input.modifier {
        let text = token.get(1..).unwrap_or_default();
        return Err(RollError::InvalidModifier(text.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::classify;
    use crate::roll::roller::StepRoller;

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    fn eval(s: &str) -> RResult<Evaluation> {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        ctx.eval(&classify(s))
    }

    fn outcome(s: &str) -> RollOutcome {
        match eval(s).unwrap() {
            Evaluation::Rolled(outcome) => outcome,
            Evaluation::Help => panic!("expected a roll for {:?}", s),
        }
    }

    fn check(s: &str, expected: Int) {
        assert_eq!(outcome(s).total(), expected, "input {:?}", s);
    }

    fn check_err(s: &str, expected: RollError) {
        assert_eq!(eval(s).unwrap_err(), expected, "input {:?}", s);
    }

    #[test]
    fn test_eval_dice() {
        check("1d20", 10);
        check("2d4", 2 + 3);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("d20 d4", 10 + 3);
    }

    #[test]
    fn test_eval_modifiers() {
        check("1d20 +4", 14);
        check("1d20 -4", 6);
        check("2d4+3", 2 + 3 + 3);
        check("2d4+3 1d6-1 +10", (2 + 3 + 3) + (6 - 1) + 10);
        check("0d6+2", 2);
    }

    #[test]
    fn test_eval_advantage() {
        // 10, then 11
        check("d20 adv", 11);
        check("d20 dis", 10);
        check("d20 advantage +1", 12);
        // first 2d4 = 2 + 3, replay = 4 + 1
        check("2d4 dis", 5);
        check("2d4 adv", 5);
    }

    #[test]
    fn test_eval_replays_every_spec() {
        let outcome = outcome("d20 2d6 adv");
        assert_eq!(outcome.trials.len(), 2);
        // 10 | 5, 6 then 13 | 2, 3
        assert_eq!(outcome.first().total(), 21);
        assert_eq!(outcome.replay().unwrap().total(), 18);
        assert_eq!(outcome.total(), 21);
    }

    #[test]
    fn test_eval_cursed() {
        // d6 face 4 -> 1, then face 5 -> 2
        check("cursed", 1);
        check("cursed adv", 2);
        check("cursed dis", 1);
        check("cursed +10", 11);
    }

    #[test]
    fn test_cursed_drops_dice() {
        let outcome = outcome("cursed 20d20");
        assert!(outcome.is_cursed());
        assert_eq!(outcome.dice(), 1);
    }

    #[test]
    fn test_eval_help() {
        assert_eq!(eval("help d20").unwrap(), Evaluation::Help);
        assert_eq!(eval("man cursed").unwrap(), Evaluation::Help);
    }

    #[test]
    fn test_validation_order() {
        check_err("d20 adv dis", RollError::ConflictingAdvantage);
        check_err("adv dis help", RollError::ConflictingAdvantage);
        check_err("adv dis", RollError::ConflictingAdvantage);
        check_err("adv", RollError::MissingRoll);
        check_err("help", RollError::MissingRoll);
        check_err("+abc", RollError::MissingRoll);
        check_err("d20 +abc", RollError::InvalidModifier("abc".to_owned()));
        check_err("d20 +abc help", RollError::InvalidModifier("abc".to_owned()));
    }

    #[test]
    fn test_err_too_many_rolls() {
        check_err("5000d6", RollError::TooManyRolls { max: 1000 });
        check_err("600d6 adv", RollError::TooManyRolls { max: 1000 });
        assert!(eval("500d6 adv").is_ok());
        assert_eq!(eval("5000d6 help").unwrap(), Evaluation::Help);
    }

    #[test]
    fn test_rolls_reset_between_evals() {
        let mut ctx = RollContext::new_bounded(10, mock_roller());
        for _ in 0..3 {
            assert!(ctx.eval(&classify("8d6")).is_ok());
            assert_eq!(ctx.rolls(), 8);
        }
    }

    #[test]
    fn test_unbounded() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        assert!(ctx.eval(&classify("3000d2")).is_ok());
    }
}
