use super::tree::{CursedDraw, DiceTrial, Eval, RollOutcome, SpecRoll, Trial};
use crate::common::*;
use std::fmt;

pub trait Stringify {
    fn mark<T: fmt::Display>(&self, value: T) -> String {
        value.to_string()
    }

    fn str_draw(&mut self, value: UInt, _sides: NonZeroUInt) -> String {
        self.mark(value)
    }

    fn str_outcome(&mut self, outcome: &RollOutcome) -> String {
        let mut lines = self.str_trial(outcome.first(), false);
        if let Some(replay) = outcome.replay() {
            lines.extend(self.str_trial(replay, true));
            lines.push(format!("{}: {}", outcome.adv, self.mark(outcome.roll_total())));
        }
        lines.push(self.str_total(outcome));
        lines.join("\n")
    }

    fn str_trial(&mut self, trial: &Trial, replay: bool) -> Vec<String> {
        match trial {
            Trial::Cursed(draw) => vec![self.str_cursed(draw, replay)],
            Trial::Dice(dice) => {
                let mut lines = Vec::new();
                if replay && dice.dice() > 0 {
                    lines.push("Rolling again...".to_owned());
                }
                lines.extend(self.str_dice(dice));
                lines
            }
        }
    }

    fn str_cursed(&mut self, draw: &CursedDraw, replay: bool) -> String {
        let which = if replay { "another" } else { "a" };
        format!("Rolling {} CURSED d6... {}!", which, self.mark(draw.value))
    }

    fn str_dice(&mut self, dice: &DiceTrial) -> Vec<String> {
        let mut lines: Vec<String> = dice
            .specs
            .iter()
            .flat_map(|roll| self.str_spec(roll))
            .collect();
        if dice.specs.len() > 1 {
            lines.push(format!("All together that's {}!", self.mark(dice.total())));
        }
        lines
    }

    fn str_spec(&mut self, roll: &SpecRoll) -> Vec<String> {
        let sides = roll.spec.sides;
        let die = self.mark(format_args!("d{}", sides));
        let mut lines: Vec<String> = roll
            .draws
            .iter()
            .map(|&x| format!("Rolling a {}... {}!", die, self.str_draw(x, sides)))
            .collect();
        if roll.spec.count > 1 {
            lines.push(format!("That's {}!", self.mark(roll.sum())));
        }
        if let Some(m) = roll.spec.modifier {
            lines.push(format!(
                "With {} that's {}!",
                self.mark(Signed(m)),
                self.mark(roll.total())
            ));
        }
        lines
    }

    fn str_total(&mut self, outcome: &RollOutcome) -> String {
        let label = if outcome.modifier.is_some() {
            "With modifier"
        } else {
            "Total"
        };
        format!("{}: {}", label, self.mark(outcome.total()))
    }

    /// One line standing in for a transcript that is too long to show.
    fn str_summary(&mut self, outcome: &RollOutcome) -> String {
        let adv = match outcome.adv {
            AdvType::Adv => "with advantage ",
            AdvType::Dis => "with disadvantage ",
            AdvType::None => "",
        };
        let modifier = if outcome.modifier.is_some() {
            "with modifier "
        } else {
            ""
        };
        format!(
            "There's too much text to fit into one message, but {}the total {}is {}",
            adv,
            modifier,
            self.mark(outcome.total())
        )
    }
}

/// Renders `outcome`, falling back to a summary when the transcript is longer
/// than `max_len` characters.
pub fn render<S: Stringify>(stringifier: &mut S, outcome: &RollOutcome, max_len: usize) -> String {
    let text = stringifier.str_outcome(outcome);
    let len = text.chars().count();
    if len > max_len {
        tracing::debug!(len, max_len, "transcript too long, summarizing");
        stringifier.str_summary(outcome)
    } else {
        text
    }
}

#[derive(Default, Debug)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Wraps values in code spans and bolds natural ones and maximums.
#[derive(Default, Debug)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn mark<T: fmt::Display>(&self, value: T) -> String {
        format!("`{}`", value)
    }

    fn str_draw(&mut self, value: UInt, sides: NonZeroUInt) -> String {
        let inside = self.mark(value);
        if value == 1 || value == sides.get() {
            format!("**{}**", inside)
        } else {
            inside
        }
    }
}
