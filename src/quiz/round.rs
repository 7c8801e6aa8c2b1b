use rand::Rng;
use rand::seq::SliceRandom;

use crate::quiz::catalog::Question;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffledChoice {
    pub text: String,
    pub is_correct: bool,
}

/// Result of the first answer given in a round. Numbers are the 1-based
/// positions shown on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub picked: usize,
    pub correct_number: usize,
    pub is_correct: bool,
}

/// One presented question: its display-order choices and whether it has
/// been answered.
pub struct Round<'c> {
    pub question: &'c Question,
    pub choices: Vec<ShuffledChoice>,
    pub outcome: Option<AnswerOutcome>,
}

impl<'c> Round<'c> {
    pub fn new<R: Rng>(question: &'c Question, rng: &mut R) -> Self {
        let mut round = Self::unshuffled(question);
        round.choices.shuffle(rng);
        round
    }

    /// Choices in catalog order.
    pub fn unshuffled(question: &'c Question) -> Self {
        let choices = question
            .choices
            .iter()
            .enumerate()
            .map(|(idx, text)| ShuffledChoice {
                text: text.clone(),
                is_correct: idx + 1 == question.answer,
            })
            .collect();
        Self {
            question,
            choices,
            outcome: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.outcome.is_some()
    }

    /// 1-based display position of the correct choice.
    pub fn correct_number(&self) -> usize {
        self.choices
            .iter()
            .position(|c| c.is_correct)
            .map_or(0, |idx| idx + 1)
    }

    /// Answer with the choice at 0-based display `index`. Only the first
    /// answer counts; afterwards the choices are locked and this returns `None`.
    pub fn answer(&mut self, index: usize) -> Option<AnswerOutcome> {
        if self.is_answered() {
            return None;
        }
        let picked = self.choices.get(index)?;
        let outcome = AnswerOutcome {
            picked: index + 1,
            correct_number: self.correct_number(),
            is_correct: picked.is_correct,
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }
}
