use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::quiz::catalog::{CHOICE_COUNT, Catalog, Question};
use crate::quiz::progress::{self, ProgressState, ProgressTracker};
use crate::quiz::round::{AnswerOutcome, Round};
use crate::store::KeyValueStore;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Quiz,
    Complete,
}

pub struct App<'c, S> {
    pub screen: AppScreen,
    pub catalog: &'c Catalog,
    pub tracker: ProgressTracker<S>,
    pub state: ProgressState,
    pub round: Option<Round<'c>>,
    /// `Q{n}` label of the current round, fixed when the round starts.
    pub question_number: usize,
    pub selected: usize,
    pub confirm_reset: bool,
    pub shuffle_choices: bool,
    pub theme: &'static Theme,
    pub should_quit: bool,
    rng: SmallRng,
}

impl<'c, S: KeyValueStore> App<'c, S> {
    pub fn new(
        catalog: &'c Catalog,
        tracker: ProgressTracker<S>,
        theme: &'static Theme,
        shuffle_choices: bool,
        rng: SmallRng,
    ) -> Self {
        let state = tracker.load();
        info!(
            solved = progress::solved_count(catalog, &state),
            total = catalog.len(),
            "starting quiz"
        );

        let mut app = Self {
            screen: AppScreen::Quiz,
            catalog,
            tracker,
            state,
            round: None,
            question_number: 0,
            selected: 0,
            confirm_reset: false,
            shuffle_choices,
            theme,
            should_quit: false,
            rng,
        };
        app.next_question();
        app
    }

    pub fn solved_count(&self) -> usize {
        progress::solved_count(self.catalog, &self.state)
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    pub fn current_question(&self) -> Option<&'c Question> {
        self.round.as_ref().map(|r| r.question)
    }

    pub fn is_answered(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.is_answered())
    }

    /// Present the next question, or switch to the completion screen.
    pub fn next_question(&mut self) {
        match self
            .tracker
            .pick_next(self.catalog, &mut self.state, &mut self.rng)
        {
            Some(question) => {
                self.question_number = self.solved_count() + 1;
                self.round = Some(if self.shuffle_choices {
                    Round::new(question, &mut self.rng)
                } else {
                    Round::unshuffled(question)
                });
                self.selected = 0;
                self.screen = AppScreen::Quiz;
            }
            None => {
                info!(total = self.total(), "all questions solved");
                self.round = None;
                self.screen = AppScreen::Complete;
            }
        }
    }

    /// Answer with the choice at 0-based display `index`. Any answer, right
    /// or wrong, solves the question.
    pub fn answer(&mut self, index: usize) -> Option<AnswerOutcome> {
        let round = self.round.as_mut()?;
        let outcome = round.answer(index)?;
        let question = round.question;
        let id = &question.id;
        info!(%id, correct = outcome.is_correct, "answered");
        self.tracker.mark_solved(&mut self.state, id);
        Some(outcome)
    }

    pub fn answer_selected(&mut self) -> Option<AnswerOutcome> {
        self.answer(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.is_answered() {
            self.selected = (self.selected + 1) % CHOICE_COUNT;
        }
    }

    pub fn select_prev(&mut self) {
        if !self.is_answered() {
            self.selected = (self.selected + CHOICE_COUNT - 1) % CHOICE_COUNT;
        }
    }

    /// Move on once the current round has been answered.
    pub fn advance(&mut self) {
        if self.is_answered() {
            self.next_question();
        }
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    pub fn confirm_reset(&mut self) {
        self.confirm_reset = false;
        self.restart();
    }

    /// Wipe progress and draw a fresh question.
    pub fn restart(&mut self) {
        if let Err(e) = self.tracker.restart(&mut self.state) {
            warn!(error = %e, "failed to clear stored progress");
            self.state = ProgressState::default();
        }
        self.next_question();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::catalog::QuestionId;
    use crate::store::memory::MemoryStore;
    use rand::SeedableRng;

    fn test_theme() -> &'static Theme {
        Box::leak(Box::new(Theme::default()))
    }

    fn catalog() -> Catalog {
        let json = r#"[
            {"id": 1, "question": "One?", "choices": ["a","b","c","d"], "answer": 1, "explanation": "e1"},
            {"id": 2, "question": "Two?", "choices": ["a","b","c","d"], "answer": 2, "explanation": "e2"},
            {"id": 3, "question": "Three?", "choices": ["a","b","c","d"], "answer": 3, "explanation": "e3"}
        ]"#;
        Catalog::from_json(json).unwrap()
    }

    fn make_app<'c>(catalog: &'c Catalog, store: &'c MemoryStore, seed: u64) -> App<'c, &'c MemoryStore> {
        App::new(
            catalog,
            ProgressTracker::new(store),
            test_theme(),
            true,
            SmallRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_starts_on_a_question() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let app = make_app(&catalog, &store, 1);
        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.question_number, 1);
        assert!(app.current_question().is_some());
        assert!(!app.is_answered());
    }

    #[test]
    fn test_resume_across_restarts() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let first = make_app(&catalog, &store, 1).current_question().unwrap().id.clone();
        for seed in 2..10 {
            let app = make_app(&catalog, &store, seed);
            assert_eq!(app.current_question().unwrap().id, first);
        }
    }

    #[test]
    fn test_advance_requires_answer() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = make_app(&catalog, &store, 5);
        let before = app.current_question().unwrap().id.clone();
        app.advance();
        assert_eq!(app.current_question().unwrap().id, before);
        assert_eq!(app.solved_count(), 0);
    }

    #[test]
    fn test_answer_marks_solved_and_locks() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = make_app(&catalog, &store, 5);
        let id = app.current_question().unwrap().id.clone();

        let outcome = app.answer(2).unwrap();
        assert_eq!(outcome.picked, 3);
        assert!(app.state.is_solved(&id));
        assert_eq!(app.state.current_id(), None);
        assert!(app.answer(0).is_none());
        assert_eq!(app.solved_count(), 1);

        // Reloaded progress agrees
        assert_eq!(ProgressTracker::new(&store).load(), app.state);
    }

    #[test]
    fn test_selection_wraps_and_freezes_after_answer() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = make_app(&catalog, &store, 5);
        app.select_prev();
        assert_eq!(app.selected, 3);
        app.select_next();
        assert_eq!(app.selected, 0);

        app.answer_selected();
        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_full_run_reaches_completion_then_restart() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = make_app(&catalog, &store, 9);

        let mut seen = Vec::new();
        for n in 1..=3 {
            assert_eq!(app.screen, AppScreen::Quiz);
            assert_eq!(app.question_number, n);
            seen.push(app.current_question().unwrap().id.clone());
            app.answer(0);
            app.advance();
        }
        seen.sort();
        assert_eq!(
            seen,
            vec![QuestionId::Number(1), QuestionId::Number(2), QuestionId::Number(3)]
        );
        assert_eq!(app.screen, AppScreen::Complete);
        assert!(app.current_question().is_none());

        // Completion survives a reload
        let reopened = make_app(&catalog, &store, 10);
        assert_eq!(reopened.screen, AppScreen::Complete);

        app.restart();
        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.solved_count(), 0);
        assert_eq!(app.question_number, 1);
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = make_app(&catalog, &store, 3);
        app.answer(0);
        app.advance();

        app.request_reset();
        assert!(app.confirm_reset);
        app.cancel_reset();
        assert!(!app.confirm_reset);
        assert_eq!(app.solved_count(), 1);

        app.request_reset();
        app.confirm_reset();
        assert!(!app.confirm_reset);
        assert_eq!(app.solved_count(), 0);
        assert!(app.current_question().is_some());
    }

    #[test]
    fn test_unshuffled_keeps_catalog_order() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let mut app = App::new(
            &catalog,
            ProgressTracker::new(&store),
            test_theme(),
            false,
            SmallRng::seed_from_u64(4),
        );
        let q = app.current_question().unwrap();
        let correct = app.round.as_ref().unwrap().correct_number();
        assert_eq!(correct, q.answer);
        assert!(app.answer(correct - 1).unwrap().is_correct);
    }
}
