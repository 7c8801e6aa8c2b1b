use std::collections::HashSet;

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::quiz::catalog::{Catalog, Question, QuestionId};
use crate::store::KeyValueStore;
use crate::store::schema::{PROGRESS_KEY, ProgressData};

/// Which questions are solved and which one is in progress.
///
/// `solved_ids` keeps first-solved order and never holds duplicates.
/// `current_id`, when set, never names a solved question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressState {
    solved_ids: Vec<QuestionId>,
    current_id: Option<QuestionId>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from stored parts, collapsing duplicate ids and
    /// dropping a current id that is already solved.
    pub fn from_parts(solved_ids: Vec<QuestionId>, current_id: Option<QuestionId>) -> Self {
        let mut seen = HashSet::new();
        let solved_ids: Vec<QuestionId> = solved_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let current_id = current_id.filter(|id| !seen.contains(id));
        Self {
            solved_ids,
            current_id,
        }
    }

    pub fn solved_ids(&self) -> &[QuestionId] {
        &self.solved_ids
    }

    pub fn current_id(&self) -> Option<&QuestionId> {
        self.current_id.as_ref()
    }

    pub fn is_solved(&self, id: &QuestionId) -> bool {
        self.solved_ids.contains(id)
    }

    fn insert_solved(&mut self, id: &QuestionId) -> bool {
        if self.is_solved(id) {
            return false;
        }
        self.solved_ids.push(id.clone());
        true
    }
}

/// Catalog questions not yet solved, in catalog order.
pub fn unsolved<'c>(catalog: &'c Catalog, state: &ProgressState) -> Vec<&'c Question> {
    let solved: HashSet<&QuestionId> = state.solved_ids.iter().collect();
    catalog
        .questions()
        .iter()
        .filter(|q| !solved.contains(&q.id))
        .collect()
}

pub fn is_complete(catalog: &Catalog, state: &ProgressState) -> bool {
    unsolved(catalog, state).is_empty()
}

/// Solved questions that still exist in the catalog. Stale ids left over from
/// an older catalog are not counted.
pub fn solved_count(catalog: &Catalog, state: &ProgressState) -> usize {
    catalog.len() - unsolved(catalog, state).len()
}

/// Loads, saves and advances [`ProgressState`] through a [`KeyValueStore`].
pub struct ProgressTracker<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PROGRESS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read stored progress. Missing, unreadable or malformed data yields
    /// the empty state.
    pub fn load(&self) -> ProgressState {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "progress unreadable, starting fresh");
                return ProgressState::default();
            }
        };
        match ProgressData::parse(&raw) {
            Some(data) => {
                let state = ProgressState::from(data);
                debug!(solved = state.solved_ids.len(), current = ?state.current_id, "loaded progress");
                state
            }
            None => {
                warn!(key = %self.key, "stored progress is malformed, starting fresh");
                ProgressState::default()
            }
        }
    }

    pub fn save(&self, state: &ProgressState) -> Result<()> {
        let json = serde_json::to_string(&ProgressData::from(state))?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        info!(key = %self.key, "progress reset");
        Ok(())
    }

    /// Clear stored progress and start `state` over from empty.
    pub fn restart(&self, state: &mut ProgressState) -> Result<()> {
        self.reset()?;
        *state = self.load();
        Ok(())
    }

    /// Next question to present, or `None` once every question is solved.
    ///
    /// An in-progress question is resumed as is. Otherwise an unsolved
    /// question is drawn uniformly from `rng`, recorded as current and
    /// persisted.
    pub fn pick_next<'c, R: Rng>(
        &self,
        catalog: &'c Catalog,
        state: &mut ProgressState,
        rng: &mut R,
    ) -> Option<&'c Question> {
        let pool = unsolved(catalog, state);
        if pool.is_empty() {
            return None;
        }

        if let Some(current) = &state.current_id
            && let Some(q) = pool.iter().find(|q| &q.id == current)
        {
            debug!(id = %q.id, "resuming question");
            return Some(*q);
        }

        let q = pool[rng.gen_range(0..pool.len())];
        state.current_id = Some(q.id.clone());
        self.persist(state);
        debug!(id = %q.id, remaining = pool.len(), "picked question");
        Some(q)
    }

    /// Record `id` as solved and clear the in-progress question.
    pub fn mark_solved(&self, state: &mut ProgressState, id: &QuestionId) {
        if state.insert_solved(id) {
            debug!(%id, solved = state.solved_ids.len(), "marked solved");
        }
        state.current_id = None;
        self.persist(state);
    }

    fn persist(&self, state: &ProgressState) {
        if let Err(e) = self.save(state) {
            warn!(key = %self.key, error = %e, "failed to persist progress");
        }
    }
}
