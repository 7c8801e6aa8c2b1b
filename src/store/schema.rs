use serde::{Deserialize, Serialize};

use crate::quiz::catalog::QuestionId;
use crate::quiz::progress::ProgressState;

/// Fixed storage key for the progress record.
pub const PROGRESS_KEY: &str = "quiz_progress_v1";

/// On-disk shape of [`ProgressState`]: `{"solvedIds": [...], "currentId": id|null}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub solved_ids: Vec<QuestionId>,
    #[serde(default)]
    pub current_id: Option<QuestionId>,
}

impl ProgressData {
    /// Parse a stored record. Anything that is not an object carrying a
    /// `solvedIds` array of ids is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl From<&ProgressState> for ProgressData {
    fn from(state: &ProgressState) -> Self {
        Self {
            solved_ids: state.solved_ids().to_vec(),
            current_id: state.current_id().cloned(),
        }
    }
}

impl From<ProgressData> for ProgressState {
    fn from(data: ProgressData) -> Self {
        ProgressState::from_parts(data.solved_ids, data.current_id)
    }
}
