use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CHOICE_COUNT: usize = 4;

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Question ids come from hand-written data and are either numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    /// Any other JSON number: floats, or integers above `i64::MAX`.
    OtherNumber(serde_json::Number),
    Text(String),
}

impl QuestionId {
    fn rank(&self) -> u8 {
        match self {
            QuestionId::Number(_) => 0,
            QuestionId::OtherNumber(_) => 1,
            QuestionId::Text(_) => 2,
        }
    }
}

impl Ord for QuestionId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (QuestionId::Number(a), QuestionId::Number(b)) => a.cmp(b),
            (QuestionId::OtherNumber(a), QuestionId::OtherNumber(b)) => {
                let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                x.total_cmp(&y).then_with(|| a.to_string().cmp(&b.to_string()))
            }
            (QuestionId::Text(a), QuestionId::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for QuestionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::OtherNumber(n) => write!(f, "{n}"),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        QuestionId::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub passage: Option<String>,
    pub choices: Vec<String>,
    /// 1-based index into `choices`.
    pub answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Passage text if present and not blank.
    pub fn passage(&self) -> Option<&str> {
        self.passage
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog is not a JSON array of questions: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no questions")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),

    #[error("question {id} has {count} choices, expected 4")]
    ChoiceCount { id: QuestionId, count: usize },

    #[error("question {id} has answer {answer}, expected 1..=4")]
    AnswerOutOfRange { id: QuestionId, answer: usize },
}

/// The full, fixed, validated question set.
#[derive(Clone, Debug)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_str(text)?;
        Self::new(questions)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Read the catalog at `path`, or the bundled one when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json(&text)
            }
            None => Self::bundled(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

fn validate(questions: &[Question]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(&q.id) {
            return Err(CatalogError::DuplicateId(q.id.clone()));
        }
        if q.choices.len() != CHOICE_COUNT {
            return Err(CatalogError::ChoiceCount {
                id: q.id.clone(),
                count: q.choices.len(),
            });
        }
        if !(1..=CHOICE_COUNT).contains(&q.answer) {
            return Err(CatalogError::AnswerOutOfRange {
                id: q.id.clone(),
                answer: q.answer,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn question(id: i64, answer: usize) -> Question {
        Question {
            id: QuestionId::Number(id),
            question: format!("Question {id}"),
            passage: None,
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer,
            explanation: String::new(),
        }
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_from_json_parses_optional_fields() {
        let json = r#"[
            {"id": 1, "question": "Q", "choices": ["a","b","c","d"], "answer": 2, "explanation": "E"},
            {"id": "x", "question": "Q2", "passage": "P", "choices": ["a","b","c","d"], "answer": 4}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.questions()[0].passage(), None);
        assert_eq!(catalog.questions()[1].passage(), Some("P"));
        assert_eq!(catalog.questions()[1].explanation, "");
        assert!(catalog.get(&QuestionId::from("x")).is_some());
        assert!(catalog.get(&QuestionId::from(2)).is_none());
    }

    #[test]
    fn test_non_integer_ids_are_distinct_and_ordered() {
        let json = r#"[
            {"id": 2.5, "question": "A", "choices": ["a","b","c","d"], "answer": 1},
            {"id": 2, "question": "B", "choices": ["a","b","c","d"], "answer": 1},
            {"id": "x", "question": "C", "choices": ["a","b","c","d"], "answer": 1}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let mut ids: Vec<QuestionId> = catalog.questions().iter().map(|q| q.id.clone()).collect();
        ids.sort();
        assert_eq!(ids[0], QuestionId::Number(2));
        assert_eq!(ids[1].to_string(), "2.5");
        assert_eq!(ids[2], QuestionId::Text("x".into()));
    }

    #[test]
    fn test_blank_passage_is_hidden() {
        let mut q = question(1, 1);
        q.passage = Some("   ".into());
        assert_eq!(q.passage(), None);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_non_array_rejected() {
        assert!(matches!(
            Catalog::from_json(r#"{"questions": []}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![question(1, 1), question(1, 2)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(QuestionId::Number(1))));
    }

    #[test]
    fn test_choice_count_rejected() {
        let mut q = question(5, 1);
        q.choices.pop();
        let err = Catalog::new(vec![q]).unwrap_err();
        assert!(matches!(err, CatalogError::ChoiceCount { count: 3, .. }));
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_answer_out_of_range_rejected() {
        assert!(matches!(
            Catalog::new(vec![question(1, 0)]),
            Err(CatalogError::AnswerOutOfRange { answer: 0, .. })
        ));
        assert!(matches!(
            Catalog::new(vec![question(1, 5)]),
            Err(CatalogError::AnswerOutOfRange { answer: 5, .. })
        ));
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"id": 1, "question": "Q", "choices": ["a","b","c","d"], "answer": 1}]"#,
        )
        .unwrap();
        assert_eq!(Catalog::load(Some(&path)).unwrap().len(), 1);

        let missing = dir.path().join("nope.json");
        let err = Catalog::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
