use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    types::{Passage, VocabularyWord},
};

const BUILTIN_LIBRARY: &str = include_str!("../data/library.json");

/// Reading passages and vocabulary available to the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    pub passages: Vec<Passage>,
    pub vocabulary: Vec<VocabularyWord>,
}

impl Library {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LIBRARY)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn passage(&self, id: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_is_consistent() {
        let library = Library::builtin().unwrap();
        assert!(!library.passages.is_empty());
        for passage in &library.passages {
            assert!(!passage.questions.is_empty());
            for question in &passage.questions {
                assert!(
                    question
                        .options
                        .iter()
                        .any(|o| o.id == question.correct_option_id),
                    "{} has no correct option",
                    question.id
                );
            }
        }
        assert!(library.passage("passage-2").is_some());
    }

    #[test]
    fn test_builtin_library_contents() {
        let library = Library::builtin().unwrap();
        let ids: Vec<_> = library.passages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["passage-1", "passage-2", "passage-3"]);
        assert_eq!(library.vocabulary.len(), 36);

        let feelings = library
            .vocabulary
            .iter()
            .filter(|w| w.category == "Feelings")
            .count();
        assert_eq!(feelings, 6);
    }
}
