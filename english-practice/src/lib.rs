pub mod error;
pub mod library;
pub mod quiz;
pub mod types;
pub mod vocabulary;

pub use error::{PracticeError, Result};
pub use library::Library;
pub use quiz::{OptionState, QuizSession, ScoreTier};
pub use types::{Difficulty, Passage, Question, QuizOption, VocabularyWord};
pub use vocabulary::{categories, words_by_category};
