//! Reading-comprehension quiz over one passage.

use tracing::debug;

use crate::{
    error::{PracticeError, Result},
    types::{Passage, Question},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Perfect,
    Great,
    Good,
    KeepTrying,
}

impl ScoreTier {
    pub fn from_percentage(pct: u32) -> Self {
        match pct {
            100.. => ScoreTier::Perfect,
            75..=99 => ScoreTier::Great,
            50..=74 => ScoreTier::Good,
            _ => ScoreTier::KeepTrying,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScoreTier::Perfect => "Perfect Score!",
            ScoreTier::Great => "Great Job!",
            ScoreTier::Good => "Good Effort!",
            ScoreTier::KeepTrying => "Keep Trying!",
        }
    }
}

/// How an option should be shown once the current question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Correct,
    Wrong,
    Dimmed,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    passage: Passage,
    current: usize,
    selected: Option<String>,
    answered: u32,
    correct: u32,
    done: bool,
}

impl QuizSession {
    pub fn start(passage: Passage) -> Result<Self> {
        if passage.questions.is_empty() {
            return Err(PracticeError::EmptyPassage(passage.id));
        }
        Ok(Self {
            passage,
            current: 0,
            selected: None,
            answered: 0,
            correct: 0,
            done: false,
        })
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.passage.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.done {
            None
        } else {
            self.passage.questions.get(self.current)
        }
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Records the answer to the current question. Returns whether it was correct.
    pub fn answer(&mut self, option_id: &str) -> Result<bool> {
        let question = self.current_question().ok_or(PracticeError::Finished)?;
        if self.selected.is_some() {
            return Err(PracticeError::AlreadyAnswered);
        }
        if !question.options.iter().any(|o| o.id == option_id) {
            return Err(PracticeError::UnknownOption(option_id.to_string()));
        }

        let is_correct = question.correct_option_id == option_id;
        self.selected = Some(option_id.to_string());
        self.answered += 1;
        if is_correct {
            self.correct += 1;
        }
        Ok(is_correct)
    }

    pub fn option_state(&self, option_id: &str) -> OptionState {
        let (Some(question), Some(selected)) = (self.current_question(), &self.selected) else {
            return OptionState::Open;
        };
        if option_id == question.correct_option_id {
            OptionState::Correct
        } else if option_id == selected {
            OptionState::Wrong
        } else {
            OptionState::Dimmed
        }
    }

    /// Moves to the next question, or finishes after the last one.
    pub fn next(&mut self) -> Result<()> {
        if self.done {
            return Err(PracticeError::Finished);
        }
        if self.selected.is_none() {
            return Err(PracticeError::NotAnswered);
        }

        self.selected = None;
        if self.current + 1 < self.passage.questions.len() {
            self.current += 1;
        } else {
            self.done = true;
            debug!(
                passage = %self.passage.id,
                correct = self.correct,
                total = self.total_questions(),
                "Quiz finished"
            );
        }
        Ok(())
    }

    /// Starts the same passage again from the first question.
    pub fn retry(&mut self) {
        self.current = 0;
        self.selected = None;
        self.answered = 0;
        self.correct = 0;
        self.done = false;
    }

    /// Rounded share of correct answers over all questions in the passage.
    pub fn percentage(&self) -> u32 {
        let total = self.total_questions() as f64;
        ((self.correct as f64 / total) * 100.0).round() as u32
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percentage(self.percentage())
    }
}
