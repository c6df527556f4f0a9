use thiserror::Error;

#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("question already answered")]
    AlreadyAnswered,

    #[error("answer the current question first")]
    NotAnswered,

    #[error("quiz is finished")]
    Finished,

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("passage has no questions: {0}")]
    EmptyPassage(String),

    #[error("invalid library data: {0}")]
    Library(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PracticeError>;
