use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized answer '{value}', expected 'yes' or 'no'")]
pub struct ParseAnswerError {
    pub value: String,
}
