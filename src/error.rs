use thiserror::Error;

/// Caller-facing text for every failed survey operation.
pub const SURVEY_FAILED: &str = "Survey failed";
/// Caller-facing text for a confirmed submission.
pub const SURVEY_COMPLETED: &str = "Survey completed";

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("survey request failed: {0}")]
    Transport(String),
    #[error("survey service answered with status {0}")]
    Status(u16),
    #[error("malformed survey response: {0}")]
    Malformed(String),
    #[error("survey submission not confirmed (status {status})")]
    NotConfirmed { status: u16 },
    #[error("settings store error: {0}")]
    Settings(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("render failed: {0}")]
    Render(String),
}

impl SurveyError {
    /// Detail stays in the logs; callers only ever see the generic text.
    pub fn user_message(&self) -> &'static str {
        SURVEY_FAILED
    }
}

impl From<rusqlite::Error> for SurveyError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Settings(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
