use thiserror::Error;

#[derive(Debug, Error)]
pub enum TandemError {
    #[error("not initialized: run 'tandem init'")]
    NotInitialized,

    #[error("already initialized: store exists at {0}")]
    AlreadyInitialized(String),

    #[error("partner not found: {0}")]
    PartnerNotFound(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("score out of range: {0} (must be 0-10)")]
    ScoreOutOfRange(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TandemError>;
