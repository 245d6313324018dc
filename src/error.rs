use thiserror::Error;

#[derive(Error, Debug)]
pub enum NrrError {
    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Invalid scenario: {0:?} (expected \"batting\" or \"bowling\")")]
    InvalidScenario(String),

    #[error("Invalid overs value: {0}")]
    InvalidOvers(String),

    #[error("Invalid runs/overs figure: {0:?}")]
    InvalidRunsOvers(String),

    #[error("Duplicate team in points table: {0}")]
    DuplicateTeam(String),

    #[error("Inconsistent record for {name}: {reason}")]
    InconsistentRecord { name: String, reason: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NrrError {
    pub fn team_not_found(name: &str) -> Self {
        NrrError::TeamNotFound {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NrrError>;
