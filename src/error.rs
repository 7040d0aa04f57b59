use thiserror::Error;

#[derive(Debug, Error)]
pub enum SantaError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Invalid phone number: {value}")]
    InvalidPhone { value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Participant {participant_id} is not a member of group {group_id}")]
    NotAMember {
        participant_id: String,
        group_id: String,
    },

    #[error("At least {required} participants are needed for the draw (have {actual})")]
    InsufficientParticipants { required: usize, actual: usize },

    #[error("The draw could not be completed after {attempts} attempts, try again")]
    DrawFailed { attempts: usize },

    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("The draw has already been performed; the roster can no longer change")]
    RosterLocked,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

pub type SantaResult<T> = Result<T, SantaError>;
