use crate::avatar::MediaSource;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";
pub const DUPLICATE_EMAIL: &str = "This email already exists";

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    #[error("Student not found: {0}")]
    StudentNotFound(i64),

    #[error("Store is not initialized")]
    NotInitialized,

    #[error("Permission denied: {0}")]
    PermissionDenied(MediaSource),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CampusError {
    /// The message shown to the user when an operation fails.
    ///
    /// Validation, duplicate email and permission failures each get their own
    /// wording. Everything else collapses into one generic message.
    pub fn user_message(&self) -> String {
        match self {
            CampusError::Validation(msg) => msg.clone(),
            CampusError::DuplicateEmail(_) => DUPLICATE_EMAIL.to_string(),
            CampusError::StudentNotFound(_) => "Student not found".to_string(),
            CampusError::PermissionDenied(source) => source.denied_message().to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;
