use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error when a request could not reach the backend
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Error when no profile row matches the requested user id
    #[error("profile not found for user '{0}'")]
    ProfileNotFound(String),
    /// Error reported by the profile store. Displays only the store's message.
    #[error("{message}")]
    Store {
        /// HTTP status returned by the store
        status: u16,
        /// Human readable message from the store
        message: String,
    },
    /// Error reported by the authentication service
    #[error("auth error: {0}")]
    Auth(String),
    /// Error in configuration values
    #[error("config error: {0}")]
    Config(String),
    /// Error when an action needs a signed in user and there is none
    #[error("no active session")]
    MissingSession,
}
