use thiserror::Error;

/// Input rejected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{file} is not {expected} file")]
    UnsupportedMediaType { file: String, expected: &'static str },

    #[error("{file} is larger than {limit_mb}MB")]
    FileTooLarge { file: String, limit_mb: u64 },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load properties: {0}")]
    Fetch(String),

    #[error("Store returned {status}: {message}")]
    Store { status: u16, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Media index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
