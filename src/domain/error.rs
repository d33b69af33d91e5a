use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Please enter a valid YouTube URL.")]
    InvalidUrl,

    #[error("A download is already in progress")]
    Busy,

    #[error("{0}")]
    Resolution(String),

    #[error("{0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}
