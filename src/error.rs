use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Carries no request URL, so query credentials never reach the message.
    #[error("HTTP error: {0}")]
    Transport(reqwest::Error),

    #[error("VK API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Data(String),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Api,
    Data,
    Io,
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.without_url())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Status { .. } | Error::Transport(_) => ErrorKind::Network,
            Error::Api { .. } => ErrorKind::Api,
            Error::Data(_) | Error::Json(_) => ErrorKind::Data,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
