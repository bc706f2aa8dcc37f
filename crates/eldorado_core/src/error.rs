use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed: HTTP {status}")]
    Fetch { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("external error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status carried by a `Fetch` error, if that is what this is.
    pub fn fetch_status(&self) -> Option<u16> {
        match self {
            Error::Fetch { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
