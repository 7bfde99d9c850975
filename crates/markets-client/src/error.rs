use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single ticker's fetch-and-compute step.
///
/// The `Display` output is the human-readable message shown on an error card.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Missing or placeholder credential; raised before any request is sent.
    #[error("{0}")]
    Config(String),

    /// Transport failure (`status` is `None`) or a non-success HTTP status.
    #[error("{message}")]
    Network { status: Option<u16>, message: String },

    /// Empty or malformed historical payload.
    #[error("{0}")]
    Data(String),
}

impl Error {
    pub fn missing_credential() -> Self {
        Error::Config("No API key configured".to_string())
    }

    pub fn no_history(ticker: &str) -> Self {
        Error::Data(format!("No historical data for {ticker}"))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }
}
