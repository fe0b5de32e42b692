use thiserror::Error;

/// Every failure the core can hand to a caller.
///
/// Variants carry owned strings so a value can be rendered into view state
/// and logged after the underlying transport/storage error is gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Rejected before any I/O happened.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 404 from the provider.
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather service returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response from weather service: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse classification of [`WeatherError`], handy for matching in tests and callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Network,
    Http,
    Deserialization,
    Storage,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            WeatherError::Network(_) => ErrorKind::Network,
            WeatherError::CityNotFound(_) | WeatherError::Http { .. } => ErrorKind::Http,
            WeatherError::Deserialization(_) => ErrorKind::Deserialization,
            WeatherError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        WeatherError::InvalidArgument(message.into())
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Network("Request timed out".to_string())
        } else if err.is_decode() {
            WeatherError::Deserialization(err.to_string())
        } else if let Some(status) = err.status() {
            WeatherError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            WeatherError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Deserialization(err.to_string())
    }
}

impl From<rusqlite::Error> for WeatherError {
    fn from(err: rusqlite::Error) -> Self {
        WeatherError::Storage(err.to_string())
    }
}
