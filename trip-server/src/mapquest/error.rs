//! MapQuest client error types.

use std::fmt;

use super::convert::ConversionError;

/// Errors from the MapQuest HTTP client.
#[derive(Debug)]
pub enum MapQuestError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code or a non-zero info statuscode
    ApiError { status: u16, message: String },

    /// No route or geocode result for the given locations
    NoResults(String),

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Response parsed but failed domain validation
    Conversion(ConversionError),
}

impl fmt::Display for MapQuestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapQuestError::Http(e) => write!(f, "HTTP error: {e}"),
            MapQuestError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            MapQuestError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            MapQuestError::NoResults(what) => write!(f, "no results for {what}"),
            MapQuestError::RateLimited => write!(f, "rate limited by MapQuest API"),
            MapQuestError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            MapQuestError::Conversion(e) => write!(f, "invalid response data: {e}"),
        }
    }
}

impl std::error::Error for MapQuestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapQuestError::Http(e) => Some(e),
            MapQuestError::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MapQuestError {
    fn from(err: reqwest::Error) -> Self {
        MapQuestError::Http(err)
    }
}

impl From<ConversionError> for MapQuestError {
    fn from(err: ConversionError) -> Self {
        MapQuestError::Conversion(err)
    }
}
