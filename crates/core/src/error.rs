use thiserror::Error;

/// Failure taxonomy for the directions pipeline. `Extraction` is the only
/// user-correctable case; everything else is a calculation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectionsError {
    #[error("could not extract an origin and destination from the request")]
    Extraction,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("API Error: {0}")]
    Route(String),

    #[error("provider request failed: {0}")]
    Provider(String),
}

impl DirectionsError {
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Extraction)
    }
}
