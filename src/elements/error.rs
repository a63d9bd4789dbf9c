use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid epoch {value:?}: {reason}")]
pub struct EpochParseError {
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ElementsError {
    #[error(transparent)]
    Epoch(#[from] EpochParseError),
    #[error("non-finite mean elements")]
    NonFinite,
    #[error("record has no TLE lines")]
    MissingTle,
    #[error("invalid tle: {0}")]
    InvalidTle(String),
}

impl From<sgp4::TleError> for ElementsError {
    fn from(err: sgp4::TleError) -> Self {
        ElementsError::InvalidTle(err.to_string())
    }
}
