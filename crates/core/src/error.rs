use thiserror::Error;

use crate::model::{ParseModeError, ParseTopicError};

/// Umbrella error for string-facing parts of the domain.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Topic(#[from] ParseTopicError),
    #[error(transparent)]
    Mode(#[from] ParseModeError),
}
