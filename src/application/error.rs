use thiserror::Error;

use crate::domain::LifeError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Life(#[from] LifeError),

    #[error("no preset pattern named {0:?}")]
    UnknownPreset(String),
}
