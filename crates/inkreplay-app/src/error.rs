//! Application errors.

use inkreplay_core::{FitError, ReplayError, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
