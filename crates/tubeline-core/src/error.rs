use std::path::PathBuf;
use thiserror::Error;

use crate::captions::CaptionError;

#[derive(Error, Debug)]
pub enum TubelineError {
    #[error(transparent)]
    Captions(#[from] CaptionError),

    #[error("Invalid language code {0:?}: expected letters, digits, '-' or '_'")]
    InvalidLanguage(String),

    #[error("Failed to write outline to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TubelineError>;
