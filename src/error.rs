//! Error types for arena-extract

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no data file matching {0}")]
    DataFileNotFound(String),

    #[error("no localized text for id {id}")]
    MissingText { id: u64 },

    #[error("asset bundle error: {0}")]
    Bundle(String),

    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
