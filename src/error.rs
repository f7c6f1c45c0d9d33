use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VegaParallelError {
    #[error("Failed to read models file: {path:?} - {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch process for {model}: {source}")]
    Spawn {
        model: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type VegaResult<T> = std::result::Result<T, VegaParallelError>;
