use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("token '{0}' is not in the vocabulary")]
    UnknownToken(String),

    #[error("cannot draw negative samples: vocabulary has {vocab_size} word(s), {requested} sample(s) requested")]
    VocabularyTooSmall { vocab_size: usize, requested: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("table shape mismatch: expected {expected_rows}x{expected_dims}, got {rows}x{dims}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_dims: usize,
        rows: usize,
        dims: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
