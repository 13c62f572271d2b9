use std::io;

use thiserror::Error;

use crate::min_heap::HeapErr;

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid substitution: {0}")]
    InvalidSubstitution(String),

    #[error("malformed code: {0}")]
    MalformedCode(String),

    #[error("symbol {0:?} not in code table")]
    UnknownSymbol(char),

    #[error("heap error: {0:?}")]
    HeapError(HeapErr),

    #[error(transparent)]
    IOError(#[from] io::Error),
}

impl From<HeapErr> for HuffmanError {
    fn from(e: HeapErr) -> Self {
        HuffmanError::HeapError(e)
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
