use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    SizeLimitExceeded { size: u64, limit: u64 },

    #[error("invalid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
