use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("archive is corrupted")]
    Corrupted,

    #[error("entry '{0}' resolves outside the destination directory")]
    UnsafeEntry(PathBuf),

    #[error("failed to write archive '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Fs(#[from] burrow_fs::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
