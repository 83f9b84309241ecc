use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result};

const STAGING_PREFIX: &str = "burrow-staging-";

/// Source of fresh, uniquely named, already created directories.
pub trait TempDirProvider {
    fn create_temp_dir(&self) -> Result<PathBuf>;
}

impl<P: TempDirProvider + ?Sized> TempDirProvider for &P {
    fn create_temp_dir(&self) -> Result<PathBuf> { (**self).create_temp_dir() }
}

/// Directories under the host temporary directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTempDir;

impl TempDirProvider for SystemTempDir {
    fn create_temp_dir(&self) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()
            .map_err(|e| Error::Write {
                path:   std::env::temp_dir(),
                source: e,
            })?;
        Ok(dir.keep())
    }
}

/// Directories under a caller-chosen root, so the staging area can be inspected.
#[derive(Clone, Debug)]
pub struct TempDirIn {
    root: PathBuf,
}

impl TempDirIn {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }
}

impl TempDirProvider for TempDirIn {
    fn create_temp_dir(&self) -> Result<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.root)
            .map_err(|e| Error::Write {
                path:   self.root.clone(),
                source: e,
            })?;
        Ok(dir.keep())
    }
}

/// Scratch directory removed, with its contents, when dropped.
pub struct Staging {
    path: PathBuf,
}

impl Staging {
    pub fn create(provider: &impl TempDirProvider) -> Result<Self> {
        let path = provider.create_temp_dir()?;
        debug!(path = %path.display(), "staging directory created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf { self.path.join(name) }
}

impl Drop for Staging {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "staging directory removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove staging directory"),
        }
    }
}
