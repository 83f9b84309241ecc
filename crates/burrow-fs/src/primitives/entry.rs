use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::Glob;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{read_error, write_error};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Metadata for a file, captured when an operation returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub len:  u64,
}

/// Descriptor for a directory, captured when an operation returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirInfo {
    pub path: PathBuf,
}

/// One immediate child of a directory.
#[derive(Clone, Debug)]
pub struct Entry {
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
}

impl Entry {
    pub fn name_lossy(&self) -> String { self.name.to_string_lossy().into_owned() }

    pub fn is_dir(&self) -> bool { self.kind == EntryKind::Directory }
}

pub fn exists(path: impl AsRef<Path>) -> bool { path.as_ref().exists() }

pub fn is_dir(path: impl AsRef<Path>) -> bool { path.as_ref().is_dir() }

pub fn is_file(path: impl AsRef<Path>) -> bool { path.as_ref().is_file() }

pub fn file_info(path: impl AsRef<Path>) -> Result<FileInfo> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
    if metadata.is_dir() {
        return Err(Error::InvalidTarget {
            path:   path.to_path_buf(),
            reason: "expected a file, found a directory",
        });
    }
    Ok(FileInfo {
        path: path.to_path_buf(),
        len:  metadata.len(),
    })
}

pub fn dir_info(path: impl AsRef<Path>) -> Result<DirInfo> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
    if !metadata.is_dir() {
        return Err(Error::InvalidTarget {
            path:   path.to_path_buf(),
            reason: "expected a directory, found a file",
        });
    }
    Ok(DirInfo {
        path: path.to_path_buf(),
    })
}

/// Absolute path of the directory containing `path`.
pub fn parent_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| read_error(path, e))?;
    absolute
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::InvalidTarget {
            path:   path.to_path_buf(),
            reason: "path has no parent directory",
        })
}

/// Create `path` and any missing parents. An existing directory is not an error.
pub fn create_dir(path: impl AsRef<Path>) -> Result<DirInfo> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| write_error(path, e))?;
    dir_info(path)
}

pub fn delete_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "attempted to delete a non-existing file");
            Ok(())
        }
        Err(e) => Err(Error::Write {
            path:   path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove a directory; `recursive` removes its contents too.
pub fn delete_dir(path: impl AsRef<Path>, recursive: bool) -> Result<()> {
    let path = path.as_ref();
    let result = if recursive {
        fs::remove_dir_all(path)
    } else {
        fs::remove_dir(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "attempted to delete a non-existing directory");
            Ok(())
        }
        Err(e) => Err(Error::Write {
            path:   path.to_path_buf(),
            source: e,
        }),
    }
}

/// Byte-exact copy of a single file.
pub fn copy_raw_file(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    if !exists(src) {
        return Err(Error::NotFound(src.to_path_buf()));
    }
    fs::copy(src, dest).map_err(|e| write_error(dest, e))?;
    Ok(())
}

/// Immediate children of `path`, sorted by name.
///
/// Symbolic links are classified by their target.
pub fn list_dir(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let mut entries = Vec::new();

    for entry in fs::read_dir(path).map_err(|e| read_error(path, e))? {
        let entry = entry.map_err(|e| read_error(path, e))?;
        let entry_path = entry.path();
        let metadata = fs::metadata(&entry_path).map_err(|e| read_error(&entry_path, e))?;
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(Entry {
            path: entry_path,
            name: entry.file_name(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Files under `path` whose names match the glob `pattern` (`*`, `?`, classes).
pub fn list_files(path: impl AsRef<Path>, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let matcher = Glob::new(pattern)
        .map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?
        .compile_matcher();

    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let failed = e.path().unwrap_or(path).to_path_buf();
            read_error(&failed, io::Error::from(e))
        })?;
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// A fresh, empty file in the host temporary directory that outlives the call.
pub fn temp_file_path() -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("burrow-")
        .tempfile()
        .map_err(Error::Io)?;
    let (_, path) = file.keep().map_err(|e| Error::Io(e.error))?;
    Ok(path)
}
