//! Recursive copy and move of directory trees.
//!
//! One `overwrite` flag drives the whole traversal. With `overwrite` set, a
//! child keeps its name and replaces whatever file sits there. Without it,
//! each child is renamed through [`crate::propose`] when its name is taken.
//!
//! Nothing is rolled back: if a child fails, siblings already copied stay.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::primitives::{self, DirInfo, EntryKind, FileInfo};
use crate::propose::{propose_dir_path, propose_file_path};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default)]
pub struct CopyOptions {
    overwrite: bool,
    max_depth: Option<usize>,
}

impl CopyOptions {
    pub fn new() -> Self { Self::default() }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Deepest directory level below the source that may be entered.
    /// Unbounded when unset, so a cyclic link makes the walk run forever.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn get_overwrite(&self) -> bool { self.overwrite }

    pub fn get_max_depth(&self) -> Option<usize> { self.max_depth }
}

/// Copy one file to `dest`.
///
/// With `overwrite`, an existing destination is deleted before the copy,
/// so a crash in between leaves no file at `dest`.
pub fn copy_file(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<FileInfo> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !primitives::is_file(source) {
        return Err(Error::NotFound(source.to_path_buf()));
    }
    if primitives::is_dir(dest) {
        return Err(Error::InvalidTarget {
            path:   dest.to_path_buf(),
            reason: "cannot copy a file onto a directory",
        });
    }
    if primitives::exists(dest) {
        if !overwrite {
            return Err(Error::AlreadyExists(dest.to_path_buf()));
        }
        primitives::delete_file(dest)?;
    }

    primitives::copy_raw_file(source, dest)?;
    primitives::file_info(dest)
}

pub fn copy_dir(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<DirInfo> {
    copy_dir_with(source, dest, CopyOptions::new().overwrite(overwrite))
}

struct PendingDir {
    source: PathBuf,
    dest:   PathBuf,
    depth:  usize,
}

/// Copy the contents of `source` into `dest`, creating `dest` if needed.
pub fn copy_dir_with(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: CopyOptions,
) -> Result<DirInfo> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !primitives::is_dir(source) {
        return Err(Error::NotFound(source.to_path_buf()));
    }
    if primitives::is_file(dest) {
        return Err(Error::InvalidTarget {
            path:   dest.to_path_buf(),
            reason: "cannot copy a directory onto a file",
        });
    }
    primitives::create_dir(dest)?;

    let mut stack = vec![PendingDir {
        source: source.to_path_buf(),
        dest:   dest.to_path_buf(),
        depth:  0,
    }];

    while let Some(pending) = stack.pop() {
        for entry in primitives::list_dir(&pending.source)? {
            let target = if options.overwrite {
                pending.dest.join(&entry.name)
            } else {
                match entry.kind {
                    EntryKind::File => propose_file_path(&pending.dest, &entry.name_lossy()),
                    EntryKind::Directory => propose_dir_path(&pending.dest, &entry.name_lossy()),
                }
            };

            match entry.kind {
                EntryKind::Directory => {
                    let depth = pending.depth + 1;
                    if options.max_depth.is_some_and(|limit| depth > limit) {
                        return Err(Error::DepthLimitExceeded {
                            path:  entry.path,
                            limit: options.max_depth.unwrap_or_default(),
                        });
                    }
                    debug!(from = %entry.path.display(), to = %target.display(), "copy directory");
                    primitives::create_dir(&target)?;
                    stack.push(PendingDir {
                        source: entry.path,
                        dest: target,
                        depth,
                    });
                }
                EntryKind::File => {
                    debug!(from = %entry.path.display(), to = %target.display(), "copy file");
                    copy_file(&entry.path, &target, options.overwrite)?;
                }
            }
        }
    }

    primitives::dir_info(dest)
}

/// A move whose copy phase has finished but whose source still exists.
///
/// Dropping it without [`PendingMove::commit`] leaves both copies in place.
#[must_use = "the source is only removed by `commit`"]
#[derive(Debug)]
pub struct PendingMove<T> {
    source:      PathBuf,
    kind:        EntryKind,
    destination: T,
}

impl<T> PendingMove<T> {
    pub fn source(&self) -> &Path { &self.source }

    pub fn destination(&self) -> &T { &self.destination }

    /// Delete the source and hand back the destination.
    pub fn commit(self) -> Result<T> {
        match self.kind {
            EntryKind::File => primitives::delete_file(&self.source)?,
            EntryKind::Directory => primitives::delete_dir(&self.source, true)?,
        }
        debug!(source = %self.source.display(), "move committed");
        Ok(self.destination)
    }
}

pub fn stage_move_file(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<PendingMove<FileInfo>> {
    let source = source.as_ref();
    let destination = copy_file(source, dest, overwrite)?;
    Ok(PendingMove {
        source: source.to_path_buf(),
        kind: EntryKind::File,
        destination,
    })
}

pub fn stage_move_dir(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<PendingMove<DirInfo>> {
    let source = source.as_ref();
    let destination = copy_dir(source, dest, overwrite)?;
    Ok(PendingMove {
        source: source.to_path_buf(),
        kind: EntryKind::Directory,
        destination,
    })
}

/// Copy then delete the source. Not atomic: a failure between the two
/// phases leaves both entries on disk.
pub fn move_file(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<FileInfo> {
    stage_move_file(source, dest, overwrite)?.commit()
}

pub fn move_dir(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
) -> Result<DirInfo> {
    stage_move_dir(source, dest, overwrite)?.commit()
}
