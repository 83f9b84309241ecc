//! Zip extraction straight into a destination directory.
//!
//! Every entry name is resolved and checked before the first byte is
//! written, so an unsafe name or (without overwrite) an existing file
//! aborts the extraction with the destination untouched.

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use burrow_fs::DirInfo;
use burrow_fs::primitives;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::options::ExtractOptions;
use crate::sanitize::resolve_entry_path;

/// An archive entry whose target path has been validated.
struct PlannedEntry {
    index:  usize,
    target: PathBuf,
    is_dir: bool,
}

pub fn extract_archive(
    archive: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<DirInfo> {
    let archive = archive.as_ref();
    let destination = destination.as_ref();

    if !primitives::is_file(archive) {
        return Err(Error::NotFound(archive.to_path_buf()));
    }
    let mut zip = ZipArchive::new(File::open(archive)?).map_err(|_| Error::Corrupted)?;

    let planned = plan(&mut zip, destination, options.get_overwrite())?;
    primitives::create_dir(destination)?;

    for entry in &planned {
        write_entry(&mut zip, entry)?;
    }

    debug!(archive = %archive.display(), entries = planned.len(), "archive extracted");
    Ok(primitives::dir_info(destination)?)
}

/// [`extract_archive`] with only the overwrite switch.
pub fn extract_dir(
    archive: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    overwrite: bool,
) -> Result<DirInfo> {
    extract_archive(archive, destination, &ExtractOptions::new().overwrite(overwrite))
}

fn plan<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    destination: &Path,
    overwrite: bool,
) -> Result<Vec<PlannedEntry>> {
    let mut planned = Vec::with_capacity(zip.len());

    for index in 0..zip.len() {
        let file = zip.by_index(index).map_err(|_| Error::Corrupted)?;
        let is_dir = file.is_dir();
        let Some(target) = resolve_entry_path(file.name(), destination, is_dir)? else {
            debug!(entry = file.name(), "skipping entry for the destination root");
            continue;
        };

        if !is_dir && primitives::exists(&target) {
            if primitives::is_dir(&target) {
                return Err(burrow_fs::Error::InvalidTarget {
                    path:   target,
                    reason: "archive file entry collides with a directory",
                }
                .into());
            }
            if !overwrite {
                return Err(Error::AlreadyExists(target));
            }
        }

        planned.push(PlannedEntry {
            index,
            target,
            is_dir,
        });
    }

    Ok(planned)
}

fn write_entry<R: Read + Seek>(zip: &mut ZipArchive<R>, entry: &PlannedEntry) -> Result<()> {
    if entry.is_dir {
        primitives::create_dir(&entry.target)?;
        return Ok(());
    }

    if let Some(parent) = entry.target.parent() {
        primitives::create_dir(parent)?;
    }
    primitives::delete_file(&entry.target)?;

    let mut file = zip.by_index(entry.index)?;
    let mut out = File::create(&entry.target).map_err(|e| Error::Write {
        path:   entry.target.clone(),
        source: e,
    })?;
    io::copy(&mut file, &mut out)?;

    debug!(entry = file.name(), to = %entry.target.display(), "entry extracted");
    Ok(())
}
