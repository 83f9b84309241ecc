use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use burrow_fs::FileInfo;
use burrow_fs::primitives;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::options::CompressionLevel;

/// Zip everything below `root` into `archive`.
///
/// Entry names are relative to `root` and use forward slashes. Directories
/// get explicit entries, `root` itself does not. A half-written archive is
/// removed before the error is returned.
pub fn compress_dir(
    root: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    level: CompressionLevel,
    overwrite: bool,
) -> Result<FileInfo> {
    let root = root.as_ref();
    let archive = archive.as_ref();

    if !primitives::is_dir(root) {
        return Err(Error::NotFound(root.to_path_buf()));
    }
    if primitives::is_dir(archive) {
        return Err(burrow_fs::Error::InvalidTarget {
            path:   archive.to_path_buf(),
            reason: "cannot write an archive over a directory",
        }
        .into());
    }
    if overwrite {
        primitives::delete_file(archive)?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(archive)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::AlreadyExists(archive.to_path_buf()),
            _ => Error::Write {
                path:   archive.to_path_buf(),
                source: e,
            },
        })?;

    if let Err(e) = write_entries(file, root, level) {
        if let Err(cleanup) = fs::remove_file(archive) {
            warn!(path = %archive.display(), error = %cleanup, "failed to remove partial archive");
        }
        return Err(e);
    }

    debug!(archive = %archive.display(), ?level, "archive written");
    Ok(primitives::file_info(archive)?)
}

fn write_entries(file: File, root: &Path, level: CompressionLevel) -> Result<()> {
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(level.method())
        .compression_level(level.deflate_level());

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let name = entry_name(root, entry.path());

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
