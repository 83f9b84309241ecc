use std::path::Path;

use burrow_fs::primitives;
use burrow_fs::{FileInfo, Staging, SystemTempDir, TempDirProvider, copy_dir, copy_file};
use tracing::debug;

use crate::compress::compress_dir;
use crate::error::{Error, Result};
use crate::options::ArchiveOptions;

/// Builds zip archives from loose files and directories.
///
/// Sources are first gathered under a staging directory taken from `P`,
/// then the staging root is compressed. The staging directory is removed
/// whether or not the archive was written.
#[derive(Clone, Debug, Default)]
pub struct ArchiveStager<P = SystemTempDir> {
    provider: P,
}

impl ArchiveStager {
    pub fn new() -> Self { Self::default() }
}

impl<P: TempDirProvider> ArchiveStager<P> {
    pub fn with_provider(provider: P) -> Self { Self { provider } }

    /// Each source lands at the archive root under its own base name.
    /// Two directories sharing a base name are merged and two files sharing
    /// one keep the later file. A file and a directory sharing a base name
    /// fail with `InvalidTarget`.
    pub fn create_archive<I, S>(
        &self,
        destination: impl AsRef<Path>,
        sources: I,
        options: &ArchiveOptions,
    ) -> Result<FileInfo>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let staging = Staging::create(&self.provider)?;

        for source in sources {
            stage_source(&staging, source.as_ref())?;
        }

        compress_dir(
            staging.path(),
            destination,
            options.get_level(),
            options.get_overwrite(),
        )
    }
}

fn stage_source(staging: &Staging, source: &Path) -> Result<()> {
    let name = source
        .file_name()
        .ok_or_else(|| burrow_fs::Error::InvalidTarget {
            path:   source.to_path_buf(),
            reason: "archive source has no file name",
        })?;
    let target = staging.join(name);

    if primitives::is_dir(source) {
        copy_dir(source, &target, true)?;
    } else if primitives::is_file(source) {
        copy_file(source, &target, true)?;
    } else {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    debug!(source = %source.display(), staged = %target.display(), "source staged");
    Ok(())
}

/// [`ArchiveStager::create_archive`] staging under the host temporary directory.
pub fn create_archive<I, S>(
    destination: impl AsRef<Path>,
    sources: I,
    options: &ArchiveOptions,
) -> Result<FileInfo>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    ArchiveStager::new().create_archive(destination, sources, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_fs::TempDirIn;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn staging_removed_after_success() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        fs::create_dir(&scratch).unwrap();
        let file = dir.path().join("b.txt");
        fs::write(&file, "b").unwrap();

        let stager = ArchiveStager::with_provider(TempDirIn::new(&scratch));
        stager
            .create_archive(dir.path().join("out.zip"), [&file], &ArchiveOptions::new())
            .unwrap();

        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn missing_source_fails_and_cleans_up() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        fs::create_dir(&scratch).unwrap();

        let stager = ArchiveStager::with_provider(TempDirIn::new(&scratch));
        let archive = dir.path().join("out.zip");
        let result = stager.create_archive(&archive, [dir.path().join("ghost")], &ArchiveOptions::new());

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(!archive.exists());
        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn same_name_sources() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir_all(first.join("shared")).unwrap();
        fs::create_dir_all(second.join("shared")).unwrap();
        fs::write(first.join("shared/a.txt"), "a").unwrap();
        fs::write(second.join("shared/b.txt"), "b").unwrap();
        fs::write(first.join("note.txt"), "old").unwrap();
        fs::write(second.join("note.txt"), "new").unwrap();

        let archive = dir.path().join("merged.zip");
        let sources = [
            first.join("shared"),
            second.join("shared"),
            first.join("note.txt"),
            second.join("note.txt"),
        ];
        create_archive(&archive, &sources, &ArchiveOptions::new()).unwrap();

        let out = dir.path().join("out");
        crate::extract_dir(&archive, &out, false).unwrap();
        assert!(out.join("shared/a.txt").exists());
        assert!(out.join("shared/b.txt").exists());
        assert_eq!(fs::read_to_string(out.join("note.txt")).unwrap(), "new");
    }

    #[test]
    fn file_and_directory_sharing_a_name_rejected() {
        let dir = tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        fs::create_dir(&scratch).unwrap();
        let as_dir = dir.path().join("a").join("item");
        let as_file = dir.path().join("b").join("item");
        fs::create_dir_all(&as_dir).unwrap();
        fs::create_dir_all(as_file.parent().unwrap()).unwrap();
        fs::write(&as_file, "file").unwrap();

        let stager = ArchiveStager::with_provider(TempDirIn::new(&scratch));
        let archive = dir.path().join("clash.zip");
        for sources in [[&as_dir, &as_file], [&as_file, &as_dir]] {
            let result = stager.create_archive(&archive, sources, &ArchiveOptions::new());
            assert!(matches!(
                result,
                Err(Error::Fs(burrow_fs::Error::InvalidTarget { .. }))
            ));
            assert!(!archive.exists());
            assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
        }
    }

    #[test]
    fn source_without_name_rejected() {
        let dir = tempdir().unwrap();
        let stager = ArchiveStager::with_provider(TempDirIn::new(dir.path()));
        let result = stager.create_archive(dir.path().join("out.zip"), ["/"], &ArchiveOptions::new());
        assert!(matches!(
            result,
            Err(Error::Fs(burrow_fs::Error::InvalidTarget { .. }))
        ));
    }

    #[test]
    fn provider_failure_surfaces() {
        let dir = tempdir().unwrap();
        let stager = ArchiveStager::with_provider(TempDirIn::new(dir.path().join("absent")));
        let result = stager.create_archive(
            dir.path().join("out.zip"),
            Vec::<&Path>::new(),
            &ArchiveOptions::new(),
        );
        assert!(matches!(result, Err(Error::Fs(burrow_fs::Error::Write { .. }))));
    }
}
