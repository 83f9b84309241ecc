use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{read_error, write_error};
use crate::primitives::encoding::TextEncoding;
use crate::primitives::entry::{FileInfo, exists, file_info};
use crate::{Error, Result};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| read_error(path, e))
}

pub fn read_text(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<String> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    encoding.decode(&bytes).ok_or_else(|| Error::InvalidText {
        path: path.to_path_buf(),
        encoding,
    })
}

pub fn read_lines(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Vec<String>> {
    Ok(read_text(path, encoding)?.lines().map(str::to_owned).collect())
}

/// Write `content` unless the file exists and `overwrite` is false, in which
/// case the existing file is left untouched.
pub fn write_bytes(path: impl AsRef<Path>, content: &[u8], overwrite: bool) -> Result<FileInfo> {
    let path = path.as_ref();
    if overwrite || !exists(path) {
        fs::write(path, content).map_err(|e| write_error(path, e))?;
    }
    file_info(path)
}

pub fn write_text(
    path: impl AsRef<Path>,
    content: &str,
    encoding: TextEncoding,
    overwrite: bool,
) -> Result<FileInfo> {
    write_bytes(path, &encoding.encode(content), overwrite)
}

/// Every line, including the last, is terminated with [`LINE_ENDING`].
pub fn write_lines<I, S>(
    path: impl AsRef<Path>,
    lines: I,
    encoding: TextEncoding,
    overwrite: bool,
) -> Result<FileInfo>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    write_text(path, &join_lines(lines), encoding, overwrite)
}

/// Append `content` on a new line, creating the file if needed.
pub fn append_text(path: impl AsRef<Path>, content: &str, encoding: TextEncoding) -> Result<()> {
    append_raw(path.as_ref(), &encoding.encode(&format!("{LINE_ENDING}{content}")))
}

pub fn append_lines<I, S>(path: impl AsRef<Path>, lines: I, encoding: TextEncoding) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = format!("{LINE_ENDING}{}", join_lines(lines));
    append_raw(path.as_ref(), &encoding.encode(&text))
}

fn append_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| write_error(path, e))?;
    file.write_all(bytes).map_err(|e| write_error(path, e))
}

fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().fold(String::new(), |mut acc, line| {
        acc.push_str(line.as_ref());
        acc.push_str(LINE_ENDING);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const UTF8: TextEncoding = TextEncoding::Utf8;

    #[test]
    fn test_write_respects_overwrite_flag() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("note.txt");

        let info = write_text(&path, "first", UTF8, false)?;
        assert_eq!(info.len, 5);

        write_text(&path, "second", UTF8, false)?;
        assert_eq!(read_text(&path, UTF8)?, "first");

        write_text(&path, "third", UTF8, true)?;
        assert_eq!(read_text(&path, UTF8)?, "third");
        Ok(())
    }

    #[test]
    fn test_write_and_read_lines() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lines.txt");
        write_lines(&path, ["a", "b", "c"], UTF8, true)?;
        assert_eq!(read_lines(&path, UTF8)?, ["a", "b", "c"]);
        assert_eq!(read_text(&path, UTF8)?, format!("a{LINE_ENDING}b{LINE_ENDING}c{LINE_ENDING}"));
        Ok(())
    }

    #[test]
    fn test_append_starts_on_new_line() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("log.txt");
        write_text(&path, "head", UTF8, true)?;
        append_text(&path, "tail", UTF8)?;
        assert_eq!(read_text(&path, UTF8)?, format!("head{LINE_ENDING}tail"));

        append_lines(&path, ["x", "y"], UTF8)?;
        assert_eq!(read_lines(&path, UTF8)?, ["head", "tail", "x", "y"]);
        Ok(())
    }

    #[test]
    fn test_append_creates_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fresh.txt");
        append_text(&path, "only", UTF8)?;
        assert_eq!(read_lines(&path, UTF8)?, ["", "only"]);
        Ok(())
    }

    #[test]
    fn test_read_missing_is_not_found() -> Result<()> {
        let dir = tempdir()?;
        let result = read_bytes(dir.path().join("missing.bin"));
        assert!(matches!(result, Err(crate::Error::NotFound(_))));
        Ok(())
    }

    #[test]
    fn test_text_roundtrip_per_encoding() -> Result<()> {
        let dir = tempdir()?;
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Le,
            TextEncoding::Utf16Be,
            TextEncoding::Utf32Le,
            TextEncoding::Ascii,
        ] {
            let path = dir.path().join(format!("{encoding:?}.txt"));
            write_lines(&path, ["first", "second"], encoding, true)?;
            append_text(&path, "third", encoding)?;
            append_lines(&path, ["fourth"], encoding)?;

            assert_eq!(
                read_lines(&path, encoding)?,
                ["first", "second", "", "third", "fourth"],
                "{encoding:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_utf16_bytes_on_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("wide.txt");
        let info = write_text(&path, "hé", TextEncoding::Utf16Be, true)?;
        assert_eq!(info.len, 4);
        assert_eq!(read_bytes(&path)?, [0x00, 0x68, 0x00, 0xE9]);
        Ok(())
    }

    #[test]
    fn test_wrong_encoding_is_invalid_text() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("latin.txt");
        fs::write(&path, [0x63, 0x61, 0x66, 0xE9])?;
        assert!(matches!(
            read_text(&path, UTF8),
            Err(Error::InvalidText { encoding: TextEncoding::Utf8, .. })
        ));
        Ok(())
    }
}
