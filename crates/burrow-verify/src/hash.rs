//! Lowercase hex digests of text and files.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hasher::{Hasher, HashingReader, Md5Hasher, Sha256Hasher, Sha512Hasher};

/// Digest of the UTF-8 bytes of `text`.
pub fn sha256_text(text: &str) -> String { hex::encode(Sha256Hasher::digest(text.as_bytes())) }

pub fn sha512_text(text: &str) -> String { hex::encode(Sha512Hasher::digest(text.as_bytes())) }

pub fn md5_text(text: &str) -> String { hex::encode(Md5Hasher::digest(text.as_bytes())) }

/// Streams the file; memory use does not grow with its size.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    file_digest(path.as_ref(), Sha256Hasher::new())
}

pub fn sha512_file(path: impl AsRef<Path>) -> Result<String> {
    file_digest(path.as_ref(), Sha512Hasher::new())
}

pub fn md5_file(path: impl AsRef<Path>) -> Result<String> {
    file_digest(path.as_ref(), Md5Hasher::new())
}

fn file_digest<H: Hasher>(path: &Path, hasher: H) -> Result<String> {
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut reader = HashingReader::new(file, hasher);
    io::copy(&mut reader, &mut io::sink()).map_err(read_error)?;

    debug!(path = %path.display(), bytes = reader.bytes_read(), "file hashed");
    Ok(hex::encode(reader.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_text_vectors() {
        assert_eq!(
            sha256_text(FOX),
            "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
        );
        assert_eq!(
            sha512_text(FOX),
            "07e547d9586f6a73f73fbac0435ed76951218fb7d0c8d788a309d785436bbb642e93a252a954f23912547d1e8a3b5ed6e1bfd7097821233fa0538f3db854fee6"
        );
        assert_eq!(md5_text(FOX), "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(md5_text(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_file_with_byte_order_mark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(FOX.as_bytes());
        fs::write(&path, content).unwrap();

        assert_eq!(
            sha256_file(&path).unwrap(),
            "9eebf869675fb762f5b9ef72a6e5933f99db6859201b13ae48bd8ce5e955b900"
        );
        assert_eq!(
            sha512_file(&path).unwrap(),
            "be3f8825ebcb39c5ee382c7ade5dff4d704d28d666734c5da306295418753386e6840001a29379b00d8141230a77ad92072e176e913b7a0e35a2cae545bdb6cf"
        );
        assert_eq!(md5_file(&path).unwrap(), "091bf4e55b6bc0687319e551c181153f");
    }

    #[test]
    fn test_file_matches_text_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, FOX).unwrap();
        assert_eq!(sha256_file(&path).unwrap(), sha256_text(FOX));
        assert_eq!(sha512_file(&path).unwrap(), sha512_text(FOX));
        assert_eq!(md5_file(&path).unwrap(), md5_text(FOX));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = sha256_file(dir.path().join("absent"));
        assert!(matches!(result, Err(Error::Read { .. })));
        assert!(matches!(md5_file(dir.path()), Err(Error::Read { .. })));
    }
}
