//! Standard-alphabet, padded base64 for text and files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct EncodeOptions {
    max_input_bytes: u64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self { Self::default() }

    /// Largest input, in bytes, accepted by the encoders.
    pub fn max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = limit;
        self
    }

    pub fn get_max_input_bytes(&self) -> u64 { self.max_input_bytes }

    fn check(&self, size: u64) -> Result<()> {
        if size > self.max_input_bytes {
            return Err(Error::SizeLimitExceeded {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<String> {
    options.check(text.len() as u64)?;
    Ok(STANDARD.encode(text))
}

pub fn decode_text(encoded: &str) -> Result<String> { Ok(String::from_utf8(decode_bytes(encoded)?)?) }

pub fn decode_bytes(encoded: &str) -> Result<Vec<u8>> { Ok(STANDARD.decode(encoded.trim())?) }

/// Encode a whole file. Its size is checked before anything is read.
pub fn encode_file(path: impl AsRef<Path>, options: &EncodeOptions) -> Result<String> {
    let path = path.as_ref();
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let size = file.metadata().map_err(read_error)?.len();
    options.check(size)?;

    // The file may grow after the size check.
    let mut bytes = Vec::with_capacity(size as usize);
    file.by_ref()
        .take(options.max_input_bytes + 1)
        .read_to_end(&mut bytes)
        .map_err(read_error)?;
    options.check(bytes.len() as u64)?;

    Ok(STANDARD.encode(bytes))
}
