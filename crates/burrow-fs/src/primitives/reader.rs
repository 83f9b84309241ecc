use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::read_error;
use crate::primitives::encoding::{TextDecoder, TextEncoding};
use crate::{Error, Result};

/// Line-at-a-time text reader that remembers the last line it produced.
pub struct BufferedLineReader {
    path:        PathBuf,
    encoding:    TextEncoding,
    reader:      BufReader<File>,
    decoder:     TextDecoder,
    decoded:     String,
    eof:         bool,
    line:        String,
    has_line:    bool,
    line_number: usize,
}

impl BufferedLineReader {
    pub fn open(path: impl AsRef<Path>, encoding: TextEncoding) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| read_error(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
            reader: BufReader::new(file),
            decoder: encoding.decoder(),
            decoded: String::new(),
            eof: false,
            line: String::new(),
            has_line: false,
            line_number: 0,
        })
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<&str>> {
        loop {
            if let Some(end) = self.decoded.find('\n') {
                let taken = if self.decoded[..end].ends_with('\r') { end - 1 } else { end };
                self.line.clear();
                self.line.push_str(&self.decoded[..taken]);
                self.decoded.drain(..=end);
                break;
            }
            if self.eof {
                if self.decoded.is_empty() {
                    self.has_line = false;
                    return Ok(None);
                }
                self.line = std::mem::take(&mut self.decoded);
                break;
            }
            self.fill()?;
        }

        self.has_line = true;
        self.line_number += 1;
        Ok(Some(self.line.as_str()))
    }

    fn fill(&mut self) -> Result<()> {
        let chunk = self
            .reader
            .fill_buf()
            .map_err(|e| read_error(&self.path, e))?;
        let read = chunk.len();
        let last = read == 0;

        if !self.decoder.decode(chunk, &mut self.decoded, last) {
            return Err(Error::InvalidText {
                path:     self.path.clone(),
                encoding: self.encoding,
            });
        }
        self.reader.consume(read);
        self.eof = last;
        Ok(())
    }

    pub fn current_line(&self) -> Option<&str> { self.has_line.then_some(self.line.as_str()) }

    /// Number of lines read so far.
    pub fn current_line_number(&self) -> usize { self.line_number }

    pub fn encoding(&self) -> TextEncoding { self.encoding }

    pub fn path(&self) -> &Path { &self.path }
}
