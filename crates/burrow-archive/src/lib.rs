//! Zip archives built through a staging directory.
//!
//! - `stager` - gathers files and directories into staging, then compresses
//! - `compress` - zip writer over a directory root
//! - `extract` - extraction with entry-name validation
//! - `sanitize` - zip-slip checks

pub use compress::compress_dir;
pub use error::{Error, Result};
pub use extract::{extract_archive, extract_dir};
pub use options::{ArchiveOptions, CompressionLevel, ExtractOptions};
pub use stager::{ArchiveStager, create_archive};

mod compress;
mod error;
mod extract;
pub mod options;
mod sanitize;
mod stager;
