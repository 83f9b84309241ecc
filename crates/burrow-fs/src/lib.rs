//! Filesystem tree primitives.
//!
//! - `primitives` - single-entry operations and encoded text I/O
//! - `propose` - collision-free file and directory names
//! - `tree` - recursive copy and copy-then-delete moves
//! - `workflow` - staging directories released on drop
//!
//! Everything runs synchronously on the calling thread. Check-then-act
//! sequences are not protected against concurrent changes to the same paths.

mod error;
pub mod primitives;
pub mod propose;
pub mod tree;
pub mod workflow;

pub use error::{Error, Result};
pub use primitives::{BufferedLineReader, DirInfo, Entry, EntryKind, FileInfo, TextEncoding};
pub use propose::{propose_dir_path, propose_dir_path_for, propose_file_path, propose_path};
pub use tree::{
    CopyOptions, PendingMove, copy_dir, copy_dir_with, copy_file, move_dir, move_file,
    stage_move_dir, stage_move_file,
};
pub use workflow::{Staging, SystemTempDir, TempDirIn, TempDirProvider};
