pub mod encoding;
pub mod entry;
pub mod reader;
pub mod rw;

pub use entry::{
    DirInfo, Entry, EntryKind, FileInfo, copy_raw_file, create_dir, delete_dir, delete_file,
    dir_info, exists, file_info, is_dir, is_file, list_dir, list_files, parent_dir,
    temp_file_path,
};
pub use encoding::TextEncoding;
pub use reader::BufferedLineReader;
pub use rw::{
    LINE_ENDING, append_lines, append_text, read_bytes, read_lines, read_text, write_bytes,
    write_lines, write_text,
};
