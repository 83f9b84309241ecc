pub mod staging;

pub use staging::{Staging, SystemTempDir, TempDirIn, TempDirProvider};
