/// Trade-off between archive size and compression speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    #[default]
    Optimal,
    Fastest,
    NoCompression,
}

impl CompressionLevel {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Self::Optimal | Self::Fastest => zip::CompressionMethod::Deflated,
            Self::NoCompression => zip::CompressionMethod::Stored,
        }
    }

    /// `None` lets the deflater pick its default level.
    pub(crate) fn deflate_level(self) -> Option<i64> {
        match self {
            Self::Fastest => Some(1),
            Self::Optimal | Self::NoCompression => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ArchiveOptions {
    overwrite: bool,
    level:     CompressionLevel,
}

impl ArchiveOptions {
    pub fn new() -> Self { Self::default() }

    /// Replace an existing file at the archive destination.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn get_overwrite(&self) -> bool { self.overwrite }

    pub fn get_level(&self) -> CompressionLevel { self.level }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    overwrite: bool,
}

impl ExtractOptions {
    pub fn new() -> Self { Self::default() }

    /// Replace files that already exist under the destination directory.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn get_overwrite(&self) -> bool { self.overwrite }
}
