/// Backing storage for the immutable original buffer.
///
/// Files opened from disk stay memory-mapped; content handed over as bytes
/// (and empty files, which cannot be mapped portably) is owned.
#[derive(Debug)]
pub enum Original {
    Owned(Box<[u8]>),
    Mapped(io::mmap::MmapFile),
}

impl Original {
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Original::Owned(bytes) => bytes,
            Original::Mapped(mmap) => mmap.as_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the file backing this buffer, if it was mapped from disk.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Original::Owned(_) => None,
            Original::Mapped(mmap) => Some(mmap.path()),
        }
    }
}

impl From<Vec<u8>> for Original {
    fn from(bytes: Vec<u8>) -> Self {
        Original::Owned(bytes.into_boxed_slice())
    }
}

impl From<io::mmap::MmapFile> for Original {
    fn from(mmap: io::mmap::MmapFile) -> Self {
        Original::Mapped(mmap)
    }
}
