/// A contiguous run of the document, stored as an index into one of the two
/// buffers rather than an address, so buffer growth never invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub buf_id: crate::enums::BufferId,
    pub start: usize,
    pub len: usize,
}

impl Piece {
    #[inline]
    #[must_use]
    pub fn new(buf_id: crate::enums::BufferId, start: usize, len: usize) -> Self {
        Self { buf_id, start, len }
    }

    /// A single freshly appended byte of the added buffer.
    #[inline]
    #[must_use]
    pub fn added_byte(start: usize) -> Self {
        Self::new(crate::enums::BufferId::Added, start, 1)
    }

    /// One past the last buffer index this piece covers.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}
