/// Metrics for one line, newline excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Row {
    /// Bytes that are neither tab nor newline.
    pub visible_len: usize,
    pub tab_count: usize,
}

impl Row {
    #[inline]
    #[must_use]
    pub fn new(visible_len: usize, tab_count: usize) -> Self {
        Self {
            visible_len,
            tab_count,
        }
    }

    /// Logical columns on the line, i.e. bytes before the newline.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible_len + self.tab_count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_line(line: &[u8]) -> Self {
        let tab_count = memchr::memchr_iter(b'\t', line).count();

        Self::new(line.len() - tab_count, tab_count)
    }
}

impl From<&[u8]> for Row {
    fn from(line: &[u8]) -> Self {
        Self::from_line(line)
    }
}
