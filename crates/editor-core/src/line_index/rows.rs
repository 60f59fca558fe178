use std::ops::AddAssign;

/// One [`Row`](crate::line_index::row::Row) per line of the document.
///
/// Always holds `1 + count('\n')` rows: the line after the last newline is
/// kept even when empty, so an empty document has exactly one `{0, 0}` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowIndex {
    rows: Vec<crate::line_index::row::Row>,
}

impl Default for RowIndex {
    fn default() -> Self {
        Self {
            rows: vec![crate::line_index::row::Row::default()],
        }
    }
}

/*

====================
===== CREATION =====
====================

*/

impl RowIndex {
    /// Scans `bytes` once: a newline closes the current row, a tab counts
    /// towards `tab_count`, anything else towards `visible_len`.
    #[must_use]
    pub fn build(bytes: &[u8]) -> Self {
        let mut rows = Vec::with_capacity(memchr::memchr_iter(b'\n', bytes).count() + 1);
        let mut last_position = 0usize;

        for line_position in memchr::memchr_iter(b'\n', bytes) {
            rows.push(crate::line_index::row::Row::from(
                &bytes[last_position..line_position],
            ));

            last_position = line_position + 1;
        }

        rows.push(crate::line_index::row::Row::from(&bytes[last_position..]));

        Self { rows }
    }

    /// Rebuilds from the current content of `table`.
    #[must_use]
    pub fn rebuild(table: &crate::piece_table::table::PieceTable) -> Self {
        Self::build(&table.materialize())
    }
}

/*

=================
===== QUERY =====
=================

*/

impl RowIndex {
    /// Number of rows; never zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&crate::line_index::row::Row> {
        self.rows.get(row)
    }

    /// Logical columns on `row`, zero for rows past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, crate::line_index::row::Row::len)
    }

    #[inline]
    #[must_use]
    pub fn last_row(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &crate::line_index::row::Row> + '_ {
        self.rows.iter()
    }

    /// Document offset at which `row` starts.
    ///
    /// # Errors
    ///
    /// [`crate::enums::MathError::OutOfBounds`] if `row` does not exist.
    pub fn row_start(&self, row: usize) -> Result<usize, crate::enums::MathError> {
        if row >= self.rows.len() {
            return Err(crate::enums::MathError::OutOfBounds(row));
        }

        let mut offset = 0usize;

        for r in &self.rows[..row] {
            offset.add_assign(r.len() + 1);
        }

        Ok(offset)
    }
}
