/// Sticky horizontal target for vertical movement.
///
/// Recorded as a column relative to the line's tab count, the way it was
/// measured when the cursor last moved horizontally. `x` goes negative when
/// the cursor sits inside the indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesiredColumn {
    pub x: isize,
    pub tabs: usize,
}

impl DesiredColumn {
    /// The logical column this target resolves to.
    #[inline]
    #[must_use]
    pub fn target(&self) -> usize {
        let tabs = <usize as TryInto<isize>>::try_into(self.tabs).unwrap_or(isize::MAX);

        <isize as TryInto<usize>>::try_into(self.x.saturating_add(tabs)).unwrap_or(0)
    }
}

/// Logical cursor position. `column` counts bytes on the line (a tab is one
/// column), so it maps onto document offsets directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
    /// The preferred column used to maintain horizontal position when moving
    /// vertically across shorter lines.
    pub desired: DesiredColumn,
}

impl Cursor {
    #[must_use]
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            desired: DesiredColumn::default(),
        }
    }

    /// Creates a cursor and records its column as the sticky target.
    #[must_use]
    pub fn at(row: usize, column: usize, rows: &crate::line_index::RowIndex) -> Self {
        let mut cursor = Self::new(row, column);

        cursor.remember(rows);

        cursor
    }

    fn remember(&mut self, rows: &crate::line_index::RowIndex) {
        let tabs = rows.get(self.row).map_or(0, |row| row.tab_count);
        let column = <usize as TryInto<isize>>::try_into(self.column).unwrap_or(isize::MAX);
        let tab_cols = <usize as TryInto<isize>>::try_into(tabs).unwrap_or(isize::MAX);

        self.desired = DesiredColumn {
            x: column.saturating_sub(tab_cols),
            tabs,
        };
    }
}

/*

==============================
===== OFFSET & RENDERING =====
==============================

*/

impl Cursor {
    /// Document offset of the cursor: the length of every earlier row plus
    /// its newline, then `column`.
    ///
    /// # Errors
    ///
    /// [`crate::enums::MathError::OutOfBounds`] if `row` is past the last row.
    pub fn offset(
        &self,
        rows: &crate::line_index::RowIndex,
    ) -> Result<usize, crate::enums::MathError> {
        rows.row_start(self.row)?
            .checked_add(self.column)
            .ok_or(crate::enums::MathError::Overflow)
    }

    /// Screen column of the cursor once tabs are expanded.
    ///
    /// Tabs are treated as if they occupied the first `tab_count` columns of
    /// the line, each `tab_stop + 1` cells wide, whatever their real
    /// position.
    #[must_use]
    pub fn render_column(&self, rows: &crate::line_index::RowIndex, tab_stop: usize) -> usize {
        let tabs = rows.get(self.row).map_or(0, |row| row.tab_count);

        (0..self.column)
            .map(|k| if k < tabs { tab_stop + 1 } else { 1 })
            .sum()
    }
}

/*

======================
===== NAVIGATION =====
======================

*/

impl Cursor {
    /// Moves one step. Moving past a document edge does nothing.
    pub fn move_to(
        &mut self,
        direction: crate::enums::Direction,
        rows: &crate::line_index::RowIndex,
    ) {
        match direction {
            crate::enums::Direction::Left => {
                if self.column > 0 {
                    self.column -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.column = rows.row_len(self.row).saturating_sub(1);
                }

                self.remember(rows);
            }
            crate::enums::Direction::Right => {
                if self.column + 1 < rows.row_len(self.row) {
                    self.column += 1;
                } else if self.row < rows.last_row() {
                    self.row += 1;
                    self.column = 0;
                }

                self.remember(rows);
            }
            crate::enums::Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.snap_to_desired(rows);
                }
            }
            crate::enums::Direction::Down => {
                if self.row < rows.last_row() {
                    self.row += 1;
                    self.snap_to_desired(rows);
                }
            }
        }
    }

    fn snap_to_desired(&mut self, rows: &crate::line_index::RowIndex) {
        self.column = self
            .desired
            .target()
            .min(rows.row_len(self.row).saturating_sub(1));
    }

    pub fn home(&mut self, rows: &crate::line_index::RowIndex) {
        self.column = 0;
        self.remember(rows);
    }

    /// Moves just past the last byte of the line.
    pub fn end(&mut self, rows: &crate::line_index::RowIndex) {
        self.column = rows.row_len(self.row);
        self.remember(rows);
    }

    /// Moves one column right after a byte was typed at the cursor. Unlike
    /// [`Cursor::move_to`] this may land one past the last byte of the line.
    pub fn advance(&mut self, rows: &crate::line_index::RowIndex) {
        self.column = (self.column + 1).min(rows.row_len(self.row));
        self.remember(rows);
    }

    /// Pulls the cursor back inside `rows` after the document changed under
    /// it.
    pub fn clamp(&mut self, rows: &crate::line_index::RowIndex) {
        self.row = self.row.min(rows.last_row());
        self.column = self.column.min(rows.row_len(self.row));
    }
}
