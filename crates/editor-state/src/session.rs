/// What the control loop should do after a key was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    /// The save key was pressed; there is no save path.
    SaveUnsupported,
}

/// The part of the document currently on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// First document row shown.
    pub row_offset: usize,
    /// Text rows, status line excluded.
    pub height: usize,
    pub width: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            row_offset: 0,
            height: 24,
            width: 80,
        }
    }
}

/// Complete in-memory state for one open document.
///
/// Every mutation goes through a checkpoint first and is followed by a full
/// row-index rebuild, so `rows` always describes `table`.
#[derive(Debug)]
pub struct Session {
    table: editor_core::piece_table::table::PieceTable,
    rows: editor_core::line_index::RowIndex,
    cursor: editor_core::cursor::Cursor,
    /// Snapshots carry the cursor that was current when they were taken.
    history: editor_core::history::History<editor_core::cursor::Cursor>,
    mode: crate::key::Mode,
    viewport: Viewport,
    config: crate::config::Config,
}

/*

==================================
===== CREATION & OPEN ============
==================================

*/

impl Session {
    #[must_use]
    pub fn new(
        table: editor_core::piece_table::table::PieceTable,
        config: crate::config::Config,
    ) -> Self {
        let rows = editor_core::line_index::RowIndex::rebuild(&table);

        Self {
            table,
            rows,
            cursor: editor_core::cursor::Cursor::default(),
            history: editor_core::history::History::new(),
            mode: config.start_mode,
            viewport: Viewport::default(),
            config,
        }
    }

    /// A session over `bytes`, as if they had been read from a file.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, config: crate::config::Config) -> Self {
        Self::new(
            editor_core::piece_table::table::PieceTable::open_file(bytes),
            config,
        )
    }

    /// # Errors
    ///
    /// Returns [`crate::errors::SessionError::Open`] if the file cannot be
    /// read.
    pub fn open(
        path: impl AsRef<std::path::Path>,
        config: crate::config::Config,
    ) -> crate::errors::SessionResult<Self> {
        let path = path.as_ref();
        let table = editor_core::piece_table::table::PieceTable::open(path).map_err(|source| {
            crate::errors::SessionError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        log::info!("opened {} ({} bytes)", path.display(), table.len());

        Ok(Self::new(table, config))
    }
}

/*

====================
===== GETTERS ======
====================

*/

impl Session {
    #[inline]
    #[must_use]
    pub fn table(&self) -> &editor_core::piece_table::table::PieceTable {
        &self.table
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &editor_core::line_index::RowIndex {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> &editor_core::cursor::Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &editor_core::history::History<editor_core::cursor::Cursor> {
        &self.history
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> crate::key::Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &crate::config::Config {
        &self.config
    }

    /// The document as a string, for tests and diagnostics.
    #[must_use]
    pub fn text(&self) -> String {
        self.table.to_string()
    }

    /// Places the cursor, clamped to the document.
    pub fn set_cursor(&mut self, row: usize, column: usize) {
        let mut cursor = editor_core::cursor::Cursor::new(row, column);

        cursor.clamp(&self.rows);
        self.cursor = editor_core::cursor::Cursor::at(cursor.row, cursor.column, &self.rows);
    }

    /// Sets the screen size. One row is reserved for the status line when it
    /// is shown.
    pub fn resize(&mut self, width: usize, height: usize) {
        let reserved = usize::from(self.config.show_status);

        self.viewport.width = width;
        self.viewport.height = height.saturating_sub(reserved).max(1);
        self.scroll();
    }
}

/*

===============================
===== DISPATCH ================
===============================

*/

impl Session {
    /// Handles one decoded key.
    ///
    /// Rejected edits are logged and leave the document as it was; they never
    /// stop the loop.
    pub fn dispatch(&mut self, key: crate::key::KeyEvent) -> Outcome {
        use crate::key::KeyEvent;

        let result = match key {
            KeyEvent::Quit => return Outcome::Quit,
            KeyEvent::Save => {
                log::warn!("save requested but saving is not supported");

                return Outcome::SaveUnsupported;
            }
            KeyEvent::Byte(byte) => self.insert_byte(byte),
            KeyEvent::Enter => self.insert_byte(b'\n'),
            KeyEvent::Backspace => self.backspace().map(|_| ()),
            KeyEvent::Delete => self.delete_forward().map(|_| ()),
            KeyEvent::Arrow(direction) => {
                self.cursor.move_to(direction, &self.rows);

                Ok(())
            }
            KeyEvent::Home => {
                self.cursor.home(&self.rows);

                Ok(())
            }
            KeyEvent::End => {
                self.cursor.end(&self.rows);

                Ok(())
            }
            KeyEvent::PageUp | KeyEvent::PageDown => {
                self.page(key == KeyEvent::PageDown);

                Ok(())
            }
            KeyEvent::Undo => {
                self.undo();

                Ok(())
            }
            KeyEvent::Redo => {
                self.redo();

                Ok(())
            }
            KeyEvent::ModeToggle => {
                self.mode = self.mode.toggled();
                log::debug!("mode is now {}", self.mode);

                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("ignored {key:?}: {e}");
        }

        self.scroll();

        Outcome::Continue
    }

    fn checkpoint(&mut self) {
        self.history.record_checkpoint(&self.table, self.cursor);
    }

    fn rebuild_rows(&mut self) {
        self.rows = editor_core::line_index::RowIndex::rebuild(&self.table);
    }
}

/*

==============================
===== EDITING ================
==============================

*/

impl Session {
    /// Inserts `byte` at the cursor and moves past it. A newline moves the
    /// cursor to the start of the new line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not resolve to a valid offset; no
    /// checkpoint is recorded in that case.
    pub fn insert_byte(&mut self, byte: u8) -> crate::errors::SessionResult<()> {
        let offset = self.cursor.offset(&self.rows)?;
        let len = self.table.len();

        if offset > len {
            return Err(editor_core::errors::EditError::OutOfRange { offset, len }.into());
        }

        self.checkpoint();
        self.table.insert_at(offset, byte)?;
        self.rebuild_rows();

        if byte == b'\n' {
            self.cursor = editor_core::cursor::Cursor::at(self.cursor.row + 1, 0, &self.rows);
        } else {
            self.cursor.advance(&self.rows);
        }

        Ok(())
    }

    /// Deletes the byte before the cursor, joining lines at column 0.
    /// Returns `false` at the start of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not resolve to a valid offset.
    pub fn backspace(&mut self) -> crate::errors::SessionResult<bool> {
        if self.cursor.row == 0 && self.cursor.column == 0 {
            return Ok(false);
        }

        let offset = self.cursor.offset(&self.rows)?;
        let (row, column) = if self.cursor.column > 0 {
            (self.cursor.row, self.cursor.column - 1)
        } else {
            let row = self.cursor.row - 1;

            (row, self.rows.row_len(row))
        };

        self.delete_checked(offset - 1)?;
        self.cursor = editor_core::cursor::Cursor::at(row, column, &self.rows);

        Ok(true)
    }

    /// Deletes the byte under the cursor. Returns `false` at the end of the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor does not resolve to a valid offset.
    pub fn delete_forward(&mut self) -> crate::errors::SessionResult<bool> {
        let offset = self.cursor.offset(&self.rows)?;

        if offset >= self.table.len() {
            return Ok(false);
        }

        self.delete_checked(offset)?;
        self.cursor.clamp(&self.rows);

        Ok(true)
    }

    fn delete_checked(&mut self, offset: usize) -> crate::errors::SessionResult<()> {
        let len = self.table.len();

        if offset >= len {
            return Err(editor_core::errors::EditError::OutOfRange { offset, len }.into());
        }

        self.checkpoint();
        self.table.delete_at(offset)?;
        self.rebuild_rows();

        Ok(())
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(cursor) = self.history.undo(&mut self.table, self.cursor) else {
            return false;
        };

        self.restore_cursor(cursor);

        true
    }

    /// Returns `false` when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(cursor) = self.history.redo(&mut self.table, self.cursor) else {
            return false;
        };

        self.restore_cursor(cursor);

        true
    }

    fn restore_cursor(&mut self, cursor: editor_core::cursor::Cursor) {
        self.rebuild_rows();
        self.cursor = cursor;
        self.cursor.clamp(&self.rows);
    }
}

/*

==============================
===== VIEWPORT & FRAME =======
==============================

*/

impl Session {
    /// Jumps to the top (or bottom) row of the viewport, then moves a
    /// further screenful in the same direction.
    fn page(&mut self, down: bool) {
        let height = self.viewport.height;
        let direction = if down {
            self.cursor.row = (self.viewport.row_offset + height - 1).min(self.rows.last_row());
            editor_core::enums::Direction::Down
        } else {
            self.cursor.row = self.viewport.row_offset;
            editor_core::enums::Direction::Up
        };

        self.cursor.clamp(&self.rows);

        for _ in 0..height {
            self.cursor.move_to(direction, &self.rows);
        }
    }

    /// Keeps the cursor row inside the viewport, `scrolloff` rows from either
    /// edge where possible.
    fn scroll(&mut self) {
        let visible = self.viewport.height.max(1);
        let scrolloff = self.config.scrolloff.min(visible.saturating_sub(1) / 2);
        let row = self.cursor.row;
        let top = self.viewport.row_offset + scrolloff;
        let bottom = self.viewport.row_offset + visible - 1 - scrolloff;

        if row < top {
            self.viewport.row_offset = row.saturating_sub(scrolloff);
        } else if row > bottom {
            self.viewport.row_offset = row + scrolloff + 1 - visible;
        }

        let max_offset = self.rows.last_row();

        self.viewport.row_offset = self.viewport.row_offset.min(max_offset);
    }

    /// Materialises the viewport for the terminal front end.
    #[must_use]
    pub fn frame(&self) -> crate::frame::Frame {
        let content = self.table.materialize();
        let tab_stop = self.config.tab_stop;
        let lines = content
            .split(|b| *b == b'\n')
            .skip(self.viewport.row_offset)
            .take(self.viewport.height)
            .map(|line| crate::frame::expand_line(line, tab_stop, self.viewport.width))
            .collect();
        let status = self.config.show_status.then(|| {
            format!(
                "{} | Ln {}, Col {} | {} pieces | undo {} redo {}",
                self.mode,
                self.cursor.row + 1,
                self.cursor.column + 1,
                self.table.pieces().len(),
                self.history.undo_depth(),
                self.history.redo_depth(),
            )
        });

        crate::frame::Frame {
            lines,
            cursor_row: self.cursor.row.saturating_sub(self.viewport.row_offset),
            cursor_column: self.cursor.render_column(&self.rows, tab_stop),
            height: self.viewport.height,
            width: self.viewport.width,
            status,
            welcome: self.table.is_empty().then(crate::frame::welcome_message),
        }
    }
}
