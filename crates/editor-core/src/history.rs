/// A saved copy of the piece list and the added buffer's logical length.
///
/// `marker` carries caller state captured with the snapshot (the session
/// stores its cursor there); the core itself never looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry<M = ()> {
    pub pieces: Vec<crate::piece_table::piece::Piece>,
    pub added_len: usize,
    pub marker: M,
}

/// Linear undo/redo over full piece-list snapshots.
///
/// Recording a checkpoint always clears the redo stack. This is what keeps
/// redo sound: after an undo rewinds the added buffer's logical length, the
/// next insert reuses those tail bytes, so no retained entry may still point
/// at them.
#[derive(Debug)]
pub struct History<M = ()> {
    undo_stack: Vec<UndoEntry<M>>,
    redo_stack: Vec<UndoEntry<M>>,
}

impl<M> Default for History<M> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<M> History<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn capture(table: &crate::piece_table::table::PieceTable, marker: M) -> UndoEntry<M> {
        let (pieces, added_len) = table.snapshot();

        UndoEntry {
            pieces,
            added_len,
            marker,
        }
    }

    /// Snapshots `table` onto the undo stack and drops every redo entry.
    /// Call immediately before an undoable edit.
    pub fn record_checkpoint(&mut self, table: &crate::piece_table::table::PieceTable, marker: M) {
        let entry = Self::capture(table, marker);

        self.undo_stack.push(entry);
        self.redo_stack.clear();
    }

    /// Restores the most recent checkpoint, saving the current state for
    /// redo. Returns the restored entry's marker, or `None` (and leaves
    /// everything untouched) when there is nothing to undo.
    pub fn undo(
        &mut self,
        table: &mut crate::piece_table::table::PieceTable,
        current: M,
    ) -> Option<M> {
        let entry = self.undo_stack.pop()?;

        self.redo_stack.push(Self::capture(table, current));
        table.restore(entry.pieces, entry.added_len);

        Some(entry.marker)
    }

    /// Mirror of [`History::undo`].
    pub fn redo(
        &mut self,
        table: &mut crate::piece_table::table::PieceTable,
        current: M,
    ) -> Option<M> {
        let entry = self.redo_stack.pop()?;

        self.undo_stack.push(Self::capture(table, current));
        table.restore(entry.pieces, entry.added_len);

        Some(entry.marker)
    }

    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn undo_stack(&self) -> &[UndoEntry<M>] {
        &self.undo_stack
    }
}
