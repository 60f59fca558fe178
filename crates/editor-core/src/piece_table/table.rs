use std::ops::{AddAssign, SubAssign};

/// The document: two backing buffers and the piece list over them.
///
/// `added` is append-only. `added_len` is its *logical* length: undo may
/// wind it back to an earlier value, after which the next appended byte
/// reuses the tail. Physical bytes are never truncated.
#[derive(Debug)]
pub struct PieceTable {
    original: crate::piece_table::original::Original,
    added: Vec<u8>,
    added_len: usize,
    pieces: Vec<crate::piece_table::piece::Piece>,
}

/// Where an insert offset lands in the piece list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InsertSlot {
    /// Before the first piece (offset 0, or an empty list).
    Front,
    /// Exactly at the end of piece `idx`.
    After { idx: usize },
    /// Strictly inside piece `idx`, `x` bytes in.
    Within { idx: usize, x: usize },
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl PieceTable {
    /// Seeds the original buffer with `original`; the added buffer starts
    /// empty and a single piece spans the whole original buffer.
    pub fn new(original: impl Into<crate::piece_table::original::Original>) -> Self {
        let original = original.into();
        let mut pieces = Vec::new();

        if !original.is_empty() {
            pieces.push(crate::piece_table::piece::Piece::new(
                crate::enums::BufferId::Original,
                0,
                original.len(),
            ));
        }

        Self {
            original,
            added: Vec::new(),
            added_len: 0,
            pieces,
        }
    }

    /// Opens a document over `bytes`, read whole into the original buffer.
    #[must_use]
    pub fn open_file(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes.into())
    }

    /// Opens a file from disk. Non-empty files are memory-mapped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or mapped.
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if std::fs::metadata(path)?.len() == 0 {
            return Ok(Self::open_file(Vec::new()));
        }

        Ok(Self::new(io::mmap::MmapFile::open(path)?))
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl PieceTable {
    /// Logical document length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.iter().map(|piece| piece.len).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self) -> &[crate::piece_table::piece::Piece] {
        &self.pieces
    }

    /// Logical length of the added buffer.
    #[inline]
    #[must_use]
    pub fn added_len(&self) -> usize {
        self.added_len
    }

    #[inline]
    #[must_use]
    pub fn original(&self) -> &crate::piece_table::original::Original {
        &self.original
    }

    /// The bytes a piece refers to.
    ///
    /// # Panics
    ///
    /// Panics if the piece reaches past the end of its buffer, which the
    /// edit operations never produce.
    #[inline]
    #[must_use]
    pub fn slice_of(&self, piece: &crate::piece_table::piece::Piece) -> &[u8] {
        match piece.buf_id {
            crate::enums::BufferId::Original => &self.original.as_slice()[piece.range()],
            crate::enums::BufferId::Added => &self.added[piece.range()],
        }
    }

    fn locate_insert(&self, offset: usize) -> InsertSlot {
        if offset == 0 {
            return InsertSlot::Front;
        }

        let mut acc = 0usize;

        for (idx, piece) in self.pieces.iter().enumerate() {
            acc.add_assign(piece.len);

            if offset == acc {
                return InsertSlot::After { idx };
            }

            if offset < acc {
                return InsertSlot::Within {
                    idx,
                    x: offset - (acc - piece.len),
                };
            }
        }

        // Callers bounds-check against `len()` first.
        InsertSlot::After {
            idx: self.pieces.len().saturating_sub(1),
        }
    }

    /// Resolves `offset` to the piece holding that byte and the position
    /// inside it.
    fn locate(&self, mut offset: usize) -> Option<(usize, usize)> {
        for (idx, piece) in self.pieces.iter().enumerate() {
            if offset < piece.len {
                return Some((idx, offset));
            }

            offset.sub_assign(piece.len);
        }

        None
    }

    /// Writes `byte` at the logical tail of the added buffer and returns its
    /// index there.
    fn push_added(&mut self, byte: u8) -> usize {
        let at = self.added_len;

        match self.added.get_mut(at) {
            Some(slot) => *slot = byte,
            None => self.added.push(byte),
        }

        self.added_len.add_assign(1);

        at
    }

    /// A piece can grow in place when it ends at the logical tail of the
    /// added buffer.
    fn extends_tail(&self, piece: &crate::piece_table::piece::Piece) -> bool {
        piece.buf_id == crate::enums::BufferId::Added && piece.end() == self.added_len
    }
}

/*

=====================================
========= INSERT / DELETE  ==========
=====================================

*/

impl PieceTable {
    /// Inserts one byte at logical `offset` (`0..=len`).
    ///
    /// # Errors
    ///
    /// [`crate::errors::EditError::OutOfRange`] when `offset > len`; the
    /// piece list is unchanged.
    pub fn insert_at(&mut self, offset: usize, byte: u8) -> crate::errors::EditResult<()> {
        let len = self.len();

        if offset > len {
            return Err(crate::errors::EditError::OutOfRange { offset, len });
        }

        match self.locate_insert(offset) {
            InsertSlot::After { idx } if self.extends_tail(&self.pieces[idx]) => {
                self.push_added(byte);
                self.pieces[idx].len.add_assign(1);
            }
            InsertSlot::After { idx } => {
                let start = self.push_added(byte);

                self.pieces
                    .insert(idx + 1, crate::piece_table::piece::Piece::added_byte(start));
            }
            InsertSlot::Front => {
                let start = self.push_added(byte);

                self.pieces
                    .insert(0, crate::piece_table::piece::Piece::added_byte(start));
            }
            InsertSlot::Within { idx, x } => {
                let piece = self.pieces[idx];
                let split = piece
                    .start
                    .checked_add(x)
                    .ok_or(crate::enums::MathError::Overflow)?;
                let start = self.push_added(byte);

                log::trace!("splitting piece {idx} at {x} for insert at {offset}");

                self.pieces.splice(
                    idx..=idx,
                    [
                        crate::piece_table::piece::Piece::new(piece.buf_id, piece.start, x),
                        crate::piece_table::piece::Piece::added_byte(start),
                        crate::piece_table::piece::Piece::new(piece.buf_id, split, piece.len - x),
                    ],
                );
            }
        }

        Ok(())
    }

    /// Removes the byte at logical `offset` (`0..len`). Only piece
    /// boundaries move; no buffer bytes are removed.
    ///
    /// # Errors
    ///
    /// [`crate::errors::EditError::OutOfRange`] when `offset >= len`; the
    /// piece list is unchanged.
    pub fn delete_at(&mut self, offset: usize) -> crate::errors::EditResult<()> {
        let Some((idx, x)) = self.locate(offset) else {
            return Err(crate::errors::EditError::OutOfRange {
                offset,
                len: self.len(),
            });
        };
        let piece = self.pieces[idx];

        if x == 0 {
            let target = &mut self.pieces[idx];

            target.start.add_assign(1);
            target.len.sub_assign(1);
        } else if x == piece.len - 1 {
            self.pieces[idx].len.sub_assign(1);
        } else {
            let right_start = piece
                .start
                .checked_add(x + 1)
                .ok_or(crate::enums::MathError::Overflow)?;

            log::trace!("splitting piece {idx} at {x} for delete at {offset}");

            self.pieces.splice(
                idx..=idx,
                [
                    crate::piece_table::piece::Piece::new(piece.buf_id, piece.start, x),
                    crate::piece_table::piece::Piece::new(
                        piece.buf_id,
                        right_start,
                        piece.len - x - 1,
                    ),
                ],
            );

            return Ok(());
        }

        if self.pieces[idx].is_empty() {
            self.pieces.remove(idx);
        }

        Ok(())
    }
}

/*

====================================
=========== SNAPSHOTS ==============
====================================

*/

impl PieceTable {
    /// Deep copy of the piece list and the added buffer's logical length.
    #[must_use]
    pub fn snapshot(&self) -> (Vec<crate::piece_table::piece::Piece>, usize) {
        (self.pieces.clone(), self.added_len)
    }

    /// Installs a previously taken snapshot.
    ///
    /// The physical added buffer keeps any bytes past `added_len`; they stay
    /// unreferenced until a redo brings them back or a new append reuses
    /// them.
    pub fn restore(&mut self, pieces: Vec<crate::piece_table::piece::Piece>, added_len: usize) {
        debug_assert!(added_len <= self.added.len());

        self.pieces = pieces;
        self.added_len = added_len;
    }
}

/*

====================================
========== MISCELLANEOUS ===========
====================================

*/

impl PieceTable {
    /// Sequential zero-copy slices that make up the document.
    pub fn iter_bytes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pieces.iter().map(move |piece| self.slice_of(piece))
    }

    /// The full logical content. O(document length) per call.
    #[must_use]
    pub fn materialize(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.len());

        for bytes in self.iter_bytes() {
            res.extend_from_slice(bytes);
        }

        res
    }

    #[must_use]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        let (idx, x) = self.locate(offset)?;
        let piece = &self.pieces[idx];

        self.slice_of(piece).get(x).copied()
    }
}

impl std::fmt::Display for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.materialize()))
    }
}

#[cfg(test)]
mod piece_table_tests {
    use crate::enums::BufferId;
    use crate::errors::EditError;
    use crate::piece_table::piece::Piece;
    use crate::piece_table::table::PieceTable;
    use std::io::Write;

    fn pt_from_str(s: &str) -> PieceTable {
        PieceTable::open_file(s.as_bytes())
    }

    #[track_caller]
    fn assert_invariants(pt: &PieceTable) {
        for piece in pt.pieces() {
            assert!(!piece.is_empty(), "zero-length piece left in list: {piece:?}");

            let limit = match piece.buf_id {
                BufferId::Original => pt.original().len(),
                BufferId::Added => pt.added_len(),
            };

            assert!(piece.end() <= limit, "piece {piece:?} past buffer end {limit}");
        }

        assert_eq!(pt.len(), pt.materialize().len());
    }

    #[test]
    fn open_file_has_single_original_piece() {
        let pt = pt_from_str("hello");

        assert_eq!(pt.len(), 5);
        assert_eq!(pt.pieces(), &[Piece::new(BufferId::Original, 0, 5)]);
        assert_eq!(pt.added_len(), 0);
    }

    #[test]
    fn open_empty_has_no_pieces() {
        let pt = pt_from_str("");

        assert!(pt.is_empty());
        assert!(pt.pieces().is_empty());
        assert_eq!(pt.materialize(), b"");
    }

    #[test]
    fn insert_interior_splits_into_three() {
        let mut pt = pt_from_str("ab\ncd");

        pt.insert_at(2, b'X').unwrap();

        assert_eq!(pt.materialize(), b"abX\ncd");
        assert_eq!(
            pt.pieces(),
            &[
                Piece::new(BufferId::Original, 0, 2),
                Piece::new(BufferId::Added, 0, 1),
                Piece::new(BufferId::Original, 2, 3),
            ]
        );
        assert_invariants(&pt);
    }

    #[test]
    fn insert_then_delete_restores_content() {
        let mut pt = pt_from_str("ab\ncd");

        pt.insert_at(2, b'X').unwrap();
        pt.delete_at(2).unwrap();

        assert_eq!(pt.materialize(), b"ab\ncd");
        assert_invariants(&pt);
    }

    #[test]
    fn typing_at_end_coalesces() {
        let mut pt = pt_from_str("");

        pt.insert_at(0, b'a').unwrap();
        pt.insert_at(1, b'b').unwrap();

        assert_eq!(pt.pieces(), &[Piece::new(BufferId::Added, 0, 2)]);
        assert_eq!(pt.materialize(), b"ab");
    }

    #[test]
    fn typing_inside_original_coalesces_after_first_split() {
        let mut pt = pt_from_str("held");

        pt.insert_at(2, b'l').unwrap();
        pt.insert_at(3, b'l').unwrap();
        pt.insert_at(4, b'o').unwrap();

        assert_eq!(pt.materialize(), b"hellold");
        assert_eq!(pt.pieces().len(), 3);
        assert_eq!(pt.pieces()[1], Piece::new(BufferId::Added, 0, 3));
    }

    #[test]
    fn append_after_original_piece_adds_new_piece() {
        let mut pt = pt_from_str("abc");

        pt.insert_at(3, b'!').unwrap();

        assert_eq!(
            pt.pieces(),
            &[
                Piece::new(BufferId::Original, 0, 3),
                Piece::new(BufferId::Added, 0, 1),
            ]
        );
    }

    #[test]
    fn insert_at_front_prepends_piece() {
        let mut pt = pt_from_str("bc");

        pt.insert_at(0, b'a').unwrap();

        assert_eq!(pt.materialize(), b"abc");
        assert_eq!(pt.pieces()[0], Piece::new(BufferId::Added, 0, 1));
        assert_invariants(&pt);
    }

    #[test]
    fn added_piece_at_tail_coalesces_mid_document() {
        let mut pt = pt_from_str("");

        pt.insert_at(0, b'a').unwrap();
        pt.insert_at(0, b'b').unwrap();
        // "ba": the piece for 'b' sits first but still ends at the added tail.
        pt.insert_at(1, b'c').unwrap();

        assert_eq!(pt.materialize(), b"bca");
        assert_eq!(pt.pieces().len(), 2);
        assert_eq!(pt.pieces()[0], Piece::new(BufferId::Added, 1, 2));
        assert_invariants(&pt);
    }

    #[test]
    fn delete_first_byte_of_piece() {
        let mut pt = pt_from_str("abc");

        pt.delete_at(0).unwrap();

        assert_eq!(pt.pieces(), &[Piece::new(BufferId::Original, 1, 2)]);
        assert_eq!(pt.materialize(), b"bc");
    }

    #[test]
    fn delete_last_byte_of_piece() {
        let mut pt = pt_from_str("abc");

        pt.delete_at(2).unwrap();

        assert_eq!(pt.pieces(), &[Piece::new(BufferId::Original, 0, 2)]);
    }

    #[test]
    fn delete_interior_splits_into_two() {
        let mut pt = pt_from_str("abcde");

        pt.delete_at(2).unwrap();

        assert_eq!(
            pt.pieces(),
            &[
                Piece::new(BufferId::Original, 0, 2),
                Piece::new(BufferId::Original, 3, 2),
            ]
        );
        assert_eq!(pt.materialize(), b"abde");
    }

    #[test]
    fn delete_prunes_emptied_piece() {
        let mut pt = pt_from_str("ab");

        pt.insert_at(1, b'X').unwrap();
        pt.delete_at(1).unwrap();

        assert_eq!(pt.pieces().len(), 2);
        assert!(pt.pieces().iter().all(|p| p.buf_id == BufferId::Original));
        assert_invariants(&pt);

        pt.delete_at(0).unwrap();
        pt.delete_at(0).unwrap();

        assert!(pt.is_empty());
    }

    #[test]
    fn out_of_range_edits_leave_pieces_untouched() {
        let mut pt = pt_from_str("abc");
        let before = pt.pieces().to_vec();

        assert_eq!(
            pt.insert_at(4, b'x'),
            Err(EditError::OutOfRange { offset: 4, len: 3 })
        );
        assert_eq!(
            pt.delete_at(3),
            Err(EditError::OutOfRange { offset: 3, len: 3 })
        );
        assert_eq!(pt.pieces(), before.as_slice());
        assert_eq!(pt.added_len(), 0);
    }

    #[test]
    fn delete_on_empty_document_is_out_of_range() {
        let mut pt = pt_from_str("");

        assert_eq!(
            pt.delete_at(0),
            Err(EditError::OutOfRange { offset: 0, len: 0 })
        );
    }

    #[test]
    fn restore_rewinds_added_tail_for_reuse() {
        let mut pt = pt_from_str("");

        pt.insert_at(0, b'a').unwrap();

        let (pieces, added_len) = pt.snapshot();

        pt.insert_at(1, b'b').unwrap();
        pt.restore(pieces, added_len);

        assert_eq!(pt.materialize(), b"a");
        assert_eq!(pt.added_len(), 1);

        // The rewound tail is reused and the piece still coalesces.
        pt.insert_at(1, b'c').unwrap();

        assert_eq!(pt.materialize(), b"ac");
        assert_eq!(pt.pieces(), &[Piece::new(BufferId::Added, 0, 2)]);
    }

    #[test]
    fn byte_at_walks_pieces() {
        let mut pt = pt_from_str("ace");

        pt.insert_at(1, b'b').unwrap();
        pt.insert_at(3, b'd').unwrap();

        assert_eq!(pt.to_string(), "abcde");
        assert_eq!(pt.byte_at(3), Some(b'd'));
        assert_eq!(pt.byte_at(5), None);
    }

    #[test]
    fn open_maps_file_from_disk() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();

        temp.write_all(b"Hello from disk").unwrap();
        temp.as_file().sync_all().unwrap();

        let mut pt = PieceTable::open(temp.path()).unwrap();

        assert_eq!(pt.original().path(), Some(temp.path()));
        pt.insert_at(pt.len(), b'!').unwrap();
        assert_eq!(pt.materialize(), b"Hello from disk!");
    }

    #[test]
    fn open_empty_file_is_owned() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let pt = PieceTable::open(temp.path()).unwrap();

        assert!(pt.is_empty());
        assert_eq!(pt.original().path(), None);
    }

    mod reference_model {
        use crate::piece_table::table::PieceTable;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Insert(usize, u8),
            Delete(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (any::<usize>(), prop_oneof![Just(b'\n'), Just(b'\t'), b'a'..=b'z'])
                    .prop_map(|(at, b)| Op::Insert(at, b)),
                any::<usize>().prop_map(Op::Delete),
            ]
        }

        proptest! {
            #[test]
            fn matches_reference_vec(
                initial in proptest::collection::vec(b'a'..=b'z', 0..16),
                ops in proptest::collection::vec(op(), 0..64),
            ) {
                let mut pt = PieceTable::open_file(initial.clone());
                let mut reference = initial;

                for op in ops {
                    match op {
                        Op::Insert(at, b) => {
                            let at = at % (reference.len() + 1);

                            pt.insert_at(at, b).unwrap();
                            reference.insert(at, b);
                        }
                        Op::Delete(at) => {
                            if reference.is_empty() {
                                prop_assert!(pt.delete_at(0).is_err());
                                continue;
                            }

                            let at = at % reference.len();

                            pt.delete_at(at).unwrap();
                            reference.remove(at);
                        }
                    }

                    prop_assert_eq!(pt.materialize(), reference.clone());
                    prop_assert!(pt.pieces().iter().all(|p| p.len > 0));
                }
            }

            #[test]
            fn insert_then_delete_is_identity(
                initial in proptest::collection::vec(any::<u8>(), 0..32),
                at in any::<usize>(),
                b in any::<u8>(),
            ) {
                let mut pt = PieceTable::open_file(initial.clone());
                let at = at % (initial.len() + 1);

                pt.insert_at(at, b).unwrap();
                pt.delete_at(at).unwrap();

                prop_assert_eq!(pt.materialize(), initial);
            }
        }
    }
}
