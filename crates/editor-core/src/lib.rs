//! Piece-table text storage for the terminal editor.
//!
//! - [`piece_table`] holds the original and added buffers and the ordered
//!   piece list, and splices it one byte at a time.
//! - [`history`] snapshots the piece list for linear undo/redo.
//! - [`line_index`] derives per-line metrics from the materialised document.
//! - [`cursor`] maps a (column, row) pair onto document offsets and screen
//!   columns.
pub mod cursor;
pub mod enums;
pub mod errors;
pub mod history;
pub mod line_index;
pub mod piece_table;
