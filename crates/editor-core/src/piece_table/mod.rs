/// # Piece Table Module.
///
/// The document is an immutable original buffer, an append-only added
/// buffer, and an ordered list of pieces pointing into either of them.
/// Concatenating every piece's slice, in order, yields the document.
pub mod original;
pub mod piece;
pub mod table;
