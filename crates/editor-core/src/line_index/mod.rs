/// # Line Index Module.
///
/// Per-line metrics derived from the materialised document. The index is a
/// cache: it is rebuilt in full after every edit and never patched.
pub mod row;
pub mod rows;

pub use row::Row;
pub use rows::RowIndex;
