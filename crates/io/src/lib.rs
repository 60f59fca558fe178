/// # IO Module.
///
/// Read-only file access for the original buffer of a document.
pub mod mmap;
