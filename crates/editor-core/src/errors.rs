pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The offset does not name a valid insert (`0..=len`) or delete
    /// (`0..len`) position. The piece list is left untouched.
    #[error("offset {offset} is out of range for a document of {len} bytes")]
    OutOfRange { offset: usize, len: usize },
    #[error(transparent)]
    Math(#[from] crate::enums::MathError),
}
