/// Which backing store a piece reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferId {
    Original,
    Added,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// Represents the `None` case from checked math
    #[error("arithmetic overflow")]
    Overflow,
    #[error("index out of bounds (index={0})")]
    OutOfBounds(usize),
}
