use thiserror::Error;

/// A coordinate fell outside the board. Movement never produces one, so
/// seeing it means an invariant broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("tile ({x}, {y}) is outside the maze")]
    OutOfBounds { x: i32, y: i32 },
}
