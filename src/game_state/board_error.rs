use std::error::Error;
use std::fmt;

pub type BoardResult<T> = Result<T, BoardError>;

/// Errors raised by the board layer. All of these are recoverable and are
/// reported to the caller; none should terminate the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Move color does not match the side to move, or the destination is
    /// not in the legal-move mask.
    IllegalMove,
    /// Coordinates outside the 8x8 grid.
    OutOfBounds,
    /// Direct placement onto an occupied square.
    SquareOccupied,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::IllegalMove => write!(f, "illegal move"),
            BoardError::OutOfBounds => write!(f, "coordinate outside the board"),
            BoardError::SquareOccupied => write!(f, "square is already occupied"),
        }
    }
}

impl Error for BoardError {}
