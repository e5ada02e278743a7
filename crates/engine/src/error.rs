use std::fmt;

/// Failures of grid and codec operations.
///
/// All of these are local and recoverable: operations work on a clone and
/// return the error before anything is committed, so the caller's grid is
/// never left half-mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Selection does not form an exact axis-aligned rectangle.
    NonRectangularSelection,
    /// Operation needs exactly one selected coordinate.
    NotASingleCell,
    /// Coordinate names a slot hidden under a merged region.
    HiddenSlot { row: usize, col: usize },
    /// Split target is a plain unit cell.
    NotMerged,
    /// Merge needs at least two covered cells.
    SelectionTooSmall,
    /// Wire data could not be decoded.
    MalformedInput(String),
    /// An absent slot has no covering master. Indicates a broken grid;
    /// unreachable while the coverage invariants hold.
    NoOwningMaster { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col } => {
                write!(f, "coordinate ({row}, {col}) is outside the grid")
            }
            Self::NonRectangularSelection => {
                write!(f, "selection is not a contiguous rectangle")
            }
            Self::NotASingleCell => write!(f, "exactly one cell must be selected"),
            Self::HiddenSlot { row, col } => {
                write!(f, "({row}, {col}) is a hidden slot of a merged cell")
            }
            Self::NotMerged => write!(f, "selected cell is not merged"),
            Self::SelectionTooSmall => {
                write!(f, "at least two cells must be selected to merge")
            }
            Self::MalformedInput(msg) => write!(f, "malformed input: {msg}"),
            Self::NoOwningMaster { row, col } => {
                write!(f, "absent slot ({row}, {col}) has no owning master")
            }
        }
    }
}

impl std::error::Error for GridError {}
