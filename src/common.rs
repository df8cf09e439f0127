//! Common types for Battleships: shot outcomes and error enums.

use core::fmt;

/// Classification of one incoming shot against our own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotOutcome {
    /// Shot landed in water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot completed a ship; other ships remain.
    HitSunk,
    /// Shot completed the last ship afloat. The defender has lost.
    GameOver,
}

impl ShotOutcome {
    /// A whole ship went down with this shot.
    pub fn is_sunk(self) -> bool {
        matches!(self, ShotOutcome::HitSunk | ShotOutcome::GameOver)
    }
}

/// Malformed coordinate text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordError {
    /// No input at all.
    Empty,
    /// Leading character is not a row letter `A`-`J`.
    BadRow(char),
    /// Column part is not a number `1`-`10`.
    BadColumn,
    /// Zero-based row/column outside the board.
    OutOfRange { row: usize, col: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::Empty => write!(f, "Empty coordinate"),
            CoordError::BadRow(ch) => write!(f, "Invalid row '{}' - must be a letter A-J", ch),
            CoordError::BadColumn => write!(f, "Invalid column - must be a number 1-10"),
            CoordError::OutOfRange { row, col } => {
                write!(f, "Coordinate ({}, {}) is off the board", row, col)
            }
        }
    }
}

/// Errors returned when loading or validating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Map does not contain exactly 100 cells after stripping whitespace.
    InvalidLength(usize),
    /// Map contains a character other than `#` or `.`.
    InvalidCell { index: usize, found: char },
    /// Ship lengths differ from the standard fleet.
    FleetMismatch,
    /// Two distinct ships touch, possibly diagonally.
    ShipsTouching,
    /// A ship is not a single straight line.
    ShipNotStraight,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidLength(n) => {
                write!(f, "Board map must have 100 cells, found {}", n)
            }
            BoardError::InvalidCell { index, found } => {
                write!(f, "Unexpected '{}' at cell {} (expected '#' or '.')", found, index)
            }
            BoardError::FleetMismatch => write!(
                f,
                "Fleet must be one 4-cell, two 3-cell, three 2-cell and four 1-cell ships"
            ),
            BoardError::ShipsTouching => write!(f, "Ships must not touch, even diagonally"),
            BoardError::ShipNotStraight => write!(f, "Ship is not a straight line"),
        }
    }
}

/// Failure to produce a random layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// No valid spot found for a ship within the attempt budget.
    PlacementExhausted { length: usize, attempts: usize },
    /// Every restart of the whole fleet ran out of attempts.
    Exhausted { restarts: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::PlacementExhausted { length, attempts } => write!(
                f,
                "Unable to place ship of length {} after {} attempts",
                length, attempts
            ),
            GenerateError::Exhausted { restarts } => {
                write!(f, "Unable to generate a board after {} restarts", restarts)
            }
        }
    }
}

/// Peer sent something that does not fit the turn protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Line does not split into `<result>;<coordinate>`.
    MalformedMessage,
    /// Result field is not a known token.
    UnknownResult,
    /// Coordinate field failed to parse.
    BadCoordinate(CoordError),
    /// `start` arrived when a shot result was expected.
    UnexpectedStart,
    /// A shot result arrived before we had fired anything.
    UnexpectedResult,
}

impl From<CoordError> for ProtocolError {
    fn from(err: CoordError) -> Self {
        ProtocolError::BadCoordinate(err)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedMessage => {
                write!(f, "Malformed message - expected <result>;<coordinate>")
            }
            ProtocolError::UnknownResult => write!(f, "Unknown result token"),
            ProtocolError::BadCoordinate(e) => write!(f, "Bad coordinate field: {}", e),
            ProtocolError::UnexpectedStart => write!(f, "Unexpected start message"),
            ProtocolError::UnexpectedResult => {
                write!(f, "Shot result received before any shot was sent")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for GenerateError {}
#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}
