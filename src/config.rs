use core::time::Duration;

pub const BOARD_SIZE: usize = 10;

/// Required fleet as `(length, count)`, longest first.
pub const FLEET: [(usize, usize); 4] = [(4, 1), (3, 2), (2, 3), (1, 4)];

pub const NUM_SHIPS: usize = 1 + 2 + 3 + 4;

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 * 2 + 2 * 3 + 4;

/// Random anchor/direction draws allowed for a single ship before the
/// generator gives up on the current layout.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Whole-fleet restarts before generation is reported as failed.
pub const MAX_GENERATION_RESTARTS: usize = 100;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Ship lengths of the standard fleet, longest first.
pub fn fleet_lengths() -> impl Iterator<Item = usize> {
    FLEET
        .iter()
        .flat_map(|&(len, count)| core::iter::repeat(len).take(count))
}

/// Which side opens the game with the `start` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sends the first shot with no result attached.
    Starter,
    /// Waits for the peer's `start` message.
    Responder,
}

/// Per-session settings handed to `PlayerNode::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub role: Role,
    /// How long to wait for one line from the peer.
    pub read_timeout: Duration,
    /// Consecutive transport failures tolerated before the game is abandoned.
    pub max_consecutive_failures: u32,
}

impl SessionConfig {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            read_timeout: DEFAULT_READ_TIMEOUT,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }
}
