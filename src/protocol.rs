//! Line-oriented wire messages exchanged between the two players.
//!
//! Every message is one UTF-8 line of the form `<result>;<coordinate>`.
//! The result reports the outcome of the peer's previous shot and the
//! coordinate is the sender's next shot, so each line is both an answer
//! and a move. The opening line uses the result `start`.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::common::{ProtocolError, ShotOutcome};
use crate::coord::Coord;

pub const START: &str = "start";
pub const MISS: &str = "miss";
pub const HIT: &str = "hit";
pub const HIT_SUNK: &str = "hit-sunk";
pub const GAME_OVER: &str = "game-over";

/// Field separator.
pub const SEPARATOR: char = ';';

/// Messages exchanged between peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Opening move; nothing to report yet.
    Start { shot: Coord },
    /// Outcome of the peer's last shot plus our next shot.
    ///
    /// With `ShotOutcome::GameOver` the receiver has won and must stop; the
    /// coordinate is carried but never fired.
    Reply { outcome: ShotOutcome, shot: Coord },
}

impl Message {
    /// The coordinate carried by this message.
    pub fn shot(&self) -> Coord {
        match self {
            Message::Start { shot } | Message::Reply { shot, .. } => *shot,
        }
    }

    /// Outcome being reported, `None` for `start`.
    pub fn outcome(&self) -> Option<ShotOutcome> {
        match self {
            Message::Start { .. } => None,
            Message::Reply { outcome, .. } => Some(*outcome),
        }
    }

    /// Whether this message ends the game.
    pub fn is_game_over(&self) -> bool {
        self.outcome() == Some(ShotOutcome::GameOver)
    }

    /// Wire form without the line terminator.
    pub fn encode(&self) -> String {
        alloc::format!("{}", self)
    }
}

/// Wire token for an outcome.
pub fn outcome_token(outcome: ShotOutcome) -> &'static str {
    match outcome {
        ShotOutcome::Miss => MISS,
        ShotOutcome::Hit => HIT,
        ShotOutcome::HitSunk => HIT_SUNK,
        ShotOutcome::GameOver => GAME_OVER,
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Start { shot } => write!(f, "{}{}{}", START, SEPARATOR, shot),
            Message::Reply { outcome, shot } => {
                write!(f, "{}{}{}", outcome_token(*outcome), SEPARATOR, shot)
            }
        }
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.split(SEPARATOR);
        let (Some(result), Some(coord), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ProtocolError::MalformedMessage);
        };
        let shot: Coord = coord.parse()?;
        let message = match result.trim() {
            START => Message::Start { shot },
            MISS => Message::Reply {
                outcome: ShotOutcome::Miss,
                shot,
            },
            HIT => Message::Reply {
                outcome: ShotOutcome::Hit,
                shot,
            },
            HIT_SUNK => Message::Reply {
                outcome: ShotOutcome::HitSunk,
                shot,
            },
            GAME_OVER => Message::Reply {
                outcome: ShotOutcome::GameOver,
                shot,
            },
            _ => return Err(ProtocolError::UnknownResult),
        };
        Ok(message)
    }
}
