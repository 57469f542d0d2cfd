use thiserror::Error;

use super::{acquire_game_state::ActionKind, hotel_data::Hotel, tile::Tile};

pub type GameResult<T> = Result<T, GameError>;

/// Misuse of the game lifecycle, plus every rule violation a player can
/// commit (wrapped in [`GameError::PlayNotAllowed`]).
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum GameError {
    #[error("cannot start a game with no players")]
    NoPlayers,
    #[error("game already started")]
    AlreadyStarted,
    #[error("game has not started")]
    NotStarted,
    #[error("no player named {0} in this game")]
    UnknownPlayer(String),
    #[error(transparent)]
    PlayNotAllowed(#[from] PlayNotAllowed),
}

impl GameError {
    pub fn is_play_not_allowed(&self) -> bool {
        matches!(self, GameError::PlayNotAllowed(_))
    }
}

/// A routine rejection of a player's input. The game is left untouched.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum PlayNotAllowed {
    #[error("need {expected} to {action}, not {actual}")]
    WrongPlayer {
        expected: String,
        actual: String,
        action: ActionKind,
    },
    #[error("next action is {expected}, not {requested}")]
    WrongAction {
        expected: ActionKind,
        requested: ActionKind,
    },
    #[error("must play tiles from tile rack, {0} isn't there")]
    TileNotInRack(Tile),
    #[error("tile {0} is unplayable")]
    UnplayableTile(Tile),
    #[error("cannot create hotel when all are already on board")]
    NoHotelAvailable,
    #[error("must create hotel that is off the board, {0} is on it")]
    HotelOnBoard(Hotel),
    #[error("survivor must be one of {choices:?}, not {chosen}")]
    NotASurvivor { choices: Vec<Hotel>, chosen: Hotel },
    #[error("expected disbursement of {expected} shares, not {actual} shares")]
    WrongDisbursement { expected: Hotel, actual: Hotel },
    #[error("cannot disburse {requested} shares of {hotel}, only {held} held")]
    DisbursingTooMany {
        hotel: Hotel,
        requested: u32,
        held: u32,
    },
    #[error("shares can only be traded two for one, {0} is odd")]
    OddTrade(u32),
    #[error("not enough shares of {0} in the bank")]
    NotEnoughBankShares(Hotel),
    #[error("can only purchase at most three shares")]
    TooManyShares,
    #[error("{0} is not on the board")]
    HotelNotOnBoard(Hotel),
    #[error("cannot afford purchases costing ${cost} with ${cash}")]
    CannotAfford { cost: u32, cash: u32 },
    #[error("game is already over")]
    GameOver,
    #[error("neither end-game condition met")]
    CannotEnd,
}

impl PlayNotAllowed {
    /// Short heading for the error report sent back to the player.
    pub fn title(&self) -> &'static str {
        match self {
            PlayNotAllowed::WrongPlayer { .. } => "Not your turn",
            PlayNotAllowed::WrongAction { .. } => "Unexpected move",
            PlayNotAllowed::TileNotInRack(_) | PlayNotAllowed::UnplayableTile(_) => {
                "Illegal tile"
            }
            PlayNotAllowed::NoHotelAvailable | PlayNotAllowed::HotelOnBoard(_) => {
                "Hotel unavailable"
            }
            PlayNotAllowed::NotASurvivor { .. } => "Invalid survivor",
            PlayNotAllowed::WrongDisbursement { .. }
            | PlayNotAllowed::DisbursingTooMany { .. }
            | PlayNotAllowed::OddTrade(_) => "Invalid disbursement",
            PlayNotAllowed::NotEnoughBankShares(_) | PlayNotAllowed::TooManyShares => {
                "Shares unavailable"
            }
            PlayNotAllowed::HotelNotOnBoard(_) => "Hotel not on board",
            PlayNotAllowed::CannotAfford { .. } => "Insufficient funds",
            PlayNotAllowed::GameOver | PlayNotAllowed::CannotEnd => "Cannot end game",
        }
    }

    /// Longer explanation, suitable for the body of the report.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        if let Some(first) = detail.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        detail.push('.');
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_reads_as_a_sentence() {
        let err = PlayNotAllowed::NotEnoughBankShares(Hotel::Zeta);
        assert_eq!(err.title(), "Shares unavailable");
        assert_eq!(err.detail(), "Not enough shares of zeta in the bank.");
    }

    #[test]
    fn test_play_not_allowed_converts() {
        let err: GameError = PlayNotAllowed::CannotEnd.into();
        assert!(err.is_play_not_allowed());
        assert!(!GameError::NoPlayers.is_play_not_allowed());
        assert_eq!(err.to_string(), "neither end-game condition met");
    }
}
