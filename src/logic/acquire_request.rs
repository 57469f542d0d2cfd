use serde::{Deserialize, Serialize};

use super::{
    acquire_game_state::ActionKind, error::PlayNotAllowed, hotel_data::Hotel, tile::Tile,
};

// This represents what the "game" is asking for.
// Each entry names the player being asked, plus whatever the answer needs.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AcquireRequest {
    PlayTile {
        player: String,
    },
    CreateHotel {
        player: String,
        creation_tile: Tile,
    },
    ChooseSurvivor {
        player: String,
        choices: Vec<Hotel>,
        tile: Tile,
    },
    DisburseShares {
        player: String,
        hotel: Hotel,
        survivor: Hotel,
    },
    Purchase {
        player: String,
    },
}

impl AcquireRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            AcquireRequest::PlayTile { .. } => ActionKind::PlayTile,
            AcquireRequest::CreateHotel { .. } => ActionKind::CreateHotel,
            AcquireRequest::ChooseSurvivor { .. } => ActionKind::ChooseSurvivor,
            AcquireRequest::DisburseShares { .. } => ActionKind::DisburseShares,
            AcquireRequest::Purchase { .. } => ActionKind::Purchase,
        }
    }

    pub fn player(&self) -> &str {
        match self {
            AcquireRequest::PlayTile { player }
            | AcquireRequest::CreateHotel { player, .. }
            | AcquireRequest::ChooseSurvivor { player, .. }
            | AcquireRequest::DisburseShares { player, .. }
            | AcquireRequest::Purchase { player } => player,
        }
    }

    /// The rejection for asking to do `requested` while this is pending.
    pub(crate) fn wrong_action(&self, requested: ActionKind) -> PlayNotAllowed {
        PlayNotAllowed::WrongAction {
            expected: self.kind(),
            requested,
        }
    }
}
