use std::fmt;

use serde::{Deserialize, Serialize};

/// The decisions a game can be waiting on. Exactly one of them, for exactly
/// one player, is legal at any moment: whatever heads the action queue.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlayTile,
    CreateHotel,
    ChooseSurvivor,
    DisburseShares,
    Purchase,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::PlayTile => "play_tile",
            ActionKind::CreateHotel => "create_hotel",
            ActionKind::ChooseSurvivor => "choose_survivor",
            ActionKind::DisburseShares => "disburse_shares",
            ActionKind::Purchase => "purchase",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
