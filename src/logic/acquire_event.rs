use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{game_states::dispose_stock_state::Disbursement, hotel_data::Hotel, tile::Tile};

/// What a played tile did to the board.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileOutcome {
    Lonely,
    GrewHotel { hotel: Hotel },
    /// A create_hotel decision is now pending.
    FoundsHotel,
    /// Equal-sized hotels collided; the player must pick the survivor.
    ChooseSurvivor { choices: Vec<Hotel> },
    Merged { survivor: Hotel, defunct: Vec<Hotel> },
}

// This represents what the "game" tells everyone after a successful move.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        starting_tiles: BTreeMap<Tile, String>,
    },
    TilePlayed {
        player: String,
        tile: Tile,
        outcome: TileOutcome,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        stock_market_tiles: BTreeMap<Hotel, Tile>,
    },
    HotelCreated {
        player: String,
        hotel: Hotel,
        tiles: Vec<Tile>,
        founder_share: bool,
    },
    SurvivorChosen {
        player: String,
        survivor: Hotel,
        defunct: Vec<Hotel>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        stock_market_tiles: BTreeMap<Hotel, Tile>,
    },
    SharesDisbursed {
        player: String,
        disbursement: Disbursement,
        survivor: Hotel,
        merge_complete: bool,
    },
    SharesPurchased {
        player: String,
        shares: BTreeMap<Hotel, u32>,
        cost: u32,
    },
    GameOver {
        winners: Vec<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        stock_market_tiles: BTreeMap<Hotel, Tile>,
    },
    LeftGame {
        player: String,
    },
}

impl GameEvent {
    /// The player whose move produced this event, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            GameEvent::TilePlayed { player, .. }
            | GameEvent::HotelCreated { player, .. }
            | GameEvent::SurvivorChosen { player, .. }
            | GameEvent::SharesDisbursed { player, .. }
            | GameEvent::SharesPurchased { player, .. }
            | GameEvent::LeftGame { player } => Some(player),
            GameEvent::GameStarted { .. } | GameEvent::GameOver { .. } => None,
        }
    }
}
