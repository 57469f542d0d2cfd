use serde::{Deserialize, Serialize};

use super::{
    game_states::{buy_stock_state::PurchaseOrder, dispose_stock_state::Disbursement},
    hotel_data::Hotel,
    tile::Tile,
};

// This represents the response from the player
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum AcquireResponse {
    StartGame,
    PlayTile(Tile),
    CreateHotel(Hotel),
    ChooseSurvivor(Hotel),
    DisburseShares(Disbursement),
    Purchase(PurchaseOrder),
    LeaveGame,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct AcquirePlayerResponse {
    pub player: String,
    pub response: AcquireResponse,
}

impl AcquirePlayerResponse {
    pub fn new(response: AcquireResponse, player: &str) -> Self {
        AcquirePlayerResponse {
            response,
            player: player.to_string(),
        }
    }
}
