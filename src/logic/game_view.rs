use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    acquire_game::AcquireGame, acquire_request::AcquireRequest, hotel_data::Hotel, tile::Tile,
};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub cash: u32,
    pub shares: BTreeMap<Hotel, u32>,
    pub rack: Vec<Tile>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct HotelView {
    pub name: Hotel,
    pub tier: usize,
    pub tiles: Vec<Tile>,
    pub price: u32,
    pub bank_shares: u32,
    pub safe: bool,
}

/// Everything a renderer needs to redraw the game between moves.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub number: Option<u32>,
    pub players: Vec<PlayerView>,
    pub hotels: Vec<HotelView>,
    pub lonely_tiles: Vec<Tile>,
    pub tiles_in_bag: usize,
    pub next_action: Option<AcquireRequest>,
    pub active_player: Option<String>,
    pub started: bool,
    pub ended: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub winners: Vec<String>,
}

impl AcquireGame {
    pub fn view(&self) -> GameView {
        let players = self
            .players
            .iter()
            .map(|player| PlayerView {
                name: player.name.clone(),
                cash: player.cash,
                shares: Hotel::iter()
                    .filter(|hotel| player.shares(*hotel) > 0)
                    .map(|hotel| (hotel, player.shares(hotel)))
                    .collect(),
                rack: player.tiles.clone(),
            })
            .collect();

        let hotels = Hotel::iter()
            .map(|hotel| HotelView {
                name: hotel,
                tier: hotel.tier(),
                tiles: self.board.hotel_tiles(hotel),
                price: self.share_price(hotel),
                bank_shares: self.bank_shares(hotel),
                safe: self.board.is_safe(hotel),
            })
            .collect();

        let winners = if self.ended {
            self.winners().into_iter().map(|p| p.name.clone()).collect()
        } else {
            Vec::new()
        };

        GameView {
            number: self.options.number,
            players,
            hotels,
            lonely_tiles: self.board.lonely_tiles(),
            tiles_in_bag: self.tile_bag.len(),
            next_action: self.next_action().cloned(),
            active_player: self.active_player().map(|p| p.name.clone()),
            started: self.started,
            ended: self.ended,
            winners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{
        acquire_game::tests::{place, scenario},
        game_board::Cell,
        tile::t,
    };

    #[test]
    fn test_view_reflects_board_and_bank() {
        let mut game = scenario(&["A", "B", "C"]);
        place(&mut game, Cell::Hotel(Hotel::Zeta), &["9C", "9D"]);
        place(&mut game, Cell::Lonely, &["1A"]);
        *game.players[0].shares_mut(Hotel::Zeta) = 4;
        game.push_action(AcquireRequest::Purchase {
            player: "A".to_string(),
        });

        let view = game.view();
        assert_eq!(view.players[0].shares, BTreeMap::from([(Hotel::Zeta, 4)]));
        assert!(view.players[1].shares.is_empty());
        let zeta = &view.hotels[usize::from(Hotel::Zeta)];
        assert_eq!(zeta.tiles, vec![t("9C"), t("9D")]);
        assert_eq!(zeta.price, 200);
        assert_eq!(zeta.bank_shares, 21);
        assert!(!zeta.safe);
        assert_eq!(view.lonely_tiles, vec![t("1A")]);
        assert_eq!(view.active_player.as_deref(), Some("A"));
        assert!(view.winners.is_empty());
    }

    #[test]
    fn test_view_serializes() {
        let game = scenario(&["A", "B"]);
        let json = serde_json::to_value(game.view()).unwrap();
        assert_eq!(json["started"], serde_json::json!(true));
        assert_eq!(json["hotels"][0]["name"], serde_json::json!("sackson"));
        assert!(json.get("winners").is_none());
    }
}
