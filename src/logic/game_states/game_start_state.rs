use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use tracing::{info, instrument};

use crate::logic::{
    acquire_game::AcquireGame,
    acquire_request::AcquireRequest,
    error::{GameError, GameResult},
    game_board::GameBoard,
    hotel_data::Hotel,
    tile::Tile,
};

/// Tracks the starting-tile draw: each player draws one tile, and whoever
/// draws the lowest goes first.
pub struct GameStartState {
    pub player_with_winning_tile: Option<String>,
    pub winning_tile: Option<Tile>,
    pub draws: BTreeMap<Tile, String>,
}

impl GameStartState {
    pub fn new() -> Self {
        GameStartState {
            player_with_winning_tile: None,
            winning_tile: None,
            draws: BTreeMap::new(),
        }
    }

    // call this as each player draws their starting tile
    pub fn player_drew_tile(&mut self, player: &str, tile: Tile) {
        if self.winning_tile.map_or(true, |winning| tile < winning) {
            self.winning_tile = Some(tile);
            self.player_with_winning_tile = Some(player.to_string());
        }
        self.draws.insert(tile, player.to_string());
    }
}

impl Default for GameStartState {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquireGame {
    /// One-time setup. Returns which player drew which starting tile.
    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn start(&mut self) -> GameResult<BTreeMap<Tile, String>> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        self.board = GameBoard::new();
        self.tile_bag = Tile::all().collect();
        self.tile_bag.shuffle(&mut self.rng);
        self.dead_tiles.clear();
        self.action_queue.clear();
        self.merge_info = None;

        let mut start_state = GameStartState::new();
        for player in &self.players {
            let Some(tile) = self.tile_bag.pop() else {
                break;
            };
            self.board.place_lonely_tile(tile);
            start_state.player_drew_tile(&player.name, tile);
        }

        self.players.shuffle(&mut self.rng);
        if let Some(first) = &start_state.player_with_winning_tile {
            if let Some(index) = self.players.iter().position(|p| &p.name == first) {
                let starter = self.players.remove(index);
                self.players.insert(0, starter);
            }
        }

        let rack_size = self.options.rack_size;
        let starting_cash = self.options.starting_cash;
        for player in self.players.iter_mut() {
            let split = self.tile_bag.len().saturating_sub(rack_size);
            player.tiles = self.tile_bag.split_off(split);
            player.stocks = [0; Hotel::count()];
            player.cash = starting_cash;
        }

        let starter = self.players[0].name.clone();
        self.push_action(AcquireRequest::PlayTile {
            player: starter.clone(),
        });
        self.started = true;
        info!(
            players = self.players.len(),
            %starter,
            tile = ?start_state.winning_tile,
            "game started"
        );

        Ok(start_state.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{
        acquire_constants::TILE_COUNT, acquire_game::GameOptions, acquire_game_state::ActionKind,
        tile::t,
    };

    fn game_of(names: &[&str]) -> AcquireGame {
        let mut game = AcquireGame::with_options(GameOptions::builder().seed(42).build());
        for name in names {
            game.add_player(name).unwrap();
        }
        game
    }

    #[test]
    fn test_lowest_tile_wins_the_draw() {
        let mut state = GameStartState::new();
        state.player_drew_tile("A", t("2B"));
        state.player_drew_tile("B", t("10A"));
        state.player_drew_tile("C", t("3A"));
        assert_eq!(state.winning_tile, Some(t("3A")));
        assert_eq!(state.player_with_winning_tile.as_deref(), Some("C"));
        assert_eq!(state.draws.len(), 3);
    }

    #[test]
    fn test_start_three_players() {
        let mut game = game_of(&["A", "B", "C"]);
        let draws = game.start().unwrap();

        assert!(game.is_started());
        for player in game.players() {
            assert_eq!(player.tiles.len(), 6);
            assert_eq!(player.cash, 6000);
        }
        let first = &game.players()[0];
        assert_eq!(
            game.next_action(),
            Some(&AcquireRequest::PlayTile {
                player: first.name.clone()
            })
        );
        assert_eq!(game.next_action().map(|a| a.kind()), Some(ActionKind::PlayTile));

        // the first player drew the lowest tile, and every draw sits on the board
        let (lowest, drawer) = draws.iter().next().unwrap();
        assert_eq!(drawer, &first.name);
        assert!(draws.keys().all(|tile| game.board().is_lonely(*tile)));
        assert!(game.board().is_lonely(*lowest));
    }

    #[test]
    fn test_start_conserves_tiles() {
        let mut game = game_of(&["A", "B", "C", "D"]);
        game.start().unwrap();
        let on_racks: usize = game.players().iter().map(|p| p.tiles.len()).sum();
        assert_eq!(
            game.tile_bag().len() + on_racks + game.board().lonely_tiles().len(),
            TILE_COUNT
        );
    }

    #[test]
    fn test_start_needs_players_and_only_once() {
        let mut game = AcquireGame::new();
        assert_eq!(game.start(), Err(GameError::NoPlayers));

        let mut game = game_of(&["A"]);
        game.start().unwrap();
        assert_eq!(game.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_seed_fixes_the_deal() {
        let mut first = game_of(&["A", "B"]);
        let mut second = game_of(&["A", "B"]);
        assert_eq!(first.start().unwrap(), second.start().unwrap());
        assert_eq!(first.players(), second.players());
    }
}
