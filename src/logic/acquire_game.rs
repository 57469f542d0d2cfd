use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

use super::{
    acquire_constants::{RACK_SIZE, SHARES_PER_HOTEL, STARTING_CASH},
    acquire_event::{GameEvent, TileOutcome},
    acquire_game_state::ActionKind,
    acquire_request::AcquireRequest,
    acquire_response::{AcquirePlayerResponse, AcquireResponse},
    error::{GameError, GameResult, PlayNotAllowed},
    game_board::GameBoard,
    game_states::merge_state::MergeInfo,
    game_view::GameView,
    hotel_data::Hotel,
    player::Player,
    tile::Tile,
};

#[derive(Debug, Clone, TypedBuilder)]
pub struct GameOptions {
    #[builder(default = STARTING_CASH)]
    pub starting_cash: u32,
    #[builder(default = RACK_SIZE)]
    pub rack_size: usize,
    /// Fixes the shuffle and every other random draw, for replays and tests.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
    /// Identifies the game in whatever list the host keeps.
    #[builder(default, setter(strip_option))]
    pub number: Option<u32>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// One game of Acquire. Callers must not run two operations on the same game
/// at once; separate games share nothing.
#[derive(Debug, Clone)]
pub struct AcquireGame {
    pub(crate) options: GameOptions,
    pub(crate) players: Vec<Player>,
    pub(crate) board: GameBoard,
    pub(crate) tile_bag: Vec<Tile>,
    /// Tiles pulled off racks or out of the bag because they can never be played.
    pub(crate) dead_tiles: Vec<Tile>,
    pub(crate) action_queue: VecDeque<AcquireRequest>,
    pub(crate) merge_info: Option<MergeInfo>,
    pub(crate) started: bool,
    pub(crate) ended: bool,
    pub(crate) rng: StdRng,
}

/// What a caller gets back from [`AcquireGame::apply`]: the facts to
/// broadcast and the state they leave behind.
#[derive(Debug, Clone)]
pub struct Update {
    pub events: Vec<GameEvent>,
    pub view: GameView,
}

impl AcquireGame {
    pub fn new() -> Self {
        Self::with_options(GameOptions::default())
    }

    pub fn with_options(options: GameOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            options,
            players: Vec::new(),
            board: GameBoard::new(),
            tile_bag: Vec::new(),
            dead_tiles: Vec::new(),
            action_queue: VecDeque::new(),
            merge_info: None,
            started: false,
            ended: false,
            rng,
        }
    }

    pub fn number(&self) -> Option<u32> {
        self.options.number
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn tile_bag(&self) -> &[Tile] {
        &self.tile_bag
    }

    pub fn dead_tiles(&self) -> &[Tile] {
        &self.dead_tiles
    }

    pub fn action_queue(&self) -> &VecDeque<AcquireRequest> {
        &self.action_queue
    }

    pub fn next_action(&self) -> Option<&AcquireRequest> {
        self.action_queue.front()
    }

    pub fn merge_info(&self) -> Option<&MergeInfo> {
        self.merge_info.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn player_named(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    pub(crate) fn player_index(&self, name: &str) -> GameResult<usize> {
        self.players
            .iter()
            .position(|player| player.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    /// The first player to join hosts the game.
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    /// Whoever must act next.
    pub fn active_player(&self) -> Option<&Player> {
        self.player_named(self.next_action()?.player())
    }

    pub fn player_after(&self, name: &str) -> Option<&Player> {
        let index = self.player_index(name).ok()?;
        self.players.get(self.index_after(index))
    }

    pub(crate) fn index_after(&self, index: usize) -> usize {
        (index + 1) % self.players.len()
    }

    /// Each player once, in turn order, beginning with `name`.
    pub fn turn_order_from(&self, name: &str) -> Vec<&Player> {
        let Ok(start) = self.player_index(name) else {
            return Vec::new();
        };
        (0..self.players.len())
            .map(|offset| &self.players[(start + offset) % self.players.len()])
            .collect()
    }

    pub fn add_player(&mut self, name: &str) -> GameResult<()> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        if self.player_named(name).is_none() {
            self.players.push(Player::new(name));
        }
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> GameResult<()> {
        if self.started && !self.ended {
            return Err(GameError::AlreadyStarted);
        }
        let index = self.player_index(name)?;
        self.players.remove(index);
        Ok(())
    }

    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn leave(&mut self, player: &str) -> GameResult<GameEvent> {
        self.remove_player(player)?;
        debug!("player left");
        Ok(GameEvent::LeftGame {
            player: player.to_string(),
        })
    }

    pub fn bank_shares(&self, hotel: Hotel) -> u32 {
        let held: u32 = self.players.iter().map(|player| player.shares(hotel)).sum();
        SHARES_PER_HOTEL.saturating_sub(held)
    }

    pub fn share_price(&self, hotel: Hotel) -> u32 {
        self.board.get_hotel_stock_price(hotel)
    }

    /// The gate in front of every rule-engine operation: the game is running
    /// and the queue head belongs to `player`. Returns the head for the
    /// caller to check its kind and read its payload.
    pub(crate) fn require_turn(&self, player: &str) -> GameResult<AcquireRequest> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        if self.ended {
            return Err(PlayNotAllowed::GameOver.into());
        }
        let head = self.next_action().ok_or(GameError::NotStarted)?;
        if head.player() != player {
            return Err(PlayNotAllowed::WrongPlayer {
                expected: head.player().to_string(),
                actual: player.to_string(),
                action: head.kind(),
            }
            .into());
        }
        Ok(head.clone())
    }

    /// The queue head must be this kind of action, for this player.
    pub fn require_head(&self, kind: ActionKind, player: &str) -> GameResult<AcquireRequest> {
        let head = self.require_turn(player)?;
        if head.kind() != kind {
            return Err(head.wrong_action(kind).into());
        }
        Ok(head)
    }

    pub(crate) fn push_action(&mut self, action: AcquireRequest) {
        debug!(action = %action.kind(), player = action.player(), "queued");
        self.action_queue.push_back(action);
    }

    pub(crate) fn pop_action(&mut self) -> Option<AcquireRequest> {
        self.action_queue.pop_front()
    }

    /// Whether the tile can go down right now: it mustn't join two safe
    /// hotels, and mustn't found an eighth hotel.
    pub fn is_tile_playable(&self, tile: Tile) -> bool {
        if self.board.is_permanently_unplayable(tile) {
            return false;
        }
        !(self.board.get_inactive_hotels().is_empty() && self.board.would_cell_start_new_chain(tile))
    }

    pub(crate) fn has_playable_tile(&self, index: usize) -> bool {
        self.players[index]
            .tiles
            .iter()
            .any(|tile| self.is_tile_playable(*tile))
    }

    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn play_tile(&mut self, player: &str, tile: Tile) -> GameResult<GameEvent> {
        self.require_head(ActionKind::PlayTile, player)?;
        let index = self.player_index(player)?;
        if !self.players[index].has_tile(tile) {
            return Err(PlayNotAllowed::TileNotInRack(tile).into());
        }
        if self.board.is_permanently_unplayable(tile) {
            return Err(PlayNotAllowed::UnplayableTile(tile).into());
        }
        if self.board.get_inactive_hotels().is_empty()
            && self.board.would_cell_start_new_chain(tile)
        {
            return Err(PlayNotAllowed::NoHotelAvailable.into());
        }

        self.players[index].take_tile(tile);
        self.pop_action();

        let mut stock_market_tiles = Default::default();
        let outcome = if self.board.would_cell_start_new_chain(tile) {
            self.board.place_lonely_tile(tile);
            self.push_action(AcquireRequest::CreateHotel {
                player: player.to_string(),
                creation_tile: tile,
            });
            TileOutcome::FoundsHotel
        } else {
            match self.board.merge_survivor_candidates(tile) {
                Some(choices) if choices.len() > 1 => {
                    self.board.place_lonely_tile(tile);
                    self.push_action(AcquireRequest::ChooseSurvivor {
                        player: player.to_string(),
                        choices: choices.clone(),
                        tile,
                    });
                    TileOutcome::ChooseSurvivor { choices }
                }
                Some(choices) => {
                    let survivor = choices[0];
                    self.board.place_lonely_tile(tile);
                    let (defunct, draws) = self.merge_hotels(index, tile, survivor);
                    stock_market_tiles = draws;
                    TileOutcome::Merged { survivor, defunct }
                }
                None => match self.board.hotel_grown_by(tile) {
                    Some(hotel) => {
                        self.board.flood_hotel(tile, hotel);
                        self.end_turn(index, true);
                        TileOutcome::GrewHotel { hotel }
                    }
                    None => {
                        self.board.place_lonely_tile(tile);
                        self.end_turn(index, true);
                        TileOutcome::Lonely
                    }
                },
            }
        };
        debug!(%tile, ?outcome, "tile played");

        Ok(GameEvent::TilePlayed {
            player: player.to_string(),
            tile,
            outcome,
            stock_market_tiles,
        })
    }

    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn create_hotel(&mut self, player: &str, hotel: Hotel) -> GameResult<GameEvent> {
        let creation_tile = match self.require_turn(player)? {
            AcquireRequest::CreateHotel { creation_tile, .. } => creation_tile,
            head => return Err(head.wrong_action(ActionKind::CreateHotel).into()),
        };
        if self.board.is_on_board(hotel) {
            return Err(PlayNotAllowed::HotelOnBoard(hotel).into());
        }
        let index = self.player_index(player)?;

        self.board.flood_hotel(creation_tile, hotel);
        let founder_share = self.bank_shares(hotel) > 0;
        if founder_share {
            *self.players[index].shares_mut(hotel) += 1;
        }
        self.pop_action();
        debug!(%hotel, size = self.board.get_hotel_chain_size(hotel), "hotel created");
        self.end_turn(index, true);

        Ok(GameEvent::HotelCreated {
            player: player.to_string(),
            hotel,
            tiles: self.board.hotel_tiles(hotel),
            founder_share,
        })
    }

    /// Offer the player a purchase if they can afford anything. Otherwise clear
    /// dead tiles off their rack, refill it, and pass the turn on.
    ///
    /// This goes beyond the printed rules: a next player with no playable tile
    /// is queued for `purchase` instead of `play_tile`, and is passed over
    /// entirely if they cannot buy either.
    pub(crate) fn end_turn(&mut self, index: usize, can_purchase: bool) {
        if can_purchase && self.can_purchase_any(index) {
            self.push_action(AcquireRequest::Purchase {
                player: self.players[index].name.clone(),
            });
            return;
        }

        self.replenish_rack(index);

        // Players with nothing playable skip straight to buying. If nobody can
        // do either the game has stalled, and the next player is left waiting.
        let mut next = self.index_after(index);
        for _ in 0..self.players.len() {
            if self.has_playable_tile(next) {
                break;
            }
            if self.can_purchase_any(next) {
                debug!(player = %self.players[next].name, "no playable tiles, skipping to purchase");
                self.push_action(AcquireRequest::Purchase {
                    player: self.players[next].name.clone(),
                });
                return;
            }
            next = self.index_after(next);
        }

        self.push_action(AcquireRequest::PlayTile {
            player: self.players[next].name.clone(),
        });
    }

    fn replenish_rack(&mut self, index: usize) {
        let (dead, keep): (Vec<Tile>, Vec<Tile>) = self.players[index]
            .tiles
            .iter()
            .partition(|tile| self.board.is_permanently_unplayable(**tile));
        self.players[index].tiles = keep;
        self.dead_tiles.extend(dead);

        while self.players[index].tiles.len() < self.options.rack_size {
            let Some(tile) = self.tile_bag.pop() else {
                break;
            };
            if self.board.is_permanently_unplayable(tile) {
                self.dead_tiles.push(tile);
            } else {
                self.players[index].tiles.push(tile);
            }
        }
    }

    /// Serve one inbound message.
    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn apply(&mut self, message: AcquirePlayerResponse) -> GameResult<Update> {
        let AcquirePlayerResponse { player, response } = message;
        let result = match response {
            AcquireResponse::StartGame => self
                .start()
                .map(|starting_tiles| vec![GameEvent::GameStarted { starting_tiles }]),
            AcquireResponse::PlayTile(tile) => self.play_tile(&player, tile).map(|e| vec![e]),
            AcquireResponse::CreateHotel(hotel) => {
                self.create_hotel(&player, hotel).map(|e| vec![e])
            }
            AcquireResponse::ChooseSurvivor(hotel) => {
                self.choose_survivor(&player, hotel).map(|e| vec![e])
            }
            AcquireResponse::DisburseShares(disbursement) => {
                self.disburse_shares(&player, disbursement).map(|e| vec![e])
            }
            AcquireResponse::Purchase(order) => self.purchase(&player, order),
            AcquireResponse::LeaveGame => self.leave(&player).map(|e| vec![e]),
        };

        match result {
            Ok(events) => Ok(Update {
                events,
                view: self.view(),
            }),
            Err(err) => {
                debug!(%err, "request rejected");
                Err(err)
            }
        }
    }
}

impl Default for AcquireGame {
    fn default() -> Self {
        Self::new()
    }
}
