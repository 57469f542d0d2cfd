use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::logic::{
    acquire_constants::STOCK_TO_BUY_PER_TURN,
    acquire_event::GameEvent,
    acquire_game::AcquireGame,
    acquire_request::AcquireRequest,
    acquire_response::{AcquirePlayerResponse, AcquireResponse},
    error::GameResult,
    game_states::{buy_stock_state::PurchaseOrder, dispose_stock_state::Disbursement},
};

/// Something that can answer whatever the game is currently asking for.
pub trait Bot {
    /// A legal response for the player at the head of the queue, or `None`
    /// when there is nothing that player can do.
    fn respond(&mut self, game: &AcquireGame) -> Option<AcquirePlayerResponse>;
}

/// Plays every seat, picking uniformly among legal moves. Ends the game as
/// soon as it is allowed to.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick_purchase(&mut self, game: &AcquireGame, player: &str) -> PurchaseOrder {
        let mut order = PurchaseOrder::new();
        let Some(mut cash) = game.player_named(player).map(|p| p.cash) else {
            return order;
        };

        let wanted = self.rng.gen_range(0..=STOCK_TO_BUY_PER_TURN);
        for _ in 0..wanted {
            let affordable: Vec<_> = game
                .board()
                .get_active_hotels()
                .into_iter()
                .filter(|hotel| {
                    let ordered = order.shares.get(hotel).copied().unwrap_or(0);
                    game.bank_shares(*hotel) > ordered && game.share_price(*hotel) <= cash
                })
                .collect();
            let Some(&hotel) = affordable.choose(&mut self.rng) else {
                break;
            };
            cash -= game.share_price(hotel);
            order = order.buy(hotel, 1);
        }

        order.end_game = game.can_end();
        order
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for RandomBot {
    fn respond(&mut self, game: &AcquireGame) -> Option<AcquirePlayerResponse> {
        let head = game.next_action()?;
        let player = head.player();
        let response = match head {
            AcquireRequest::PlayTile { .. } => {
                let playable: Vec<_> = game
                    .player_named(player)?
                    .tiles
                    .iter()
                    .copied()
                    .filter(|tile| game.is_tile_playable(*tile))
                    .collect();
                AcquireResponse::PlayTile(*playable.choose(&mut self.rng)?)
            }
            AcquireRequest::CreateHotel { .. } => AcquireResponse::CreateHotel(
                *game.board().get_inactive_hotels().choose(&mut self.rng)?,
            ),
            AcquireRequest::ChooseSurvivor { choices, .. } => {
                AcquireResponse::ChooseSurvivor(*choices.choose(&mut self.rng)?)
            }
            AcquireRequest::DisburseShares {
                hotel, survivor, ..
            } => {
                let held = game.player_named(player)?.shares(*hotel);
                let sell = self.rng.gen_range(0..=held);
                let tradeable = (held - sell).min(2 * game.bank_shares(*survivor));
                let trade = self.rng.gen_range(0..=tradeable / 2) * 2;
                AcquireResponse::DisburseShares(Disbursement {
                    hotel: *hotel,
                    sell,
                    trade,
                })
            }
            AcquireRequest::Purchase { .. } => {
                AcquireResponse::Purchase(self.pick_purchase(game, player))
            }
        };
        Some(AcquirePlayerResponse::new(response, player))
    }
}

/// Drive a started game until it ends, stalls, or `max_steps` moves have been
/// made. Returns every event produced along the way.
pub fn play_out(
    game: &mut AcquireGame,
    bot: &mut impl Bot,
    max_steps: usize,
) -> GameResult<Vec<GameEvent>> {
    let mut log = Vec::new();
    for _ in 0..max_steps {
        if game.is_ended() {
            break;
        }
        let Some(message) = bot.respond(game) else {
            debug!(head = ?game.next_action(), "no legal move, game stalled");
            break;
        };
        let update = game.apply(message)?;
        log.extend(update.events);
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{acquire_constants::TILE_COUNT, acquire_game::GameOptions};

    fn started_game(players: &[&str], seed: u64) -> AcquireGame {
        let mut game = AcquireGame::with_options(GameOptions::builder().seed(seed).build());
        for name in players {
            game.add_player(name).unwrap();
        }
        game.start().unwrap();
        game
    }

    #[test]
    fn test_bot_never_makes_an_illegal_move() {
        for seed in 0..5 {
            let mut game = started_game(&["A", "B", "C", "D"], seed);
            let mut bot = RandomBot::seeded(seed);
            let events = play_out(&mut game, &mut bot, 2000).unwrap();
            assert!(!events.is_empty());

            let on_racks: usize = game.players().iter().map(|p| p.tiles.len()).sum();
            let on_board = game.board().lonely_tiles().len()
                + game
                    .board()
                    .get_active_hotels()
                    .into_iter()
                    .map(|hotel| game.board().get_hotel_chain_size(hotel))
                    .sum::<usize>();
            assert_eq!(
                on_racks + on_board + game.tile_bag().len() + game.dead_tiles().len(),
                TILE_COUNT
            );
        }
    }

    #[test]
    fn test_finished_game_reports_winners() {
        let mut game = started_game(&["A", "B"], 3);
        let mut bot = RandomBot::seeded(3);
        let events = play_out(&mut game, &mut bot, 5000).unwrap();
        if game.is_ended() {
            let Some(GameEvent::GameOver { winners, .. }) = events.last() else {
                panic!("a finished game ends with game over");
            };
            assert!(!winners.is_empty());
            assert_eq!(game.view().winners, *winners);
        }
    }

    #[test]
    fn test_nothing_to_do_before_start() {
        let game = AcquireGame::new();
        assert!(RandomBot::seeded(1).respond(&game).is_none());
    }
}
