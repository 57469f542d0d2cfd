use tracing::{info, instrument};

use crate::logic::{
    acquire_event::GameEvent,
    acquire_game::AcquireGame,
    error::{GameResult, PlayNotAllowed},
    player::Player,
};

impl AcquireGame {
    /// Some hotel has reached the game-ending size, or every hotel on the
    /// board is already safe.
    pub fn can_end(&self) -> bool {
        self.board.can_end()
    }

    /// Pay out every hotel on the board as if it were merged away, sell all
    /// shares back to the bank, and close the game.
    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn end_game(&mut self) -> GameResult<GameEvent> {
        if self.ended {
            return Err(PlayNotAllowed::GameOver.into());
        }
        if !self.can_end() {
            return Err(PlayNotAllowed::CannotEnd.into());
        }

        let hotels = self.board.get_active_hotels();
        let stock_market_tiles = self.pay_merge_bonuses(&hotels);
        for hotel in hotels {
            let price = self.share_price(hotel);
            for player in self.players.iter_mut() {
                let held = std::mem::take(player.shares_mut(hotel));
                player.cash += held * price;
            }
        }

        self.ended = true;
        self.action_queue.clear();
        self.merge_info = None;
        let winners: Vec<String> = self.winners().into_iter().map(|p| p.name.clone()).collect();
        info!(?winners, "game over");

        Ok(GameEvent::GameOver {
            winners,
            stock_market_tiles,
        })
    }

    /// Everyone tied for the most cash. Only meaningful once the game is over.
    pub fn winners(&self) -> Vec<&Player> {
        let Some(most) = self.players.iter().map(|player| player.cash).max() else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|player| player.cash == most)
            .collect()
    }
}
