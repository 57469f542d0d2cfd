use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::logic::{
    acquire_constants::STOCK_TO_BUY_PER_TURN,
    acquire_event::GameEvent,
    acquire_game::AcquireGame,
    acquire_game_state::ActionKind,
    error::{GameResult, PlayNotAllowed},
    hotel_data::Hotel,
};

/// Shares a player wants at the end of their turn, and whether they want the
/// game to end afterwards.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(default)]
    pub shares: BTreeMap<Hotel, u32>,
    #[serde(default)]
    pub end_game: bool,
}

impl PurchaseOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buy(mut self, hotel: Hotel, count: u32) -> Self {
        let held = self.shares.entry(hotel).or_default();
        *held = held.saturating_add(count);
        self
    }

    pub fn ending_game(mut self) -> Self {
        self.end_game = true;
        self
    }

    /// Saturates, so an absurd order still reads as too many.
    pub fn total_shares(&self) -> u32 {
        self.shares.values().copied().fold(0, u32::saturating_add)
    }

    /// Requested hotels, leaving out zero counts.
    fn requested(&self) -> impl Iterator<Item = (Hotel, u32)> + '_ {
        self.shares
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(hotel, count)| (*hotel, *count))
    }
}

impl AcquireGame {
    /// Whether the player could buy at least one share of something.
    pub(crate) fn can_purchase_any(&self, index: usize) -> bool {
        let cash = self.players[index].cash;
        self.board.get_active_hotels().into_iter().any(|hotel| {
            self.bank_shares(hotel) > 0 && cash >= self.share_price(hotel)
        })
    }

    pub fn purchase_cost(&self, order: &PurchaseOrder) -> u32 {
        order
            .requested()
            .map(|(hotel, count)| count.saturating_mul(self.share_price(hotel)))
            .fold(0, u32::saturating_add)
    }

    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn purchase(&mut self, player: &str, order: PurchaseOrder) -> GameResult<Vec<GameEvent>> {
        self.require_head(ActionKind::Purchase, player)?;
        let index = self.player_index(player)?;

        if order.total_shares() > STOCK_TO_BUY_PER_TURN {
            return Err(PlayNotAllowed::TooManyShares.into());
        }
        for (hotel, count) in order.requested() {
            if !self.board.is_on_board(hotel) {
                return Err(PlayNotAllowed::HotelNotOnBoard(hotel).into());
            }
            if count > self.bank_shares(hotel) {
                return Err(PlayNotAllowed::NotEnoughBankShares(hotel).into());
            }
        }
        let cost = self.purchase_cost(&order);
        let cash = self.players[index].cash;
        if cost > cash {
            return Err(PlayNotAllowed::CannotAfford { cost, cash }.into());
        }

        let buyer = &mut self.players[index];
        for (hotel, count) in order.requested() {
            *buyer.shares_mut(hotel) += count;
        }
        buyer.cash -= cost;
        self.pop_action();
        debug!(shares = ?order.shares, cost, "shares purchased");

        let mut events = vec![GameEvent::SharesPurchased {
            player: player.to_string(),
            shares: order.requested().collect(),
            cost,
        }];
        if order.end_game && self.can_end() {
            events.push(self.end_game()?);
        } else {
            self.end_turn(index, false);
        }
        Ok(events)
    }
}
