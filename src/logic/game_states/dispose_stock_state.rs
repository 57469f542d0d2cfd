use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::logic::{
    acquire_event::GameEvent,
    acquire_game::AcquireGame,
    acquire_game_state::ActionKind,
    acquire_request::AcquireRequest,
    error::{GameResult, PlayNotAllowed},
    hotel_data::Hotel,
};

/// What a player does with their shares in a defunct hotel. Whatever isn't
/// sold or traded is kept.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Disbursement {
    pub hotel: Hotel,
    #[serde(default)]
    pub sell: u32,
    /// Traded two for one into the surviving hotel, so must be even.
    #[serde(default)]
    pub trade: u32,
}

impl Disbursement {
    pub fn keep_all(hotel: Hotel) -> Self {
        Self {
            hotel,
            sell: 0,
            trade: 0,
        }
    }
}

impl AcquireGame {
    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn disburse_shares(
        &mut self,
        player: &str,
        disbursement: Disbursement,
    ) -> GameResult<GameEvent> {
        let (hotel, survivor) = match self.require_turn(player)? {
            AcquireRequest::DisburseShares {
                hotel, survivor, ..
            } => (hotel, survivor),
            head => return Err(head.wrong_action(ActionKind::DisburseShares).into()),
        };
        if disbursement.hotel != hotel {
            return Err(PlayNotAllowed::WrongDisbursement {
                expected: hotel,
                actual: disbursement.hotel,
            }
            .into());
        }
        let index = self.player_index(player)?;
        let held = self.players[index].shares(hotel);
        let requested = disbursement.sell.saturating_add(disbursement.trade);
        if requested > held {
            return Err(PlayNotAllowed::DisbursingTooMany {
                hotel,
                requested,
                held,
            }
            .into());
        }
        if disbursement.trade % 2 != 0 {
            return Err(PlayNotAllowed::OddTrade(disbursement.trade).into());
        }
        let traded_for = disbursement.trade / 2;
        if traded_for > self.bank_shares(survivor) {
            return Err(PlayNotAllowed::NotEnoughBankShares(survivor).into());
        }

        let price = self.share_price(hotel);
        let shareholder = &mut self.players[index];
        *shareholder.shares_mut(hotel) -= requested;
        *shareholder.shares_mut(survivor) += traded_for;
        shareholder.cash += disbursement.sell * price;
        debug!(%hotel, %survivor, sell = disbursement.sell, trade = disbursement.trade, "shares disbursed");

        self.pop_action();
        let merge_complete = self.action_queue.is_empty();
        if merge_complete {
            self.finish_merge();
        }

        Ok(GameEvent::SharesDisbursed {
            player: player.to_string(),
            disbursement,
            survivor,
            merge_complete,
        })
    }
}
