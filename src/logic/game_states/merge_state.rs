use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::logic::{
    acquire_event::GameEvent,
    acquire_game::AcquireGame,
    acquire_game_state::ActionKind,
    acquire_request::AcquireRequest,
    error::{GameResult, PlayNotAllowed},
    hotel_data::Hotel,
    tile::Tile,
};

/// Bookkeeping for a merger that is waiting on players to dispose of their
/// shares in the defunct hotels.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MergeInfo {
    pub tile: Tile,
    pub survivor: Hotel,
    pub merging_player: String,
    /// Largest first, the order their shares are handled in.
    pub defunct: Vec<Hotel>,
}

fn nearest_hundred_floor(amount: u32) -> u32 {
    amount - amount % 100
}

/// Split a defunct hotel's majority and minority bonuses among its holders.
///
/// `holdings` has one entry per player. In a two player game the stock market
/// joins in with `stock_market` shares: it can take a majority or minority
/// slot, but its cut is never paid to anyone. Holding nothing never earns the
/// minority, but when nobody holds any shares everyone ties for the majority.
/// Returns what each player is owed, in the same order.
pub fn bonus_payouts(holdings: &[u32], stock_market: Option<u32>, majority_bonus: u32) -> Vec<u32> {
    let minority_bonus = majority_bonus / 2;
    let mut counts: Vec<u32> = holdings.to_vec();
    counts.extend(stock_market);

    let mut distinct: Vec<u32> = counts.clone();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();

    let mut payouts = vec![0; counts.len()];
    let Some(&most_held) = distinct.first() else {
        payouts.truncate(holdings.len());
        return payouts;
    };
    let next_most_held = distinct.get(1).copied().filter(|count| *count > 0);

    let majority_holders: Vec<usize> = (0..counts.len())
        .filter(|i| counts[*i] == most_held)
        .collect();
    let minority_holders: Vec<usize> = (0..counts.len())
        .filter(|i| Some(counts[*i]) == next_most_held)
        .collect();

    if majority_holders.len() > 1 {
        let bonus = (majority_bonus + minority_bonus) / majority_holders.len() as u32;
        for i in majority_holders {
            payouts[i] = nearest_hundred_floor(bonus);
        }
    } else {
        let majority_holder = majority_holders[0];
        match minority_holders.len() {
            0 => payouts[majority_holder] = majority_bonus + minority_bonus,
            1 => {
                payouts[majority_holder] = majority_bonus;
                payouts[minority_holders[0]] = minority_bonus;
            }
            n => {
                payouts[majority_holder] = majority_bonus;
                let bonus = nearest_hundred_floor(minority_bonus / n as u32);
                for i in minority_holders {
                    payouts[i] = bonus;
                }
            }
        }
    }

    payouts.truncate(holdings.len());
    payouts
}

impl AcquireGame {
    /// Pay majority and minority bonuses for each hotel. Returns the tiles
    /// drawn for the stock market, if it took part.
    pub(crate) fn pay_merge_bonuses(&mut self, hotels: &[Hotel]) -> BTreeMap<Hotel, Tile> {
        let two_players = self.players.len() == 2;
        let mut stock_market_tiles = BTreeMap::new();

        for &hotel in hotels {
            let holdings: Vec<u32> = self.players.iter().map(|p| p.shares(hotel)).collect();

            let mut stock_market = None;
            if two_players {
                if let Some(&tile) = self.tile_bag.choose(&mut self.rng) {
                    stock_market = Some(tile.column_number() as u32);
                    stock_market_tiles.insert(hotel, tile);
                }
            }

            let majority_bonus = self.board.get_hotel_majority_stock_bonus(hotel);
            let payouts = bonus_payouts(&holdings, stock_market, majority_bonus);
            for (player, payout) in self.players.iter_mut().zip(payouts) {
                player.cash += payout;
            }
            debug!(%hotel, ?holdings, ?stock_market, "bonuses paid");
        }

        stock_market_tiles
    }

    /// Merge every hotel touching `tile` into `survivor`: pay bonuses, then
    /// queue a share disbursement for each holder of each defunct hotel,
    /// starting with the merging player. Returns the defunct hotels and any
    /// stock market draws.
    pub(crate) fn merge_hotels(
        &mut self,
        merging_player: usize,
        tile: Tile,
        survivor: Hotel,
    ) -> (Vec<Hotel>, BTreeMap<Hotel, Tile>) {
        let mut defunct: Vec<Hotel> = self
            .board
            .get_adjacent_hotels(tile)
            .into_iter()
            .filter(|hotel| *hotel != survivor)
            .collect();
        let stock_market_tiles = self.pay_merge_bonuses(&defunct);

        defunct.sort_by_key(|hotel| std::cmp::Reverse(self.board.get_hotel_chain_size(*hotel)));
        for &hotel in &defunct {
            for offset in 0..self.players.len() {
                let player = &self.players[(merging_player + offset) % self.players.len()];
                if player.shares(hotel) > 0 {
                    let action = AcquireRequest::DisburseShares {
                        player: player.name.clone(),
                        hotel,
                        survivor,
                    };
                    self.push_action(action);
                }
            }
        }

        debug!(%tile, %survivor, ?defunct, "merge started");
        self.merge_info = Some(MergeInfo {
            tile,
            survivor,
            merging_player: self.players[merging_player].name.clone(),
            defunct: defunct.clone(),
        });

        if self.action_queue.is_empty() {
            self.finish_merge();
        }
        (defunct, stock_market_tiles)
    }

    /// Fold the defunct hotels, the merge tile and any lonely tiles joined by
    /// it into the survivor, then end the merging player's turn.
    pub(crate) fn finish_merge(&mut self) {
        let Some(info) = self.merge_info.take() else {
            return;
        };
        for hotel in &info.defunct {
            self.board
                .replace_defunct_hotel_with_surviving_hotel(*hotel, info.survivor);
        }
        self.board.flood_hotel(info.tile, info.survivor);
        debug!(
            survivor = %info.survivor,
            size = self.board.get_hotel_chain_size(info.survivor),
            "merge finished"
        );

        if let Ok(index) = self.player_index(&info.merging_player) {
            self.end_turn(index, true);
        }
    }

    #[instrument(skip(self), fields(game = ?self.options.number))]
    pub fn choose_survivor(&mut self, player: &str, survivor: Hotel) -> GameResult<GameEvent> {
        let (choices, tile) = match self.require_turn(player)? {
            AcquireRequest::ChooseSurvivor { choices, tile, .. } => (choices, tile),
            head => return Err(head.wrong_action(ActionKind::ChooseSurvivor).into()),
        };
        if !choices.contains(&survivor) {
            return Err(PlayNotAllowed::NotASurvivor {
                choices,
                chosen: survivor,
            }
            .into());
        }
        let index = self.player_index(player)?;

        self.pop_action();
        let (defunct, stock_market_tiles) = self.merge_hotels(index, tile, survivor);

        Ok(GameEvent::SurvivorChosen {
            player: player.to_string(),
            survivor,
            defunct,
            stock_market_tiles,
        })
    }
}
