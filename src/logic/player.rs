use serde::{Deserialize, Serialize};

use super::{acquire_constants::STARTING_CASH, hotel_data::Hotel, tile::Tile};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub stocks: [u32; Hotel::count()],
    pub cash: u32,
    pub tiles: Vec<Tile>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stocks: [0; Hotel::count()],
            cash: STARTING_CASH,
            tiles: Vec::new(),
        }
    }

    pub fn shares(&self, hotel: Hotel) -> u32 {
        self.stocks[usize::from(hotel)]
    }

    pub(crate) fn shares_mut(&mut self, hotel: Hotel) -> &mut u32 {
        &mut self.stocks[usize::from(hotel)]
    }

    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    pub(crate) fn take_tile(&mut self, tile: Tile) -> Option<Tile> {
        let index = self.tiles.iter().position(|t| *t == tile)?;
        Some(self.tiles.remove(index))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("")
    }
}
