use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    acquire_constants::{BOARD_COLS, BOARD_ROWS, GAME_ENDING_CHAIN_SIZE, SAFE_CHAIN_SIZE},
    hotel_data::Hotel,
    tile::Tile,
};

/// Where a tile currently is, as far as the board can tell. Tiles in the bag
/// and on racks are both `Empty` here.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Lonely,
    Hotel(Hotel),
}

/// The 12x9 grid. Each placed tile is lonely or belongs to exactly one hotel,
/// so a hotel's tile set is simply the cells carrying its name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GameBoard {
    cells: [[Cell; BOARD_COLS]; BOARD_ROWS],
}

impl GameBoard {
    pub fn new() -> GameBoard {
        GameBoard {
            cells: [[Cell::Empty; BOARD_COLS]; BOARD_ROWS],
        }
    }

    pub fn location_of(&self, tile: Tile) -> Cell {
        match tile.row < BOARD_ROWS && tile.col < BOARD_COLS {
            true => self.cells[tile.row][tile.col],
            false => Cell::Empty,
        }
    }

    pub(crate) fn set(&mut self, tile: Tile, cell: Cell) {
        self.cells[tile.row][tile.col] = cell;
    }

    pub fn get_hotel_at(&self, tile: Tile) -> Option<Hotel> {
        match self.location_of(tile) {
            Cell::Hotel(hotel) => Some(hotel),
            _ => None,
        }
    }

    pub fn is_lonely(&self, tile: Tile) -> bool {
        self.location_of(tile) == Cell::Lonely
    }

    pub fn lonely_tiles(&self) -> Vec<Tile> {
        Tile::all().filter(|tile| self.is_lonely(*tile)).collect()
    }

    /// The hotel's tiles, listed column by column.
    pub fn hotel_tiles(&self, hotel: Hotel) -> Vec<Tile> {
        Tile::all()
            .filter(|tile| self.get_hotel_at(*tile) == Some(hotel))
            .collect()
    }

    pub fn get_hotel_chain_size(&self, hotel: Hotel) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Hotel(hotel))
            .count()
    }

    pub fn is_on_board(&self, hotel: Hotel) -> bool {
        self.get_hotel_chain_size(hotel) > 0
    }

    pub fn is_safe(&self, hotel: Hotel) -> bool {
        self.get_hotel_chain_size(hotel) >= SAFE_CHAIN_SIZE
    }

    pub fn get_active_hotels(&self) -> Vec<Hotel> {
        Hotel::iter().filter(|hotel| self.is_on_board(*hotel)).collect()
    }

    pub fn get_inactive_hotels(&self) -> Vec<Hotel> {
        Hotel::iter().filter(|hotel| !self.is_on_board(*hotel)).collect()
    }

    /// Distinct hotels touching the tile, in hotel order.
    pub fn get_adjacent_hotels(&self, tile: Tile) -> Vec<Hotel> {
        let mut hotel_is_adjacent = [false; Hotel::count()];
        for adjacent in tile.adjacent() {
            if let Cell::Hotel(hotel) = self.location_of(adjacent) {
                hotel_is_adjacent[usize::from(hotel)] = true;
            }
        }

        Hotel::iter()
            .filter(|hotel| hotel_is_adjacent[usize::from(*hotel)])
            .collect()
    }

    fn is_cell_next_to_lonely(&self, tile: Tile) -> bool {
        tile.adjacent().into_iter().any(|adjacent| self.is_lonely(adjacent))
    }

    /// Playing this tile would join lonely tiles without touching any hotel.
    pub fn would_cell_start_new_chain(&self, tile: Tile) -> bool {
        self.location_of(tile) == Cell::Empty
            && self.is_cell_next_to_lonely(tile)
            && self.get_adjacent_hotels(tile).is_empty()
    }

    /// Every unplaced tile that would found a hotel if played now.
    pub fn tiles_that_found_hotels(&self) -> Vec<Tile> {
        let mut tiles = Vec::new();
        for lonely in self.lonely_tiles() {
            for neighbour in lonely.adjacent() {
                if self.location_of(neighbour) != Cell::Empty || tiles.contains(&neighbour) {
                    continue;
                }
                if self.get_adjacent_hotels(neighbour).is_empty() {
                    tiles.push(neighbour);
                }
            }
        }
        tiles.sort_by_key(Tile::board_order);
        tiles
    }

    /// The one hotel this tile would grow, if exactly one hotel touches it.
    pub fn hotel_grown_by(&self, tile: Tile) -> Option<Hotel> {
        match self.get_adjacent_hotels(tile).as_slice() {
            [hotel] => Some(*hotel),
            _ => None,
        }
    }

    /// Tiles that can never be played because they touch two or more safe
    /// hotels, and safe hotels can't merge.
    pub fn tiles_that_force_illegal_merge(&self) -> Vec<Tile> {
        Tile::all()
            .filter(|tile| self.is_permanently_unplayable(*tile))
            .collect()
    }

    pub fn is_permanently_unplayable(&self, tile: Tile) -> bool {
        self.location_of(tile) == Cell::Empty
            && self
                .get_adjacent_hotels(tile)
                .into_iter()
                .filter(|hotel| self.is_safe(*hotel))
                .count()
                > 1
    }

    /// `None` unless the tile touches two or more hotels. Otherwise the
    /// largest of them; more than one means the player has to pick.
    pub fn merge_survivor_candidates(&self, tile: Tile) -> Option<Vec<Hotel>> {
        let adjacent_hotels = self.get_adjacent_hotels(tile);
        if adjacent_hotels.len() < 2 {
            return None;
        }

        let max_chain_size = adjacent_hotels
            .iter()
            .map(|hotel| self.get_hotel_chain_size(*hotel))
            .max()
            .unwrap_or(0);

        Some(
            adjacent_hotels
                .into_iter()
                .filter(|hotel| self.get_hotel_chain_size(*hotel) == max_chain_size)
                .collect(),
        )
    }

    pub fn place_lonely_tile(&mut self, tile: Tile) {
        self.set(tile, Cell::Lonely);
    }

    /// Claim the tile for `hotel` and spread through the lonely tiles connected
    /// to it. Other hotels are left alone.
    pub fn flood_hotel(&mut self, tile: Tile, hotel: Hotel) {
        let mut pending = vec![tile];
        self.set(tile, Cell::Hotel(hotel));

        while let Some(current) = pending.pop() {
            for adjacent in current.adjacent() {
                if self.location_of(adjacent) == Cell::Lonely {
                    self.set(adjacent, Cell::Hotel(hotel));
                    pending.push(adjacent);
                }
            }
        }
    }

    pub fn replace_defunct_hotel_with_surviving_hotel(
        &mut self,
        defunct_hotel: Hotel,
        surviving_hotel: Hotel,
    ) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell == Cell::Hotel(defunct_hotel) {
                *cell = Cell::Hotel(surviving_hotel);
            }
        }
    }

    pub fn get_hotel_stock_price(&self, hotel: Hotel) -> u32 {
        let chain_length = self.get_hotel_chain_size(hotel);
        hotel.get_stock_value(chain_length)
    }

    pub fn get_hotel_majority_stock_bonus(&self, hotel: Hotel) -> u32 {
        let chain_length = self.get_hotel_chain_size(hotel);
        hotel.get_majority_holder_bonus(chain_length)
    }

    pub fn get_hotel_minority_stock_bonus(&self, hotel: Hotel) -> u32 {
        let chain_length = self.get_hotel_chain_size(hotel);
        hotel.get_minority_holder_bonus(chain_length)
    }

    /// Either some hotel has grown past 40 tiles, or every hotel on the board
    /// is already safe.
    pub fn can_end(&self) -> bool {
        let sizes: Vec<usize> = Hotel::iter()
            .map(|hotel| self.get_hotel_chain_size(hotel))
            .collect();
        let over_40 = sizes.iter().any(|size| *size >= GAME_ENDING_CHAIN_SIZE);
        let unsafe_on_board = sizes
            .iter()
            .any(|size| *size > 0 && *size < SAFE_CHAIN_SIZE);
        over_40 || !unsafe_on_board
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", (b'A' + row as u8) as char)?;
            for cell in cells {
                let mark = match cell {
                    Cell::Empty => '.',
                    Cell::Lonely => '#',
                    Cell::Hotel(hotel) => hotel.name().chars().next().unwrap_or('?').to_ascii_uppercase(),
                };
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::tile::t;

    fn board_with(hotels: &[(Hotel, &[&str])], lonely: &[&str]) -> GameBoard {
        let mut game_board = GameBoard::new();
        for (hotel, tiles) in hotels {
            for tile in tiles.iter() {
                game_board.set(t(tile), Cell::Hotel(*hotel));
            }
        }
        for tile in lonely {
            game_board.place_lonely_tile(t(tile));
        }
        game_board
    }

    fn labels(tiles: Vec<Tile>) -> Vec<String> {
        tiles.iter().map(Tile::to_string).collect()
    }

    fn row_of(row: char, cols: std::ops::RangeInclusive<usize>) -> Vec<String> {
        cols.map(|col| format!("{col}{row}")).collect()
    }

    #[test]
    fn test_location_of() {
        let game_board = board_with(&[(Hotel::Quantum, &["8D", "9D"])], &["4C"]);
        assert_eq!(game_board.location_of(t("1A")), Cell::Empty);
        assert_eq!(game_board.location_of(t("4C")), Cell::Lonely);
        assert_eq!(game_board.location_of(t("4D")), Cell::Empty);
        assert_eq!(game_board.location_of(t("8D")), Cell::Hotel(Hotel::Quantum));
    }

    #[test]
    fn test_get_active_hotels() {
        let game_board = board_with(
            &[(Hotel::Zeta, &["1A", "2A"]), (Hotel::Sackson, &["1C", "2C"])],
            &[],
        );

        let active_hotels = game_board.get_active_hotels();
        let inactive_hotels = game_board.get_inactive_hotels();
        assert_eq!(active_hotels, vec![Hotel::Sackson, Hotel::Zeta]);
        assert_eq!(inactive_hotels.len(), 5);
        assert!(!inactive_hotels.contains(&Hotel::Zeta));
    }

    #[test]
    fn test_get_hotel_chain_size() {
        let game_board = board_with(
            &[
                (Hotel::Zeta, &["1A", "2A"]),
                (Hotel::Sackson, &["1C", "2C", "3C", "4C"]),
            ],
            &[],
        );
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Zeta), 2);
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Sackson), 4);
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Phoenix), 0);
        assert_eq!(game_board.get_hotel_stock_price(Hotel::Sackson), 400);
    }

    #[test]
    fn test_get_adjacent_hotels() {
        let game_board = board_with(
            &[
                (Hotel::Sackson, &["2A"]),
                (Hotel::Fusion, &["1B"]),
                (Hotel::Zeta, &["3B"]),
            ],
            &[],
        );
        assert_eq!(
            game_board.get_adjacent_hotels(t("1A")),
            vec![Hotel::Sackson, Hotel::Fusion]
        );
        assert_eq!(
            game_board.get_adjacent_hotels(t("2B")),
            vec![Hotel::Sackson, Hotel::Zeta, Hotel::Fusion]
        );
    }

    #[test]
    fn test_tiles_that_found_hotels() {
        let game_board = board_with(&[], &["1A", "8E", "8F", "9I"]);
        assert_eq!(
            labels(game_board.tiles_that_found_hotels()),
            "1B 2A 7E 7F 8D 8G 8I 9E 9F 9H 10I".split(' ').collect::<Vec<_>>()
        );
        for tile in game_board.tiles_that_found_hotels() {
            assert!(game_board.would_cell_start_new_chain(tile));
        }
        assert!(!game_board.would_cell_start_new_chain(t("5E")));
    }

    #[test]
    fn test_founding_tiles_skip_hotel_neighbours() {
        let game_board = board_with(&[(Hotel::Zeta, &["3B", "4B"])], &["1B"]);
        let founding = labels(game_board.tiles_that_found_hotels());
        assert_eq!(founding, vec!["1A", "1C"]);
    }

    #[test]
    fn test_hotel_grown_by() {
        let game_board = board_with(
            &[(Hotel::Zeta, &["1A", "2A"]), (Hotel::Hydra, &["4A", "5A"])],
            &[],
        );
        assert_eq!(game_board.hotel_grown_by(t("1B")), Some(Hotel::Zeta));
        assert_eq!(game_board.hotel_grown_by(t("3A")), None);
        assert_eq!(game_board.hotel_grown_by(t("9I")), None);
    }

    #[test]
    fn test_tiles_that_force_illegal_merge() {
        let luxor = row_of('A', 1..=11);
        let tower = row_of('C', 1..=11);
        let luxor: Vec<&str> = luxor.iter().map(String::as_str).collect();
        let tower: Vec<&str> = tower.iter().map(String::as_str).collect();
        let game_board = board_with(&[(Hotel::Sackson, &luxor), (Hotel::Zeta, &tower)], &[]);

        let unplayable = game_board.tiles_that_force_illegal_merge();
        assert_eq!(unplayable.len(), 11);
        assert!(unplayable.contains(&t("1B")));
        assert!(!unplayable.contains(&t("12B")));
        assert!(game_board.is_permanently_unplayable(t("5B")));
        assert!(!game_board.is_permanently_unplayable(t("1D")));
    }

    #[test]
    fn test_merge_survivor_candidates() {
        let game_board = board_with(
            &[
                (Hotel::Quantum, &["5H", "5I"]),
                (Hotel::Fusion, &["3H", "3I"]),
                (Hotel::Zeta, &["4A", "4B", "4C"]),
                (Hotel::Hydra, &["6A", "6B"]),
            ],
            &[],
        );
        assert_eq!(
            game_board.merge_survivor_candidates(t("4H")),
            Some(vec![Hotel::Fusion, Hotel::Quantum])
        );
        assert_eq!(
            game_board.merge_survivor_candidates(t("5A")),
            Some(vec![Hotel::Zeta])
        );
        assert_eq!(game_board.merge_survivor_candidates(t("7A")), None);
        assert_eq!(game_board.merge_survivor_candidates(t("1A")), None);
    }

    #[test]
    fn test_flood_grows_through_lonely_tiles() {
        let mut game_board = board_with(&[(Hotel::Sackson, &["1A"])], &["3A", "3B", "3C"]);
        game_board.flood_hotel(t("2A"), Hotel::Sackson);
        assert_eq!(
            labels(game_board.hotel_tiles(Hotel::Sackson)),
            vec!["1A", "2A", "3A", "3B", "3C"]
        );
        assert!(game_board.lonely_tiles().is_empty());
    }

    #[test]
    fn test_flood_stops_at_other_hotels() {
        let mut game_board = board_with(
            &[(Hotel::Sackson, &["1A"]), (Hotel::Zeta, &["4A", "5A"])],
            &["3B"],
        );
        game_board.flood_hotel(t("2A"), Hotel::Sackson);
        game_board.flood_hotel(t("3A"), Hotel::Sackson);
        assert_eq!(
            labels(game_board.hotel_tiles(Hotel::Sackson)),
            vec!["1A", "2A", "3A", "3B"]
        );
        assert_eq!(labels(game_board.hotel_tiles(Hotel::Zeta)), vec!["4A", "5A"]);
    }

    #[test]
    fn test_replace_defunct_hotel() {
        let mut game_board = board_with(
            &[(Hotel::Quantum, &["5H", "5I"]), (Hotel::Fusion, &["3H", "3I"])],
            &[],
        );
        game_board.replace_defunct_hotel_with_surviving_hotel(Hotel::Quantum, Hotel::Fusion);
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Fusion), 4);
        assert!(!game_board.is_on_board(Hotel::Quantum));
    }

    #[test]
    fn test_can_end() {
        let mut game_board = GameBoard::new();
        // nothing on the board counts as every hotel being safe
        assert!(game_board.can_end());

        game_board.set(t("1A"), Cell::Hotel(Hotel::Zeta));
        game_board.set(t("1B"), Cell::Hotel(Hotel::Zeta));
        assert!(!game_board.can_end());

        for tile in Tile::all().skip(9).take(40) {
            game_board.set(tile, Cell::Hotel(Hotel::Phoenix));
        }
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Phoenix), 40);
        assert!(!game_board.can_end());

        game_board.set(t("1I"), Cell::Hotel(Hotel::Phoenix));
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Phoenix), 41);
        assert_eq!(game_board.get_hotel_chain_size(Hotel::Zeta), 2);
        assert!(game_board.can_end());
    }

    #[test]
    fn test_can_end_when_all_safe() {
        let tiles = row_of('A', 1..=11);
        let tiles: Vec<&str> = tiles.iter().map(String::as_str).collect();
        let mut game_board = board_with(&[(Hotel::Sackson, &tiles)], &[]);
        assert!(game_board.can_end());
        game_board.set(t("1I"), Cell::Hotel(Hotel::Zeta));
        game_board.set(t("2I"), Cell::Hotel(Hotel::Zeta));
        assert!(!game_board.can_end());
    }
}
