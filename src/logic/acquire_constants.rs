pub const BOARD_ROWS: usize = 9;
pub const BOARD_COLS: usize = 12;
pub const TILE_COUNT: usize = BOARD_ROWS * BOARD_COLS;

pub const RACK_SIZE: usize = 6;
pub const STARTING_CASH: u32 = 6000;

/// Every hotel issues this many shares; whatever players don't hold is in the bank.
pub const SHARES_PER_HOTEL: u32 = 25;
pub const STOCK_TO_BUY_PER_TURN: u32 = 3;

/// A hotel this size or larger can never be merged away.
pub const SAFE_CHAIN_SIZE: usize = 11;
/// Any hotel this size or larger allows the game to be ended.
pub const GAME_ENDING_CHAIN_SIZE: usize = 41;
