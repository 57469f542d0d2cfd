pub mod acquire_constants;
pub mod acquire_event;
pub mod acquire_game;
pub mod acquire_game_state;
pub mod acquire_request;
pub mod acquire_response;
pub mod error;
pub mod game_board;
pub mod game_states;
pub mod game_view;
pub mod hotel_data;
pub mod player;
pub mod tile;
