pub mod bot;
pub mod logic;
