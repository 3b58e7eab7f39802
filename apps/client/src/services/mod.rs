pub mod game_api;
pub mod round_flow;
