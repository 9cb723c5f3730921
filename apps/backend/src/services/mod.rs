//! Services: load state through the `Store`, apply domain rules, persist.

pub mod game_flow;
pub mod rooms;

pub use game_flow::GameFlowService;
pub use rooms::RoomService;
