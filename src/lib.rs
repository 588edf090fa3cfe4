pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod options;
pub mod rules;
pub mod store;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::{CheckersError, CheckersResult};
pub use game::{GameSession, MinimaxSelector, MoveSelector};
pub use options::BoardOptions;
pub use store::{
    GameRecord, GameStore, MemoryOptionsStore, MemoryStore, OptionsStore, Player, PlayerKind,
};
pub use types::{AiTurn, GameSnapshot, MoveOutcome, Position, Selection, Side, Tile};
