//! Storage collaborators for serialized game states, game records and
//! named board options.
//!
//! The engine never holds a store; callers pass one to
//! [`GameSession::load`](crate::game::GameSession::load) and
//! [`GameSession::save`](crate::game::GameSession::save).

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CheckersError, CheckersResult};
use crate::game::GameSession;
use crate::options::BoardOptions;
use crate::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Who plays a game and how it ended, kept next to its state history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub options_name: String,
    pub red: Player,
    pub black: Player,
    /// Set once the game is over.
    pub winner: Option<Side>,
}

impl GameRecord {
    pub fn new(options_name: impl Into<String>, red: Player, black: Player) -> Self {
        Self {
            options_name: options_name.into(),
            red,
            black,
            winner: None,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Red => &self.red,
            Side::Black => &self.black,
        }
    }

    /// Whether the caller should ask the AI for the next move of `session`.
    pub fn ai_to_move(&self, session: &GameSession) -> bool {
        !session.is_game_over() && self.player(session.side_to_move()).kind == PlayerKind::Ai
    }

    /// Copies the session's winner into the record. Returns `true` once the
    /// game is over.
    pub fn record_result(&mut self, session: &GameSession) -> bool {
        self.winner = session.winner();
        self.winner.is_some()
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|side| self.player(side).name.as_str())
    }
}

fn not_found(id: &str) -> CheckersError {
    CheckersError::NotFound { id: id.to_string() }
}

/// CRUD access to serialized states, keyed by game id. Each save appends a
/// snapshot, so a game keeps its turn-by-turn history.
pub trait GameStore {
    fn ids(&self) -> Vec<String>;

    /// All snapshots of `id`, oldest first.
    fn history(&self, id: &str) -> CheckersResult<&[String]>;

    fn save(&mut self, id: &str, blob: String);

    fn record(&self, id: &str) -> CheckersResult<&GameRecord>;

    fn save_record(&mut self, id: &str, record: GameRecord);

    /// Removes the history and the record of `id`.
    fn delete(&mut self, id: &str) -> CheckersResult<()>;

    fn latest(&self, id: &str) -> CheckersResult<String> {
        self.history(id)?.last().cloned().ok_or_else(|| not_found(id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: BTreeMap<String, Vec<String>>,
    records: BTreeMap<String, GameRecord>,
}

impl GameStore for MemoryStore {
    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.games.keys().chain(self.records.keys()).cloned().collect();
        ids.sort();
        ids.dedup();
        ids
    }

    fn history(&self, id: &str) -> CheckersResult<&[String]> {
        self.games
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| not_found(id))
    }

    fn save(&mut self, id: &str, blob: String) {
        let history = self.games.entry(id.to_string()).or_default();
        history.push(blob);
        debug!("saved snapshot #{} of {id:?}", history.len());
    }

    fn record(&self, id: &str) -> CheckersResult<&GameRecord> {
        self.records.get(id).ok_or_else(|| not_found(id))
    }

    fn save_record(&mut self, id: &str, record: GameRecord) {
        debug!("saved record of {id:?}, winner {:?}", record.winner);
        self.records.insert(id.to_string(), record);
    }

    fn delete(&mut self, id: &str) -> CheckersResult<()> {
        let history = self.games.remove(id);
        let record = self.records.remove(id);
        if history.is_none() && record.is_none() {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Named board configurations, keyed by [`BoardOptions::name`].
pub trait OptionsStore {
    fn names(&self) -> Vec<String>;

    fn get(&self, name: &str) -> CheckersResult<BoardOptions>;

    /// Validates and stores `options`, replacing any entry with the same name.
    fn save(&mut self, options: BoardOptions) -> CheckersResult<()>;

    fn delete(&mut self, name: &str) -> CheckersResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryOptionsStore {
    options: BTreeMap<String, BoardOptions>,
}

impl MemoryOptionsStore {
    /// A store holding only the standard 8x8 board.
    pub fn with_standard() -> Self {
        let standard = BoardOptions::default();
        Self {
            options: BTreeMap::from([(standard.name.clone(), standard)]),
        }
    }
}

impl OptionsStore for MemoryOptionsStore {
    fn names(&self) -> Vec<String> {
        self.options.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> CheckersResult<BoardOptions> {
        self.options.get(name).cloned().ok_or_else(|| not_found(name))
    }

    fn save(&mut self, options: BoardOptions) -> CheckersResult<()> {
        options.validate()?;
        debug!(
            "saved options {:?} ({}x{})",
            options.name, options.width, options.height
        );
        self.options.insert(options.name.clone(), options);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> CheckersResult<()> {
        self.options
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found(name))
    }
}
