use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::ai::search::{self, Child, DEFAULT_DEPTH, Searcher};
use crate::board::Board;
use crate::error::{CheckersError, CheckersResult};
use crate::options::BoardOptions;
use crate::rules;
use crate::store::GameStore;
use crate::types::{AiTurn, GameSnapshot, Position, Selection, Side};

/// Picks a full move for the side to move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side) -> Option<Child>;
}

/// Fixed-depth minimax over scratch copies of the board.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector {
    pub depth: u8,
}

impl Default for MinimaxSelector {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, side: Side) -> Option<Child> {
        // A zero-ply search never yields a move.
        Searcher::new(self.depth.max(1)).search(board, side).best
    }
}

/// The persisted unit: column-major grid plus whose turn it is.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PersistedState {
    game_board: Vec<Vec<Option<u8>>>,
    next_move_by_black: bool,
}

/// One turn-taking game: the board and the side to move.
pub struct GameSession {
    board: Board,
    side_to_move: Side,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// Starts a new game from `options`. Red moves first.
    pub fn new(options: &BoardOptions) -> CheckersResult<Self> {
        options.validate()?;
        let board = Board::new(options.width, options.height)?;
        info!(
            "new game {:?} on a {}x{} board",
            options.name, options.width, options.height
        );
        Ok(Self::with_board(board, Side::Red))
    }

    /// Resumes from an arbitrary position. Selections and markers must be
    /// consistent with `side_to_move`.
    pub fn from_parts(board: Board, side_to_move: Side) -> CheckersResult<Self> {
        validate_annotations(&board, side_to_move)
            .map_err(CheckersError::invalid_configuration)?;
        Ok(Self::with_board(board, side_to_move))
    }

    /// Resumes from a blob produced by [`GameSession::serialize`].
    pub fn restore(blob: &str) -> CheckersResult<Self> {
        let state: PersistedState = serde_json::from_str(blob)
            .map_err(|err| CheckersError::deserialization(err.to_string()))?;
        let board = Board::from_columns(&state.game_board)?;
        let side_to_move = Side::from_black_flag(state.next_move_by_black);
        validate_annotations(&board, side_to_move).map_err(CheckersError::deserialization)?;

        info!(
            "restored {}x{} game, {side_to_move:?} to move",
            board.width(),
            board.height()
        );
        Ok(Self::with_board(board, side_to_move))
    }

    fn with_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            selector: Box::new(MinimaxSelector::default()),
        }
    }

    pub fn with_selector(mut self, selector: Box<dyn MoveSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn serialize(&self) -> CheckersResult<String> {
        let state = PersistedState {
            game_board: self.board.to_columns(),
            next_move_by_black: self.side_to_move.is_black(),
        };
        Ok(serde_json::to_string(&state)?)
    }

    /// Loads the latest snapshot stored under `id`.
    pub fn load(store: &dyn GameStore, id: &str) -> CheckersResult<Self> {
        Self::restore(&store.latest(id)?)
    }

    /// Appends the current state to the history stored under `id`.
    pub fn save(&self, store: &mut dyn GameStore, id: &str) -> CheckersResult<()> {
        store.save(id, self.serialize()?);
        Ok(())
    }

    /// A copy of the current board.
    pub fn board(&self) -> Board {
        self.board.clone()
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn next_move_by_black(&self) -> bool {
        self.side_to_move.is_black()
    }

    /// A capture chain is waiting for its next jump.
    pub fn has_forced_jump(&self) -> bool {
        self.board.has_forced_markers()
    }

    /// The side to move has at least one capture somewhere.
    pub fn capture_available(&self) -> bool {
        rules::capture_available(&self.board, self.side_to_move)
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        rules::winner(&self.board, self.side_to_move)
    }

    /// Handles a click on `(x, y)`. Coordinates outside the grid are
    /// rejected before anything changes.
    pub fn select_or_move(&mut self, x: usize, y: usize) -> CheckersResult<Selection> {
        let pos = Position::new(x, y);
        if !self.board.contains(pos) {
            return Err(self.board.out_of_bounds(x as i64, y as i64));
        }

        let selection = rules::select_or_move(&mut self.board, self.side_to_move, pos);
        if let Selection::Moved(outcome) = selection {
            debug!("{:?} moved: {outcome:?}", self.side_to_move);
            if !outcome.turn_stays {
                self.side_to_move = self.side_to_move.opponent();
            }
        }
        Ok(selection)
    }

    /// Lets the selector play a full move for the side to move, continuing
    /// with a fresh search for every link of a capture chain. Returns `None`
    /// when the side to move cannot move. A selector answer that is not one
    /// of the legal successors is rejected and the session is left as it was.
    pub fn choose_ai_move(&mut self) -> CheckersResult<Option<AiTurn>> {
        let side = self.side_to_move;
        let opponent_before = self.board.piece_count(side.opponent());
        let mut board = self.board.clone();
        let mut side_to_move = side;
        if !board.has_forced_markers() {
            rules::clear_transient(&mut board);
        }

        let mut links = 0;
        while !rules::is_terminal(&board, side) {
            let Some(child) = self.selector.select_move(&board, side) else {
                break;
            };
            if !search::children(&board, side).contains(&child) {
                return Err(CheckersError::IllegalMove {
                    reason: format!(
                        "selector returned a {}x{} position {side:?} cannot reach",
                        child.board.width(),
                        child.board.height()
                    ),
                });
            }
            links += 1;
            board = child.board;
            if child.side_to_move != side {
                side_to_move = child.side_to_move;
                break;
            }
        }

        if links == 0 {
            debug!("{side:?} has no move to play");
            return Ok(None);
        }

        let captured = opponent_before - board.piece_count(side.opponent());
        self.board = board;
        self.side_to_move = side_to_move;
        debug!("{side:?} played {links} link(s), captured {captured}");
        Ok(Some(AiTurn { links, captured }))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let winner = self.winner();
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_tags(),
            next_move_by_black: self.next_move_by_black(),
            black_count: self.board.piece_count(Side::Black),
            red_count: self.board.piece_count(Side::Red),
            has_forced_jump: self.has_forced_jump(),
            is_game_over: winner.is_some(),
            winner,
        }
    }
}

/// At most one selected piece, owned by the side to move, and markers only
/// alongside a selection.
fn validate_annotations(board: &Board, side_to_move: Side) -> Result<(), String> {
    let selected: Vec<Position> = board
        .positions()
        .filter(|pos| board.selected_at(*pos))
        .collect();

    if selected.len() > 1 {
        return Err(format!("{} pieces are selected at once", selected.len()));
    }
    if let Some(pos) = selected.first()
        && board.get(*pos).side() != Some(side_to_move)
    {
        return Err(format!(
            "selected piece at ({}, {}) does not belong to {side_to_move:?}",
            pos.x, pos.y
        ));
    }
    if selected.is_empty() && board.has_markers() {
        return Err("move markers without a selected piece".to_string());
    }
    Ok(())
}
