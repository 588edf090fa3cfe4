//! Move rules: selection, destination markers, move application, capture
//! chains, promotion and terminal detection.
//!
//! Every function works on an explicit board and side, so the live session
//! and the search's scratch copies share one code path.

use log::{debug, trace};

use crate::board::{Board, DIRECTIONS};
use crate::types::{MoveOutcome, Position, Selection, Side, Tile};

/// Directions the piece on `tile` may move or capture in.
fn directions(tile: Tile) -> impl Iterator<Item = (isize, isize)> {
    let forward = tile.side().map(Side::forward);
    let king = tile.is_king();
    DIRECTIONS
        .into_iter()
        .filter(move |(_, dy)| king || Some(*dy) == forward)
}

/// Landing squares of every capture available to the piece on `pos`.
pub fn capture_targets(board: &Board, pos: Position) -> Vec<Position> {
    let tile = board.get(pos);
    let Some(side) = tile.side() else {
        return Vec::new();
    };

    directions(tile)
        .filter_map(|dir| {
            let over = board.step(pos, dir, 1)?;
            let land = board.step(pos, dir, 2)?;
            let jumps_opponent = board.get(over).side() == Some(side.opponent());
            (jumps_opponent && board.get(land).is_vacant()).then_some(land)
        })
        .collect()
}

/// Squares the piece on `pos` can reach with a single non-capturing step.
pub fn step_targets(board: &Board, pos: Position) -> Vec<Position> {
    let tile = board.get(pos);
    if !tile.is_piece() {
        return Vec::new();
    }

    directions(tile)
        .filter_map(|dir| board.step(pos, dir, 1))
        .filter(|target| board.get(*target).is_vacant())
        .collect()
}

pub fn can_capture(board: &Board, pos: Position) -> bool {
    !capture_targets(board, pos).is_empty()
}

/// Whether any piece of `side` has a capture available.
pub fn capture_available(board: &Board, side: Side) -> bool {
    board.pieces_of(side).any(|pos| can_capture(board, pos))
}

/// Every piece of `side` that can capture, with its landing squares.
pub fn forced_jumps(board: &Board, side: Side) -> Vec<(Position, Vec<Position>)> {
    board
        .pieces_of(side)
        .map(|pos| (pos, capture_targets(board, pos)))
        .filter(|(_, targets)| !targets.is_empty())
        .collect()
}

/// Pieces of `side` allowed to move now.
///
/// A pending chain restricts this to the selected piece; otherwise capturing
/// pieces take precedence board-wide over pieces with simple moves.
pub fn movable_pieces(board: &Board, side: Side) -> Vec<Position> {
    if board.has_forced_markers() {
        return board.selected().into_iter().collect();
    }

    if capture_available(board, side) {
        board
            .pieces_of(side)
            .filter(|pos| can_capture(board, *pos))
            .collect()
    } else {
        board
            .pieces_of(side)
            .filter(|pos| !step_targets(board, *pos).is_empty())
            .collect()
    }
}

/// Removes markers and selection highlights, keeping the pieces.
pub fn clear_transient(board: &mut Board) {
    let positions: Vec<Position> = board.positions().collect();
    for pos in positions {
        let tile = board.get(pos);
        if tile.is_marker() {
            board.set(pos, Tile::Empty);
        } else if tile.is_selected() {
            board.set(pos, tile.deselected());
        }
    }
}

/// Selects the piece on `pos` and marks its destinations. Capture landings
/// are marked when the piece can capture, simple steps otherwise.
pub fn show_possible_moves(board: &mut Board, pos: Position) {
    let tile = board.get(pos);
    if !tile.is_piece() {
        return;
    }
    board.set(pos, tile.selected());

    let mut targets = capture_targets(board, pos);
    if targets.is_empty() {
        targets = step_targets(board, pos);
    }
    for target in targets {
        board.set(target, Tile::PossibleMove);
    }
}

/// Marks the capture landings of the piece on `pos` as forced.
pub fn show_forced_moves(board: &mut Board, pos: Position) {
    for target in capture_targets(board, pos) {
        board.set(target, Tile::ForcedMove);
    }
}

/// Moves the selected piece to the marker on `to`.
///
/// Removes a jumped piece and crowns on the far row. When the same piece
/// can capture again and was not just crowned, it stays selected with
/// forced markers for the next jump. Returns `None` when nothing is
/// selected; the markers are cleared either way.
pub fn apply_move(board: &mut Board, to: Position) -> Option<MoveOutcome> {
    let from = board.selected();
    clear_transient(board);
    let from = from?;

    let tile = board.get(from);
    let side = tile.side()?;
    board.set(from, Tile::Empty);

    let mut captured = None;
    if from.x.abs_diff(to.x) == 2 && from.y.abs_diff(to.y) == 2 {
        let over = Position::new((from.x + to.x) / 2, (from.y + to.y) / 2);
        if board.get(over).side() == Some(side.opponent()) {
            board.set(over, Tile::Empty);
            captured = Some(over);
        }
    }

    let promoted = !tile.is_king() && to.y == side.promotion_row(board.height());
    board.set(to, Tile::piece(side, tile.is_king() || promoted));

    // Crowning ends the turn.
    let turn_stays = captured.is_some() && !promoted && can_capture(board, to);
    if turn_stays {
        board.set(to, board.get(to).selected());
        show_forced_moves(board, to);
    }

    trace!(
        "{side:?} moved ({}, {}) -> ({}, {}), captured {captured:?}, promoted {promoted}",
        from.x, from.y, to.x, to.y
    );
    Some(MoveOutcome {
        from,
        to,
        captured,
        promoted,
        turn_stays,
    })
}

/// Handles one click on `pos` for `side`. `pos` must lie on the board.
pub fn select_or_move(board: &mut Board, side: Side, pos: Position) -> Selection {
    if board.get(pos).is_marker() {
        return match apply_move(board, pos) {
            Some(outcome) => Selection::Moved(outcome),
            None => Selection::Cleared,
        };
    }

    if board.has_forced_markers() {
        debug!("ignoring ({}, {}): a capture chain is pending", pos.x, pos.y);
        return Selection::Ignored;
    }

    let own_piece = board.get(pos).side() == Some(side);
    let selectable = if capture_available(board, side) {
        own_piece && can_capture(board, pos)
    } else {
        own_piece
    };

    clear_transient(board);
    if selectable {
        show_possible_moves(board, pos);
        Selection::Selected(pos)
    } else {
        Selection::Cleared
    }
}

/// A position is terminal when no markers are shown and `side` has neither
/// a capture nor a simple move with any piece.
pub fn is_terminal(board: &Board, side: Side) -> bool {
    !board.has_markers() && movable_pieces(board, side).is_empty()
}

/// The winner once `side` to move is stuck.
pub fn winner(board: &Board, side: Side) -> Option<Side> {
    is_terminal(board, side).then(|| side.opponent())
}
