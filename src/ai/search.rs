use log::debug;
use web_time::Instant;

use crate::ai::eval::{distance, utility};
use crate::board::Board;
use crate::rules::{apply_move, clear_transient, is_terminal, movable_pieces, show_possible_moves};
use crate::types::{Position, Side};

pub const DEFAULT_DEPTH: u8 = 3;

/// A position reachable in one move, with the side to move after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub board: Board,
    pub side_to_move: Side,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` at the depth limit and in terminal positions.
    pub best: Option<Child>,
}

/// Plain fixed-depth minimax. Black maximizes, red minimizes.
pub struct Searcher {
    max_depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the best move for `side` on `board`.
    pub fn search(&mut self, board: &Board, side: Side) -> SearchResult {
        let start_time = Instant::now();
        self.nodes = 0;

        let result = self.minimax(board, side, self.max_depth);

        debug!(
            "minimax depth {} for {side:?}: score {}, {} nodes in {:?}",
            self.max_depth,
            result.score,
            self.nodes,
            start_time.elapsed()
        );
        result
    }

    fn minimax(&mut self, board: &Board, side: Side, depth: u8) -> SearchResult {
        self.nodes += 1;

        if depth == 0 || is_terminal(board, side) {
            return SearchResult {
                score: utility(board),
                best: None,
            };
        }

        let maximizing = side.is_black();
        let mut best: Option<(i32, i32, Child)> = None;

        for child in children(board, side) {
            let score = self.minimax(&child.board, child.side_to_move, depth - 1).score;
            let child_distance = distance(&child.board);

            let replace = match &best {
                None => true,
                Some((best_score, _, _)) if score != *best_score => {
                    is_better(score, *best_score, maximizing)
                }
                Some((_, best_distance, _)) => is_better(child_distance, *best_distance, maximizing),
            };
            if replace {
                best = Some((score, child_distance, child));
            }
        }

        match best {
            Some((score, _, child)) => SearchResult {
                score,
                best: Some(child),
            },
            None => SearchResult {
                score: utility(board),
                best: None,
            },
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

fn is_better(candidate: i32, incumbent: i32, maximizing: bool) -> bool {
    if maximizing {
        candidate > incumbent
    } else {
        candidate < incumbent
    }
}

/// Every position `side` can reach with one move, by selecting each movable
/// piece on a scratch copy and moving it to each marked destination.
///
/// A pending capture chain is continued from its selected piece. Pieces and
/// destinations are visited column by column.
pub fn children(board: &Board, side: Side) -> Vec<Child> {
    let mut base = board.clone();
    let chain_pending = base.has_forced_markers();
    if !chain_pending {
        clear_transient(&mut base);
    }

    let mut out = Vec::new();
    for piece in movable_pieces(&base, side) {
        let mut selected = base.clone();
        if !chain_pending {
            show_possible_moves(&mut selected, piece);
        }

        let targets: Vec<Position> = selected
            .positions()
            .filter(|pos| selected.marker_at(*pos))
            .collect();
        for target in targets {
            let mut next = selected.clone();
            if let Some(outcome) = apply_move(&mut next, target) {
                let side_to_move = if outcome.turn_stays {
                    side
                } else {
                    side.opponent()
                };
                out.push(Child {
                    board: next,
                    side_to_move,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    fn board_with(pieces: &[(usize, usize, Tile)]) -> Board {
        let mut board = Board::empty(8, 8).unwrap();
        for &(x, y, tile) in pieces {
            board.place(pos(x, y), tile).unwrap();
        }
        board
    }

    #[test]
    fn opening_has_seven_moves_per_side() {
        let board = Board::new(8, 8).unwrap();

        assert_eq!(children(&board, Side::Black).len(), 7);
        assert_eq!(children(&board, Side::Red).len(), 7);
        assert!(children(&board, Side::Black)
            .iter()
            .all(|child| child.side_to_move == Side::Red && !child.board.has_markers()));
    }

    #[test]
    fn terminal_position_returns_material_and_no_move() {
        let board = board_with(&[(1, 0, Tile::BlackStandard), (3, 0, Tile::BlackKing)]);
        let mut searcher = Searcher::new(3);

        let result = searcher.search(&board, Side::Red);

        assert_eq!(result.score, 2 + 3);
        assert_eq!(result.best, None);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn lone_side_never_loses_material() {
        let board = board_with(&[(1, 2, Tile::BlackStandard), (5, 2, Tile::BlackStandard)]);
        let mut searcher = Searcher::new(3);

        let result = searcher.search(&board, Side::Black);
        let best = result.best.unwrap();

        assert_eq!(result.score, 4);
        assert_eq!(best.board.piece_count(Side::Black), 2);
        assert_eq!(best.side_to_move, Side::Red);
    }

    #[test]
    fn red_avoids_stepping_into_a_capture() {
        let board = board_with(&[(2, 5, Tile::RedStandard), (4, 3, Tile::BlackStandard)]);
        let mut searcher = Searcher::new(3);

        let result = searcher.search(&board, Side::Red);
        let best = result.best.unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(best.board.get(pos(1, 4)), Tile::RedStandard);
    }

    #[test]
    fn black_takes_the_free_piece() {
        let board = board_with(&[
            (2, 3, Tile::BlackStandard),
            (3, 4, Tile::RedStandard),
            (7, 6, Tile::RedStandard),
        ]);
        let mut searcher = Searcher::new(3);

        let best = searcher.search(&board, Side::Black).best.unwrap();

        assert_eq!(best.board.get(pos(4, 5)), Tile::BlackStandard);
        assert_eq!(best.board.piece_count(Side::Red), 1);
    }

    #[test]
    fn equal_scores_prefer_advancing_a_standard_piece() {
        let board = board_with(&[
            (1, 2, Tile::BlackKing),
            (5, 0, Tile::BlackStandard),
            (0, 7, Tile::RedStandard),
        ]);
        let mut searcher = Searcher::new(1);

        let best = searcher.search(&board, Side::Black).best.unwrap();

        assert_eq!(best.board.get(pos(4, 1)), Tile::BlackStandard);
        assert_eq!(best.board.get(pos(1, 2)), Tile::BlackKing);
    }

    #[test]
    fn equal_candidates_keep_the_first_found() {
        let board = board_with(&[(3, 2, Tile::BlackStandard), (0, 7, Tile::RedStandard)]);
        let mut searcher = Searcher::new(1);

        let best = searcher.search(&board, Side::Black).best.unwrap();

        assert_eq!(best.board.get(pos(2, 3)), Tile::BlackStandard);
    }

    #[test]
    fn chain_link_keeps_the_side_to_move() {
        let board = board_with(&[
            (5, 6, Tile::RedStandard),
            (4, 5, Tile::BlackStandard),
            (2, 3, Tile::BlackStandard),
        ]);

        let kids = children(&board, Side::Red);

        assert_eq!(kids.len(), 1);
        assert_eq!(kids[0].side_to_move, Side::Red);
        assert_eq!(kids[0].board.get(pos(3, 4)), Tile::SelectedRedStandard);
        assert!(kids[0].board.has_forced_markers());

        let finish = children(&kids[0].board, Side::Red);
        assert_eq!(finish.len(), 1);
        assert_eq!(finish[0].side_to_move, Side::Black);
        assert_eq!(finish[0].board.piece_count(Side::Black), 0);
    }
}
