use crate::board::Board;
use crate::types::{Position, Side};

const STANDARD_WEIGHT: i32 = 2;
const KING_WEIGHT: i32 = 3;

/// Material score from black's point of view.
pub fn utility(board: &Board) -> i32 {
    let (black_standard, black_kings) = board.count(Side::Black);
    let (red_standard, red_kings) = board.count(Side::Red);

    (black_standard as i32 - red_standard as i32) * STANDARD_WEIGHT
        + (black_kings as i32 - red_kings as i32) * KING_WEIGHT
}

/// Advancement of black pieces minus advancement of red pieces.
///
/// Kings always count `width + 1`, wherever they stand.
pub fn distance(board: &Board) -> i32 {
    let king_distance = board.width() as i32 + 1;
    let advancement = |side: Side, pos: Position| -> i32 {
        if board.king_at(pos) {
            return king_distance;
        }
        match side {
            Side::Black => pos.y as i32 + 1,
            Side::Red => (board.height() - pos.y) as i32,
        }
    };

    let black: i32 = board
        .pieces_of(Side::Black)
        .map(|pos| advancement(Side::Black, pos))
        .sum();
    let red: i32 = board
        .pieces_of(Side::Red)
        .map(|pos| advancement(Side::Red, pos))
        .sum();

    black - red
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn board_with(pieces: &[(usize, usize, Tile)]) -> Board {
        let mut board = Board::empty(8, 8).unwrap();
        for &(x, y, tile) in pieces {
            board.place(Position::new(x, y), tile).unwrap();
        }
        board
    }

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::new(8, 8).unwrap();

        assert_eq!(utility(&board), 0);
        assert_eq!(distance(&board), 0);
    }

    #[test]
    fn kings_weigh_more_than_standard_pieces() {
        let board = board_with(&[
            (1, 0, Tile::BlackKing),
            (3, 0, Tile::BlackStandard),
            (0, 7, Tile::RedStandard),
            (2, 7, Tile::SelectedRedStandard),
            (4, 7, Tile::RedStandard),
        ]);

        assert_eq!(utility(&board), 3 + 2 - 3 * 2);
    }

    #[test]
    fn advancement_counts_rows_toward_the_opponent() {
        let board = board_with(&[(1, 2, Tile::BlackStandard), (2, 5, Tile::RedStandard)]);
        assert_eq!(distance(&board), 3 - 3);

        let advanced = board_with(&[(1, 6, Tile::BlackStandard), (2, 5, Tile::RedStandard)]);
        assert_eq!(distance(&advanced), 7 - 3);
    }

    #[test]
    fn kings_contribute_a_constant() {
        let near = board_with(&[(1, 0, Tile::BlackKing)]);
        let far = board_with(&[(6, 7, Tile::BlackKing)]);

        assert_eq!(distance(&near), 9);
        assert_eq!(distance(&far), 9);
        assert_eq!(distance(&board_with(&[(3, 4, Tile::RedKing)])), -9);
    }
}
