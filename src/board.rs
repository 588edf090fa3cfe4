use crate::error::{CheckersError, CheckersResult};
use crate::options::validate_dimensions;
use crate::types::{Position, Side, Tile};

/// Diagonal unit vectors as `(dx, dy)`.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Checkers grid stored as one flat vector indexed by `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Creates the initial layout: black fills the dark squares of the top
    /// `height / 2 - 1` rows, red the same number of rows at the bottom.
    pub fn new(width: usize, height: usize) -> CheckersResult<Self> {
        let mut board = Self::empty(width, height)?;
        let rows_per_side = height / 2 - 1;

        for y in 0..height {
            let tile = if y < rows_per_side {
                Tile::BlackStandard
            } else if y >= height - rows_per_side {
                Tile::RedStandard
            } else {
                continue;
            };
            for x in (0..width).filter(|x| is_dark_square(*x, y)) {
                board.set(Position::new(x, y), tile);
            }
        }

        Ok(board)
    }

    /// Creates a board with no pieces. Dimensions follow the same rules as [`Board::new`].
    pub fn empty(width: usize, height: usize) -> CheckersResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Tile::Empty; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Returns the tile at `pos`, or `None` outside the grid.
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.contains(pos).then(|| self.get(pos))
    }

    /// Puts `tile` on `pos`, replacing whatever was there.
    pub fn place(&mut self, pos: Position, tile: Tile) -> CheckersResult<()> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos.x as i64, pos.y as i64));
        }
        self.set(pos, tile);
        Ok(())
    }

    pub(crate) fn get(&self, pos: Position) -> Tile {
        debug_assert!(self.contains(pos), "{pos:?} is off the board");
        self.cells[pos.y * self.width + pos.x]
    }

    pub(crate) fn set(&mut self, pos: Position, tile: Tile) {
        debug_assert!(self.contains(pos), "{pos:?} is off the board");
        self.cells[pos.y * self.width + pos.x] = tile;
    }

    pub(crate) fn out_of_bounds(&self, x: i64, y: i64) -> CheckersError {
        CheckersError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Square reached from `pos` after `steps` diagonal steps along `dir`.
    pub fn step(&self, pos: Position, dir: (isize, isize), steps: isize) -> Option<Position> {
        let x = pos.x.checked_add_signed(dir.0 * steps)?;
        let y = pos.y.checked_add_signed(dir.1 * steps)?;
        let target = Position::new(x, y);
        self.contains(target).then_some(target)
    }

    /// Every coordinate, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    /// Squares holding a piece of `side`, selected or not, column by column.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(move |pos| self.get(*pos).side() == Some(side))
    }

    pub fn red_piece_at(&self, pos: Position) -> bool {
        self.tile(pos).and_then(Tile::side) == Some(Side::Red)
    }

    pub fn black_piece_at(&self, pos: Position) -> bool {
        self.tile(pos).and_then(Tile::side) == Some(Side::Black)
    }

    pub fn king_at(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_king)
    }

    pub fn selected_at(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_selected)
    }

    pub fn marker_at(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_marker)
    }

    pub fn has_markers(&self) -> bool {
        self.cells.iter().any(|tile| tile.is_marker())
    }

    pub fn has_forced_markers(&self) -> bool {
        self.cells.contains(&Tile::ForcedMove)
    }

    /// The selected piece, if a move is mid-selection.
    pub fn selected(&self) -> Option<Position> {
        self.positions().find(|pos| self.get(*pos).is_selected())
    }

    /// Returns `(standard, king)` counts for `side`.
    pub fn count(&self, side: Side) -> (usize, usize) {
        self.cells
            .iter()
            .filter(|tile| tile.side() == Some(side))
            .fold((0, 0), |(standard, kings), tile| {
                if tile.is_king() {
                    (standard, kings + 1)
                } else {
                    (standard + 1, kings)
                }
            })
    }

    pub fn piece_count(&self, side: Side) -> usize {
        let (standard, kings) = self.count(side);
        standard + kings
    }

    /// Row-major tags, as shown to UI collaborators.
    pub fn to_tags(&self) -> Vec<Option<u8>> {
        self.cells.iter().map(|tile| tile.tag()).collect()
    }

    /// Column-major grid of tags, the persisted layout.
    pub fn to_columns(&self) -> Vec<Vec<Option<u8>>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.get(Position::new(x, y)).tag())
                    .collect()
            })
            .collect()
    }

    /// Rebuilds a board from a column-major grid of tags.
    pub fn from_columns(columns: &[Vec<Option<u8>>]) -> CheckersResult<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if let Some((x, column)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(CheckersError::deserialization(format!(
                "column {x} has {} cells, expected {height}",
                column.len()
            )));
        }

        let mut board = Self::empty(width, height)
            .map_err(|err| CheckersError::deserialization(err.to_string()))?;
        for (x, column) in columns.iter().enumerate() {
            for (y, tag) in column.iter().enumerate() {
                let tile = Tile::from_tag(*tag).ok_or_else(|| {
                    CheckersError::deserialization(format!("unknown tile tag {tag:?} at ({x}, {y})"))
                })?;
                board.set(Position::new(x, y), tile);
            }
        }

        Ok(board)
    }
}

/// Playable squares; the initial layout only uses these.
pub fn is_dark_square(x: usize, y: usize) -> bool {
    (x + y) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initial_standard_board_has_twelve_pieces_per_side() {
        let board = Board::new(8, 8).unwrap();

        assert_eq!(board.count(Side::Black), (12, 0));
        assert_eq!(board.count(Side::Red), (12, 0));
        assert_eq!(board.tile(Position::new(1, 0)), Some(Tile::BlackStandard));
        assert_eq!(board.tile(Position::new(0, 1)), Some(Tile::BlackStandard));
        assert_eq!(board.tile(Position::new(0, 7)), Some(Tile::RedStandard));
        assert_eq!(board.tile(Position::new(1, 6)), Some(Tile::RedStandard));
        assert_eq!(board.tile(Position::new(0, 3)), Some(Tile::Empty));
        assert_eq!(board.tile(Position::new(1, 4)), Some(Tile::Empty));
        assert!(!board.has_markers());
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert!(matches!(
            Board::new(5, 8),
            Err(CheckersError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Board::new(8, 2),
            Err(CheckersError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn step_stays_inside_the_grid() {
        let board = Board::empty(4, 4).unwrap();
        let corner = Position::new(0, 0);

        assert_eq!(board.step(corner, (1, 1), 2), Some(Position::new(2, 2)));
        assert_eq!(board.step(corner, (-1, 1), 1), None);
        assert_eq!(board.step(Position::new(3, 3), (1, 1), 1), None);
        assert_eq!(board.step(Position::new(2, 2), (1, 1), 2), None);
    }

    #[test]
    fn place_rejects_coordinates_outside_the_grid() {
        let mut board = Board::empty(4, 6).unwrap();
        let before = board.clone();

        let err = board.place(Position::new(4, 0), Tile::RedKing).unwrap_err();

        assert!(matches!(err, CheckersError::OutOfBounds { x: 4, y: 0, width: 4, height: 6 }));
        assert_eq!(board, before);
    }

    #[test]
    fn columns_are_x_major() {
        let mut board = Board::empty(4, 6).unwrap();
        board.place(Position::new(3, 1), Tile::BlackKing).unwrap();

        let columns = board.to_columns();

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].len(), 6);
        assert_eq!(columns[3][1], Some(5));
        assert_eq!(Board::from_columns(&columns).unwrap(), board);
    }

    #[test]
    fn from_columns_rejects_ragged_or_unknown_cells() {
        let mut ragged = Board::empty(4, 4).unwrap().to_columns();
        ragged[2].pop();
        assert!(matches!(
            Board::from_columns(&ragged),
            Err(CheckersError::Deserialization { .. })
        ));

        let mut unknown = Board::empty(4, 4).unwrap().to_columns();
        unknown[0][0] = Some(42);
        assert!(matches!(
            Board::from_columns(&unknown),
            Err(CheckersError::Deserialization { .. })
        ));

        assert!(matches!(
            Board::from_columns(&[]),
            Err(CheckersError::Deserialization { .. })
        ));
    }

    proptest! {
        #[test]
        fn initial_layout_fills_dark_squares_evenly(half_w in 2usize..8, half_h in 2usize..8) {
            let (width, height) = (half_w * 2, half_h * 2);
            let board = Board::new(width, height).unwrap();
            let expected = (height / 2 - 1) * (width / 2);

            prop_assert_eq!(board.count(Side::Black), (expected, 0));
            prop_assert_eq!(board.count(Side::Red), (expected, 0));
            for pos in board.positions() {
                if board.get(pos).is_piece() {
                    prop_assert!(is_dark_square(pos.x, pos.y));
                }
            }
            for pos in board.pieces_of(Side::Black) {
                prop_assert!(pos.y < height / 2 - 1);
            }
            for pos in board.pieces_of(Side::Red) {
                prop_assert!(pos.y > height / 2);
            }
        }
    }
}
