use serde::{Deserialize, Serialize};

/// A board coordinate. `x` is the column, `y` the row, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The two players. Black starts nearest row 0, red nearest the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    Red,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::Red,
            Self::Red => Self::Black,
        }
    }

    pub fn from_black_flag(is_black: bool) -> Self {
        if is_black { Self::Black } else { Self::Red }
    }

    pub fn is_black(self) -> bool {
        self == Self::Black
    }

    /// Row delta of a standard piece moving toward the opponent.
    pub fn forward(self) -> isize {
        match self {
            Self::Black => 1,
            Self::Red => -1,
        }
    }

    /// Row on which a standard piece of this side is crowned.
    pub fn promotion_row(self, height: usize) -> usize {
        match self {
            Self::Black => height - 1,
            Self::Red => 0,
        }
    }
}

/// State of a single grid cell.
///
/// Selected and marker variants are transient annotations laid over the
/// persistent piece states while a move is being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    PossibleMove,
    ForcedMove,
    RedStandard,
    BlackStandard,
    RedKing,
    BlackKing,
    SelectedRedStandard,
    SelectedBlackStandard,
    SelectedRedKing,
    SelectedBlackKing,
}

impl Tile {
    /// Tile for an unselected piece.
    pub fn piece(side: Side, king: bool) -> Self {
        match (side, king) {
            (Side::Black, false) => Self::BlackStandard,
            (Side::Black, true) => Self::BlackKing,
            (Side::Red, false) => Self::RedStandard,
            (Side::Red, true) => Self::RedKing,
        }
    }

    /// Owner of the piece on this tile, selected or not.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::BlackStandard
            | Self::BlackKing
            | Self::SelectedBlackStandard
            | Self::SelectedBlackKing => Some(Side::Black),
            Self::RedStandard | Self::RedKing | Self::SelectedRedStandard | Self::SelectedRedKing => {
                Some(Side::Red)
            }
            Self::Empty | Self::PossibleMove | Self::ForcedMove => None,
        }
    }

    pub fn is_piece(self) -> bool {
        self.side().is_some()
    }

    pub fn is_king(self) -> bool {
        matches!(
            self,
            Self::RedKing | Self::BlackKing | Self::SelectedRedKing | Self::SelectedBlackKing
        )
    }

    pub fn is_selected(self) -> bool {
        matches!(
            self,
            Self::SelectedRedStandard
                | Self::SelectedBlackStandard
                | Self::SelectedRedKing
                | Self::SelectedBlackKing
        )
    }

    pub fn is_marker(self) -> bool {
        matches!(self, Self::PossibleMove | Self::ForcedMove)
    }

    /// Empty or carrying only a marker, so a piece may land here.
    pub fn is_vacant(self) -> bool {
        matches!(self, Self::Empty | Self::PossibleMove | Self::ForcedMove)
    }

    pub fn selected(self) -> Self {
        match self {
            Self::RedStandard => Self::SelectedRedStandard,
            Self::BlackStandard => Self::SelectedBlackStandard,
            Self::RedKing => Self::SelectedRedKing,
            Self::BlackKing => Self::SelectedBlackKing,
            other => other,
        }
    }

    pub fn deselected(self) -> Self {
        match self {
            Self::SelectedRedStandard => Self::RedStandard,
            Self::SelectedBlackStandard => Self::BlackStandard,
            Self::SelectedRedKing => Self::RedKing,
            Self::SelectedBlackKing => Self::BlackKing,
            other => other,
        }
    }

    /// Tag used in the persisted grid. `None` means empty.
    pub fn tag(self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::PossibleMove => Some(0),
            Self::ForcedMove => Some(1),
            Self::RedStandard => Some(2),
            Self::BlackStandard => Some(3),
            Self::RedKing => Some(4),
            Self::BlackKing => Some(5),
            Self::SelectedRedStandard => Some(6),
            Self::SelectedBlackStandard => Some(7),
            Self::SelectedRedKing => Some(8),
            Self::SelectedBlackKing => Some(9),
        }
    }

    pub fn from_tag(tag: Option<u8>) -> Option<Self> {
        let tile = match tag {
            None => Self::Empty,
            Some(0) => Self::PossibleMove,
            Some(1) => Self::ForcedMove,
            Some(2) => Self::RedStandard,
            Some(3) => Self::BlackStandard,
            Some(4) => Self::RedKing,
            Some(5) => Self::BlackKing,
            Some(6) => Self::SelectedRedStandard,
            Some(7) => Self::SelectedBlackStandard,
            Some(8) => Self::SelectedRedKing,
            Some(9) => Self::SelectedBlackKing,
            Some(_) => return None,
        };
        Some(tile)
    }
}

/// Public game state handed to UI collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major tile tags, `None` for empty cells.
    pub board: Vec<Option<u8>>,
    pub next_move_by_black: bool,
    pub black_count: usize,
    pub red_count: usize,
    /// Contract:
    /// - `true` while a capture chain waits for its next jump.
    pub has_forced_jump: bool,
    pub is_game_over: bool,
    pub winner: Option<Side>,
}

/// What happened when a marker tile was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    pub captured: Option<Position>,
    pub promoted: bool,
    /// The same piece must keep jumping; the turn did not pass.
    pub turn_stays: bool,
}

/// Summary of one computer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiTurn {
    /// Searches run; more than one when a capture chain continued.
    pub links: usize,
    pub captured: usize,
}

/// Result of a select-or-move click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Selection {
    Moved(MoveOutcome),
    /// A piece was selected and its destinations marked.
    Selected(Position),
    /// Transient markers were cleared with no new selection.
    Cleared,
    /// A capture chain is pending elsewhere; nothing changed.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Tile; 11] = [
        Tile::Empty,
        Tile::PossibleMove,
        Tile::ForcedMove,
        Tile::RedStandard,
        Tile::BlackStandard,
        Tile::RedKing,
        Tile::BlackKing,
        Tile::SelectedRedStandard,
        Tile::SelectedBlackStandard,
        Tile::SelectedRedKing,
        Tile::SelectedBlackKing,
    ];

    #[test]
    fn tags_are_unique_and_reversible() {
        for tile in ALL {
            assert_eq!(Tile::from_tag(tile.tag()), Some(tile));
        }
        assert_eq!(Tile::from_tag(Some(10)), None);
    }

    #[test]
    fn selection_keeps_owner_and_rank() {
        for tile in ALL.into_iter().filter(|t| t.is_piece()) {
            let selected = tile.selected();
            assert!(selected.is_selected());
            assert_eq!(selected.side(), tile.side());
            assert_eq!(selected.is_king(), tile.is_king());
            assert_eq!(selected.deselected(), tile.deselected());
        }
        assert_eq!(Tile::PossibleMove.selected(), Tile::PossibleMove);
    }

    #[test]
    fn sides_move_toward_each_other() {
        assert_eq!(Side::Black.forward(), 1);
        assert_eq!(Side::Red.forward(), -1);
        assert_eq!(Side::Black.promotion_row(8), 7);
        assert_eq!(Side::Red.promotion_row(8), 0);
        assert_eq!(Side::Red.opponent(), Side::Black);
    }
}
