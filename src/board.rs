use std::fmt;
use thiserror::Error;
use crate::movegen::Move;

pub const BOARD_MIN: i8 = 1;
pub const BOARD_MAX: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// Kinds a pawn may become on the far rank, in the order moves are emitted.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    fn to_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row the color's pawns start on.
    pub fn pawn_home_row(&self) -> i8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Row a pawn of this color promotes on.
    pub fn promotion_row(&self) -> i8 {
        match self {
            Color::White => BOARD_MAX,
            Color::Black => BOARD_MIN,
        }
    }

    /// Row delta of a pawn advance.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Uppercase for white, lowercase for black.
    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A square addressed by 1-based row and column. Row 1 is white's back rank.
///
/// Construction does not check bounds; `Board` rejects off-board positions on
/// access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: i8,
    col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn is_on_board(&self) -> bool {
        (BOARD_MIN..=BOARD_MAX).contains(&self.row) && (BOARD_MIN..=BOARD_MAX).contains(&self.col)
    }

    /// The position shifted by the given deltas, if it is still on the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let target = Position::new(self.row.checked_add(dr)?, self.col.checked_add(dc)?);
        if target.is_on_board() {
            Some(target)
        } else {
            None
        }
    }

    /// Every square, row by row from (1,1) to (8,8).
    pub fn all() -> impl Iterator<Item = Position> {
        (BOARD_MIN..=BOARD_MAX)
            .flat_map(|row| (BOARD_MIN..=BOARD_MAX).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position out of bounds: {row},{col}")]
    OutOfRange { row: i8, col: i8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    fn index(position: Position) -> Result<(usize, usize), BoardError> {
        if !position.is_on_board() {
            return Err(BoardError::OutOfRange {
                row: position.row,
                col: position.col,
            });
        }
        Ok(((position.row - 1) as usize, (position.col - 1) as usize))
    }

    pub fn get(&self, position: Position) -> Result<Option<Piece>, BoardError> {
        let (row, col) = Self::index(position)?;
        Ok(self.squares[row][col])
    }

    /// Places `piece` on `position`; `None` clears the square.
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> Result<(), BoardError> {
        let (row, col) = Self::index(position)?;
        self.squares[row][col] = piece;
        Ok(())
    }

    /// Occupant of an on-board square. Off-board positions read as empty.
    pub(crate) fn occupant(&self, position: Position) -> Option<Piece> {
        self.get(position).ok().flatten()
    }

    /// Clears the board and sets up the standard opening position.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];

        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (i, &kind) in BACK_RANK.iter().enumerate() {
            self.squares[0][i] = Some(Piece::new(Color::White, kind));
            self.squares[1][i] = Some(Piece::new(Color::White, PieceKind::Pawn));
            self.squares[6][i] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            self.squares[7][i] = Some(Piece::new(Color::Black, kind));
        }
    }

    /// Moves the piece on the start square to the end square, replacing it with
    /// the promotion kind if the move carries one. Whatever stood on the end
    /// square is overwritten. Does nothing if the start square is empty; fails
    /// if either square is off the board.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), BoardError> {
        let from = Self::index(mv.start)?;
        let to = Self::index(mv.end)?;
        let piece = match self.squares[from.0][from.1] {
            Some(piece) => piece,
            None => return Ok(()),
        };
        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self.squares[from.0][from.1] = None;
        self.squares[to.0][to.1] = Some(placed);
        Ok(())
    }

    /// Occupied squares with their pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.occupant(pos).map(|piece| (pos, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(pos, _)| pos)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in (0..8).rev() {
            for col in 0..8 {
                match self.squares[row][col] {
                    Some(piece) => result.push(piece.to_char()),
                    None => result.push('.'),
                }
                if col < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
