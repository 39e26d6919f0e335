use std::fmt;
use crate::board::{Board, Color, Piece, PieceKind, Position, PROMOTION_KINDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Position,
    pub end: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    pub fn new_promotion(start: Position, end: Position, promotion: PieceKind) -> Self {
        Self {
            start,
            end,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            let c = match kind {
                PieceKind::Queen => 'Q',
                PieceKind::Rook => 'R',
                PieceKind::Bishop => 'B',
                PieceKind::Knight => 'N',
                PieceKind::King => 'K',
                PieceKind::Pawn => 'P',
            };
            write!(f, "={}", c)?;
        }
        Ok(())
    }
}

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1),
    (-1, 0), (-1, -1), (0, -1), (1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

/// Geometric move generation. Knows nothing about check: the moves it returns
/// are pseudo-legal and may leave the mover's own king attacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-legal moves for whatever stands on `position`. Empty if the
    /// square is empty or off the board.
    pub fn pseudo_legal_moves(&self, board: &Board, position: Position) -> Vec<Move> {
        let piece = match board.occupant(position) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        let mut moves = Vec::new();
        match piece.kind {
            PieceKind::Rook => {
                self.sliding_moves(board, position, piece, &ROOK_DIRECTIONS, &mut moves)
            }
            PieceKind::Bishop => {
                self.sliding_moves(board, position, piece, &BISHOP_DIRECTIONS, &mut moves)
            }
            PieceKind::Queen => {
                self.sliding_moves(board, position, piece, &QUEEN_DIRECTIONS, &mut moves)
            }
            PieceKind::King => {
                self.fixed_moves(board, position, piece, &KING_OFFSETS, &mut moves)
            }
            PieceKind::Knight => {
                self.fixed_moves(board, position, piece, &KNIGHT_OFFSETS, &mut moves)
            }
            PieceKind::Pawn => self.pawn_moves(board, position, piece.color, &mut moves),
        }
        moves
    }

    fn sliding_moves(
        &self,
        board: &Board,
        from: Position,
        piece: Piece,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                match board.occupant(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    fn fixed_moves(
        &self,
        board: &Board,
        from: Position,
        piece: Piece,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = from.offset(dr, dc) {
                let open = board
                    .occupant(to)
                    .map_or(true, |other| other.color != piece.color);
                if open {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn pawn_moves(&self, board: &Board, from: Position, color: Color, moves: &mut Vec<Move>) {
        let forward = color.forward();

        // Single push, then double push from the home row
        if let Some(one) = from.offset(forward, 0) {
            if board.occupant(one).is_none() {
                self.push_pawn_move(from, one, color, moves);
                if from.row() == color.pawn_home_row() {
                    if let Some(two) = from.offset(2 * forward, 0) {
                        if board.occupant(two).is_none() {
                            self.push_pawn_move(from, two, color, moves);
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for dc in [-1, 1] {
            if let Some(to) = from.offset(forward, dc) {
                if board.occupant(to).is_some_and(|other| other.color != color) {
                    self.push_pawn_move(from, to, color, moves);
                }
            }
        }
    }

    fn push_pawn_move(&self, from: Position, to: Position, color: Color, moves: &mut Vec<Move>) {
        if to.row() == color.promotion_row() {
            for kind in PROMOTION_KINDS {
                moves.push(Move::new_promotion(from, to, kind));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }

    /// Whether any `attacker` piece has a pseudo-legal move ending on `target`.
    pub fn is_square_under_attack(&self, board: &Board, target: Position, attacker: Color) -> bool {
        board
            .pieces()
            .filter(|(_, piece)| piece.color == attacker)
            .any(|(pos, _)| {
                self.pseudo_legal_moves(board, pos)
                    .iter()
                    .any(|mv| mv.end == target)
            })
    }

    /// A board without a king of `color` is never in check.
    pub fn is_king_in_check(&self, board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king_square) => self.is_square_under_attack(board, king_square, color.opposite()),
            None => false,
        }
    }
}
