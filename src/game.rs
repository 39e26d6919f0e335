use std::borrow::Cow;
use std::collections::HashSet;
use thiserror::Error;
use crate::board::{Board, BoardError, Color, Position};
use crate::movegen::{Move, MoveGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

/// A board plus the side to move. `make_move` is the only operation that
/// changes the position and it flips the turn on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Option<Board>,
    turn: Color,
    move_generator: MoveGenerator,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Some(Board::new()),
            turn: Color::White,
            move_generator: MoveGenerator::new(),
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Replaces the board without any validation. `None` is accepted; queries
    /// then behave as if the board were empty.
    pub fn set_board(&mut self, board: impl Into<Option<Board>>) {
        self.board = board.into();
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets the side to move without any validation.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    fn current_board(&self) -> Cow<'_, Board> {
        match &self.board {
            Some(board) => Cow::Borrowed(board),
            None => Cow::Owned(Board::empty()),
        }
    }

    /// Legal moves for the piece on `position`, or `None` if the square is
    /// empty. A candidate is kept only if, after playing it on a copy of the
    /// board, the mover's king is not attacked.
    pub fn legal_moves(&self, position: Position) -> Result<Option<HashSet<Move>>, BoardError> {
        let board = self.current_board();
        let piece = match board.get(position)? {
            Some(piece) => piece,
            None => return Ok(None),
        };

        let moves = self
            .move_generator
            .pseudo_legal_moves(&board, position)
            .into_iter()
            .filter(|mv| {
                let mut board_copy = Board::clone(&board);
                board_copy.make_move(mv).is_ok()
                    && !self.move_generator.is_king_in_check(&board_copy, piece.color)
            })
            .collect();
        Ok(Some(moves))
    }

    /// Plays `mv` for the side to move. Nothing changes if the move is rejected.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        let illegal = |reason| GameError::IllegalMove { mv, reason };

        let piece = self
            .current_board()
            .get(mv.start)?
            .ok_or_else(|| illegal("no piece on the start square"))?;

        if piece.color != self.turn {
            return Err(illegal("piece does not belong to the side to move"));
        }

        let legal = self
            .legal_moves(mv.start)?
            .is_some_and(|moves| moves.contains(&mv));
        if !legal {
            return Err(illegal("move is not legal in this position"));
        }

        if let Some(board) = self.board.as_mut() {
            board.make_move(&mv)?;
        }
        self.turn = self.turn.opposite();
        Ok(())
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.move_generator
            .is_king_in_check(&self.current_board(), color)
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// No legal moves while not in check.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.squares_of(color).into_iter().any(|pos| {
            matches!(self.legal_moves(pos), Ok(Some(moves)) if !moves.is_empty())
        })
    }

    /// Every legal move available to `color`, grouped by square from (1,1)
    /// upwards.
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for pos in self.squares_of(color) {
            if let Ok(Some(found)) = self.legal_moves(pos) {
                let mut found: Vec<Move> = found.into_iter().collect();
                found.sort_by_key(|mv| {
                    (mv.end.row(), mv.end.col(), mv.promotion.map(|kind| kind as u8))
                });
                moves.extend(found);
            }
        }
        moves
    }

    fn squares_of(&self, color: Color) -> Vec<Position> {
        self.current_board()
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Summary for the side to move.
    pub fn state(&self) -> GameState {
        let in_check = self.is_in_check(self.turn);
        let can_move = self.has_any_legal_move(self.turn);
        match (in_check, can_move) {
            (true, false) => GameState::Checkmate {
                winner: self.turn.opposite(),
            },
            (false, false) => GameState::Stalemate,
            (true, true) => GameState::Check,
            (false, true) => GameState::Ongoing,
        }
    }
}
