//! Property-based tests for the legality engine

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use salmon_rules::board::{Color, PieceKind, Position};
use salmon_rules::game::Game;
use salmon_rules::movegen::MoveGenerator;
use salmon_rules::playout::{play_from, PlayoutConfig};
use std::collections::HashSet;

// Positions reached by seeded random games from the standard start
fn random_game() -> impl Strategy<Value = Game> {
    (any::<u64>(), 0u32..80).prop_map(|(seed, plies)| {
        let config = PlayoutConfig {
            max_plies: plies,
            seed: Some(seed),
            verbose: false,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let report = play_from(Game::new(), &config, &mut rng).unwrap();

        let mut game = Game::new();
        game.set_board(report.final_board);
        if report.moves.len() % 2 == 1 {
            game.set_turn(Color::Black);
        }
        game
    })
}

fn own_squares(game: &Game, color: Color) -> Vec<Position> {
    game.board()
        .unwrap()
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(pos, _)| pos)
        .collect()
}

// Brute-force attack test that does not go through the engine's check query
fn king_attacked(board: &salmon_rules::board::Board, color: Color) -> bool {
    let generator = MoveGenerator::new();
    let king = match board
        .pieces()
        .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
    {
        Some((pos, _)) => pos,
        None => return false,
    };
    board
        .pieces()
        .filter(|(_, piece)| piece.color != color)
        .flat_map(|(pos, _)| generator.pseudo_legal_moves(board, pos))
        .any(|mv| mv.end == king)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_legal_moves_sound_and_complete(game in random_game()) {
        let generator = MoveGenerator::new();
        let board = game.board().unwrap();
        let color = game.turn();

        for pos in own_squares(&game, color) {
            let legal = game.legal_moves(pos).unwrap().unwrap();
            let expected: HashSet<_> = generator
                .pseudo_legal_moves(board, pos)
                .into_iter()
                .filter(|mv| {
                    let mut copy = board.clone();
                    copy.make_move(mv).unwrap();
                    !king_attacked(&copy, color)
                })
                .collect();
            prop_assert_eq!(legal, expected);
        }
    }

    #[test]
    fn test_terminal_queries_are_exclusive(game in random_game()) {
        for color in [Color::White, Color::Black] {
            let mate = game.is_in_checkmate(color);
            let stale = game.is_in_stalemate(color);
            prop_assert!(!(mate && stale));

            let no_moves = game.all_legal_moves(color).is_empty();
            if mate || stale {
                prop_assert!(no_moves);
            }
            if no_moves {
                prop_assert!(mate ^ stale);
            }
        }
    }

    #[test]
    fn test_moves_flip_turn_and_only_capture_one(game in random_game()) {
        let color = game.turn();
        let board = game.board().unwrap();
        let count = board.piece_count();

        for mv in game.all_legal_moves(color) {
            let captured = board.get(mv.end).unwrap().is_some();
            let mut next = game.clone();
            next.make_move(mv).unwrap();

            prop_assert_eq!(next.turn(), color.opposite());
            let after = next.board().unwrap().piece_count();
            prop_assert_eq!(after, if captured { count - 1 } else { count });
            prop_assert!(!next.is_in_check(color));
        }
    }
}
