use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::board::Board;
use crate::game::{Game, GameState};
use crate::movegen::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutConfig {
    pub max_plies: u32,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            seed: None,
            verbose: false,
        }
    }
}

impl PlayoutConfig {
    /// Parses `plies N`, `seed N` and `verbose` tokens in any order.
    pub fn from_args(parts: &[&str]) -> Result<Self> {
        let mut config = Self::default();
        let mut tokens = parts.iter();

        while let Some(&token) = tokens.next() {
            match token {
                "plies" => {
                    let value = tokens.next().context("plies needs a value")?;
                    config.max_plies = value
                        .parse()
                        .with_context(|| format!("invalid ply count: {}", value))?;
                }
                "seed" => {
                    let value = tokens.next().context("seed needs a value")?;
                    config.seed = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid seed: {}", value))?,
                    );
                }
                "verbose" => config.verbose = true,
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct PlayoutReport {
    pub moves: Vec<Move>,
    pub final_state: GameState,
    pub final_board: Board,
}

/// Plays uniformly random legal moves from the standard start until the side
/// to move is mated or stalemated, or `max_plies` moves have been played.
pub fn random_playout(config: &PlayoutConfig) -> Result<PlayoutReport> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    play_from(Game::new(), config, &mut rng)
}

pub fn play_from(
    mut game: Game,
    config: &PlayoutConfig,
    rng: &mut StdRng,
) -> Result<PlayoutReport> {
    let mut moves = Vec::new();

    for ply in 0..config.max_plies {
        let candidates = game.all_legal_moves(game.turn());
        let mv = match candidates.choose(rng) {
            Some(&mv) => mv,
            None => break,
        };
        if config.verbose {
            println!("{:>4} {} {}", ply + 1, game.turn(), mv);
        }
        game.make_move(mv)
            .with_context(|| format!("generated move rejected at ply {}", ply + 1))?;
        moves.push(mv);
    }

    Ok(PlayoutReport {
        moves,
        final_state: game.state(),
        final_board: game.board().cloned().unwrap_or_else(Board::empty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let config = PlayoutConfig::from_args(&["seed", "7", "plies", "40", "verbose"]).unwrap();
        assert_eq!(
            config,
            PlayoutConfig {
                max_plies: 40,
                seed: Some(7),
                verbose: true,
            }
        );
        assert_eq!(PlayoutConfig::from_args(&[]).unwrap(), PlayoutConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_input() {
        assert!(PlayoutConfig::from_args(&["plies"]).is_err());
        assert!(PlayoutConfig::from_args(&["plies", "many"]).is_err());
        assert!(PlayoutConfig::from_args(&["depth", "3"]).is_err());
    }

    #[test]
    fn test_seeded_playout_is_reproducible() {
        let config = PlayoutConfig {
            max_plies: 30,
            seed: Some(42),
            verbose: false,
        };
        let first = random_playout(&config).unwrap();
        let second = random_playout(&config).unwrap();

        assert_eq!(first.moves, second.moves);
        assert_eq!(first.final_board, second.final_board);
        assert!(first.moves.len() <= 30);
    }

    #[test]
    fn test_playout_stops_when_no_moves() {
        use crate::board::{Color, Piece, PieceKind, Position};

        let mut board = Board::empty();
        let mut place = |row, col, color, kind| {
            board
                .set(Position::new(row, col), Some(Piece::new(color, kind)))
                .unwrap();
        };
        place(1, 1, Color::White, PieceKind::King);
        place(2, 3, Color::Black, PieceKind::King);
        place(3, 2, Color::Black, PieceKind::Queen);

        let mut game = Game::new();
        game.set_board(board);

        let mut rng = StdRng::seed_from_u64(1);
        let report = play_from(game, &PlayoutConfig::default(), &mut rng).unwrap();
        assert!(report.moves.is_empty());
        assert_eq!(report.final_state, GameState::Stalemate);
    }
}
