use anyhow::Result;
use salmon_rules::game::GameState;
use salmon_rules::playout::{random_playout, PlayoutConfig};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parts: Vec<&str> = args.iter().map(String::as_str).collect();
    let config = PlayoutConfig::from_args(&parts)?;

    let report = random_playout(&config)?;

    println!("{}", report.final_board);
    println!("plies played: {}", report.moves.len());
    match report.final_state {
        GameState::Checkmate { winner } => println!("checkmate, {} wins", winner),
        GameState::Stalemate => println!("stalemate"),
        GameState::Check => println!("stopped at ply limit, side to move is in check"),
        GameState::Ongoing => println!("stopped at ply limit"),
    }
    Ok(())
}
