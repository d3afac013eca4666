use chess_minimax::{Agent, AgentConfig, EvaluatorKind, Game, shakmaty::CastlingMode};
use tracing_subscriber::EnvFilter;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Usage: `cargo run --example choose_move -- [FEN] [agent.json]`
///
/// Without a config file a heuristic agent of depth 3 plays the side to
/// move. Set `RUST_LOG=chess_minimax=debug` to see search statistics.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let fen = args.next().unwrap_or_else(|| START_FEN.to_string());
    let mut game = Game::from_fen(&fen)?;

    let config = match args.next() {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::new(game.side_to_move(), 3, EvaluatorKind::Heuristic),
    };
    println!(
        "Agent: {:?} with {:?} evaluator, depth {}",
        config.color(),
        config.evaluator,
        config.search_depth
    );

    let mut agent = Agent::new(&config)?;
    match agent.choose_move(&mut game)? {
        Some(mv) => println!("Chosen move: {}", mv.to_uci(CastlingMode::Standard)),
        None => println!("No move: the game is over or the depth is zero."),
    }

    Ok(())
}
