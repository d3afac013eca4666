use chess_minimax::{
    Agent, Game, HeuristicEvaluator,
    shakmaty::{CastlingMode, Color, Move, Position},
};
use ndarray::ArrayView3;

const CHECKMATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const STALEMATE: &str = "k7/8/1Q6/8/8/8/8/1K6 b - - 0 1";
const BARE_KINGS: &str = "8/8/8/4k3/8/8/8/4K3 w - - 0 1";

fn uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// Material balance from the encoded planes, squashed into [-1, 1].
fn material_model(input: ArrayView3<f32>) -> f32 {
    const VALUES: [f32; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 0.0];
    let mut balance = 0.0;
    for ((_, _, channel), &v) in input.indexed_iter() {
        let value = VALUES[channel % 6];
        balance += if channel < 6 { v * value } else { -v * value };
    }
    (balance / 2.0).tanh()
}

#[test]
fn heuristic_agent_opens_with_a_ten_point_move() {
    let mut game = Game::default();
    let mut agent = Agent::heuristic(Color::White, 1);
    let mv = agent.choose_move(&mut game).unwrap().unwrap();

    let child = game.push(&mv);
    assert_eq!(HeuristicEvaluator::score(child.position()), 10, "{}", uci(&mv));
}

#[test]
fn terminal_positions_yield_no_move() {
    for fen in [CHECKMATE, STALEMATE] {
        let mut game = Game::from_fen(fen).unwrap();
        let color = game.side_to_move();

        let mut heuristic = Agent::heuristic(color, 2);
        assert!(heuristic.choose_move(&mut game).unwrap().is_none(), "{fen}");

        let mut neural = Agent::neural(color, 2, material_model, 5);
        assert!(neural.choose_move(&mut game).unwrap().is_none(), "{fen}");
    }
}

#[test]
fn insufficient_material_yields_no_move_for_both_policies() {
    let mut game = Game::from_fen(BARE_KINGS).unwrap();
    assert!(!game.legal_moves().is_empty());
    assert!(game.is_terminal());

    let mut heuristic = Agent::heuristic(Color::White, 2);
    assert!(heuristic.choose_move(&mut game).unwrap().is_none());

    let mut neural = Agent::neural(Color::White, 2, material_model, 5);
    assert!(neural.choose_move(&mut game).unwrap().is_none());
    assert_eq!(game.depth(), 0);
}

#[test]
fn neural_agent_picks_legal_moves_and_restores_position() {
    let mut game = Game::from_fen(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
    )
    .unwrap();
    let before = game.position().board().clone();
    let legal: Vec<Move> = game.legal_moves().into_iter().collect();

    let mut agent = Agent::neural(Color::White, 2, material_model, 11);
    for _ in 0..5 {
        let mv = agent.choose_move(&mut game).unwrap().unwrap();
        assert!(legal.contains(&mv), "{}", uci(&mv));
    }
    assert_eq!(game.depth(), 0);
    assert_eq!(game.position().board(), &before);
}

#[test]
fn same_seed_same_choices() {
    let run = |seed: u64| -> Vec<String> {
        let mut game = Game::default();
        let mut agent = Agent::neural(Color::White, 1, material_model, seed);
        (0..8)
            .map(|_| uci(&agent.choose_move(&mut game).unwrap().unwrap()))
            .collect()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn neural_agent_takes_a_hanging_queen_late_in_the_game() {
    // Move 40 puts the temperature at its floor; the queen capture
    // dominates every other candidate.
    let mut game = Game::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 40").unwrap();
    let mut agent = Agent::neural(Color::White, 1, material_model, 9);

    for _ in 0..10 {
        let mv = agent.choose_move(&mut game).unwrap().unwrap();
        assert_eq!(uci(&mv), "d1d5");
    }
}

#[test]
fn agents_play_a_short_game() {
    let mut game = Game::default();
    let mut white = Agent::heuristic(Color::White, 2);
    let mut black = Agent::neural(Color::Black, 1, material_model, 3);

    for ply in 0..12 {
        let agent = if game.side_to_move() == Color::White {
            &mut white
        } else {
            &mut black
        };
        let Some(mv) = agent.choose_move(&mut game).unwrap() else {
            break;
        };
        assert!(game.legal_moves().contains(&mv), "ply {ply}: {}", uci(&mv));

        let mut next = game.position().clone();
        next.play_unchecked(mv);
        game = Game::new(next);
    }
    assert!(game.position().fullmoves().get() > 1);
}
