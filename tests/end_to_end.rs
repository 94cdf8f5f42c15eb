use plum_match::chess_errors::ChessError;
use plum_match::game_state::chess_types::{Color, Coord, PieceKind};
use plum_match::game_state::match_config::{MatchConfig, PlayerConfig, PlayerKind};
use plum_match::game_state::match_controller::{ChessMatch, ClickOutcome};
use plum_match::game_state::termination::GameResult;
use plum_match::search::alpha_beta::SearchConfig;
use plum_match::utils::long_algebraic::parse_long_algebraic;

fn start(config: MatchConfig) -> ChessMatch {
    let mut game = ChessMatch::new(config).expect("match should build");
    game.start().expect("match should start");
    game
}

fn play(game: &mut ChessMatch, moves: &[&str]) {
    for text in moves {
        let (from, to, _) = parse_long_algebraic(text).expect("notation should parse");
        game.make_move(from, to)
            .unwrap_or_else(|err| panic!("{text} should be legal: {err}\n{}", game.board()));
    }
}

fn click_move(game: &mut ChessMatch, from: Coord, to: Coord) -> ClickOutcome {
    assert_eq!(game.click(from.row, from.col), ClickOutcome::Selected(from));
    game.click(to.row, to.col)
}

#[test]
fn opening_pawn_pushes_record_two_states() {
    let mut game = start(MatchConfig::default());
    let white = click_move(&mut game, Coord::new(6, 4), Coord::new(4, 4));
    let black = click_move(&mut game, Coord::new(1, 4), Coord::new(3, 4));

    for outcome in [white, black] {
        let ClickOutcome::Moved(mv) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert!(!mv.is_capture());
        assert_eq!(mv.promotion, None);
    }
    assert_eq!(game.total_states(), 2);
    assert_eq!(game.scores(), (39, 39));
    assert!(!game.is_game_over());
    assert!(game
        .board()
        .pieces()
        .filter(|p| p.kind != PieceKind::Pawn)
        .all(|p| !p.has_moved));
}

#[test]
fn fools_mate_ends_with_black_winning() {
    let mut game = start(MatchConfig::default());
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(game.is_game_over());
    assert_eq!(game.result(), Some(GameResult::BlackWinsCheckmate));
    assert_eq!(game.result().and_then(GameResult::winner), Some(Color::Black));
    assert_eq!(game.highlights().checked_king, Some(Coord::new(7, 4)));
    assert_eq!(
        game.make_move(Coord::new(6, 0), Coord::new(5, 0)),
        Err(ChessError::GameOver(GameResult::BlackWinsCheckmate))
    );
}

#[test]
fn capturing_the_last_piece_draws_immediately() {
    let mut game = start(MatchConfig {
        start_placement: Some("4k3/8/8/8/8/8/3n4/4K3".to_owned()),
        ..MatchConfig::default()
    });
    assert!(!game.is_game_over());

    play(&mut game, &["e1d2"]);
    assert_eq!(game.result(), Some(GameResult::DrawInsufficientMaterial));
    assert_eq!(game.scores(), (0, 0));
}

#[test]
fn threefold_repetition_flags_on_the_third_occurrence() {
    let mut game = start(MatchConfig::default());
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut game, &shuffle);
    play(&mut game, &shuffle);
    play(&mut game, &["g1f3"]);
    assert!(!game.history().is_threefold_repetition());
    assert!(!game.is_game_over());

    play(&mut game, &["g8f6"]);
    assert!(game.history().is_threefold_repetition());
    assert_eq!(game.result(), Some(GameResult::DrawThreefoldRepetition));
    assert_eq!(game.total_states(), 10);
}

#[test]
fn en_passant_is_only_available_for_one_ply() {
    let mut game = start(MatchConfig::default());
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let e5 = Coord::new(3, 4);
    let d6 = Coord::new(2, 3);
    assert!(game.side(Color::White).possible_fields(e5).contains(d6));

    play(&mut game, &["h2h3", "a6a5"]);
    assert!(!game.side(Color::White).possible_fields(e5).contains(d6));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = start(MatchConfig::default());
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);

    assert_eq!(
        game.board().piece_at(Coord::new(2, 3)).map(|p| (p.color, p.kind)),
        Some((Color::White, PieceKind::Pawn))
    );
    assert!(game.board().piece_at(Coord::new(3, 3)).is_none());
    assert_eq!(game.scores(), (39, 38));
}

#[test]
fn castling_moves_king_and_rook_together() {
    let mut game = start(MatchConfig::default());
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"]);

    let king = game.board().piece_at(Coord::new(7, 6)).expect("king on g1");
    let rook = game.board().piece_at(Coord::new(7, 5)).expect("rook on f1");
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved && rook.has_moved);
    assert!(game.board().piece_at(Coord::new(7, 7)).is_none());
}

#[test]
fn history_browsing_blocks_moves_until_current() {
    let mut game = start(MatchConfig::default());
    play(&mut game, &["d2d4", "d7d5"]);

    game.undo().expect("has previous");
    let viewed = game.board().clone();
    assert!(matches!(
        game.make_move(Coord::new(1, 4), Coord::new(3, 4)),
        Err(ChessError::ViewingHistory { .. })
    ));
    assert_eq!(game.board(), &viewed);
    assert_eq!(game.total_states(), 2);

    game.redo().expect("has next");
    play(&mut game, &["c2c4"]);
    assert_eq!(game.total_states(), 3);
}

#[test]
fn minimax_side_replies_and_takes_a_hanging_rook() {
    let mut game = start(MatchConfig {
        black: PlayerConfig::strategy("minimax", PlayerKind::Minimax(SearchConfig::default())),
        start_placement: Some("4k3/8/8/3q4/8/8/8/R3K3".to_owned()),
        ..MatchConfig::default()
    });
    play(&mut game, &["a1a5"]);

    assert_eq!(game.to_move(), Color::White);
    assert_eq!(game.total_states(), 2);
    assert_eq!(game.last_move(), Some((Coord::new(3, 3), Coord::new(3, 0))));
    assert_eq!(game.scores(), (0, 9));
    assert_eq!(game.highlights().checked_king, Some(Coord::new(7, 4)));
}

#[test]
fn strategies_play_each_other_through_steps() {
    let mut game = start(MatchConfig {
        white: PlayerConfig::strategy("greedy", PlayerKind::Greedy),
        black: PlayerConfig::strategy("random", PlayerKind::Random { seed: Some(9) }),
        ..MatchConfig::default()
    });
    for _ in 0..30 {
        if game.is_game_over() {
            break;
        }
        assert!(game.step().expect("strategy should move").is_some());
    }
    assert_eq!(game.total_states() as u32, game.ply_count());
    assert_eq!(game.history().active_index(), game.total_states());
}
