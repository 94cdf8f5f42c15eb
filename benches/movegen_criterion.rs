use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_match::game_state::board::Board;
use plum_match::game_state::chess_types::Color;
use plum_match::game_state::side::Side;
use plum_match::move_generation::legal_move_generator::legal_moves_in_place;

#[derive(Clone, Copy)]
struct MoveGenCase {
    name: &'static str,
    placement: &'static str,
    to_move: Color,
    expected_moves: usize,
}

const CASES: &[MoveGenCase] = &[
    MoveGenCase {
        name: "startpos",
        placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        to_move: Color::White,
        expected_moves: 20,
    },
    MoveGenCase {
        name: "castling_lanes",
        placement: "r3k2r/8/8/8/8/8/8/R3K2R",
        to_move: Color::White,
        expected_moves: 26,
    },
    MoveGenCase {
        name: "end_kpk",
        placement: "8/8/8/8/8/4k3/4P3/4K3",
        to_move: Color::White,
        expected_moves: 2,
    },
];

/// Leaf count of the move tree `depth` plies deep, via make/unmake.
fn perft(board: &mut Board, color: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves_in_place(board, color).expect("generation should succeed");
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = board.make_move(&mv).expect("legal move should apply");
        nodes += perft(board, color.opposite(), depth - 1);
        board.unmake_move(undo);
    }
    nodes
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let board = Board::from_placement(case.placement).expect("benchmark placement should parse");
        let mut scratch = board.clone();
        assert_eq!(
            legal_moves_in_place(&mut scratch, case.to_move)
                .expect("generation should succeed")
                .len(),
            case.expected_moves,
            "{}",
            case.name
        );

        group.bench_with_input(BenchmarkId::new(case.name, "d1"), &board, |b, board| {
            let mut scratch = board.clone();
            b.iter(|| {
                let moves = legal_moves_in_place(black_box(&mut scratch), case.to_move)
                    .expect("generation should succeed");
                black_box(moves.len())
            });
        });
    }

    group.finish();
}

fn bench_side_refresh(c: &mut Criterion) {
    let board = Board::standard();
    let mut side = Side::new("bench", Color::White);
    side.sync_from_board(&board);

    c.bench_function("side_refresh_startpos", |b| {
        b.iter(|| {
            side.refresh(black_box(&board)).expect("refresh should succeed");
            black_box(side.movable_pieces().len())
        });
    });
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    let board = Board::standard();
    group.bench_function("startpos_d3", |b| {
        let mut scratch = board.clone();
        b.iter(|| {
            let nodes = perft(black_box(&mut scratch), Color::White, 3);
            assert_eq!(nodes, 8902);
            black_box(nodes)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_side_refresh, bench_perft);
criterion_main!(benches);
