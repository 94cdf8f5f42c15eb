//! Zobrist hashing for position identity and repetition tracking.
//!
//! A position key covers every piece's square, kind and color, its moved
//! flag and en-passant flag, plus the side to move. Keys come from a fixed
//! seed so hashes are deterministic across runs.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::piece::Piece;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    moved: [[u64; 64]; 2],
    en_passant: [[u64; 64]; 2],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for sq in kind {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let mut moved = [[0u64; 64]; 2];
    let mut en_passant = [[0u64; 64]; 2];
    for table in [&mut moved, &mut en_passant] {
        for color in table.iter_mut() {
            for sq in color.iter_mut() {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    ZobristTables {
        piece_square,
        moved,
        en_passant,
        side_to_move,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key contribution of a single piece.
pub fn piece_key(piece: &Piece) -> u64 {
    let t = tables();
    let color = piece.color.index();
    let sq = piece.position.index();
    let mut key = t.piece_square[color][piece.kind.index()][sq];
    if piece.has_moved {
        key ^= t.moved[color][sq];
    }
    if piece.is_en_passant {
        key ^= t.en_passant[color][sq];
    }
    key
}

/// Full position key for `board` with `to_move` on turn.
pub fn position_key<'a, I>(pieces: I, to_move: Color) -> u64
where
    I: IntoIterator<Item = &'a Piece>,
{
    let mut key = pieces.into_iter().fold(0u64, |acc, p| acc ^ piece_key(p));
    if to_move == Color::Black {
        key ^= tables().side_to_move;
    }
    key
}

#[inline]
pub fn board_key(board: &Board, to_move: Color) -> u64 {
    position_key(board.pieces(), to_move)
}
