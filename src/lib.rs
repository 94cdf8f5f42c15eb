//! Crate root module declarations for the Plum Match chess rules engine.
//!
//! This file exposes the subsystems (board and match state, per-piece move
//! fields, legal move generation, search, scripted strategies, and utility
//! helpers) so binaries, tests, and external front ends can import stable
//! module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod clock;
    pub mod history;
    pub mod match_config;
    pub mod match_controller;
    pub mod piece;
    pub mod presenter;
    pub mod side;
    pub mod termination;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod piece_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod special_moves;
}

pub mod search {
    pub mod alpha_beta;
    pub mod move_scoring;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod long_algebraic;
    pub mod match_harness;
    pub mod render_game_state;
}
