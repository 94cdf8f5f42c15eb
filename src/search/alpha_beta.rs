//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The side to move at the root maximizes, its opponent minimizes, and every
//! leaf is scored with `move_scoring::evaluate` from the root side's point of
//! view. Nodes are explored by making and unmaking moves on one scratch board.
//! With a time budget the search deepens iteratively and keeps the result of
//! the last depth that finished.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves_in_place;
use crate::moves::move_descriptions::Move;
use crate::search::move_scoring::{evaluate, MATE_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// When set, deepen from 1 up to `max_depth` until the budget runs out.
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            time_budget: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
}

struct SearchContext {
    root: Color,
    deadline: Option<Instant>,
    nodes: u64,
    aborted: bool,
}

impl SearchContext {
    #[inline]
    fn out_of_time(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.aborted = true;
            }
        }
        self.aborted
    }
}

/// Search `board` for `to_move`. The board itself is never modified.
pub fn search(board: &Board, to_move: Color, config: SearchConfig) -> ChessResult<SearchResult> {
    let mut scratch = board.clone();
    // A depth-0 search would have no move to return for a side that can move.
    let max_depth = config.max_depth.max(1);

    let started = Instant::now();
    let deadline = config.time_budget.map(|budget| started + budget);
    let first_depth = if config.time_budget.is_some() {
        1
    } else {
        max_depth
    };

    let mut result = SearchResult::default();
    for depth in first_depth..=max_depth {
        let mut ctx = SearchContext {
            root: to_move,
            // The shallowest depth always completes so there is a move to play.
            deadline: if depth == first_depth { None } else { deadline },
            nodes: 0,
            aborted: false,
        };
        let (best_move, best_score) = search_root(&mut scratch, depth, &mut ctx)?;
        if ctx.aborted {
            trace!(depth, "search budget exhausted");
            break;
        }

        result = SearchResult {
            best_move,
            best_score,
            reached_depth: depth,
            nodes: result.nodes + ctx.nodes,
        };
        trace!(depth, best_score, nodes = ctx.nodes, "depth complete");
    }

    debug!(
        side = %to_move,
        depth = result.reached_depth,
        score = result.best_score,
        nodes = result.nodes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(result)
}

fn ordered_moves(board: &mut Board, color: Color) -> ChessResult<Vec<Move>> {
    let mut moves = legal_moves_in_place(board, color)?;
    moves.sort_by_key(|mv| std::cmp::Reverse(mv.captured.map(|p| p.value()).unwrap_or(0)));
    Ok(moves)
}

fn search_root(
    board: &mut Board,
    depth: u8,
    ctx: &mut SearchContext,
) -> ChessResult<(Option<Move>, i32)> {
    ctx.nodes += 1;
    let moves = ordered_moves(board, ctx.root)?;
    if moves.is_empty() {
        return Ok((None, terminal_score(board, ctx.root, true, 0)));
    }

    let mut alpha = -MATE_SCORE;
    let beta = MATE_SCORE;
    let mut best_move = None;
    let mut best_score = -MATE_SCORE - 1;

    for mv in moves {
        let undo = board.make_move(&mv)?;
        let score = alpha_beta(board, depth - 1, alpha, beta, false, 1, ctx);
        board.unmake_move(undo);
        let score = score?;
        if ctx.aborted {
            break;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        alpha = alpha.max(score);
    }

    Ok((best_move, best_score))
}

fn alpha_beta(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ply: u8,
    ctx: &mut SearchContext,
) -> ChessResult<i32> {
    ctx.nodes += 1;
    if ctx.out_of_time() {
        return Ok(0);
    }

    let color = if maximizing { ctx.root } else { ctx.root.opposite() };
    let moves = ordered_moves(board, color)?;
    if moves.is_empty() {
        return Ok(terminal_score(board, color, maximizing, ply));
    }
    if depth == 0 {
        return Ok(evaluate(board, ctx.root));
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let undo = board.make_move(&mv)?;
        let score = alpha_beta(board, depth - 1, alpha, beta, !maximizing, ply + 1, ctx);
        board.unmake_move(undo);
        let score = score?;
        if ctx.aborted {
            return Ok(0);
        }

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    Ok(best)
}

/// Score of a node where `color` has no legal move, from the root's view.
fn terminal_score(board: &Board, color: Color, maximizing: bool, ply: u8) -> i32 {
    if !is_king_in_check(board, color) {
        return 0;
    }
    let mate = MATE_SCORE - i32::from(ply);
    if maximizing {
        -mate
    } else {
        mate
    }
}
