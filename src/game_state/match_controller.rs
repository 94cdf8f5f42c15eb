//! Turn controller for a two-player match.
//!
//! `ChessMatch` owns the board, both sides, the snapshot store and the
//! optional clock. Humans drive it through `click`/`make_move`; scripted
//! sides are asked for their move right after the opponent's ply. Every
//! committed ply goes through the same sequence: apply on the board, rebuild
//! both sides' caches, switch the turn, append a snapshot, then run the
//! termination checks for the side now to move.

use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{MatchView, Strategy};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Coord, PieceKind};
use crate::game_state::clock::MatchClock;
use crate::game_state::history::{Snapshot, SnapshotStore};
use crate::game_state::match_config::MatchConfig;
use crate::game_state::presenter::{
    AlwaysQueen, Highlights, NullPresenter, Presenter, PromotionChooser,
};
use crate::game_state::side::Side;
use crate::game_state::termination::{evaluate_termination, GameResult};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::special_moves::classify_move;
use crate::moves::move_descriptions::{Move, MoveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingSelection,
    PieceSelected,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Coord),
    Deselected,
    Moved(Move),
    /// The click was refused; the state is as it was, minus any selection.
    Rejected(ChessError),
}

pub struct ChessMatch {
    board: Board,
    sides: [Side; 2],
    players: [Option<Box<dyn Strategy>>; 2],
    to_move: Color,
    last_move: Option<(Coord, Coord)>,
    history: SnapshotStore,
    clock: Option<MatchClock>,
    presenter: Box<dyn Presenter>,
    promotion_chooser: Box<dyn PromotionChooser>,
    result: Option<GameResult>,
    ply_count: u32,
}

impl ChessMatch {
    pub fn new(config: MatchConfig) -> ChessResult<Self> {
        let board = match &config.start_placement {
            Some(placement) => Board::from_placement(placement)?,
            None => Board::standard(),
        };
        for color in [Color::White, Color::Black] {
            if board.king(color).is_none() {
                return Err(ChessError::MissingKing(color));
            }
        }

        let mut sides = [
            Side::new(config.white.name.clone(), Color::White),
            Side::new(config.black.name.clone(), Color::Black),
        ];
        for side in &mut sides {
            side.sync_from_board(&board);
            side.refresh(&board)?;
        }

        let clock = config.clock.map(MatchClock::new);
        if let Some(clock) = &clock {
            clock.set_active(config.first_to_move);
            for side in &mut sides {
                side.clock = Some(clock.remaining(side.color));
            }
        }

        let history = SnapshotStore::new(&sides[0], &sides[1], config.first_to_move);

        Ok(Self {
            board,
            sides,
            players: [
                config.white.kind.build_strategy(),
                config.black.kind.build_strategy(),
            ],
            to_move: config.first_to_move,
            last_move: None,
            history,
            clock,
            presenter: Box::new(NullPresenter),
            promotion_chooser: Box::new(AlwaysQueen),
            result: None,
            ply_count: 0,
        })
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_promotion_chooser(mut self, chooser: Box<dyn PromotionChooser>) -> Self {
        self.promotion_chooser = chooser;
        self
    }

    /// Replace the player of `color`; `None` makes it a human side.
    pub fn set_strategy(&mut self, color: Color, strategy: Option<Box<dyn Strategy>>) {
        self.players[color.index()] = strategy;
    }

    /// Check the start position, start the clock, draw everything and let a
    /// scripted first mover play.
    pub fn start(&mut self) -> ChessResult<()> {
        info!(
            white = %self.sides[0].name,
            black = %self.sides[1].name,
            to_move = %self.to_move,
            timed = self.clock.is_some(),
            "match started"
        );
        for strategy in self.players.iter_mut().flatten() {
            strategy.new_game();
        }

        if let Some(result) = self.check_termination() {
            self.finish(result);
            self.render();
            return Ok(());
        }
        if let Some(clock) = &mut self.clock {
            clock.start();
        }
        self.render();
        self.play_strategies()
    }

    /// The single mutating entry point for a human interface.
    pub fn click(&mut self, row: i8, col: i8) -> ClickOutcome {
        let outcome = match self.handle_click(row, col) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(row, col, %err, "click rejected");
                self.deselect();
                self.presenter.report_message(&err.to_string());
                ClickOutcome::Rejected(err)
            }
        };
        self.render();
        outcome
    }

    fn handle_click(&mut self, row: i8, col: i8) -> ChessResult<ClickOutcome> {
        self.ensure_playable()?;
        let coord = Coord::try_new(row, col)?;
        let color = self.to_move;
        if !self.is_human(color) {
            return Err(ChessError::NotHumanTurn(color));
        }

        let selected = self.sides[color.index()].selected;
        let destinations = selected
            .map(|from| self.sides[color.index()].possible_fields(from))
            .unwrap_or_default();
        let clicked = self.board.piece_at(coord).copied();

        match (selected, clicked) {
            (Some(current), _) if current == coord => {
                self.deselect();
                Ok(ClickOutcome::Deselected)
            }
            (_, Some(piece)) if piece.color == color => {
                self.sides[color.index()].selected = Some(coord);
                debug!(square = %coord, kind = ?piece.kind, "piece selected");
                Ok(ClickOutcome::Selected(coord))
            }
            (Some(current), _) if destinations.contains(coord) => {
                let mv = self.make_move(current, coord)?;
                Ok(ClickOutcome::Moved(mv))
            }
            (Some(_), _) => {
                self.deselect();
                Ok(ClickOutcome::Deselected)
            }
            (None, None) => Err(ChessError::EmptySquare(coord)),
            (None, Some(_)) => Err(ChessError::NotOwnPiece {
                square: coord,
                side: color,
            }),
        }
    }

    /// Play `from -> to` for the human side to move. Anything outside that
    /// piece's legal destinations is rejected before the board is touched.
    pub fn make_move(&mut self, from: Coord, to: Coord) -> ChessResult<Move> {
        self.ensure_playable()?;
        let color = self.to_move;
        if !self.is_human(color) {
            return Err(ChessError::NotHumanTurn(color));
        }

        let mut mv = self.validated_move(from, to)?;
        if mv.kind == MoveKind::Promotion {
            let choice = self.promotion_chooser.request_promotion_choice(color);
            if !choice.is_promotion_target() {
                return Err(ChessError::InvalidPromotion(choice));
            }
            mv = mv.with_promotion(choice);
        }

        self.commit(mv)?;
        // The human move stands even if the scripted reply fails.
        if let Err(err) = self.play_strategies() {
            warn!(side = %self.to_move, %err, "scripted reply failed");
            self.presenter.report_message(&err.to_string());
        }
        Ok(mv)
    }

    /// Ask the scripted side to move for one ply and commit its answer.
    ///
    /// Returns `Ok(None)` when the side to move is human or the strategy has
    /// nothing to play, which ends the game as a stalemate.
    pub fn step(&mut self) -> ChessResult<Option<Move>> {
        self.ensure_playable()?;
        let index = self.to_move.index();
        let view = MatchView {
            board: &self.board,
            to_move: &self.sides[index],
            opponent: &self.sides[self.to_move.opposite().index()],
        };
        let Some(strategy) = self.players[index].as_mut() else {
            return Ok(None);
        };

        let Some((from, to)) = strategy.choose_move(&view)? else {
            info!(side = %self.to_move, "strategy found no move");
            self.finish(GameResult::DrawStalemate);
            self.render();
            return Ok(None);
        };

        // Scripted promotions always take a queen.
        let mv = self.validated_move(from, to)?;
        self.commit(mv)?;
        Ok(Some(mv))
    }

    /// Let scripted sides answer until a human is to move. Matches without
    /// a human side are driven by `step` instead.
    fn play_strategies(&mut self) -> ChessResult<()> {
        while self.result.is_none()
            && self.players.iter().any(Option::is_none)
            && !self.is_human(self.to_move)
            && self.history.is_current()
        {
            self.step()?;
        }
        Ok(())
    }

    fn validated_move(&self, from: Coord, to: Coord) -> ChessResult<Move> {
        match self.board.piece_at(from) {
            None => return Err(ChessError::EmptySquare(from)),
            Some(piece) if piece.color != self.to_move => {
                return Err(ChessError::NotOwnPiece {
                    square: from,
                    side: self.to_move,
                })
            }
            Some(_) => {}
        }
        if !self.sides[self.to_move.index()]
            .possible_fields(from)
            .contains(to)
        {
            return Err(ChessError::IllegalMove { from, to });
        }
        classify_move(&self.board, from, to, PieceKind::Queen)
            .ok_or(ChessError::IllegalMove { from, to })
    }

    fn commit(&mut self, mv: Move) -> ChessResult<()> {
        let mover = self.to_move;
        self.board.make_move(&mv)?;

        for side in &mut self.sides {
            side.sync_from_board(&self.board);
            side.selected = None;
        }
        {
            let side = &mut self.sides[mover.index()];
            side.last_moved = Some(mv.to);
            side.last_move = Some((mv.from, mv.to));
        }
        for side in &mut self.sides {
            side.refresh(&self.board)?;
        }

        self.to_move = mover.opposite();
        self.last_move = Some((mv.from, mv.to));
        self.ply_count += 1;
        if let Some(clock) = &self.clock {
            clock.switch_to(self.to_move);
        }
        self.sync_clock_fields();

        let hash = self.history.save(
            &self.sides[0],
            &self.sides[1],
            self.to_move,
            self.last_move,
        )?;
        info!(
            ply = self.ply_count,
            side = %mover,
            mv = %mv,
            capture = mv.is_capture(),
            hash,
            "move committed"
        );

        if let Some(result) = self.check_termination() {
            self.finish(result);
        }
        self.render();
        Ok(())
    }

    fn check_termination(&self) -> Option<GameResult> {
        evaluate_termination(
            &self.board,
            &self.sides[self.to_move.index()],
            &self.sides[self.to_move.opposite().index()],
            self.history.is_threefold_repetition(),
        )
    }

    fn finish(&mut self, result: GameResult) {
        if self.result.is_some() {
            return;
        }
        self.result = Some(result);
        self.deselect();
        if let Some(clock) = &mut self.clock {
            clock.stop();
        }
        info!(%result, plies = self.ply_count, "game over");
        self.presenter.on_game_over(result);
    }

    /// Pick up an expired clock and end the game on time. Returns the result
    /// once the game is over.
    pub fn poll_clock(&mut self) -> Option<GameResult> {
        self.sync_clock_fields();
        if self.result.is_none() {
            if let Some(flagged) = self.clock.as_ref().and_then(MatchClock::expired) {
                self.finish(GameResult::timeout_of(flagged));
                self.render();
            }
        }
        for color in [Color::White, Color::Black] {
            if let Some(seconds) = self.sides[color.index()].clock {
                self.presenter.render_clock(seconds, color);
            }
        }
        self.result
    }

    fn ensure_playable(&mut self) -> ChessResult<()> {
        if let Some(result) = self.poll_clock() {
            return Err(ChessError::GameOver(result));
        }
        if !self.history.is_current() {
            return Err(ChessError::ViewingHistory {
                index: self.history.active_index(),
                total: self.history.total_states(),
            });
        }
        Ok(())
    }

    /// Step back one position in the history view.
    pub fn undo(&mut self) -> ChessResult<usize> {
        let snapshot = self.history.load_previous()?.clone();
        self.load_snapshot(&snapshot)?;
        Ok(self.history.active_index())
    }

    /// Step forward one position in the history view.
    pub fn redo(&mut self) -> ChessResult<usize> {
        let snapshot = self.history.load_next()?.clone();
        self.load_snapshot(&snapshot)?;
        Ok(self.history.active_index())
    }

    fn load_snapshot(&mut self, snapshot: &Snapshot) -> ChessResult<()> {
        self.board = Board::from_pieces(snapshot.pieces());
        self.sides[0].pieces = snapshot.white.clone();
        self.sides[1].pieces = snapshot.black.clone();
        self.to_move = snapshot.to_move;
        self.last_move = snapshot.last_move;

        for side in &mut self.sides {
            side.selected = None;
            side.refresh(&self.board)?;
        }
        let mover = &mut self.sides[snapshot.to_move.opposite().index()];
        mover.last_move = snapshot.last_move;
        mover.last_moved = snapshot.last_move.map(|(_, to)| to);

        if let Some(clock) = &self.clock {
            if self.history.is_current() && self.result.is_none() {
                clock.resume();
            } else {
                clock.pause();
            }
        }
        debug!(
            index = self.history.active_index(),
            total = self.history.total_states(),
            "history position loaded"
        );
        self.render();
        Ok(())
    }

    fn deselect(&mut self) {
        for side in &mut self.sides {
            side.selected = None;
        }
    }

    fn sync_clock_fields(&mut self) {
        if let Some(clock) = &self.clock {
            for side in &mut self.sides {
                side.clock = Some(clock.remaining(side.color));
            }
        }
    }

    fn render(&mut self) {
        let codes = self.board.piece_codes();
        let highlights = self.highlights();
        let (white, black) = self.scores();
        let (index, total) = (self.history.active_index(), self.history.total_states());

        self.presenter.render_pieces(&codes);
        self.presenter.render_highlights(&highlights);
        self.presenter.render_scores(white, black);
        for color in [Color::White, Color::Black] {
            if let Some(seconds) = self.sides[color.index()].clock {
                self.presenter.render_clock(seconds, color);
            }
        }
        self.presenter.render_history_position(index, total);
    }

    pub fn highlights(&self) -> Highlights {
        let side = &self.sides[self.to_move.index()];
        let checked_king = if is_king_in_check(&self.board, self.to_move) {
            self.board.king(self.to_move)
        } else {
            None
        };
        Highlights {
            selected: side.selected,
            destinations: side
                .selected
                .map(|from| side.possible_fields(from))
                .unwrap_or_default(),
            last_move: self.last_move,
            checked_king,
        }
    }

    /// Remaining non-king material of White and Black.
    pub fn scores(&self) -> (i32, i32) {
        (self.sides[0].material(), self.sides[1].material())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side(&self, color: Color) -> &Side {
        &self.sides[color.index()]
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn is_human(&self, color: Color) -> bool {
        self.players[color.index()].is_none()
    }

    pub fn player_name(&self, color: Color) -> &str {
        &self.sides[color.index()].name
    }

    #[inline]
    pub fn last_move(&self) -> Option<(Coord, Coord)> {
        self.last_move
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn phase(&self) -> MatchPhase {
        if self.result.is_some() {
            MatchPhase::GameOver
        } else if self.sides[self.to_move.index()].selected.is_some() {
            MatchPhase::PieceSelected
        } else {
            MatchPhase::AwaitingSelection
        }
    }

    #[inline]
    pub fn history(&self) -> &SnapshotStore {
        &self.history
    }

    #[inline]
    pub fn total_states(&self) -> usize {
        self.history.total_states()
    }

    #[inline]
    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn clock(&self) -> Option<&MatchClock> {
        self.clock.as_ref()
    }
}
