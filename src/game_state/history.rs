//! Snapshot store for undo/redo browsing and repetition detection.
//!
//! Position 0 is the starting position; every completed ply appends one
//! snapshot. The store is append-only: saving while an older position is
//! being viewed is refused.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Coord};
use crate::game_state::piece::Piece;
use crate::game_state::side::Side;
use crate::search::zobrist::position_key;

/// Immutable copy of both sides' pieces after a ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
    pub to_move: Color,
    pub last_move: Option<(Coord, Coord)>,
    pub hash: u64,
    pub recorded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn capture(
        white: &Side,
        black: &Side,
        to_move: Color,
        last_move: Option<(Coord, Coord)>,
    ) -> Self {
        let hash = position_key(white.pieces.iter().chain(black.pieces.iter()), to_move);
        Self {
            white: white.pieces.clone(),
            black: black.pieces.clone(),
            to_move,
            last_move,
            hash,
            recorded_at: Utc::now(),
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.white.iter().chain(self.black.iter())
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    origin: Snapshot,
    snapshots: Vec<Snapshot>,
    active: usize,
    occurrences: HashMap<u64, u32>,
    is_threefold_repetition: bool,
}

impl SnapshotStore {
    /// Start a store at the given initial position, which counts as the
    /// first occurrence of its hash.
    pub fn new(white: &Side, black: &Side, to_move: Color) -> Self {
        let origin = Snapshot::capture(white, black, to_move, None);
        let mut occurrences = HashMap::new();
        occurrences.insert(origin.hash, 1);
        Self {
            origin,
            snapshots: Vec::new(),
            active: 0,
            occurrences,
            is_threefold_repetition: false,
        }
    }

    /// Append the position after a completed ply and return its hash.
    pub fn save(
        &mut self,
        white: &Side,
        black: &Side,
        to_move: Color,
        last_move: Option<(Coord, Coord)>,
    ) -> ChessResult<u64> {
        if !self.is_current() {
            return Err(ChessError::ViewingHistory {
                index: self.active,
                total: self.total_states(),
            });
        }
        let snapshot = Snapshot::capture(white, black, to_move, last_move);
        let hash = snapshot.hash;
        let count = self.occurrences.entry(hash).or_insert(0);
        *count += 1;
        if *count >= 3 {
            self.is_threefold_repetition = true;
        }
        self.snapshots.push(snapshot);
        self.active = self.snapshots.len();
        Ok(hash)
    }

    pub fn load_previous(&mut self) -> ChessResult<&Snapshot> {
        if self.active == 0 {
            return Err(ChessError::NoHistory("previous"));
        }
        self.active -= 1;
        Ok(self.active_snapshot())
    }

    pub fn load_next(&mut self) -> ChessResult<&Snapshot> {
        if self.is_current() {
            return Err(ChessError::NoHistory("next"));
        }
        self.active += 1;
        Ok(self.active_snapshot())
    }

    #[inline]
    pub fn is_current(&self) -> bool {
        self.active == self.snapshots.len()
    }

    /// Number of snapshots taken after plies; the starting position is not
    /// counted.
    #[inline]
    pub fn total_states(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_snapshot(&self) -> &Snapshot {
        match self.active {
            0 => &self.origin,
            n => &self.snapshots[n - 1],
        }
    }

    pub fn latest(&self) -> &Snapshot {
        self.snapshots.last().unwrap_or(&self.origin)
    }

    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.is_threefold_repetition
    }

    pub fn occurrences(&self, hash: u64) -> u32 {
        self.occurrences.get(&hash).copied().unwrap_or(0)
    }
}
