//! Optional per-side countdown clock.
//!
//! A background thread decrements the active side once per tick. It only
//! ever touches the clock state below; when a side reaches zero the expiry
//! is latched and the match picks it up on its next poll. The thread wakes on
//! a channel timeout so `stop` (and `Drop`) return without waiting out a tick.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info};

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    pub initial_secs: u32,
    /// Seconds added to a side after each of its moves.
    pub increment_secs: u32,
    pub tick: Duration,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            initial_secs: 600,
            increment_secs: 0,
            tick: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockState {
    remaining: [u32; 2],
    active: Color,
    running: bool,
    expired: Option<Color>,
}

impl ClockState {
    fn tick(&mut self) -> Option<Color> {
        if !self.running || self.expired.is_some() {
            return self.expired;
        }
        let slot = &mut self.remaining[self.active.index()];
        *slot = slot.saturating_sub(1);
        if *slot == 0 {
            self.expired = Some(self.active);
            self.running = false;
        }
        self.expired
    }
}

pub struct MatchClock {
    settings: ClockSettings,
    state: Arc<Mutex<ClockState>>,
    stop_tx: Option<mpsc::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl MatchClock {
    pub fn new(settings: ClockSettings) -> Self {
        Self {
            settings,
            state: Arc::new(Mutex::new(ClockState {
                remaining: [settings.initial_secs; 2],
                active: Color::White,
                running: false,
                expired: None,
            })),
            stop_tx: None,
            worker: None,
        }
    }

    #[inline]
    pub fn settings(&self) -> ClockSettings {
        self.settings
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start counting down for the active side, spawning the timer thread on
    /// first use.
    pub fn start(&mut self) {
        self.lock().running = true;
        if self.worker.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let state = Arc::clone(&self.state);
        let tick = self.settings.tick;
        let worker = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(tick) {
                Err(RecvTimeoutError::Timeout) => {
                    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                    let was_expired = guard.expired.is_some();
                    if let Some(flagged) = guard.tick() {
                        if !was_expired {
                            info!(side = %flagged, "clock expired");
                        }
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        debug!(tick_ms = tick.as_millis() as u64, "clock thread started");
        self.stop_tx = Some(stop_tx);
        self.worker = Some(worker);
    }

    /// Decrement the active side by one second, as the timer thread does.
    pub fn tick(&self) -> Option<Color> {
        self.lock().tick()
    }

    /// Hand the clock to `next` after the other side completed a move.
    pub fn switch_to(&self, next: Color) {
        let mut state = self.lock();
        if state.expired.is_some() {
            return;
        }
        let mover = next.opposite();
        let slot = &mut state.remaining[mover.index()];
        *slot = slot.saturating_add(self.settings.increment_secs);
        state.active = next;
    }

    /// Give the clock to `color` without crediting any increment.
    pub fn set_active(&self, color: Color) {
        self.lock().active = color;
    }

    pub fn pause(&self) {
        self.lock().running = false;
    }

    pub fn resume(&self) {
        let mut state = self.lock();
        if state.expired.is_none() {
            state.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn remaining(&self, color: Color) -> u32 {
        self.lock().remaining[color.index()]
    }

    pub fn active(&self) -> Color {
        self.lock().active
    }

    pub fn expired(&self) -> Option<Color> {
        self.lock().expired
    }

    /// Stop counting and shut the timer thread down.
    pub fn stop(&mut self) {
        self.pause();
        self.stop_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            debug!("clock thread stopped");
        }
    }
}

impl Drop for MatchClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for MatchClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchClock")
            .field("settings", &self.settings)
            .field("state", &*self.lock())
            .field("threaded", &self.worker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn settings(initial_secs: u32, increment_secs: u32) -> ClockSettings {
        ClockSettings {
            initial_secs,
            increment_secs,
            tick: Duration::from_millis(5),
        }
    }

    #[test]
    fn ticks_only_while_running() {
        let clock = MatchClock::new(settings(10, 0));
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.remaining(Color::White), 10);

        clock.resume();
        clock.tick();
        assert_eq!(clock.remaining(Color::White), 9);
        assert_eq!(clock.remaining(Color::Black), 10);
    }

    #[test]
    fn switch_applies_increment_to_mover() {
        let clock = MatchClock::new(settings(10, 3));
        clock.resume();
        clock.tick();
        clock.switch_to(Color::Black);
        assert_eq!(clock.remaining(Color::White), 12);
        assert_eq!(clock.active(), Color::Black);
        clock.tick();
        assert_eq!(clock.remaining(Color::Black), 9);
    }

    #[test]
    fn reaching_zero_latches_expiry() {
        let clock = MatchClock::new(settings(2, 0));
        clock.resume();
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), Some(Color::White));
        assert!(!clock.is_running());
        clock.resume();
        assert!(!clock.is_running());
        assert_eq!(clock.remaining(Color::White), 0);
    }

    #[test]
    fn background_thread_counts_down_and_stops() {
        let mut clock = MatchClock::new(settings(3, 0));
        clock.start();
        let deadline = Instant::now() + Duration::from_secs(5);
        while clock.expired().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(clock.expired(), Some(Color::White));
        clock.stop();
        assert!(!clock.is_running());
    }

    #[test]
    fn stopped_clock_no_longer_changes() {
        let mut clock = MatchClock::new(settings(1000, 0));
        clock.start();
        std::thread::sleep(Duration::from_millis(30));
        clock.stop();
        let frozen = clock.remaining(Color::White);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(clock.remaining(Color::White), frozen);
        assert!(frozen < 1000);
    }
}
