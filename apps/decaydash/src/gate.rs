//! Load gate: a one-way `Loading -> Loaded` switch that flips once a fixed
//! delay has elapsed since creation.
//!
//! The gate is polled rather than driven by a timer, so dropping it early
//! leaves nothing scheduled.

use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::{Duration, Instant};

/// Delay used when none is configured.
pub const DEFAULT_DELAY_MS: u64 = 1500;

const TICK: Duration = Duration::from_millis(80);
// the last frame is shown once finished
const SPINNER: [&str; 11] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Text shown next to the spinner.
pub const LOADING_MESSAGE: &str = "Loading Predictive Data Decay Detection System...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Loaded,
}

#[derive(Debug)]
pub struct LoadGate {
    started: Instant,
    delay: Duration,
    state: GateState,
    transitions: u32,
}

impl LoadGate {
    pub fn new(delay: Duration) -> Self {
        Self::starting_at(Instant::now(), delay)
    }

    pub fn starting_at(started: Instant, delay: Duration) -> Self {
        LoadGate {
            started,
            delay,
            state: GateState::Loading,
            transitions: 0,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// How many times the gate has changed state (0 or 1).
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn poll(&mut self) -> GateState {
        self.poll_at(Instant::now())
    }

    /// Advance the gate as of `now`.
    pub fn poll_at(&mut self, now: Instant) -> GateState {
        if self.state == GateState::Loading
            && now.saturating_duration_since(self.started) >= self.delay
        {
            self.state = GateState::Loaded;
            self.transitions += 1;
            log::debug!("load gate opened after {:?}", self.delay);
        }
        self.state
    }

    /// Time left before the gate opens, as of `now`.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.state {
            GateState::Loaded => Duration::ZERO,
            GateState::Loading => self
                .delay
                .saturating_sub(now.saturating_duration_since(self.started)),
        }
    }

    /// Block until the gate opens, calling `on_tick` with a frame counter
    /// while still loading.
    pub fn wait(&mut self, mut on_tick: impl FnMut(usize)) {
        let mut frame = 0usize;
        while self.poll() == GateState::Loading {
            on_tick(frame);
            frame += 1;
            let left = self.remaining_at(Instant::now());
            thread::sleep(left.min(TICK));
        }
    }
}

/// Spinner for the loading message. Hidden when `draw` is false; indicatif
/// also hides it when stderr is not a terminal.
pub fn loading_spinner(draw: bool) -> ProgressBar {
    if !draw {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner} {msg}") {
        Ok(style) => pb.set_style(style.tick_strings(&SPINNER)),
        Err(e) => log::debug!("spinner template rejected: {}", e),
    }
    pb.set_message(LOADING_MESSAGE);
    pb
}

/// Wait for the gate while ticking the loading spinner, then clear it.
pub fn wait_with_spinner(gate: &mut LoadGate, draw: bool) {
    let pb = loading_spinner(draw);
    gate.wait(|_| pb.tick());
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading_and_opens_after_delay() {
        let t0 = Instant::now();
        let mut gate = LoadGate::starting_at(t0, Duration::from_millis(1500));
        assert_eq!(gate.state(), GateState::Loading);
        assert_eq!(gate.poll_at(t0 + Duration::from_millis(1499)), GateState::Loading);
        assert_eq!(gate.transitions(), 0);
        assert_eq!(gate.poll_at(t0 + Duration::from_millis(1500)), GateState::Loaded);
        assert_eq!(gate.transitions(), 1);
    }

    #[test]
    fn test_transitions_exactly_once() {
        let t0 = Instant::now();
        let mut gate = LoadGate::starting_at(t0, Duration::from_millis(10));
        for ms in [20u64, 30, 5000] {
            assert_eq!(gate.poll_at(t0 + Duration::from_millis(ms)), GateState::Loaded);
        }
        // polling with an earlier instant never reverts the state
        assert_eq!(gate.poll_at(t0), GateState::Loaded);
        assert_eq!(gate.transitions(), 1);
    }

    #[test]
    fn test_zero_delay_opens_on_first_poll() {
        let mut gate = LoadGate::new(Duration::ZERO);
        assert_eq!(gate.state(), GateState::Loading);
        assert_eq!(gate.poll(), GateState::Loaded);
    }

    #[test]
    fn test_wait_blocks_at_least_the_delay() {
        let delay = Duration::from_millis(30);
        let start = Instant::now();
        let mut gate = LoadGate::new(delay);
        let mut ticks = 0;
        gate.wait(|_| ticks += 1);
        assert!(start.elapsed() >= delay);
        assert!(ticks >= 1);
        assert_eq!(gate.state(), GateState::Loaded);
        assert_eq!(gate.transitions(), 1);
    }

    #[test]
    fn test_spinner_hidden_for_machine_output() {
        let pb = loading_spinner(false);
        assert!(pb.is_hidden());
        let pb = loading_spinner(true);
        assert_eq!(pb.message(), LOADING_MESSAGE);
    }

    #[test]
    fn test_wait_with_spinner_opens_gate() {
        for draw in [false, true] {
            let mut gate = LoadGate::new(Duration::from_millis(5));
            wait_with_spinner(&mut gate, draw);
            assert_eq!(gate.state(), GateState::Loaded);
            assert_eq!(gate.transitions(), 1);
        }
    }

    #[test]
    fn test_remaining_counts_down() {
        let t0 = Instant::now();
        let gate = LoadGate::starting_at(t0, Duration::from_millis(100));
        assert_eq!(gate.remaining_at(t0 + Duration::from_millis(40)), Duration::from_millis(60));
        assert_eq!(gate.remaining_at(t0 + Duration::from_millis(400)), Duration::ZERO);
    }
}
