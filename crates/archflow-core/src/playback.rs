//! Playback engine.
//!
//! A discrete step sequencer decoupled from what is being animated: the same
//! machine drives "which connections are active" for a diagram or a full
//! guided tour. It is also decoupled from the clock: hosts pass
//! [`Instant`]s in (`play`, `poll`, ...) and wake themselves up via
//! [`Playback::next_deadline`], so tests and frame exporters run on
//! simulated time with no sleeping.
//!
//! Exactly one scheduled advance exists at a time: every transition that
//! reschedules first cancels the previous deadline, and dropping the
//! `Playback` value cancels it implicitly. There is no wall-clock precision
//! guarantee; a host that polls late replays each missed deadline in order.

use std::time::{Duration, Instant};

/// Speed multipliers offered by `cycle_speed`, slowest to fastest.
pub const SPEED_PRESETS: [f64; 6] = [0.25, 0.5, 1.0, 1.5, 2.0, 4.0];

pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(2000);

/// Lower bound on the effective per-step delay. Keeps the deadline chain
/// strictly advancing even at extreme speed multipliers, so `poll` always
/// terminates.
const MIN_STEP_DELAY: Duration = Duration::from_millis(1);

/// Snapshot of the playback machine, safe to hand to render passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_paused: bool,
    pub speed: f64,
    pub current_step: usize,
    pub total_steps: usize,
    /// Percentage in `[0, 100]`; defined as 0 when `total_steps <= 1`.
    pub progress: f64,
}

impl PlaybackState {
    fn new(total_steps: usize, speed: f64) -> Self {
        Self {
            is_playing: false,
            is_paused: false,
            speed,
            current_step: 0,
            total_steps,
            progress: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlaybackOptions {
    pub total_steps: usize,
    /// Base duration of one step at speed 1.0. Zero falls back to
    /// [`DEFAULT_STEP_DURATION`].
    pub step_duration: Duration,
    pub speed: f64,
    pub loop_enabled: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            total_steps: 0,
            step_duration: DEFAULT_STEP_DURATION,
            speed: 1.0,
            loop_enabled: false,
        }
    }
}

/// The single pending advance. Owned by the playback value so disposal of
/// the owner cancels the callback hazard by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledAdvance {
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct Playback {
    state: PlaybackState,
    loop_enabled: bool,
    step_duration: Duration,
    pending: Option<ScheduledAdvance>,
}

fn progress_for(step: usize, total: usize) -> f64 {
    if total <= 1 {
        0.0
    } else {
        step as f64 / (total - 1) as f64 * 100.0
    }
}

impl Playback {
    pub fn new(options: PlaybackOptions) -> Self {
        let speed = if options.speed.is_finite() && options.speed > 0.0 {
            options.speed
        } else {
            1.0
        };
        let step_duration = if options.step_duration.is_zero() {
            DEFAULT_STEP_DURATION
        } else {
            options.step_duration
        };
        Self {
            state: PlaybackState::new(options.total_steps, speed),
            loop_enabled: options.loop_enabled,
            step_duration,
            pending: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Instant at which the next step advance is due, if one is scheduled.
    /// Hosts use this to arm their own timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    fn step_delay(&self) -> Duration {
        self.step_duration.div_f64(self.state.speed).max(MIN_STEP_DELAY)
    }

    fn schedule(&mut self, from: Instant) {
        // Replaces any pending deadline: advances are single-flight.
        self.pending = Some(ScheduledAdvance {
            due: from + self.step_delay(),
        });
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    /// Starts or resumes playback. No-op for an empty sequence.
    pub fn play(&mut self, now: Instant) {
        if self.state.total_steps == 0 {
            return;
        }
        self.state.is_playing = true;
        self.state.is_paused = false;
        self.schedule(now);
    }

    /// Pauses, preserving `current_step`; the pending advance is cancelled.
    pub fn pause(&mut self) {
        self.cancel();
        self.state.is_playing = false;
        self.state.is_paused = true;
    }

    /// Stops from any state: cancels the pending advance and resets the
    /// position to step 0 / progress 0.
    pub fn stop(&mut self) {
        self.cancel();
        self.state.is_playing = false;
        self.state.is_paused = false;
        self.state.current_step = 0;
        self.state.progress = 0.0;
    }

    pub fn toggle_play_pause(&mut self, now: Instant) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    fn set_step(&mut self, step: usize) {
        self.state.current_step = step;
        self.state.progress = progress_for(step, self.state.total_steps);
    }

    /// Immediate step forward, clamped to the last step. Reschedules the
    /// timed advance from `now` when playing.
    pub fn next(&mut self, now: Instant) {
        self.cancel();
        let last = self.state.total_steps.saturating_sub(1);
        self.set_step((self.state.current_step + 1).min(last));
        if self.state.is_playing {
            self.schedule(now);
        }
    }

    /// Immediate step backward, clamped to step 0.
    pub fn previous(&mut self, now: Instant) {
        self.cancel();
        self.set_step(self.state.current_step.saturating_sub(1));
        if self.state.is_playing {
            self.schedule(now);
        }
    }

    /// Jumps to `step`; out-of-range requests are ignored.
    pub fn go_to_step(&mut self, now: Instant, step: usize) {
        if step >= self.state.total_steps {
            return;
        }
        self.cancel();
        self.set_step(step);
        if self.state.is_playing {
            self.schedule(now);
        }
    }

    /// Updates the speed multiplier. Takes effect immediately: a pending
    /// advance is rescheduled at the new rate instead of finishing at the
    /// old one. `current_step` is untouched. Non-positive or non-finite
    /// values are ignored.
    pub fn set_speed(&mut self, now: Instant, speed: f64) {
        if !speed.is_finite() || speed <= 0.0 {
            return;
        }
        self.state.speed = speed;
        if self.state.is_playing {
            self.cancel();
            self.schedule(now);
        }
    }

    /// Advances to the next entry of [`SPEED_PRESETS`], wrapping around.
    pub fn cycle_speed(&mut self, now: Instant) {
        let idx = SPEED_PRESETS
            .iter()
            .position(|&s| (s - self.state.speed).abs() < f64::EPSILON);
        let next = match idx {
            Some(i) => SPEED_PRESETS[(i + 1) % SPEED_PRESETS.len()],
            None => SPEED_PRESETS[0],
        };
        self.set_speed(now, next);
    }

    /// Flips the loop flag without touching the current playback state.
    pub fn toggle_loop(&mut self) {
        self.loop_enabled = !self.loop_enabled;
    }

    /// Adjusts the step count when the animated definition changes, clamping
    /// the current position into the new range.
    pub fn set_total_steps(&mut self, total_steps: usize) {
        self.state.total_steps = total_steps;
        let last = total_steps.saturating_sub(1);
        let step = self.state.current_step.min(last);
        self.set_step(step);
        if total_steps == 0 {
            self.cancel();
            self.state.is_playing = false;
        }
    }

    /// Applies every due advance. Returns `true` when the state changed.
    ///
    /// Rescheduling is anchored to the previous deadline rather than `now`,
    /// so a host that wakes up late replays missed steps in order instead of
    /// stretching the remaining ones.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(p) = self.pending {
            if p.due > now {
                break;
            }
            self.pending = None;
            self.advance(p.due);
            changed = true;
        }
        changed
    }

    fn advance(&mut self, due: Instant) {
        let next = self.state.current_step + 1;
        if next >= self.state.total_steps {
            if self.loop_enabled {
                self.set_step(0);
                self.schedule(due);
            } else {
                // Stopped-at-end: position is preserved, playback halts.
                self.state.is_playing = false;
                self.state.is_paused = false;
                self.state.progress = 100.0;
            }
        } else {
            self.set_step(next);
            self.schedule(due);
        }
    }
}
