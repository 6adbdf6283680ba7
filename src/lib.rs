use log::{debug, info};
use std::fmt;

pub mod audio;
pub mod config;
pub mod display;
pub mod sound;

use config::{TimerPreset, TIMER_PRESETS};
use sound::SoundConfig;

/// Elapsed/target bookkeeping for the single clock of the widget.
///
/// `target == 0` means the clock counts up without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerState {
    pub elapsed: u32,
    pub target: u32,
    pub running: bool,
}

impl TimerState {
    #[inline]
    pub fn target_reached(&self) -> bool {
        self.target > 0 && self.elapsed >= self.target
    }
}

/// Coarse lifecycle of the clock, derived from [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerPhase::Idle => write!(f, "idle"),
            TimerPhase::Running => write!(f, "running"),
            TimerPhase::Paused => write!(f, "paused"),
            TimerPhase::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

/// Result of a user-driven state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Ignored,
    Applied,
    /// The change left the clock past its target, so it stopped on the
    /// spot. The host plays the completion sound.
    Completed,
}

/// What a single tick did. The caller turns the flags into sound calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub advanced: bool,
    pub periodic_cue: bool,
    pub completed: bool,
}

/// Clock engine: timer state, the selected timer preset and the
/// once-per-wall-clock-second guard for periodic sounds.
///
/// The engine never schedules anything itself. The host owns the recurring
/// driver and feeds [`ClockEngine::tick`] with the current wall-clock second;
/// the driver must exist exactly while [`ClockEngine::is_running`] is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockEngine {
    state: TimerState,
    preset_index: usize,
    last_cue_second: Option<u64>,
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::default(),
            preset_index: 0,
            last_cue_second: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    pub fn preset(&self) -> &'static TimerPreset {
        &TIMER_PRESETS[self.preset_index]
    }

    pub fn phase(&self) -> TimerPhase {
        if self.state.running {
            TimerPhase::Running
        } else if self.state.target_reached() {
            TimerPhase::Completed
        } else if self.state.elapsed == 0 {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Starting a running clock changes nothing. A clock already beyond a
    /// lowered target completes instead of running; one sitting exactly on
    /// its target runs and completes on the next tick.
    pub fn start(&mut self) -> Transition {
        if self.state.running {
            return Transition::Ignored;
        }
        if self.state.target > 0 && self.state.elapsed > self.state.target {
            self.complete();
            return Transition::Completed;
        }
        self.state.running = true;
        debug!(
            "Clock started at {}s (target {}s)",
            self.state.elapsed, self.state.target
        );
        Transition::Applied
    }

    /// Returns `true` if the clock was running and is now paused.
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        debug!("Clock paused at {}s", self.state.elapsed);
        true
    }

    /// Play/pause button semantics.
    pub fn toggle(&mut self) -> Transition {
        if self.pause() {
            Transition::Applied
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::default();
        self.last_cue_second = None;
        debug!("Clock reset");
    }

    /// Shift the target by `delta_seconds`, saturating at zero.
    /// Ignored while running; returns whether the request was applied.
    pub fn adjust_target(&mut self, delta_seconds: i64) -> bool {
        if self.state.running {
            debug!("Ignoring target adjustment while running");
            return false;
        }
        let adjusted = i64::from(self.state.target)
            .saturating_add(delta_seconds)
            .clamp(0, i64::from(u32::MAX));
        self.state.target = adjusted as u32;
        debug!("Target adjusted to {}s", self.state.target);
        true
    }

    /// Select a timer preset and take its duration as the new target.
    /// Out-of-range indices leave everything untouched. A running clock
    /// that is already at or past the new target completes immediately.
    pub fn select_preset(&mut self, index: usize) -> Transition {
        let Some(preset) = TIMER_PRESETS.get(index) else {
            debug!("Ignoring out-of-range timer preset {}", index);
            return Transition::Ignored;
        };
        self.preset_index = index;
        self.state.target = preset.seconds;
        debug!("Timer preset '{}' selected ({}s)", preset.label, preset.seconds);

        if self.state.running && self.state.target_reached() {
            self.complete();
            return Transition::Completed;
        }
        Transition::Applied
    }

    /// Step to the neighbouring preset, wrapping at both ends.
    pub fn cycle_preset(&mut self, direction: CycleDirection) -> Transition {
        let count = TIMER_PRESETS.len();
        let next = match direction {
            CycleDirection::Next => (self.preset_index + 1) % count,
            CycleDirection::Prev => (self.preset_index + count - 1) % count,
        };
        self.select_preset(next)
    }

    /// Advance the clock by one second.
    ///
    /// Order on every tick:
    /// 1. a running clock already at its target stops without advancing;
    /// 2. a periodic cue is raised when sound is enabled, `now_secs` is a
    ///    multiple of the interval and this second has not cued yet;
    /// 3. `elapsed` grows by one, and reaching the target stops the clock.
    ///
    /// Ticks delivered to a stopped clock are ignored.
    pub fn tick(&mut self, now_secs: u64, sound: &SoundConfig) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.state.running {
            return outcome;
        }

        if self.state.target_reached() {
            self.complete();
            outcome.completed = true;
            return outcome;
        }

        if sound.enabled
            && now_secs % u64::from(sound.interval_seconds.get()) == 0
            && self.last_cue_second != Some(now_secs)
        {
            self.last_cue_second = Some(now_secs);
            outcome.periodic_cue = true;
        }

        self.state.elapsed = self.state.elapsed.saturating_add(1);
        outcome.advanced = true;

        if self.state.target_reached() {
            self.complete();
            outcome.completed = true;
        }
        outcome
    }

    fn complete(&mut self) {
        self.state.running = false;
        info!(
            "Timer completed at {} (target {})",
            format_time(self.state.elapsed),
            format_time(self.state.target)
        );
    }
}

/// Format whole seconds as `MM:SS`. Minutes are not folded into hours.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
