use crate::models::{FocusSessionInput, PomodoroSettings, TimerMode, TimerSnapshot};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timer already running")]
    AlreadyRunning,
    #[error("Timer not running")]
    NotRunning,
    #[error("No focus interval in progress")]
    NotFocusing,
    #[error("Session too short to record: {elapsed_seconds}s elapsed, {minimum_seconds}s required")]
    SessionTooShort {
        elapsed_seconds: u32,
        minimum_seconds: u32,
    },
    #[error("Timer state lock failed")]
    StateUnavailable,
}

/// Controller policy knobs that the source variants disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerOptions {
    /// Keep counting into the next interval instead of stopping at each
    /// transition.
    pub auto_advance: bool,
    pub reset_counter_on_reset: bool,
    /// Minimum active focus time for `complete_now`. Natural expiry and
    /// `skip` always record.
    pub min_recorded_seconds: u32,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            auto_advance: false,
            reset_counter_on_reset: true,
            min_recorded_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    NoChange,
    Ticked { remaining_seconds: u32 },
    Transitioned(Transition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: TimerMode,
    pub to: TimerMode,
    pub remaining_seconds: u32,
    pub completed_intervals: u32,
    /// Present only when a focus interval ended.
    pub completed_focus: Option<FocusSessionInput>,
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    options: TimerOptions,
    mode: TimerMode,
    remaining_seconds: u32,
    interval_seconds: u32,
    running: bool,
    completed_intervals: u32,
    focus_started_at: Option<NaiveDateTime>,
    focus_active_seconds: u32,
    tag: Option<String>,
}

impl TimerEngine {
    pub fn new(settings: &PomodoroSettings, options: TimerOptions) -> Self {
        let interval_seconds = TimerMode::Focus.interval_seconds(settings);
        Self {
            options,
            mode: TimerMode::Focus,
            remaining_seconds: interval_seconds,
            interval_seconds,
            running: false,
            completed_intervals: 0,
            focus_started_at: None,
            focus_active_seconds: 0,
            tag: None,
        }
    }

    pub fn options(&self) -> TimerOptions {
        self.options
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn interval_seconds(&self) -> u32 {
        self.interval_seconds
    }

    pub fn completed_intervals(&self) -> u32 {
        self.completed_intervals
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn focus_active_seconds(&self) -> u32 {
        self.focus_active_seconds
    }

    /// Starts or resumes the countdown.
    pub fn start(&mut self, now: NaiveDateTime) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::AlreadyRunning);
        }
        self.running = true;
        if self.mode == TimerMode::Focus && self.focus_started_at.is_none() {
            self.focus_started_at = Some(now);
        }
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        if !self.running {
            return Err(TimerError::NotRunning);
        }
        self.running = false;
        Ok(())
    }

    pub fn reset(&mut self, settings: &PomodoroSettings) {
        self.running = false;
        self.mode = TimerMode::Focus;
        self.interval_seconds = TimerMode::Focus.interval_seconds(settings);
        self.remaining_seconds = self.interval_seconds;
        self.focus_started_at = None;
        self.focus_active_seconds = 0;
        if self.options.reset_counter_on_reset {
            self.completed_intervals = 0;
        }
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    /// Advances the countdown by one second. Never decrements past zero and
    /// does nothing while paused. A running interval already at zero ends
    /// on this tick.
    pub fn tick(&mut self, settings: &PomodoroSettings, now: NaiveDateTime) -> AdvanceResult {
        if !self.running {
            return AdvanceResult::NoChange;
        }
        if self.remaining_seconds == 0 {
            return AdvanceResult::Transitioned(self.finish_interval(settings, now));
        }
        self.remaining_seconds -= 1;
        if self.mode == TimerMode::Focus {
            self.focus_active_seconds = self.focus_active_seconds.saturating_add(1);
        }
        if self.remaining_seconds > 0 {
            return AdvanceResult::Ticked {
                remaining_seconds: self.remaining_seconds,
            };
        }
        AdvanceResult::Transitioned(self.finish_interval(settings, now))
    }

    /// Ends the current interval immediately, as if it had elapsed.
    pub fn skip(&mut self, settings: &PomodoroSettings, now: NaiveDateTime) -> Transition {
        self.finish_interval(settings, now)
    }

    /// Ends the focus interval early. A blank `tag` leaves the current
    /// label in place.
    pub fn complete_now(
        &mut self,
        settings: &PomodoroSettings,
        now: NaiveDateTime,
        tag: Option<String>,
    ) -> Result<Transition, TimerError> {
        if self.mode != TimerMode::Focus {
            return Err(TimerError::NotFocusing);
        }
        if self.focus_active_seconds < self.options.min_recorded_seconds {
            return Err(TimerError::SessionTooShort {
                elapsed_seconds: self.focus_active_seconds,
                minimum_seconds: self.options.min_recorded_seconds,
            });
        }
        if let Some(tag) = tag.filter(|tag| !tag.trim().is_empty()) {
            self.set_tag(Some(tag));
        }
        Ok(self.finish_interval(settings, now))
    }

    pub fn progress_percent(&self) -> f64 {
        if self.interval_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.interval_seconds.saturating_sub(self.remaining_seconds);
        (f64::from(elapsed) / f64::from(self.interval_seconds) * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining_display(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            is_running: self.running,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.interval_seconds,
            progress_percent: self.progress_percent(),
            display: self.remaining_display(),
            completed_intervals: self.completed_intervals,
            tag: self.tag.clone(),
        }
    }

    fn finish_interval(&mut self, settings: &PomodoroSettings, now: NaiveDateTime) -> Transition {
        let from = self.mode;
        let (to, completed_focus) = if from.is_break() {
            (TimerMode::Focus, None)
        } else {
            self.completed_intervals = self.completed_intervals.saturating_add(1);
            let record = self.focus_record(settings, now);
            let every = settings.sessions_before_long_break.max(1);
            let next = if self.completed_intervals % every == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::Break
            };
            (next, Some(record))
        };
        self.enter(to, settings, now);
        Transition {
            from,
            to,
            remaining_seconds: self.remaining_seconds,
            completed_intervals: self.completed_intervals,
            completed_focus,
        }
    }

    fn enter(&mut self, mode: TimerMode, settings: &PomodoroSettings, now: NaiveDateTime) {
        self.mode = mode;
        self.interval_seconds = mode.interval_seconds(settings);
        self.remaining_seconds = self.interval_seconds;
        self.running = self.running && self.options.auto_advance;
        self.focus_active_seconds = 0;
        self.focus_started_at = if mode == TimerMode::Focus && self.running {
            Some(now)
        } else {
            None
        };
    }

    fn focus_record(&self, settings: &PomodoroSettings, now: NaiveDateTime) -> FocusSessionInput {
        let date = self
            .focus_started_at
            .map(|started| started.date())
            .unwrap_or_else(|| now.date());
        FocusSessionInput {
            date,
            start_time: self.focus_started_at.map(|started| started.time()),
            end_time: Some(now.time()),
            focus_duration: settings.focus_duration,
            break_duration: settings.break_duration,
            completed_pomodoros: 1,
            tag: self.tag.clone(),
        }
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
