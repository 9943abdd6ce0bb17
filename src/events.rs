use crate::app_error::AppErrorPayload;
use crate::models::{FocusSession, PomodoroSettings, TimerMode};
use serde::Serialize;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerEvent {
    #[serde(rename_all = "camelCase")]
    Tick {
        mode: TimerMode,
        remaining_seconds: u32,
        progress_percent: f64,
    },
    #[serde(rename_all = "camelCase")]
    Started { mode: TimerMode, remaining_seconds: u32 },
    #[serde(rename_all = "camelCase")]
    Paused { mode: TimerMode, remaining_seconds: u32 },
    #[serde(rename_all = "camelCase")]
    Reset { remaining_seconds: u32 },
    #[serde(rename_all = "camelCase")]
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        remaining_seconds: u32,
        completed_intervals: u32,
    },
    SessionRecorded { session: FocusSession },
    SettingsUpdated { settings: PomodoroSettings },
    Notice { notice: AppErrorPayload },
}

/// Fan-out of timer events to any number of observers.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    sender: broadcast::Sender<TimerEvent>,
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: TimerEvent) {
        // No observers is the common case for headless use.
        if self.sender.send(event).is_err() {
            tracing::trace!("timer event dropped without observers");
        }
    }
}
