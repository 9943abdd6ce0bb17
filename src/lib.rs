//! Core of a Pomodoro focus app: the focus/break timer, the persisted store
//! of tasks, focus sessions and transactions, and the dashboard statistics.

pub mod app_error;
pub mod clock;
pub mod data_manager;
pub mod events;
pub mod finance_stats;
pub mod focus_timer;
pub mod models;
pub mod session_stats;
pub mod settings;
pub mod store;
pub mod tick_source;
pub mod timer_engine;

pub use app_error::{AppError, AppErrorKind, AppErrorPayload};
pub use clock::{Clock, ManualClock, SystemClock};
pub use data_manager::{DataError, DataManager};
pub use events::{EventEmitter, TimerEvent};
pub use focus_timer::FocusTimer;
pub use models::{
    FocusSession, PomodoroSettings, PomodoroSettingsPatch, TaskStatusFilter, TimerMode,
    TimerSnapshot,
};
pub use settings::SettingsError;
pub use store::{AppData, FocusSessionStore, SessionStore, StoreError, week_days};
pub use tick_source::{IntervalTickSource, ManualTickSource, TickHandle, TickSource};
pub use timer_engine::{TimerEngine, TimerError, TimerOptions};
