//! The focus timer as seen by a UI layer: owns the state machine, drives it
//! from a tick source and records finished focus intervals in the store.

use crate::app_error::AppError;
use crate::clock::{Clock, SystemClock};
use crate::events::{EventEmitter, TimerEvent};
use crate::models::{FocusSession, PomodoroSettings, PomodoroSettingsPatch, TimerSnapshot};
use crate::settings::SettingsError;
use crate::store::FocusSessionStore;
use crate::tick_source::{TICK_PERIOD, TickHandle, TickSource};
use crate::timer_engine::{AdvanceResult, TimerEngine, TimerError, TimerOptions, Transition};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::broadcast;

pub struct FocusTimer {
    core: Arc<Mutex<TimerCore>>,
    ticks: Arc<dyn TickSource>,
    events: EventEmitter,
}

struct TimerCore {
    engine: TimerEngine,
    store: Arc<dyn FocusSessionStore>,
    clock: Arc<dyn Clock>,
    events: EventEmitter,
    // Bumped whenever ticking stops or restarts; ticks carrying an older
    // value are discarded.
    generation: u64,
    subscription: Option<TickHandle>,
}

impl FocusTimer {
    pub fn new(
        store: Arc<dyn FocusSessionStore>,
        ticks: Arc<dyn TickSource>,
        clock: Arc<dyn Clock>,
        options: TimerOptions,
    ) -> Self {
        let settings = store.pomodoro_settings();
        let events = EventEmitter::new();
        let core = TimerCore {
            engine: TimerEngine::new(&settings, options),
            store,
            clock,
            events: events.clone(),
            generation: 0,
            subscription: None,
        };
        Self {
            core: Arc::new(Mutex::new(core)),
            ticks,
            events,
        }
    }

    pub fn with_defaults(store: Arc<dyn FocusSessionStore>, ticks: Arc<dyn TickSource>) -> Self {
        Self::new(store, ticks, Arc::new(SystemClock), TimerOptions::default())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    /// Starts the countdown, or resumes it after a pause.
    pub fn start(&self) -> Result<(), TimerError> {
        let mut core = self.lock()?;
        let now = core.clock.now();
        core.engine.start(now)?;
        core.generation = core.generation.wrapping_add(1);
        let generation = core.generation;
        let weak = Arc::downgrade(&self.core);
        let handle = self.ticks.subscribe(
            TICK_PERIOD,
            Box::new(move || deliver_tick(&weak, generation)),
        );
        core.subscription = Some(handle);
        tracing::debug!(
            mode = ?core.engine.mode(),
            remaining = core.engine.remaining_seconds(),
            "timer started"
        );
        core.events.emit(TimerEvent::Started {
            mode: core.engine.mode(),
            remaining_seconds: core.engine.remaining_seconds(),
        });
        Ok(())
    }

    pub fn pause(&self) -> Result<(), TimerError> {
        let mut core = self.lock()?;
        core.engine.pause()?;
        core.stop_ticking();
        tracing::debug!(remaining = core.engine.remaining_seconds(), "timer paused");
        core.events.emit(TimerEvent::Paused {
            mode: core.engine.mode(),
            remaining_seconds: core.engine.remaining_seconds(),
        });
        Ok(())
    }

    pub fn reset(&self) -> Result<(), TimerError> {
        let mut core = self.lock()?;
        let settings = core.store.pomodoro_settings();
        core.engine.reset(&settings);
        core.stop_ticking();
        tracing::debug!("timer reset");
        core.events.emit(TimerEvent::Reset {
            remaining_seconds: core.engine.remaining_seconds(),
        });
        Ok(())
    }

    /// Ends the current interval now. Returns the recorded session when a
    /// focus interval was skipped.
    pub fn skip(&self) -> Result<Option<FocusSession>, TimerError> {
        let mut core = self.lock()?;
        let settings = core.store.pomodoro_settings();
        let now = core.clock.now();
        let transition = core.engine.skip(&settings, now);
        Ok(core.apply_transition(transition))
    }

    /// Records the running focus interval early, subject to the minimum
    /// session length. A blank `tag` keeps the label already set.
    pub fn complete_now(&self, tag: Option<String>) -> Result<FocusSession, TimerError> {
        let mut core = self.lock()?;
        let settings = core.store.pomodoro_settings();
        let now = core.clock.now();
        let transition = match core.engine.complete_now(&settings, now, tag) {
            Ok(transition) => transition,
            Err(err) => {
                let notice = AppError::from(err.clone());
                notice.report();
                core.events.emit(TimerEvent::Notice {
                    notice: notice.payload(),
                });
                return Err(err);
            }
        };
        core.apply_transition(transition).ok_or(TimerError::NotFocusing)
    }

    /// Labels the focus interval in progress. A blank tag clears it.
    pub fn set_tag(&self, tag: impl Into<String>) -> Result<(), TimerError> {
        let mut core = self.lock()?;
        core.engine.set_tag(Some(tag.into()));
        Ok(())
    }

    /// Saves new settings. The interval in progress keeps its length; the
    /// change applies from the next transition.
    pub fn update_settings(
        &self,
        patch: PomodoroSettingsPatch,
    ) -> Result<PomodoroSettings, SettingsError> {
        let store = match self.core.lock() {
            Ok(core) => Arc::clone(&core.store),
            Err(poisoned) => Arc::clone(&poisoned.into_inner().store),
        };
        match store.update_pomodoro_settings(patch) {
            Ok(settings) => {
                self.events.emit(TimerEvent::SettingsUpdated { settings });
                Ok(settings)
            }
            Err(err) => {
                let notice = AppError::from(err);
                notice.report();
                self.events.emit(TimerEvent::Notice {
                    notice: notice.payload(),
                });
                Err(err)
            }
        }
    }

    pub fn settings(&self) -> Result<PomodoroSettings, TimerError> {
        Ok(self.lock()?.store.pomodoro_settings())
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        Ok(self.lock()?.engine.snapshot())
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimerCore>, TimerError> {
        self.core.lock().map_err(|_| TimerError::StateUnavailable)
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        let mut core = self.core.lock().unwrap_or_else(PoisonError::into_inner);
        core.stop_ticking();
    }
}

impl TimerCore {
    fn stop_ticking(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.subscription.take() {
            handle.cancel();
        }
    }

    fn on_tick(&mut self) {
        let settings = self.store.pomodoro_settings();
        let now = self.clock.now();
        match self.engine.tick(&settings, now) {
            AdvanceResult::NoChange => {}
            AdvanceResult::Ticked { remaining_seconds } => {
                self.events.emit(TimerEvent::Tick {
                    mode: self.engine.mode(),
                    remaining_seconds,
                    progress_percent: self.engine.progress_percent(),
                });
            }
            AdvanceResult::Transitioned(transition) => {
                self.apply_transition(transition);
            }
        }
    }

    fn apply_transition(&mut self, transition: Transition) -> Option<FocusSession> {
        let recorded = transition
            .completed_focus
            .map(|input| self.store.append_focus_session(input));
        if let Some(session) = &recorded {
            self.events.emit(TimerEvent::SessionRecorded {
                session: session.clone(),
            });
        }
        tracing::debug!(
            from = ?transition.from,
            to = ?transition.to,
            completed = transition.completed_intervals,
            "interval finished"
        );
        self.events.emit(TimerEvent::ModeChanged {
            from: transition.from,
            to: transition.to,
            remaining_seconds: transition.remaining_seconds,
            completed_intervals: transition.completed_intervals,
        });
        if !self.engine.is_running() {
            self.stop_ticking();
        }
        recorded
    }
}

fn deliver_tick(core: &Weak<Mutex<TimerCore>>, generation: u64) {
    let Some(core) = core.upgrade() else {
        return;
    };
    let mut core = match core.lock() {
        Ok(core) => core,
        Err(_) => {
            tracing::error!("timer state lock poisoned; tick dropped");
            return;
        }
    };
    if core.generation != generation {
        tracing::trace!(generation, "stale tick ignored");
        return;
    }
    core.on_tick();
}
