//! In-memory application state with write-behind persistence.
//!
//! Every mutation lands in memory before the call returns. A snapshot is
//! then queued for the persistence worker; callers never wait on disk.

use crate::data_manager::{DataError, DataManager};
use crate::models::{
    CalendarView, FocusSession, FocusSessionInput, FocusSessionPatch, PomodoroSettings,
    PomodoroSettingsPatch, Task, TaskCategory, TaskInput, TaskPatch, TaskStatusFilter, ThemeMode,
    Transaction, TransactionInput, TransactionPatch,
};
use crate::settings::SettingsError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError, mpsc};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub theme_mode: ThemeMode,
    pub calendar_view: CalendarView,
    pub tasks: Vec<Task>,
    pub focus_sessions: Vec<FocusSession>,
    pub transactions: Vec<Transaction>,
    pub pomodoro_settings: PomodoroSettings,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("Store has no backing storage")]
    NotPersistent,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The narrow view of the store that the focus timer needs.
pub trait FocusSessionStore: Send + Sync {
    fn append_focus_session(&self, input: FocusSessionInput) -> FocusSession;
    fn pomodoro_settings(&self) -> PomodoroSettings;
    fn update_pomodoro_settings(
        &self,
        patch: PomodoroSettingsPatch,
    ) -> Result<PomodoroSettings, SettingsError>;
}

pub struct SessionStore {
    state: Mutex<AppData>,
    data_manager: Option<DataManager>,
    persist: Option<PersistWorker>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("data_manager", &self.data_manager)
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::with_data(AppData::default())
    }

    pub fn with_data(data: AppData) -> Self {
        Self {
            state: Mutex::new(data),
            data_manager: None,
            persist: None,
        }
    }

    /// Loads the persisted blob and starts the persistence worker.
    pub fn open(data_manager: DataManager) -> StoreResult<Self> {
        let mut data = data_manager.load_state()?;
        if let Err(err) = data.pomodoro_settings.validate() {
            tracing::warn!(error = %err, "stored pomodoro settings rejected; using defaults");
            data.pomodoro_settings = PomodoroSettings::default();
        }
        let persist = PersistWorker::spawn(data_manager.clone())?;
        tracing::debug!(
            path = %data_manager.state_path().display(),
            sessions = data.focus_sessions.len(),
            tasks = data.tasks.len(),
            transactions = data.transactions.len(),
            "store opened"
        );
        Ok(Self {
            state: Mutex::new(data),
            data_manager: Some(data_manager),
            persist: Some(persist),
        })
    }

    pub fn snapshot(&self) -> AppData {
        self.lock().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Tasks scheduled on `date` by start time, untimed ones last.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .lock()
            .tasks
            .iter()
            .filter(|task| task.date == date)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.start_time.is_none(), task.start_time));
        tasks
    }

    pub fn tasks_with_status(&self, filter: TaskStatusFilter) -> Vec<Task> {
        self.lock()
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    /// Every category in board order, each with its matching tasks. Empty
    /// categories are kept.
    pub fn tasks_by_category(&self, filter: TaskStatusFilter) -> Vec<(TaskCategory, Vec<Task>)> {
        let tasks = self.tasks_with_status(filter);
        TaskCategory::ALL
            .iter()
            .map(|category| {
                let grouped = tasks
                    .iter()
                    .filter(|task| task.category == *category)
                    .cloned()
                    .collect();
                (*category, grouped)
            })
            .collect()
    }

    /// Incomplete tasks dated from `today` through `today + days`, soonest
    /// first.
    pub fn upcoming_tasks(&self, today: NaiveDate, days: u32) -> Vec<Task> {
        let last = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        let mut tasks: Vec<Task> = self
            .lock()
            .tasks
            .iter()
            .filter(|task| !task.completed && task.date >= today && task.date <= last)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.date);
        tasks
    }

    pub fn toggle_task(&self, id: &str) -> StoreResult<Task> {
        self.mutate(|state| {
            let task = state
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| not_found("task", id))?;
            task.completed = !task.completed;
            Ok(task.clone())
        })
    }

    pub fn add_task(&self, input: TaskInput) -> Task {
        let task = input.into_task(new_id());
        let stored = task.clone();
        self.write(|state| state.tasks.push(stored));
        tracing::debug!(id = %task.id, "task added");
        task
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        self.mutate(|state| {
            let task = state
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| not_found("task", id))?;
            task.apply(patch);
            Ok(task.clone())
        })
    }

    pub fn delete_task(&self, id: &str) -> StoreResult<()> {
        self.mutate(|state| {
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id != id);
            if state.tasks.len() == before {
                return Err(not_found("task", id));
            }
            Ok(())
        })
    }

    pub fn focus_sessions(&self) -> Vec<FocusSession> {
        self.lock().focus_sessions.clone()
    }

    pub fn update_focus_session(
        &self,
        id: &str,
        patch: FocusSessionPatch,
    ) -> StoreResult<FocusSession> {
        self.mutate(|state| {
            let session = state
                .focus_sessions
                .iter_mut()
                .find(|session| session.id == id)
                .ok_or_else(|| not_found("focus session", id))?;
            session.apply(patch);
            Ok(session.clone())
        })
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    pub fn add_transaction(&self, input: TransactionInput) -> Transaction {
        let transaction = input.into_transaction(new_id());
        let stored = transaction.clone();
        self.write(|state| state.transactions.push(stored));
        tracing::debug!(id = %transaction.id, "transaction added");
        transaction
    }

    pub fn update_transaction(
        &self,
        id: &str,
        patch: TransactionPatch,
    ) -> StoreResult<Transaction> {
        self.mutate(|state| {
            let transaction = state
                .transactions
                .iter_mut()
                .find(|transaction| transaction.id == id)
                .ok_or_else(|| not_found("transaction", id))?;
            transaction.apply(patch);
            Ok(transaction.clone())
        })
    }

    pub fn delete_transaction(&self, id: &str) -> StoreResult<()> {
        self.mutate(|state| {
            let before = state.transactions.len();
            state.transactions.retain(|transaction| transaction.id != id);
            if state.transactions.len() == before {
                return Err(not_found("transaction", id));
            }
            Ok(())
        })
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.lock().theme_mode
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) {
        self.write(|state| state.theme_mode = mode);
    }

    pub fn calendar_view(&self) -> CalendarView {
        self.lock().calendar_view
    }

    pub fn set_calendar_view(&self, view: CalendarView) {
        self.write(|state| state.calendar_view = view);
    }

    pub fn export_json(&self) -> StoreResult<String> {
        let snapshot = self.snapshot();
        Ok(serde_json::to_string_pretty(&snapshot).map_err(DataError::from)?)
    }

    pub fn export_backup(&self, date: NaiveDate) -> StoreResult<PathBuf> {
        let data_manager = self
            .data_manager
            .as_ref()
            .ok_or(StoreError::NotPersistent)?;
        Ok(data_manager.export_backup(&self.snapshot(), date)?)
    }

    /// Drops every collection and setting and removes the persisted blob.
    pub fn reset_all(&self) {
        let mut state = self.lock();
        *state = AppData::default();
        if let Some(persist) = &self.persist {
            persist.submit(PersistMessage::Clear);
        }
        tracing::info!("store reset to defaults");
    }

    /// Blocks until every queued write has reached disk.
    pub fn flush(&self) {
        if let Some(persist) = &self.persist {
            persist.flush();
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppData> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, apply: impl FnOnce(&mut AppData)) {
        let mut state = self.lock();
        apply(&mut state);
        self.queue_save(&state);
    }

    fn mutate<R, E>(&self, apply: impl FnOnce(&mut AppData) -> Result<R, E>) -> Result<R, E> {
        let mut state = self.lock();
        let result = apply(&mut state)?;
        self.queue_save(&state);
        Ok(result)
    }

    // Called with the state lock held so snapshots reach the worker in order.
    fn queue_save(&self, state: &AppData) {
        if let Some(persist) = &self.persist {
            persist.submit(PersistMessage::Save(Box::new(state.clone())));
        }
    }
}

impl FocusSessionStore for SessionStore {
    fn append_focus_session(&self, input: FocusSessionInput) -> FocusSession {
        let session = input.into_session(new_id());
        let stored = session.clone();
        self.write(|state| state.focus_sessions.push(stored));
        tracing::info!(
            id = %session.id,
            tag = session.tag.as_deref().unwrap_or(""),
            "focus session recorded"
        );
        session
    }

    fn pomodoro_settings(&self) -> PomodoroSettings {
        self.lock().pomodoro_settings
    }

    fn update_pomodoro_settings(
        &self,
        patch: PomodoroSettingsPatch,
    ) -> Result<PomodoroSettings, SettingsError> {
        self.mutate(|state| {
            state.pomodoro_settings.apply(patch)?;
            Ok(state.pomodoro_settings)
        })
    }
}

/// The Monday-to-Sunday week containing `date`.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let back = u64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_days(Days::new(back)).unwrap_or(date);
    std::array::from_fn(|offset| {
        monday
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MAX)
    })
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(kind: &'static str, id: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

enum PersistMessage {
    Save(Box<AppData>),
    Clear,
    Flush(mpsc::Sender<()>),
}

struct PersistWorker {
    sender: Option<mpsc::Sender<PersistMessage>>,
    thread: Option<JoinHandle<()>>,
}

impl PersistWorker {
    fn spawn(data_manager: DataManager) -> Result<Self, DataError> {
        let (sender, receiver) = mpsc::channel::<PersistMessage>();
        let thread = thread::Builder::new()
            .name("tempo-focus-persist".to_string())
            .spawn(move || {
                while let Ok(message) = receiver.recv() {
                    match message {
                        PersistMessage::Save(state) => {
                            if let Err(err) = data_manager.save_state(&state) {
                                tracing::warn!(error = %err, "failed to persist state");
                            }
                        }
                        PersistMessage::Clear => {
                            if let Err(err) = data_manager.clear_state() {
                                tracing::warn!(error = %err, "failed to clear persisted state");
                            }
                        }
                        PersistMessage::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })?;
        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
        })
    }

    fn submit(&self, message: PersistMessage) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(message).is_err() {
            tracing::warn!("persistence worker stopped; change kept in memory only");
        }
    }

    fn flush(&self) {
        let (ack, done) = mpsc::channel();
        self.submit(PersistMessage::Flush(ack));
        let _ = done.recv();
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("persistence worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppData, FocusSessionStore, SessionStore, StoreError, week_days};
    use crate::data_manager::DataManager;
    use crate::models::{
        CalendarView, ExpenseCategory, FocusSessionInput, FocusSessionPatch, PomodoroSettings,
        PomodoroSettingsPatch, TaskCategory, TaskInput, TaskPatch, TaskPriority, TaskStatusFilter,
        ThemeMode, TransactionInput, TransactionPatch, TransactionType,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).expect("valid date")
    }

    fn sample_task(title: &str, date: NaiveDate, start: Option<NaiveTime>) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: None,
            date,
            start_time: start,
            end_time: None,
            category: TaskCategory::Study,
            priority: TaskPriority::Medium,
            completed: false,
            is_recurring: false,
            recurring_pattern: None,
        }
    }

    fn sample_focus(tag: Option<&str>) -> FocusSessionInput {
        FocusSessionInput {
            date: day(2),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(9, 25, 0),
            focus_duration: 25,
            break_duration: 5,
            completed_pomodoros: 1,
            tag: tag.map(str::to_string),
        }
    }

    fn sample_transaction(amount: f64, kind: TransactionType) -> TransactionInput {
        TransactionInput {
            date: day(3),
            amount,
            kind,
            category: ExpenseCategory::Food,
            description: "lunch".to_string(),
            is_recurring: false,
            recurring_pattern: None,
        }
    }

    #[test]
    fn task_crud() {
        let store = SessionStore::in_memory();
        let task = store.add_task(sample_task("Read chapter 3", day(5), None));
        assert_eq!(store.tasks().len(), 1);

        let updated = store
            .update_task(
                &task.id,
                TaskPatch {
                    completed: Some(true),
                    priority: Some(TaskPriority::High),
                    ..TaskPatch::default()
                },
            )
            .expect("update task");
        assert!(updated.completed);
        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "Read chapter 3");

        store.delete_task(&task.id).expect("delete task");
        assert!(store.tasks().is_empty());
        assert!(matches!(
            store.delete_task(&task.id),
            Err(StoreError::NotFound { kind: "task", .. })
        ));
    }

    #[test]
    fn tasks_on_orders_by_start_time() {
        let store = SessionStore::in_memory();
        store.add_task(sample_task("late", day(5), NaiveTime::from_hms_opt(15, 0, 0)));
        store.add_task(sample_task("other day", day(6), None));
        store.add_task(sample_task("early", day(5), NaiveTime::from_hms_opt(8, 0, 0)));
        store.add_task(sample_task("untimed", day(5), None));

        let titles: Vec<String> = store
            .tasks_on(day(5))
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["early", "late", "untimed"]);
    }

    #[test]
    fn status_filter_and_category_groups() {
        let store = SessionStore::in_memory();
        let done = store.add_task(sample_task("Essay", day(5), None));
        store.toggle_task(&done.id).expect("toggle");
        let mut gig = sample_task("Invoice client", day(5), None);
        gig.category = TaskCategory::Freelance;
        store.add_task(gig);

        let completed = store.tasks_with_status(TaskStatusFilter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "Essay");
        assert_eq!(store.tasks_with_status(TaskStatusFilter::Incomplete).len(), 1);
        assert_eq!(store.tasks_with_status(TaskStatusFilter::All).len(), 2);

        let groups = store.tasks_by_category(TaskStatusFilter::Incomplete);
        let layout: Vec<(TaskCategory, usize)> = groups
            .iter()
            .map(|(category, tasks)| (*category, tasks.len()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (TaskCategory::Study, 0),
                (TaskCategory::Freelance, 1),
                (TaskCategory::Personal, 0),
                (TaskCategory::Break, 0),
            ]
        );
    }

    #[test]
    fn toggle_task_flips_completion() {
        let store = SessionStore::in_memory();
        let task = store.add_task(sample_task("Review notes", day(5), None));

        assert!(store.toggle_task(&task.id).expect("toggle on").completed);
        assert!(!store.toggle_task(&task.id).expect("toggle off").completed);
        assert!(matches!(
            store.toggle_task("missing"),
            Err(StoreError::NotFound { kind: "task", .. })
        ));
    }

    #[test]
    fn upcoming_tasks_window_skips_done_and_out_of_range() {
        let store = SessionStore::in_memory();
        store.add_task(sample_task("day 12", day(12), None));
        store.add_task(sample_task("yesterday", day(9), None));
        store.add_task(sample_task("today", day(10), None));
        store.add_task(sample_task("day 15", day(15), None));
        store.add_task(sample_task("day 16", day(16), None));
        let done = store.add_task(sample_task("done", day(11), None));
        store.toggle_task(&done.id).expect("toggle");

        let titles: Vec<String> = store
            .upcoming_tasks(day(10), 5)
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["today", "day 12", "day 15"]);
    }

    #[test]
    fn week_days_start_on_monday() {
        // 2025-01-08 is a Wednesday.
        let week = week_days(day(8));
        assert_eq!(week[0], day(6));
        assert_eq!(week[6], day(12));
        assert_eq!(week_days(day(6)), week);
        assert_eq!(week_days(day(12)), week);
    }

    #[test]
    fn open_replaces_out_of_range_settings_with_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = DataManager::new(dir.path()).expect("create manager");
        let mut data = AppData::default();
        data.pomodoro_settings.focus_duration = 0;
        data.tasks.push(sample_task("kept", day(5), None).into_task("task-1".to_string()));
        manager.save_state(&data).expect("save state");

        let store = SessionStore::open(manager).expect("open store");

        assert_eq!(store.pomodoro_settings(), PomodoroSettings::default());
        assert!(store.pomodoro_settings().validate().is_ok());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn appended_sessions_get_unique_ids() {
        let store = SessionStore::in_memory();
        let first = store.append_focus_session(sample_focus(Some("reading")));
        let second = store.append_focus_session(sample_focus(None));

        assert_ne!(first.id, second.id);
        assert_eq!(store.focus_sessions().len(), 2);
        assert_eq!(first.tag.as_deref(), Some("reading"));
    }

    #[test]
    fn session_patch_keeps_id() {
        let store = SessionStore::in_memory();
        let session = store.append_focus_session(sample_focus(None));

        let updated = store
            .update_focus_session(
                &session.id,
                FocusSessionPatch {
                    tag: Some("writing".to_string()),
                    completed_pomodoros: Some(0),
                    ..FocusSessionPatch::default()
                },
            )
            .expect("update session");

        assert_eq!(updated.id, session.id);
        assert_eq!(updated.tag.as_deref(), Some("writing"));
        assert_eq!(updated.completed_pomodoros, 1);
        assert!(matches!(
            store.update_focus_session("missing", FocusSessionPatch::default()),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn transaction_crud() {
        let store = SessionStore::in_memory();
        let income = store.add_transaction(sample_transaction(1200.0, TransactionType::Income));
        store.add_transaction(sample_transaction(12.5, TransactionType::Expense));

        let updated = store
            .update_transaction(
                &income.id,
                TransactionPatch {
                    amount: Some(1500.0),
                    category: Some(ExpenseCategory::Freelance),
                    ..TransactionPatch::default()
                },
            )
            .expect("update transaction");
        assert_eq!(updated.amount, 1500.0);
        assert_eq!(updated.category, ExpenseCategory::Freelance);

        store.delete_transaction(&income.id).expect("delete");
        assert_eq!(store.transactions().len(), 1);
        assert!(store.delete_transaction(&income.id).is_err());
    }

    #[test]
    fn invalid_settings_keep_prior_value() {
        let store = SessionStore::in_memory();
        let err = store
            .update_pomodoro_settings(PomodoroSettingsPatch {
                focus_duration: Some(90),
                ..PomodoroSettingsPatch::default()
            })
            .expect_err("out of range");
        assert!(err.to_string().contains("focusDuration"));
        assert_eq!(store.pomodoro_settings().focus_duration, 25);

        let updated = store
            .update_pomodoro_settings(PomodoroSettingsPatch {
                focus_duration: Some(50),
                ..PomodoroSettingsPatch::default()
            })
            .expect("valid update");
        assert_eq!(updated.focus_duration, 50);
        assert_eq!(store.pomodoro_settings().focus_duration, 50);
    }

    #[test]
    fn preferences_roundtrip() {
        let store = SessionStore::in_memory();
        store.set_theme_mode(ThemeMode::Dark);
        store.set_calendar_view(CalendarView::Week);
        assert_eq!(store.theme_mode(), ThemeMode::Dark);
        assert_eq!(store.calendar_view(), CalendarView::Week);
    }

    #[test]
    fn export_json_uses_camel_case_layout() {
        let store = SessionStore::in_memory();
        store.append_focus_session(sample_focus(Some("reading")));
        let json = store.export_json().expect("export");

        let value: serde_json::Value = serde_json::from_str(&json).expect("parse export");
        assert_eq!(value["pomodoroSettings"]["sessionsBeforeLongBreak"], 4);
        assert_eq!(value["focusSessions"][0]["focusDuration"], 25);
        assert_eq!(value["focusSessions"][0]["tag"], "reading");
    }

    #[test]
    fn in_memory_store_cannot_export_backup() {
        let store = SessionStore::in_memory();
        assert!(matches!(
            store.export_backup(day(1)),
            Err(StoreError::NotPersistent)
        ));
    }

    #[test]
    fn persisted_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = DataManager::new(dir.path()).expect("create manager");
        {
            let store = SessionStore::open(manager.clone()).expect("open store");
            store.append_focus_session(sample_focus(Some("reading")));
            store.add_task(sample_task("Plan week", day(6), None));
            store.flush();
        }

        let reopened = SessionStore::open(manager).expect("reopen store");
        assert_eq!(reopened.focus_sessions().len(), 1);
        assert_eq!(reopened.tasks().len(), 1);
    }

    #[test]
    fn reset_all_clears_memory_and_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = DataManager::new(dir.path()).expect("create manager");
        let store = SessionStore::open(manager.clone()).expect("open store");
        store.append_focus_session(sample_focus(None));
        store.flush();
        assert!(manager.state_path().exists());

        store.reset_all();
        store.flush();

        assert_eq!(store.snapshot(), AppData::default());
        assert!(!manager.state_path().exists());
    }

    #[test]
    fn export_backup_writes_snapshot() {
        let dir = tempfile::tempdir().expect("temp dir");
        let manager = DataManager::new(dir.path()).expect("create manager");
        let store = SessionStore::open(manager).expect("open store");
        store.append_focus_session(sample_focus(None));

        let path = store.export_backup(day(9)).expect("backup");
        let contents = std::fs::read_to_string(path).expect("read backup");
        let data: AppData = serde_json::from_str(&contents).expect("parse backup");
        assert_eq!(data.focus_sessions.len(), 1);
    }
}
