use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub focus_duration: u32,
    pub break_duration: u32,
    pub completed_pomodoros: u32,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSessionInput {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub focus_duration: u32,
    pub break_duration: u32,
    pub completed_pomodoros: u32,
    pub tag: Option<String>,
}

impl FocusSessionInput {
    pub fn into_session(self, id: String) -> FocusSession {
        FocusSession {
            id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            focus_duration: self.focus_duration,
            break_duration: self.break_duration,
            completed_pomodoros: self.completed_pomodoros.max(1),
            tag: self.tag,
        }
    }
}

/// Corrective edit of a recorded session. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusSessionPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub focus_duration: Option<u32>,
    pub break_duration: Option<u32>,
    pub completed_pomodoros: Option<u32>,
    pub tag: Option<String>,
}

impl FocusSession {
    pub fn apply(&mut self, patch: FocusSessionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if patch.start_time.is_some() {
            self.start_time = patch.start_time;
        }
        if patch.end_time.is_some() {
            self.end_time = patch.end_time;
        }
        if let Some(minutes) = patch.focus_duration {
            self.focus_duration = minutes;
        }
        if let Some(minutes) = patch.break_duration {
            self.break_duration = minutes;
        }
        if let Some(count) = patch.completed_pomodoros {
            self.completed_pomodoros = count.max(1);
        }
        if patch.tag.is_some() {
            self.tag = patch.tag;
        }
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_duration.saturating_mul(self.completed_pomodoros)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    pub focus_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    pub sessions_before_long_break: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            sessions_before_long_break: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSettingsPatch {
    pub focus_duration: Option<u32>,
    pub break_duration: Option<u32>,
    pub long_break_duration: Option<u32>,
    pub sessions_before_long_break: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub completed: bool,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
}

impl TaskInput {
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            category: self.category,
            priority: self.priority,
            completed: self.completed,
            is_recurring: self.is_recurring,
            recurring_pattern: self.recurring_pattern,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
    pub completed: Option<bool>,
    pub is_recurring: Option<bool>,
    pub recurring_pattern: Option<String>,
}

impl Task {
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if patch.start_time.is_some() {
            self.start_time = patch.start_time;
        }
        if patch.end_time.is_some() {
            self.end_time = patch.end_time;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(recurring) = patch.is_recurring {
            self.is_recurring = recurring;
        }
        if patch.recurring_pattern.is_some() {
            self.recurring_pattern = patch.recurring_pattern;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Study,
    Freelance,
    Break,
    Personal,
}

impl TaskCategory {
    /// Display order of the task board columns.
    pub const ALL: [TaskCategory; 4] = [
        TaskCategory::Study,
        TaskCategory::Freelance,
        TaskCategory::Personal,
        TaskCategory::Break,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl TaskStatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskStatusFilter::All => true,
            TaskStatusFilter::Completed => task.completed,
            TaskStatusFilter::Incomplete => !task.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: ExpenseCategory,
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: ExpenseCategory,
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
}

impl TransactionInput {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            description: self.description,
            is_recurring: self.is_recurring,
            recurring_pattern: self.recurring_pattern,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurring_pattern: Option<String>,
}

impl Transaction {
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(recurring) = patch.is_recurring {
            self.is_recurring = recurring;
        }
        if patch.recurring_pattern.is_some() {
            self.recurring_pattern = patch.recurring_pattern;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Education,
    Freelance,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Housing,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Freelance,
        ExpenseCategory::Other,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(self) -> bool {
        matches!(self, TimerMode::Break | TimerMode::LongBreak)
    }

    pub fn interval_minutes(self, settings: &PomodoroSettings) -> u32 {
        match self {
            TimerMode::Focus => settings.focus_duration,
            TimerMode::Break => settings.break_duration,
            TimerMode::LongBreak => settings.long_break_duration,
        }
    }

    pub fn interval_seconds(self, settings: &PomodoroSettings) -> u32 {
        self.interval_minutes(settings).saturating_mul(60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub is_running: bool,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub progress_percent: f64,
    pub display: String,
    pub completed_intervals: u32,
    pub tag: Option<String>,
}
