use crate::models::FocusSession;
use chrono::{Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStats {
    pub sessions_count: u32,
    pub completed_pomodoros: u32,
    pub focus_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFocus {
    pub date: NaiveDate,
    pub minutes: u32,
}

pub fn calculate_focus_stats<'a>(
    sessions: impl IntoIterator<Item = &'a FocusSession>,
) -> FocusStats {
    let mut stats = FocusStats::default();
    for session in sessions {
        stats.sessions_count = stats.sessions_count.saturating_add(1);
        stats.completed_pomodoros = stats
            .completed_pomodoros
            .saturating_add(session.completed_pomodoros);
        stats.focus_minutes = stats.focus_minutes.saturating_add(session.focus_minutes());
    }
    stats
}

pub fn focus_stats_for_day(sessions: &[FocusSession], date: NaiveDate) -> FocusStats {
    calculate_focus_stats(sessions.iter().filter(|session| session.date == date))
}

/// Sessions dated within `from..=to`.
pub fn sessions_in_range(
    sessions: &[FocusSession],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&FocusSession> {
    sessions
        .iter()
        .filter(|session| session.date >= from && session.date <= to)
        .collect()
}

/// Focus minutes for each of the `days` days ending on `last_day`, oldest
/// first. Days without sessions report zero.
pub fn daily_focus_minutes(
    sessions: &[FocusSession],
    last_day: NaiveDate,
    days: u32,
) -> Vec<DailyFocus> {
    (0..days)
        .rev()
        .filter_map(|offset| last_day.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| DailyFocus {
            date,
            minutes: focus_stats_for_day(sessions, date).focus_minutes,
        })
        .collect()
}
