use crate::models::{PomodoroSettings, PomodoroSettingsPatch};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const FOCUS_DURATION_RANGE: RangeInclusive<u32> = 5..=60;
pub const BREAK_DURATION_RANGE: RangeInclusive<u32> = 1..=15;
pub const LONG_BREAK_DURATION_RANGE: RangeInclusive<u32> = 5..=30;
pub const SESSIONS_BEFORE_LONG_BREAK_RANGE: RangeInclusive<u32> = 1..=8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl PomodoroSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("focusDuration", self.focus_duration, FOCUS_DURATION_RANGE)?;
        check("breakDuration", self.break_duration, BREAK_DURATION_RANGE)?;
        check(
            "longBreakDuration",
            self.long_break_duration,
            LONG_BREAK_DURATION_RANGE,
        )?;
        check(
            "sessionsBeforeLongBreak",
            self.sessions_before_long_break,
            SESSIONS_BEFORE_LONG_BREAK_RANGE,
        )
    }

    /// Merges `patch` onto a copy and validates the result. `self` is left
    /// untouched when the merged value is rejected.
    pub fn apply(&mut self, patch: PomodoroSettingsPatch) -> Result<(), SettingsError> {
        let merged = self.merged(patch);
        merged.validate()?;
        *self = merged;
        Ok(())
    }

    pub fn merged(&self, patch: PomodoroSettingsPatch) -> Self {
        Self {
            focus_duration: patch.focus_duration.unwrap_or(self.focus_duration),
            break_duration: patch.break_duration.unwrap_or(self.break_duration),
            long_break_duration: patch
                .long_break_duration
                .unwrap_or(self.long_break_duration),
            sessions_before_long_break: patch
                .sessions_before_long_break
                .unwrap_or(self.sessions_before_long_break),
        }
    }
}

fn check(field: &'static str, value: u32, range: RangeInclusive<u32>) -> Result<(), SettingsError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(SettingsError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::SettingsError;
    use crate::models::{PomodoroSettings, PomodoroSettingsPatch};

    #[test]
    fn defaults_are_valid() {
        PomodoroSettings::default()
            .validate()
            .expect("defaults within bounds");
    }

    #[test]
    fn apply_merges_partial_update() {
        let mut settings = PomodoroSettings::default();
        settings
            .apply(PomodoroSettingsPatch {
                focus_duration: Some(50),
                sessions_before_long_break: Some(2),
                ..PomodoroSettingsPatch::default()
            })
            .expect("apply patch");

        assert_eq!(settings.focus_duration, 50);
        assert_eq!(settings.break_duration, 5);
        assert_eq!(settings.long_break_duration, 15);
        assert_eq!(settings.sessions_before_long_break, 2);
    }

    #[test]
    fn rejected_patch_keeps_prior_value() {
        let mut settings = PomodoroSettings::default();
        let err = settings
            .apply(PomodoroSettingsPatch {
                focus_duration: Some(30),
                break_duration: Some(0),
                ..PomodoroSettingsPatch::default()
            })
            .expect_err("zero break rejected");

        assert_eq!(
            err,
            SettingsError::OutOfRange {
                field: "breakDuration",
                value: 0,
                min: 1,
                max: 15,
            }
        );
        assert_eq!(settings, PomodoroSettings::default());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut settings = PomodoroSettings::default();
        settings
            .apply(PomodoroSettingsPatch {
                focus_duration: Some(60),
                break_duration: Some(1),
                long_break_duration: Some(30),
                sessions_before_long_break: Some(8),
            })
            .expect("upper and lower bounds accepted");

        let err = settings
            .apply(PomodoroSettingsPatch {
                sessions_before_long_break: Some(9),
                ..PomodoroSettingsPatch::default()
            })
            .expect_err("above bound");
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "sessionsBeforeLongBreak",
                ..
            }
        ));
        assert_eq!(settings.sessions_before_long_break, 8);
    }
}
