use crate::data_manager::DataError;
use crate::settings::SettingsError;
use crate::store::StoreError;
use crate::timer_engine::TimerError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppErrorKind {
    Settings,
    Data,
    Timer,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppErrorPayload {
    pub kind: AppErrorKind,
    pub message: String,
    pub detail: Option<String>,
    pub recoverable: bool,
}

/// A user-facing notice. Nothing in this crate is fatal, so every notice
/// built from a module error is recoverable.
#[derive(Debug, Clone)]
pub struct AppError {
    kind: AppErrorKind,
    message: String,
    detail: Option<String>,
    recoverable: bool,
}

impl AppError {
    pub fn new(kind: AppErrorKind, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            recoverable,
        }
    }

    pub fn with_detail(
        kind: AppErrorKind,
        message: impl Into<String>,
        detail: impl Into<String>,
        recoverable: bool,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: Some(detail.into()),
            recoverable,
        }
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    pub fn payload(&self) -> AppErrorPayload {
        AppErrorPayload {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            recoverable: self.recoverable,
        }
    }

    /// Logs the notice and hands back the message to show the user.
    pub fn report(&self) -> String {
        match self.detail() {
            Some(detail) => tracing::warn!(kind = ?self.kind, %detail, "{}", self.message),
            None => tracing::warn!(kind = ?self.kind, "{}", self.message),
        }
        self.message.clone()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

impl From<TimerError> for AppError {
    fn from(error: TimerError) -> Self {
        let detail = error.to_string();
        let message = match error {
            TimerError::AlreadyRunning => "The timer is already running".to_string(),
            TimerError::NotRunning => "The timer is not running".to_string(),
            TimerError::NotFocusing => "Only a focus interval can be completed early".to_string(),
            TimerError::SessionTooShort {
                minimum_seconds, ..
            } => format!(
                "Session too short to record. Focus for at least {} before completing",
                describe_seconds(minimum_seconds)
            ),
            TimerError::StateUnavailable => "The timer is unavailable, try again".to_string(),
        };
        Self::with_detail(AppErrorKind::Timer, message, detail, true)
    }
}

impl From<SettingsError> for AppError {
    fn from(error: SettingsError) -> Self {
        let detail = error.to_string();
        let SettingsError::OutOfRange {
            field, min, max, ..
        } = error;
        let message = format!(
            "{} must be between {min} and {max}; previous value kept",
            describe_field(field)
        );
        Self::with_detail(AppErrorKind::Settings, message, detail, true)
    }
}

impl From<DataError> for AppError {
    fn from(error: DataError) -> Self {
        let detail = error.to_string();
        let message = match error {
            DataError::Io(_) => "Failed to read or write saved data",
            DataError::Serde(_) => "Saved data could not be understood",
        };
        Self::with_detail(AppErrorKind::Data, message, detail, true)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Settings(inner) => inner.into(),
            StoreError::Data(inner) => inner.into(),
            StoreError::NotFound { kind, id } => Self::with_detail(
                AppErrorKind::Store,
                format!("That {kind} no longer exists"),
                id,
                true,
            ),
            StoreError::NotPersistent => Self::new(
                AppErrorKind::Store,
                "Backups need on-disk storage",
                true,
            ),
        }
    }
}

fn describe_field(field: &str) -> &str {
    match field {
        "focusDuration" => "Focus duration",
        "breakDuration" => "Short break",
        "longBreakDuration" => "Long break",
        "sessionsBeforeLongBreak" => "Sessions before long break",
        other => other,
    }
}

fn describe_seconds(seconds: u32) -> String {
    match seconds {
        60 => "one minute".to_string(),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{s} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, AppErrorKind};
    use crate::settings::SettingsError;
    use crate::store::StoreError;
    use crate::timer_engine::TimerError;

    #[test]
    fn too_short_session_becomes_recoverable_notice() {
        let error = AppError::from(TimerError::SessionTooShort {
            elapsed_seconds: 12,
            minimum_seconds: 60,
        });
        assert_eq!(error.kind(), AppErrorKind::Timer);
        assert!(error.is_recoverable());
        assert_eq!(
            error.message(),
            "Session too short to record. Focus for at least one minute before completing"
        );
        assert!(error.detail().is_some_and(|detail| detail.contains("12s")));
    }

    #[test]
    fn settings_error_names_field() {
        let error = AppError::from(SettingsError::OutOfRange {
            field: "breakDuration",
            value: 40,
            min: 1,
            max: 15,
        });
        let payload = error.payload();
        assert_eq!(payload.kind, AppErrorKind::Settings);
        assert_eq!(
            payload.message,
            "Short break must be between 1 and 15; previous value kept"
        );
    }

    #[test]
    fn store_errors_unwrap_nested_kinds() {
        let error = AppError::from(StoreError::Settings(SettingsError::OutOfRange {
            field: "focusDuration",
            value: 0,
            min: 5,
            max: 60,
        }));
        assert_eq!(error.kind(), AppErrorKind::Settings);

        let missing = AppError::from(StoreError::NotFound {
            kind: "task",
            id: "abc".to_string(),
        });
        assert_eq!(missing.kind(), AppErrorKind::Store);
        assert_eq!(missing.detail(), Some("abc"));
    }

    #[test]
    fn payload_serializes_lowercase_kind() {
        let payload = AppError::new(AppErrorKind::Data, "boom", true).payload();
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["kind"], "data");
        assert_eq!(value["recoverable"], true);
    }
}
