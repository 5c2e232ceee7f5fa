//! Audit event log for lockdown transitions.
//!
//! Every transition that reaches the platform facility is appended to an
//! NDJSON file (one JSON object per line). Idempotent no-ops never reach the
//! facility and are not recorded.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `enter` or `exit`
//! - `actor`: `user@HOST` of the host process
//! - `facility`: name of the facility that was called
//! - `outcome`: `success` or `failure`
//! - `details`: freeform object (failure kind and detail on failure)
//!
//! ```no_run
//! use kioskctl::events::{Event, EventAction, EventLog};
//!
//! let log = EventLog::new("/var/lib/kioskctl/events.ndjson");
//! log.append(&Event::from_outcome(EventAction::Enter, "command", &Ok(())))?;
//! # Ok::<(), kioskctl::error::KioskError>(())
//! ```

use crate::error::{KioskError, Result};
use crate::session::TransitionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Transitions that can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Unlocked -> Locked
    Enter,
    /// Locked -> Unlocked
    Exit,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Enter => write!(f, "enter"),
            EventAction::Exit => write!(f, "exit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Success,
    Failure,
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    pub facility: String,
    pub outcome: EventOutcome,
    pub details: Value,
}

impl Event {
    /// Build an event from the result of a facility-backed transition.
    pub fn from_outcome(action: EventAction, facility: &str, result: &TransitionResult) -> Self {
        let (outcome, details) = match result {
            Ok(()) => (EventOutcome::Success, Value::Object(serde_json::Map::new())),
            Err(failure) => (
                EventOutcome::Failure,
                json!({
                    "kind": failure.kind.as_str(),
                    "detail": failure.detail,
                }),
            ),
        };

        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            facility: facility.to_string(),
            outcome,
            details,
        }
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            KioskError::AuditError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
pub(crate) fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only NDJSON audit file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event as one line, creating the file and its parent
    /// directory if needed, and sync it to disk.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                KioskError::AuditError(format!(
                    "failed to create events directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                KioskError::AuditError(format!(
                    "failed to open events file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            KioskError::AuditError(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        file.sync_all().map_err(|e| {
            KioskError::AuditError(format!(
                "failed to sync events file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Read all events back, in append order.
    pub fn read_all(&self) -> Result<Vec<Event>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            KioskError::AuditError(format!(
                "failed to read events file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    KioskError::AuditError(format!("failed to parse event line: {}", e))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransitionFailure;
    use tempfile::TempDir;

    #[test]
    fn test_success_event_has_empty_details() {
        let event = Event::from_outcome(EventAction::Enter, "simulated", &Ok(()));

        assert_eq!(event.action, EventAction::Enter);
        assert_eq!(event.outcome, EventOutcome::Success);
        assert_eq!(event.facility, "simulated");
        assert!(!event.actor.is_empty());
        assert_eq!(event.details, json!({}));
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_failure_event_carries_kind_and_detail() {
        let result = Err(TransitionFailure::release("policy violation"));
        let event = Event::from_outcome(EventAction::Exit, "command", &result);

        assert_eq!(event.outcome, EventOutcome::Failure);
        assert_eq!(
            event.details,
            json!({"kind": "lock_release_error", "detail": "policy violation"})
        );
    }

    #[test]
    fn test_ndjson_line_is_single_line() {
        let event = Event::from_outcome(EventAction::Exit, "simulated", &Ok(()));
        let line = event.to_ndjson_line().unwrap();

        assert!(!line.contains('\n'));
        assert!(line.contains("\"action\":\"exit\""));
        assert!(line.contains("\"outcome\":\"success\""));
    }

    #[test]
    fn test_append_creates_parent_directory_and_appends() {
        let temp_dir = TempDir::new().unwrap();
        let log = EventLog::new(temp_dir.path().join("audit").join("events.ndjson"));

        log.append(&Event::from_outcome(EventAction::Enter, "simulated", &Ok(())))
            .unwrap();
        log.append(&Event::from_outcome(EventAction::Exit, "simulated", &Ok(())))
            .unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));

        let events = log.read_all().unwrap();
        assert_eq!(events[0].action, EventAction::Enter);
        assert_eq!(events[1].action, EventAction::Exit);
    }

    #[test]
    fn test_append_fails_when_path_is_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log = EventLog::new(temp_dir.path());

        let err = log
            .append(&Event::from_outcome(EventAction::Enter, "simulated", &Ok(())))
            .unwrap_err();
        assert!(matches!(err, KioskError::AuditError(_)));
        assert!(err.to_string().contains("failed to open events file"));
    }
}
