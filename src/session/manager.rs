//! The lockdown session manager.

use super::types::{LockdownState, TransitionFailure, TransitionResult};
use crate::events::{Event, EventAction, EventLog};
use crate::facility::LockFacility;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// State and facility, always mutated together under one mutex.
struct Session {
    state: LockdownState,
    facility: Box<dyn LockFacility>,
}

/// Owns the lockdown state of one session and serializes its transitions.
///
/// The mutex is held across the facility call, so concurrent `enter`/`exit`
/// calls never double-acquire or double-release the platform lock and never
/// observe a half-finished transition.
pub struct LockdownSessionManager {
    session: Mutex<Session>,
    audit: Option<EventLog>,
}

impl LockdownSessionManager {
    /// Create a manager in the `Unlocked` state.
    pub fn new(facility: Box<dyn LockFacility>) -> Self {
        Self {
            session: Mutex::new(Session {
                state: LockdownState::Unlocked,
                facility,
            }),
            audit: None,
        }
    }

    /// Append an audit event for every transition that reaches the facility.
    pub fn with_audit_log(mut self, log: EventLog) -> Self {
        self.audit = Some(log);
        self
    }

    /// Current lockdown state.
    pub fn state(&self) -> LockdownState {
        self.lock_session().state
    }

    pub fn is_locked(&self) -> bool {
        self.state() == LockdownState::Locked
    }

    /// Enter lockdown.
    ///
    /// Succeeds immediately when already `Locked`. Otherwise asks the facility
    /// to acquire the lock and moves to `Locked` only if it reports success.
    pub fn enter(&self) -> TransitionResult {
        self.transition(
            EventAction::Enter,
            LockdownState::Locked,
            |facility| facility.acquire_lock(),
            TransitionFailure::acquisition,
        )
    }

    /// Exit lockdown.
    ///
    /// Succeeds immediately when already `Unlocked`. Otherwise asks the facility
    /// to release the lock and moves to `Unlocked` only if it reports success.
    pub fn exit(&self) -> TransitionResult {
        self.transition(
            EventAction::Exit,
            LockdownState::Unlocked,
            |facility| facility.release_lock(),
            TransitionFailure::release,
        )
    }

    fn transition(
        &self,
        action: EventAction,
        target: LockdownState,
        call: impl FnOnce(&mut dyn LockFacility) -> Result<(), String>,
        failure: fn(String) -> TransitionFailure,
    ) -> TransitionResult {
        let mut session = self.lock_session();

        if session.state == target {
            debug!(%action, state = %target, "already in target state, skipping facility call");
            return Ok(());
        }

        let facility_name = session.facility.name().to_string();
        let outcome = call(session.facility.as_mut()).map_err(failure);

        match &outcome {
            Ok(()) => {
                session.state = target;
                info!(%action, facility = %facility_name, state = %target, "lockdown transition succeeded");
            }
            Err(err) => {
                warn!(
                    %action,
                    facility = %facility_name,
                    state = %session.state,
                    kind = %err.kind,
                    detail = %err.detail,
                    "lockdown transition failed"
                );
            }
        }

        // Written while the session is still held so the log order matches the
        // order in which transitions were applied.
        self.record(action, &facility_name, &outcome);

        outcome
    }

    fn record(&self, action: EventAction, facility_name: &str, outcome: &TransitionResult) {
        let Some(log) = &self.audit else {
            return;
        };

        let event = Event::from_outcome(action, facility_name, outcome);
        if let Err(e) = log.append(&event) {
            warn!(error = %e, path = %log.path().display(), "failed to append audit event");
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        // A panic inside a facility call cannot leave `state` half-written:
        // it is only assigned after the call returns.
        self.session
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl std::fmt::Debug for LockdownSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockdownSessionManager")
            .field("state", &self.state())
            .field("audit", &self.audit)
            .finish()
    }
}
