//! Tests for the lockdown session manager.

use super::*;
use crate::events::{EventAction, EventLog, EventOutcome};
use crate::test_support::FakeFacility;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn manager_with_fake() -> (LockdownSessionManager, FakeFacility) {
    let fake = FakeFacility::new();
    (LockdownSessionManager::new(fake.boxed()), fake)
}

#[test]
fn test_initial_state_is_unlocked() {
    let (manager, fake) = manager_with_fake();

    assert_eq!(manager.state(), LockdownState::Unlocked);
    assert!(!manager.is_locked());
    assert_eq!(fake.acquire_calls(), 0);
    assert_eq!(fake.release_calls(), 0);
}

#[test]
fn test_enter_twice_acquires_once() {
    let (manager, fake) = manager_with_fake();

    assert_eq!(manager.enter(), Ok(()));
    assert_eq!(manager.enter(), Ok(()));

    assert_eq!(manager.state(), LockdownState::Locked);
    assert_eq!(fake.acquire_calls(), 1);
}

#[test]
fn test_exit_while_unlocked_skips_release() {
    let (manager, fake) = manager_with_fake();

    assert_eq!(manager.exit(), Ok(()));

    assert_eq!(manager.state(), LockdownState::Unlocked);
    assert_eq!(fake.release_calls(), 0);
}

#[test]
fn test_failed_acquire_leaves_unlocked() {
    let (manager, fake) = manager_with_fake();
    fake.fail_next_acquire("not whitelisted");

    let err = manager.enter().unwrap_err();

    assert_eq!(err.kind, FailureKind::LockAcquisitionError);
    assert_eq!(err.detail, "not whitelisted");
    assert_eq!(manager.state(), LockdownState::Unlocked);
}

#[test]
fn test_failed_release_leaves_locked() {
    let (manager, fake) = manager_with_fake();
    manager.enter().unwrap();
    fake.fail_next_release("device owner required");

    let err = manager.exit().unwrap_err();

    assert_eq!(err, TransitionFailure::release("device owner required"));
    assert_eq!(manager.state(), LockdownState::Locked);
}

#[test]
fn test_manager_usable_after_failure() {
    let (manager, fake) = manager_with_fake();
    fake.fail_next_acquire("busy");

    assert!(manager.enter().is_err());
    assert_eq!(manager.enter(), Ok(()));

    assert_eq!(manager.state(), LockdownState::Locked);
    assert_eq!(fake.acquire_calls(), 2);
}

#[test]
fn test_enter_exit_scenario() {
    let (manager, fake) = manager_with_fake();

    assert_eq!(manager.enter(), Ok(()));
    assert_eq!(manager.state(), LockdownState::Locked);

    assert_eq!(manager.enter(), Ok(()));
    assert_eq!(manager.state(), LockdownState::Locked);
    assert_eq!(fake.acquire_calls(), 1);

    fake.fail_next_release("policy violation");
    assert_eq!(
        manager.exit(),
        Err(TransitionFailure {
            kind: FailureKind::LockReleaseError,
            detail: "policy violation".to_string(),
        })
    );
    assert_eq!(manager.state(), LockdownState::Locked);

    assert_eq!(manager.exit(), Ok(()));
    assert_eq!(manager.state(), LockdownState::Unlocked);
    assert_eq!(fake.release_calls(), 2);
}

#[test]
fn test_state_tracks_last_successful_transition() {
    let (manager, fake) = manager_with_fake();

    // (call enter?, fail?) pairs, with the expected state after each.
    let steps = [
        (true, false, LockdownState::Locked),
        (false, true, LockdownState::Locked),
        (false, false, LockdownState::Unlocked),
        (true, true, LockdownState::Unlocked),
        (false, false, LockdownState::Unlocked),
        (true, false, LockdownState::Locked),
        (true, true, LockdownState::Locked),
    ];

    for (i, (enter, fail, expected)) in steps.into_iter().enumerate() {
        if fail {
            if enter {
                fake.fail_next_acquire("scripted");
            } else {
                fake.fail_next_release("scripted");
            }
        }
        let _ = if enter { manager.enter() } else { manager.exit() };
        assert_eq!(manager.state(), expected, "step {}", i);
    }
}

#[test]
fn test_concurrent_enter_acquires_once() {
    let fake = FakeFacility::new();
    let manager = Arc::new(LockdownSessionManager::new(fake.boxed()));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.enter())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(()));
    }

    assert_eq!(manager.state(), LockdownState::Locked);
    assert_eq!(fake.acquire_calls(), 1);
}

#[test]
fn test_concurrent_toggles_never_double_transition() {
    let fake = FakeFacility::new();
    let manager = Arc::new(LockdownSessionManager::new(fake.boxed()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        manager.enter().unwrap();
                    } else {
                        manager.exit().unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Acquisitions and releases alternate, so they differ by at most one and
    // the final state says which came last.
    let acquires = fake.acquire_calls();
    let releases = fake.release_calls();
    match manager.state() {
        LockdownState::Locked => assert_eq!(acquires, releases + 1),
        LockdownState::Unlocked => assert_eq!(acquires, releases),
    }
}

#[test]
fn test_audit_log_records_facility_calls_only() {
    let temp_dir = TempDir::new().unwrap();
    let log = EventLog::new(temp_dir.path().join("events.ndjson"));
    let fake = FakeFacility::new();
    let manager = LockdownSessionManager::new(fake.boxed()).with_audit_log(log.clone());

    manager.enter().unwrap();
    manager.enter().unwrap();
    fake.fail_next_release("policy violation");
    manager.exit().unwrap_err();
    manager.exit().unwrap();
    manager.exit().unwrap();

    let events = log.read_all().unwrap();
    let summary: Vec<_> = events.iter().map(|e| (e.action, e.outcome)).collect();
    assert_eq!(
        summary,
        vec![
            (EventAction::Enter, EventOutcome::Success),
            (EventAction::Exit, EventOutcome::Failure),
            (EventAction::Exit, EventOutcome::Success),
        ]
    );
    assert_eq!(events[1].details["detail"], "policy violation");
    assert_eq!(events[1].facility, "fake");
}

#[test]
fn test_audit_failure_does_not_change_result() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be opened for append.
    let log = EventLog::new(temp_dir.path());
    let fake = FakeFacility::new();
    let manager = LockdownSessionManager::new(fake.boxed()).with_audit_log(log);

    assert_eq!(manager.enter(), Ok(()));
    assert_eq!(manager.state(), LockdownState::Locked);
}
