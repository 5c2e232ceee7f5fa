use crate::facility::LockFacility;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Script {
    acquire_results: VecDeque<Result<(), String>>,
    release_results: VecDeque<Result<(), String>>,
    acquire_calls: usize,
    release_calls: usize,
}

/// Scripted facility for tests.
///
/// Calls consume queued results in order and succeed once the queue is empty.
/// Clones share the same script, so a test keeps one handle for assertions
/// after handing the other to a manager.
#[derive(Clone, Default)]
pub(crate) struct FakeFacility {
    script: Arc<Mutex<Script>>,
}

impl FakeFacility {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_next_acquire(&self, detail: &str) {
        self.script()
            .acquire_results
            .push_back(Err(detail.to_string()));
    }

    pub(crate) fn fail_next_release(&self, detail: &str) {
        self.script()
            .release_results
            .push_back(Err(detail.to_string()));
    }

    pub(crate) fn acquire_calls(&self) -> usize {
        self.script().acquire_calls
    }

    pub(crate) fn release_calls(&self) -> usize {
        self.script().release_calls
    }

    pub(crate) fn boxed(&self) -> Box<dyn LockFacility> {
        Box::new(self.clone())
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl LockFacility for FakeFacility {
    fn name(&self) -> &str {
        "fake"
    }

    fn acquire_lock(&mut self) -> Result<(), String> {
        let mut script = self.script();
        script.acquire_calls += 1;
        script.acquire_results.pop_front().unwrap_or(Ok(()))
    }

    fn release_lock(&mut self) -> Result<(), String> {
        let mut script = self.script();
        script.release_calls += 1;
        script.release_results.pop_front().unwrap_or(Ok(()))
    }
}
