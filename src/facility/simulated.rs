//! A facility that always succeeds.

use super::LockFacility;
use tracing::debug;

/// Reports success for every call without touching the platform.
///
/// Useful when restricted mode is enforced by something outside this
/// process, or for running the bridge on a development machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFacility;

impl LockFacility for SimulatedFacility {
    fn name(&self) -> &str {
        "simulated"
    }

    fn acquire_lock(&mut self) -> Result<(), String> {
        debug!("simulated lock acquired");
        Ok(())
    }

    fn release_lock(&mut self) -> Result<(), String> {
        debug!("simulated lock released");
        Ok(())
    }
}
